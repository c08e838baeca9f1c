// SPDX-License-Identifier: GPL-3.0-only

//! The keyboard orchestrator.
//!
//! [`VirtualKeyboard`] owns every piece of keyboard state and is driven by
//! typed [`Message`]s, the same way an application model is driven by its
//! update loop. Each message runs one synchronous transition:
//!
//! ```text
//! FocusIn/FocusOut ──► FocusController ──► effects (visibility, layout, shift)
//! HardwareKey ───────► dispatch_hardware ─┐
//! Key (virtual tap) ──────────────────────┴► KeyIntent ──► validation ──► editor
//! Press/Tick ────────► ContinuousPress ──► backspace repeats
//! AfterLayout ───────► ViewportShift measures the focused field
//! ```
//!
//! Hosts report the current instant through [`VirtualKeyboard::update_at`];
//! [`VirtualKeyboard::next_deadline`] tells them when the next `Tick` is due.

use std::fmt;
use std::time::Instant;

use crate::config::KeyboardConfig;
use crate::editor;
use crate::field::{FieldHandle, InputTypeClass};
use crate::focus::{FocusController, FocusEffect};
use crate::input::{
    ContinuousPress, HardwareKey, KeyDispatch, KeyIntent, PressEvent, dispatch_hardware,
};
use crate::layout::{KeyGrid, LayoutState, LayoutType};
use crate::validation::is_allowed;
use crate::viewport::{ViewportHost, ViewportShift};

// ============================================================================
// Callbacks
// ============================================================================

type VisibilityCallback = Box<dyn FnMut(bool)>;
type EnterCallback = Box<dyn FnMut()>;
type ChangeCallback = Box<dyn FnMut(&str)>;
type Validator = Box<dyn Fn(&str) -> bool>;

/// Observers and the custom validator.
#[derive(Default)]
pub struct Callbacks {
    on_visibility_change: Option<VisibilityCallback>,
    on_enter_click: Option<EnterCallback>,
    on_change: Option<ChangeCallback>,
    validate: Option<Validator>,
}

impl Callbacks {
    /// Creates an empty set of callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the new visibility whenever the panel is shown or hidden.
    #[must_use]
    pub fn on_visibility_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_visibility_change = Some(Box::new(callback));
        self
    }

    /// Called after an Enter commit.
    #[must_use]
    pub fn on_enter_click(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_enter_click = Some(Box::new(callback));
        self
    }

    /// Called with the field value after every applied edit.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Extra validation of the prospective value, checked before the
    /// built-in rules. Both must pass.
    #[must_use]
    pub fn validate(mut self, validator: impl Fn(&str) -> bool + 'static) -> Self {
        self.validate = Some(Box::new(validator));
        self
    }

    fn visibility_changed(&mut self, visible: bool) {
        if let Some(callback) = &mut self.on_visibility_change {
            callback(visible);
        }
    }

    fn enter_clicked(&mut self) {
        if let Some(callback) = &mut self.on_enter_click {
            callback();
        }
    }

    fn changed(&mut self, value: &str) {
        if let Some(callback) = &mut self.on_change {
            callback(value);
        }
    }

    fn accepts(&self, value: &str) -> bool {
        self.validate.as_ref().is_none_or(|validate| validate(value))
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_visibility_change", &self.on_visibility_change.is_some())
            .field("on_enter_click", &self.on_enter_click.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("validate", &self.validate.is_some())
            .finish()
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Input to the keyboard.
#[derive(Clone)]
pub enum Message {
    /// Focus entered a host field.
    FocusIn(FieldHandle),
    /// Focus left a host field.
    FocusOut(FieldHandle),
    /// A hardware keydown.
    HardwareKey(HardwareKey),
    /// A virtual key tap.
    Key(KeyIntent),
    /// A gesture on the repeating backspace key.
    Press(PressEvent),
    /// Timer tick for key repeats and shift cleanup.
    Tick,
    /// The host finished a layout pass.
    AfterLayout,
    /// Enables or disables the keyboard.
    SetEnabled(bool),
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FocusIn(field) => write!(f, "FocusIn({:?})", field.borrow().id()),
            Self::FocusOut(field) => write!(f, "FocusOut({:?})", field.borrow().id()),
            Self::HardwareKey(key) => write!(f, "HardwareKey({key:?})"),
            Self::Key(intent) => write!(f, "Key({intent:?})"),
            Self::Press(event) => write!(f, "Press({event:?})"),
            Self::Tick => f.write_str("Tick"),
            Self::AfterLayout => f.write_str("AfterLayout"),
            Self::SetEnabled(enabled) => write!(f, "SetEnabled({enabled})"),
        }
    }
}

/// What the host must do with the native event behind a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response {
    /// Suppress the event's default action.
    pub prevent_default: bool,
}

impl Response {
    const PASS: Self = Self {
        prevent_default: false,
    };
    const HANDLED: Self = Self {
        prevent_default: true,
    };
}

// ============================================================================
// VirtualKeyboard
// ============================================================================

/// An on-screen keyboard bound to the host's focused field.
#[derive(Debug)]
pub struct VirtualKeyboard {
    config: KeyboardConfig,
    callbacks: Callbacks,
    focus: FocusController,
    layout: LayoutState,
    press: ContinuousPress,
    viewport: ViewportShift,
}

impl VirtualKeyboard {
    /// Creates a keyboard with the given configuration and callbacks.
    #[must_use]
    pub fn new(config: KeyboardConfig, callbacks: Callbacks) -> Self {
        Self {
            focus: FocusController::new(config.enabled),
            layout: LayoutState::new(config.default_layout),
            press: ContinuousPress::new(config.press.clone()),
            viewport: ViewportShift::new(),
            config,
            callbacks,
        }
    }

    /// Handles a message at the current instant.
    pub fn update(&mut self, message: Message, host: &mut dyn ViewportHost) -> Response {
        self.update_at(message, Instant::now(), host)
    }

    /// Handles a message at `now`.
    pub fn update_at(
        &mut self,
        message: Message,
        now: Instant,
        host: &mut dyn ViewportHost,
    ) -> Response {
        tracing::trace!("keyboard message: {message:?}");

        match message {
            Message::FocusIn(field) => {
                let effects = self.focus.focus_in(&field);
                self.apply_effects(effects, now, host);
                Response::PASS
            }

            Message::FocusOut(field) => {
                let effects = self.focus.focus_out(&field);
                self.apply_effects(effects, now, host);
                Response::PASS
            }

            Message::HardwareKey(key) => {
                if self.focus.focused_field().is_none() {
                    return Response::PASS;
                }
                match dispatch_hardware(&key) {
                    KeyDispatch::Handled(intent) => {
                        self.apply_intent(intent, now, host);
                        Response::HANDLED
                    }
                    KeyDispatch::PassThrough => Response::PASS,
                }
            }

            Message::Key(intent) => {
                if self.focus.focused_field().is_none() {
                    tracing::trace!("virtual key ignored: no focused field");
                    return Response::PASS;
                }
                self.apply_intent(intent, now, host);
                Response::HANDLED
            }

            Message::Press(event) => {
                let starts = matches!(event, PressEvent::PointerDown | PressEvent::TouchStart);
                if starts && self.focus.focused_field().is_none() {
                    return Response::PASS;
                }

                let response = self.press.handle(event, now);
                for _ in 0..response.fires {
                    self.backspace();
                }
                Response {
                    prevent_default: response.prevent_default,
                }
            }

            Message::Tick => {
                let repeats = self.press.poll(now);
                for _ in 0..repeats {
                    self.backspace();
                }
                self.viewport.run_cleanup(now, host);
                Response::PASS
            }

            Message::AfterLayout => {
                self.viewport.after_layout(now, host);
                Response::PASS
            }

            Message::SetEnabled(enabled) => {
                self.config.enabled = enabled;
                let effects = self.focus.set_enabled(enabled);
                self.apply_effects(effects, now, host);
                Response::PASS
            }
        }
    }

    // ------------------------------------------------------------------------
    // State accessors
    // ------------------------------------------------------------------------

    /// The renderable key grid for the current layout and caps state.
    pub fn key_grid(&self) -> KeyGrid {
        KeyGrid::build(&self.layout)
    }

    /// Whether the panel is shown.
    pub fn is_visible(&self) -> bool {
        self.focus.is_visible()
    }

    /// Whether focus events open the keyboard.
    pub fn is_enabled(&self) -> bool {
        self.focus.is_enabled()
    }

    /// Active layout.
    pub fn layout(&self) -> LayoutType {
        self.layout.layout()
    }

    /// Whether caps lock is on.
    pub fn caps_lock(&self) -> bool {
        self.layout.caps_lock()
    }

    /// Input type of the focused field.
    pub fn input_type(&self) -> Option<InputTypeClass> {
        self.focus.input_type()
    }

    /// The focused field, if any.
    pub fn focused_field(&self) -> Option<FieldHandle> {
        self.focus.focused_field()
    }

    /// Current configuration.
    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    /// Class tokens of the keyboard container.
    pub fn container_class(&self) -> String {
        self.config.container_class()
    }

    /// Viewport shift state.
    pub fn viewport(&self) -> &ViewportShift {
        &self.viewport
    }

    /// When the next `Tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.press.next_deadline(), self.viewport.next_cleanup()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    fn apply_effects(&mut self, effects: Vec<FocusEffect>, now: Instant, host: &mut dyn ViewportHost) {
        for effect in effects {
            match effect {
                FocusEffect::VisibilityChanged(visible) => {
                    self.callbacks.visibility_changed(visible);
                }
                FocusEffect::SessionOpened { class, .. } => {
                    self.press.stop();
                    self.layout.reset_for(class);
                }
                FocusEffect::SessionClosed => self.press.stop(),
                FocusEffect::ShiftIntoView(field) => self.viewport.request(field),
                FocusEffect::ResetShift => self.viewport.reset(now, host),
            }
        }
    }

    fn apply_intent(&mut self, intent: KeyIntent, now: Instant, host: &mut dyn ViewportHost) {
        match intent {
            KeyIntent::Character(c) => {
                let mut buf = [0u8; 4];
                self.insert(c.encode_utf8(&mut buf));
            }
            KeyIntent::Space => self.insert(" "),
            KeyIntent::Backspace => self.backspace(),
            KeyIntent::Enter => self.enter(now, host),
            KeyIntent::CapsToggle => {
                self.layout.toggle_caps();
            }
            KeyIntent::LayoutToggle => {
                self.layout.toggle_layout();
            }
        }
    }

    fn insert(&mut self, text: &str) {
        let (Some(field), Some(class)) = (self.focus.focused_field(), self.focus.input_type())
        else {
            return;
        };

        let prospective = editor::prospective_value(&*field.borrow(), text);
        if !self.callbacks.accepts(&prospective) {
            tracing::debug!("keystroke {text:?} rejected by custom validator");
            return;
        }
        if !is_allowed(&prospective, class) {
            tracing::debug!("keystroke {text:?} not allowed in {class} field");
            return;
        }

        if editor::insert_text(&mut *field.borrow_mut(), text) {
            let value = field.borrow().value();
            self.callbacks.changed(&value);
        }
    }

    fn backspace(&mut self) {
        let Some(field) = self.focus.focused_field() else {
            return;
        };
        if field.borrow().value().is_empty() {
            return;
        }

        if editor::backspace(&mut *field.borrow_mut()) {
            let value = field.borrow().value();
            self.callbacks.changed(&value);
        }
    }

    /// Hides the panel, blurs the field, submits its form and resets the
    /// viewport shift.
    fn enter(&mut self, now: Instant, host: &mut dyn ViewportHost) {
        let (effects, field) = self.focus.commit();
        self.apply_effects(effects, now, host);

        if let Some(field) = field {
            field.borrow_mut().blur();
            if field.borrow_mut().submit_form() {
                tracing::debug!("form submitted on enter");
            }
        }

        self.callbacks.enter_clicked();
        self.viewport.reset(now, host);
    }
}

impl Default for VirtualKeyboard {
    fn default() -> Self {
        Self::new(KeyboardConfig::default(), Callbacks::default())
    }
}
