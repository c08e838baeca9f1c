// SPDX-License-Identifier: GPL-3.0-only

//! Demo application: a sign-up form driven by the virtual keyboard.
//!
//! Form fields are [`MemoryField`]s. The form sits in a scrollable, which
//! doubles as the shiftable content: a viewport shift is applied as a
//! scroll offset.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::LazyLock;
use std::time::Duration;

use cosmic::iced::keyboard::{self as iced_keyboard, Key, Modifiers, key::Named};
use cosmic::iced::widget::scrollable::{AbsoluteOffset, scroll_to};
use cosmic::iced::{Alignment, Length, Subscription, window};
use cosmic::prelude::*;
use cosmic::widget::{self, button, container};

use crate::app_settings;
use crate::config::KeyboardConfig;
use crate::field::{FieldHandle, FieldId, MemoryField, TextField, same_field};
use crate::fl;
use crate::input::HardwareKey;
use crate::keyboard::{self, Callbacks, VirtualKeyboard};
use crate::renderer::{KeyMessage, render_keyboard};
use crate::viewport::{ContentNode, NodeId, Positioning, ViewportHost};

/// Environment variable naming an optional keyboard config file.
pub const CONFIG_ENV: &str = "FIELDBOARD_CONFIG";

/// Height of one form row in pixels, spacing included.
const ROW_HEIGHT: f32 = 56.0;

/// Distance from the window top to the first form row in pixels.
const FORM_TOP: f32 = 120.0;

/// Node id of the scrollable form.
const FORM_NODE: NodeId = NodeId(1);

static FORM_SCROLL_ID: LazyLock<widget::Id> = LazyLock::new(|| widget::Id::new("form"));

/// A labeled field of the demo form.
pub struct DemoField {
    label: String,
    field: Rc<RefCell<MemoryField>>,
}

impl DemoField {
    fn new(label: String, field: MemoryField) -> Self {
        Self {
            label,
            field: field.in_form().shared(),
        }
    }

    /// Identity of the underlying field.
    pub fn id(&self) -> FieldId {
        self.field.borrow().id()
    }

    /// Shared handle passed to the keyboard.
    pub fn handle(&self) -> FieldHandle {
        self.field.clone()
    }

    /// Value as shown in the form; passwords are masked.
    pub fn display_value(&self) -> String {
        let field = self.field.borrow();
        if field.declared_type() == Some("password") {
            "•".repeat(field.text().chars().count())
        } else {
            field.text().to_string()
        }
    }
}

/// The fields of the demo form, top to bottom.
pub fn demo_fields() -> Vec<DemoField> {
    vec![
        DemoField::new(fl!("demo-field-name"), MemoryField::single_line("text")),
        DemoField::new(fl!("demo-field-email"), MemoryField::single_line("email")),
        DemoField::new(fl!("demo-field-age"), MemoryField::single_line("number")),
        DemoField::new(fl!("demo-field-password"), MemoryField::single_line("password")),
        DemoField::new(fl!("demo-field-birthday"), MemoryField::single_line("date")),
        DemoField::new(fl!("demo-field-notes"), MemoryField::multiline()),
    ]
}

/// Geometry of the demo window as seen by the viewport shift.
#[derive(Debug, Clone)]
pub struct DemoPage {
    fields: Vec<FieldId>,
    height: f32,
    scroll_y: f32,
    pending_scroll: Option<f32>,
    transition: bool,
}

impl DemoPage {
    /// Creates a page holding `fields` in order.
    pub fn new(fields: Vec<FieldId>, height: f32) -> Self {
        Self {
            fields,
            height,
            scroll_y: 0.0,
            pending_scroll: None,
            transition: false,
        }
    }

    /// Takes the scroll offset to apply to the form, if it changed.
    pub fn take_scroll(&mut self) -> Option<f32> {
        self.pending_scroll.take()
    }

    /// Whether the shift transition class is set on the form.
    pub fn in_transition(&self) -> bool {
        self.transition
    }
}

impl ViewportHost for DemoPage {
    fn viewport_height(&self) -> f32 {
        self.height
    }

    fn field_bottom(&self, field: FieldId) -> Option<f32> {
        let index = self.fields.iter().position(|id| *id == field)?;
        Some(FORM_TOP + (index + 1) as f32 * ROW_HEIGHT - self.scroll_y)
    }

    fn panel_siblings(&self) -> Vec<ContentNode> {
        vec![ContentNode {
            id: FORM_NODE,
            position: Positioning::Static,
        }]
    }

    fn translate_y(&mut self, node: NodeId, offset: f32) {
        if node == FORM_NODE {
            self.scroll_y = -offset;
            self.pending_scroll = Some(-offset);
        }
    }

    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool) {
        if node == FORM_NODE && class == app_settings::SHIFT_TRANSITION_CLASS {
            self.transition = enabled;
        }
    }

    fn is_attached(&self, node: NodeId) -> bool {
        node == FORM_NODE
    }
}

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    core: cosmic::Core,
    /// The keyboard driving the form.
    keyboard: VirtualKeyboard,
    /// Form fields, top to bottom.
    fields: Vec<DemoField>,
    /// Window geometry for viewport shifts.
    page: DemoPage,
    /// Current window width.
    width: f32,
    /// Number of Enter commits.
    submissions: Rc<Cell<u32>>,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    /// A form field was clicked.
    FocusField(usize),
    /// The done button was clicked.
    Done,
    /// A key of the rendered keyboard.
    Keyboard(KeyMessage),
    /// A hardware keydown.
    Hardware(HardwareKey),
    /// Timer tick while a repeat or cleanup is pending.
    Tick,
    /// A layout pass completed.
    AfterLayout,
    /// The enable toggle changed.
    ToggleEnabled(bool),
}

/// Create a COSMIC application from the app model
impl cosmic::Application for AppModel {
    type Executor = cosmic::executor::Default;

    type Flags = ();

    type Message = Message;

    const APP_ID: &'static str = app_settings::APP_ID;

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let config = std::env::var_os(CONFIG_ENV)
            .map(KeyboardConfig::load_or_default)
            .unwrap_or_default();

        let submissions = Rc::new(Cell::new(0));
        let callbacks = Callbacks::new()
            .on_visibility_change(|visible| tracing::info!(visible, "keyboard visibility changed"))
            .on_change(|value| tracing::debug!(value, "field value changed"))
            .on_enter_click({
                let submissions = Rc::clone(&submissions);
                move || submissions.set(submissions.get() + 1)
            });

        let fields = demo_fields();
        let page = DemoPage::new(
            fields.iter().map(DemoField::id).collect(),
            app_settings::DEMO_HEIGHT,
        );

        let app = AppModel {
            core,
            keyboard: VirtualKeyboard::new(config, callbacks),
            fields,
            page,
            width: app_settings::DEMO_WIDTH,
            submissions,
        };

        (app, Task::none())
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let enabled = self.keyboard.is_enabled();
        let toggle_label = if enabled {
            fl!("demo-keyboard-enabled")
        } else {
            fl!("demo-keyboard-disabled")
        };

        let form = self
            .fields
            .iter()
            .enumerate()
            .fold(widget::column::column().spacing(8), |column, (index, field)| {
                column.push(self.field_row(index, field))
            });

        let mut content = widget::column::column()
            .spacing(12)
            .padding(16)
            .push(widget::text::title3(fl!("demo-form-title")))
            .push(
                widget::toggler(enabled)
                    .label(toggle_label)
                    .on_toggle(Message::ToggleEnabled),
            )
            .push(widget::text::body(fl!(
                "demo-submitted",
                count = self.submissions.get()
            )))
            .push(
                widget::scrollable(form)
                    .id(FORM_SCROLL_ID.clone())
                    .height(Length::Fill),
            );

        if self.keyboard.is_visible() {
            content = content
                .push(button::standard(fl!("demo-done")).on_press(Message::Done))
                .push(render_keyboard(&self.keyboard.key_grid(), self.width).map(Message::Keyboard));
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        let mut subscriptions = vec![iced_keyboard::on_key_press(hardware_key)];

        if self.keyboard.next_deadline().is_some() {
            subscriptions.push(
                cosmic::iced::time::every(Duration::from_millis(app_settings::PRESS_INTERVAL_MS))
                    .map(|_| Message::Tick),
            );
        }

        Subscription::batch(subscriptions)
    }

    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        match message {
            Message::FocusField(index) => {
                let Some(target) = self.fields.get(index) else {
                    return Task::none();
                };
                switch_focus(&mut self.keyboard, &mut self.page, target);
                self.follow_up()
            }
            Message::Done => match self.keyboard.focused_field() {
                Some(handle) => {
                    handle.borrow_mut().blur();
                    self.drive(keyboard::Message::FocusOut(handle))
                }
                None => Task::none(),
            },
            Message::Keyboard(key) => self.drive(key.into()),
            Message::Hardware(key) => self.drive(keyboard::Message::HardwareKey(key)),
            Message::Tick => self.drive(keyboard::Message::Tick),
            Message::AfterLayout => self.drive(keyboard::Message::AfterLayout),
            Message::ToggleEnabled(enabled) => self.drive(keyboard::Message::SetEnabled(enabled)),
        }
    }

    fn on_window_resize(&mut self, _id: window::Id, width: f32, height: f32) {
        tracing::debug!("on_window_resize: {}x{}", width, height);
        self.width = width;
        self.page.height = height;
    }
}

impl AppModel {
    /// Feeds a keyboard message and turns the resulting shift into tasks.
    fn drive(&mut self, message: keyboard::Message) -> Task<cosmic::Action<Message>> {
        self.keyboard.update(message, &mut self.page);
        self.follow_up()
    }

    /// Schedules the layout pass and scroll a pending shift needs.
    fn follow_up(&mut self) -> Task<cosmic::Action<Message>> {
        let mut tasks = Vec::new();
        if self.keyboard.viewport().has_pending_request() {
            tasks.push(Task::done(cosmic::Action::App(Message::AfterLayout)));
        }
        if let Some(y) = self.page.take_scroll() {
            tasks.push(scroll_to(FORM_SCROLL_ID.clone(), AbsoluteOffset { x: 0.0, y }));
        }
        Task::batch(tasks)
    }

    fn field_row<'a>(&self, index: usize, field: &DemoField) -> Element<'a, Message> {
        let focused = self
            .keyboard
            .focused_field()
            .is_some_and(|handle| same_field(&handle, &field.handle()));
        let class = if focused {
            cosmic::style::Button::Suggested
        } else {
            cosmic::style::Button::Standard
        };

        widget::row::row()
            .spacing(12)
            .align_y(Alignment::Center)
            .push(widget::text::body(field.label.clone()).width(Length::Fixed(120.0)))
            .push(
                button::custom(widget::text::body(field.display_value()))
                    .on_press(Message::FocusField(index))
                    .class(class)
                    .width(Length::Fill),
            )
            .into()
    }

    /// The keyboard driving the form.
    pub fn keyboard(&self) -> &VirtualKeyboard {
        &self.keyboard
    }
}

/// Moves focus to `target`.
///
/// The previous field is blurred and its focus-out delivered before the
/// target's focus-in, as a browser would order them.
pub fn switch_focus(board: &mut VirtualKeyboard, page: &mut DemoPage, target: &DemoField) {
    let handle = target.handle();
    if let Some(previous) = board.focused_field() {
        if same_field(&previous, &handle) {
            return;
        }
        previous.borrow_mut().blur();
        board.update(keyboard::Message::FocusOut(previous), page);
    }

    handle.borrow_mut().focus();
    board.update(keyboard::Message::FocusIn(handle), page);
}

/// Maps an iced keydown onto a hardware key message.
fn hardware_key(key: Key, _modifiers: Modifiers) -> Option<Message> {
    let name = match key.as_ref() {
        Key::Named(Named::Backspace) => "Backspace",
        Key::Named(Named::Enter) => "Enter",
        Key::Named(Named::Space) => " ",
        Key::Named(Named::CapsLock) => "CapsLock",
        Key::Character(c) => c,
        _ => return None,
    };
    HardwareKey::from_key_name(name).map(Message::Hardware)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{ViewportShift, shift_amount};
    use std::time::Instant;

    /// Test: named iced keys map onto hardware keys
    #[test]
    fn test_hardware_key_mapping() {
        let backspace = hardware_key(Key::Named(Named::Backspace), Modifiers::empty());
        assert!(matches!(backspace, Some(Message::Hardware(HardwareKey::Backspace))));

        let space = hardware_key(Key::Named(Named::Space), Modifiers::empty());
        assert!(matches!(space, Some(Message::Hardware(HardwareKey::Space))));

        let letter = hardware_key(Key::Character("q".into()), Modifiers::empty());
        assert!(matches!(
            letter,
            Some(Message::Hardware(HardwareKey::Character('q')))
        ));

        assert!(hardware_key(Key::Named(Named::Tab), Modifiers::empty()).is_none());
    }

    /// Test: the demo form covers the interesting field types
    #[test]
    fn test_demo_fields() {
        let fields = demo_fields();
        let types: Vec<Option<String>> = fields
            .iter()
            .map(|f| f.field.borrow().declared_type().map(str::to_string))
            .collect();

        assert_eq!(fields.len(), 6);
        assert_eq!(types[1].as_deref(), Some("email"));
        assert_eq!(types[2].as_deref(), Some("number"));
        assert_eq!(types[4].as_deref(), Some("date"));
        assert_eq!(types[5], None);
    }

    /// Test: passwords are masked per char
    #[test]
    fn test_password_is_masked() {
        let field = DemoField::new(
            "pw".to_string(),
            MemoryField::single_line("password").with_value("héllo"),
        );
        assert_eq!(field.display_value(), "•••••");
    }

    /// Test: shifting the last field scrolls the form
    #[test]
    fn test_page_shift_becomes_scroll() {
        let fields = demo_fields();
        let last = fields[5].id();
        let mut page = DemoPage::new(fields.iter().map(DemoField::id).collect(), 640.0);
        let bottom = page.field_bottom(last).unwrap();
        assert_eq!(bottom, FORM_TOP + 6.0 * ROW_HEIGHT);

        let mut shift = ViewportShift::new();
        shift.shift_into_view(last, Instant::now(), &mut page);

        let expected = shift_amount(640.0, bottom);
        assert!(expected > 0.0);
        assert_eq!(page.take_scroll(), Some(expected));
        assert!(page.in_transition());
        assert!(page.take_scroll().is_none());
    }

    /// Test: moving from a text field to the excluded date field ends the session
    #[test]
    fn test_switch_to_excluded_field_closes_session() {
        let fields = demo_fields();
        let mut page = DemoPage::new(fields.iter().map(DemoField::id).collect(), 640.0);
        let mut board = VirtualKeyboard::default();

        switch_focus(&mut board, &mut page, &fields[0]);
        assert!(board.is_visible());
        assert!(fields[0].field.borrow().is_focused());

        switch_focus(&mut board, &mut page, &fields[4]);
        assert!(!board.is_visible());
        assert!(board.focused_field().is_none());
        assert!(!fields[0].field.borrow().is_focused());
        assert!(fields[4].field.borrow().is_focused());

        let response = board.update(
            keyboard::Message::HardwareKey(HardwareKey::Character('x')),
            &mut page,
        );
        assert!(!response.prevent_default);
        assert_eq!(fields[0].field.borrow().text(), "");
        assert!(!fields[0].field.borrow().is_focused());
    }

    /// Test: switching between eligible fields moves the session
    #[test]
    fn test_switch_between_text_fields() {
        let fields = demo_fields();
        let mut page = DemoPage::new(fields.iter().map(DemoField::id).collect(), 640.0);
        let mut board = VirtualKeyboard::default();

        switch_focus(&mut board, &mut page, &fields[0]);
        switch_focus(&mut board, &mut page, &fields[1]);
        board.update(keyboard::Message::HardwareKey(HardwareKey::Character('a')), &mut page);

        assert!(board.is_visible());
        assert_eq!(fields[0].field.borrow().text(), "");
        assert_eq!(fields[1].field.borrow().text(), "a");

        // Clicking the focused field again keeps the session.
        switch_focus(&mut board, &mut page, &fields[1]);
        assert!(board.is_visible());
        assert!(fields[1].field.borrow().is_focused());
    }

    /// Test: app messages can cross the runtime
    #[test]
    fn test_messages_are_send() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<Message>();
    }
}
