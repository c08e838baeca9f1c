// SPDX-License-Identifier: GPL-3.0-only

//! Fieldboard - An on-screen keyboard for text fields
//!
//! This crate provides a virtual keyboard that attaches to whichever text
//! field of the host has focus, renders a layout-switching key panel and
//! writes keystrokes back into the field while keeping its native editing
//! behavior (caret, selection, change events) intact.
//!
//! # Architecture
//!
//! The keyboard core is toolkit independent. Hosts expose their fields
//! through [`field::TextField`] and feed focus, key, gesture and timer events
//! into a [`keyboard::VirtualKeyboard`] as typed messages:
//!
//! 1. **Focus** (`focus`): tracks the single focused field, temporarily
//!    neutralizes caret-hostile input types and drives panel visibility.
//!
//! 2. **Input** (`input`): maps hardware keys and virtual taps onto one
//!    intent set, with press-and-hold repetition for backspace.
//!
//! 3. **Editing** (`validation`, `editor`): gates each keystroke on the
//!    prospective field value, then edits at the caret and replays
//!    `input`/`change` events.
//!
//! 4. **Layout** (`layout`): letters, symbols and numbers layouts with caps
//!    lock, converted into a renderable key grid.
//!
//! 5. **Viewport** (`viewport`): shifts content up when the focused field
//!    would end up behind the panel.
//!
//! With the `cosmic` feature, `renderer` draws the key grid with libcosmic
//! and `app` provides the demo application.
//!
//! # Modules
//!
//! - `app_settings`: Centralized constants
//! - `config`: Keyboard configuration loaded from JSON
//! - `editor`: Caret-accurate text mutation
//! - `field`: Host field abstraction and input type classification
//! - `focus`: Focus delegation controller
//! - `i18n`: Localization of key labels using fluent translations
//! - `input`: Hardware key parsing, key synchronization, continuous press
//! - `keyboard`: The orchestrator
//! - `layout`: Key tables, layout state machine, key grid
//! - `validation`: Per-type character rules and initial layout
//! - `viewport`: Viewport shift controller

#[cfg(feature = "cosmic")]
pub mod app;
pub mod app_settings;
pub mod config;
pub mod editor;
pub mod field;
pub mod focus;
pub mod i18n;
pub mod input;
pub mod keyboard;
pub mod layout;
#[cfg(feature = "cosmic")]
pub mod renderer;
pub mod validation;
pub mod viewport;

pub use crate::config::{ConfigError, KeyboardConfig};
pub use crate::i18n::LANGUAGE_LOADER;
pub use crate::keyboard::{Callbacks, Message, Response, VirtualKeyboard};

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod integration_tests {
    use crate::field::{FieldId, InputTypeClass, MemoryField, Selection, TextField};
    use crate::input::{HardwareKey, KeyIntent, PressEvent, ticks};
    use crate::keyboard::{Callbacks, Message, VirtualKeyboard};
    use crate::layout::LayoutType;
    use crate::viewport::{ContentNode, NoViewport, NodeId, Positioning, ViewportHost};
    use crate::KeyboardConfig;
    use futures::StreamExt;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    fn visibility_log() -> (Rc<RefCell<Vec<bool>>>, Callbacks) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let callbacks = Callbacks::new().on_visibility_change(move |v| sink.borrow_mut().push(v));
        (log, callbacks)
    }

    /// Integration Test 1: Excluded field types never show the panel
    #[test]
    fn test_checkbox_focus_keeps_panel_hidden() {
        let (log, callbacks) = visibility_log();
        let mut keyboard = VirtualKeyboard::new(KeyboardConfig::default(), callbacks);
        let checkbox = MemoryField::single_line("checkbox").shared();

        keyboard.update(Message::FocusIn(checkbox.clone()), &mut NoViewport);

        assert!(!keyboard.is_visible());
        assert!(log.borrow().is_empty());
        assert_eq!(checkbox.borrow().declared_type(), Some("checkbox"));
    }

    /// Integration Test 2: Email focus shows the panel in the default layout
    #[test]
    fn test_email_focus_shows_panel() {
        let config = KeyboardConfig {
            default_layout: LayoutType::Symbols,
            ..KeyboardConfig::default()
        };
        let (log, callbacks) = visibility_log();
        let mut keyboard = VirtualKeyboard::new(config, callbacks);
        let email = MemoryField::single_line("email").shared();

        keyboard.update(Message::FocusIn(email.clone()), &mut NoViewport);

        assert!(keyboard.is_visible());
        assert_eq!(*log.borrow(), vec![true]);
        assert_eq!(keyboard.input_type(), Some(InputTypeClass::Email));
        assert_eq!(keyboard.layout(), LayoutType::Symbols);
    }

    /// Integration Test 3: Number fields are locked to the numbers layout
    #[test]
    fn test_number_field_layout_lock() {
        let mut keyboard = VirtualKeyboard::default();
        let number = MemoryField::single_line("number").shared();
        keyboard.update(Message::FocusIn(number.clone()), &mut NoViewport);

        assert_eq!(keyboard.layout(), LayoutType::Numbers);
        for _ in 0..3 {
            keyboard.update(Message::Key(KeyIntent::LayoutToggle), &mut NoViewport);
            assert_eq!(keyboard.layout(), LayoutType::Numbers);
        }
    }

    /// Integration Test 4: Moving focus between fields restores declared types
    #[test]
    fn test_focus_switch_restores_types() {
        let mut keyboard = VirtualKeyboard::default();
        let date = MemoryField::single_line("date").shared();
        let tel = MemoryField::single_line("tel")
            .with_value("555 1234")
            .with_selection(3, 3)
            .shared();
        let text = MemoryField::single_line("text")
            .with_value("hello")
            .with_selection(2, 4)
            .shared();

        // The date field is ineligible and never touched.
        keyboard.update(Message::FocusIn(date.clone()), &mut NoViewport);
        keyboard.update(Message::FocusOut(date.clone()), &mut NoViewport);
        assert_eq!(date.borrow().declared_type(), Some("date"));

        keyboard.update(Message::FocusIn(tel.clone()), &mut NoViewport);
        assert_eq!(tel.borrow().declared_type(), Some("text"));
        assert_eq!(tel.borrow().selection(), Some(Selection::caret(3)));

        // Focus moves straight to the text field.
        keyboard.update(Message::FocusIn(text.clone()), &mut NoViewport);
        keyboard.update(Message::FocusOut(tel.clone()), &mut NoViewport);

        assert_eq!(tel.borrow().declared_type(), Some("tel"));
        assert_eq!(tel.borrow().selection(), Some(Selection::caret(3)));
        assert_eq!(text.borrow().declared_type(), Some("text"));
        assert_eq!(text.borrow().selection(), Some(Selection::new(2, 4)));
        assert!(keyboard.is_visible());
        assert_eq!(
            keyboard.focused_field().map(|f| f.borrow().id()),
            Some(text.borrow().id())
        );
    }

    /// Integration Test 5: Typing into an email field and committing with Enter
    #[test]
    fn test_email_typing_and_hardware_enter() {
        let entered = Rc::new(RefCell::new(0));
        let counter = entered.clone();
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        let callbacks = Callbacks::new()
            .on_enter_click(move || *counter.borrow_mut() += 1)
            .on_change(move |value| sink.borrow_mut().push(value.to_string()));
        let mut keyboard = VirtualKeyboard::new(KeyboardConfig::default(), callbacks);
        let email = MemoryField::single_line("email").in_form().shared();

        keyboard.update(Message::FocusIn(email.clone()), &mut NoViewport);
        for c in ['a', '@', 'b'] {
            keyboard.update(Message::Key(KeyIntent::Character(c)), &mut NoViewport);
        }
        assert_eq!(email.borrow().text(), "a@b");
        assert_eq!(*changes.borrow(), vec!["a", "a@", "a@b"]);

        let enter = HardwareKey::from_key_name("Enter").unwrap();
        let response = keyboard.update(Message::HardwareKey(enter), &mut NoViewport);

        assert!(response.prevent_default);
        assert!(!keyboard.is_visible());
        assert!(!email.borrow().is_focused());
        assert_eq!(email.borrow().submissions(), 1);
        assert_eq!(email.borrow().declared_type(), Some("email"));
        assert_eq!(*entered.borrow(), 1);
    }

    /// Integration Test 6: Invalid characters are dropped without side effects
    #[test]
    fn test_rejected_keystrokes_leave_field_untouched() {
        let mut keyboard = VirtualKeyboard::default();
        let tel = MemoryField::single_line("tel").with_value("+1").shared();
        keyboard.update(Message::FocusIn(tel.clone()), &mut NoViewport);

        let key = HardwareKey::from_key_name("x").unwrap();
        let response = keyboard.update(Message::HardwareKey(key), &mut NoViewport);

        // Suppressed even though rejected, so the host cannot insert it.
        assert!(response.prevent_default);
        assert_eq!(tel.borrow().text(), "+1");
        assert!(tel.borrow().events().is_empty());
    }

    /// Integration Test 7: A press started and stopped fires exactly once
    #[test]
    fn test_press_start_stop_fires_once() {
        let mut keyboard = VirtualKeyboard::default();
        let field = MemoryField::single_line("text").with_value("abc").shared();
        keyboard.update(Message::FocusIn(field.clone()), &mut NoViewport);

        let t0 = Instant::now();
        keyboard.update_at(Message::Press(PressEvent::PointerDown), t0, &mut NoViewport);
        keyboard.update_at(Message::Press(PressEvent::PointerUp), t0, &mut NoViewport);
        keyboard.update_at(Message::Tick, t0 + Duration::from_secs(5), &mut NoViewport);

        assert_eq!(field.borrow().text(), "ab");
    }

    /// Integration Test 8: Held backspace driven by the tokio tick stream
    #[tokio::test(start_paused = true)]
    async fn test_held_backspace_with_tick_stream() {
        let mut keyboard = VirtualKeyboard::default();
        let field = MemoryField::single_line("text")
            .with_value("0123456789")
            .shared();
        keyboard.update(Message::FocusIn(field.clone()), &mut NoViewport);

        let started = tokio::time::Instant::now().into_std();
        keyboard.update_at(Message::Press(PressEvent::TouchStart), started, &mut NoViewport);

        let mut stream = Box::pin(ticks(Duration::from_millis(50)).take(13));
        while let Some(now) = stream.next().await {
            keyboard.update_at(Message::Tick, now, &mut NoViewport);
        }
        keyboard.update_at(
            Message::Press(PressEvent::TouchEnd),
            tokio::time::Instant::now().into_std(),
            &mut NoViewport,
        );

        // One immediate fire plus repeats at 550ms, 600ms and 650ms.
        assert_eq!(field.borrow().text(), "012345");
    }

    #[derive(Default)]
    struct Page {
        bottoms: HashMap<FieldId, f32>,
        offsets: HashMap<NodeId, f32>,
        transitions: Vec<NodeId>,
    }

    impl ViewportHost for Page {
        fn viewport_height(&self) -> f32 {
            800.0
        }

        fn field_bottom(&self, field: FieldId) -> Option<f32> {
            self.bottoms.get(&field).copied()
        }

        fn panel_siblings(&self) -> Vec<ContentNode> {
            vec![
                ContentNode {
                    id: NodeId(1),
                    position: Positioning::Static,
                },
                ContentNode {
                    id: NodeId(2),
                    position: Positioning::Fixed,
                },
            ]
        }

        fn translate_y(&mut self, node: NodeId, offset: f32) {
            self.offsets.insert(node, offset);
        }

        fn set_class(&mut self, node: NodeId, _class: &str, enabled: bool) {
            self.transitions.retain(|n| *n != node);
            if enabled {
                self.transitions.push(node);
            }
        }

        fn is_attached(&self, _node: NodeId) -> bool {
            true
        }
    }

    /// Integration Test 9: Focus, layout pass and blur drive the viewport shift
    #[test]
    fn test_viewport_shift_follows_focus() {
        let mut keyboard = VirtualKeyboard::default();
        let field = MemoryField::multiline().shared();
        let mut page = Page::default();
        // Visible height is 496px; 600 + 20 overflows by 124.
        page.bottoms.insert(field.borrow().id(), 600.0);

        let t0 = Instant::now();
        keyboard.update_at(Message::FocusIn(field.clone()), t0, &mut page);
        assert!(page.offsets.is_empty(), "measuring waits for layout");

        keyboard.update_at(Message::AfterLayout, t0, &mut page);
        let offset = page.offsets[&NodeId(1)];
        assert!((offset + 124.0).abs() < 0.01);
        assert!(!page.offsets.contains_key(&NodeId(2)));

        keyboard.update_at(Message::FocusOut(field.clone()), t0, &mut page);
        assert_eq!(page.offsets[&NodeId(1)], 0.0);
        assert_eq!(page.transitions, vec![NodeId(1)]);

        let cleanup = keyboard.next_deadline().unwrap();
        keyboard.update_at(Message::Tick, cleanup, &mut page);
        assert!(page.transitions.is_empty());
    }

    /// Integration Test 10: Multiline edits keep scroll and caret
    #[test]
    fn test_multiline_edit_keeps_scroll() {
        let mut keyboard = VirtualKeyboard::default();
        let area = MemoryField::multiline()
            .with_value("first\nsecond")
            .with_selection(5, 5)
            .with_scroll(30.0, 0.0)
            .shared();
        keyboard.update(Message::FocusIn(area.clone()), &mut NoViewport);

        keyboard.update(Message::Key(KeyIntent::Character('!')), &mut NoViewport);

        let area = area.borrow();
        assert_eq!(area.text(), "first!\nsecond");
        assert_eq!(area.selection(), Some(Selection::caret(6)));
        assert_eq!(area.scroll_offset().top, 30.0);
    }
}
