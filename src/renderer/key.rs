// SPDX-License-Identifier: GPL-3.0-only

//! Key rendering for the keyboard panel.
//!
//! Keys are rendered as buttons sized in multiples of a base unit. The
//! repeating backspace key is rendered inside a mouse area instead, since a
//! button only reports a click on release and cannot express press-and-hold.

use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{self, button, container, icon, mouse_area};

use crate::input::{KeyIntent, PressEvent};
use crate::layout::KeyCell;
use crate::renderer::message::KeyMessage;

/// Width of a key in base units.
#[must_use]
pub fn key_width_units(cell: &KeyCell) -> f32 {
    match cell.intent {
        KeyIntent::Character(_) => 1.0,
        KeyIntent::Space => 4.0,
        KeyIntent::Backspace
        | KeyIntent::Enter
        | KeyIntent::CapsToggle
        | KeyIntent::LayoutToggle => 1.5,
    }
}

/// System icon for special keys, `None` for keys with a text label.
#[must_use]
pub fn icon_name(intent: KeyIntent) -> Option<&'static str> {
    match intent {
        KeyIntent::Backspace => Some("edit-delete-symbolic"),
        KeyIntent::Enter => Some("go-next-symbolic"),
        KeyIntent::CapsToggle => Some("keyboard-caps-symbolic"),
        KeyIntent::Character(_) | KeyIntent::Space | KeyIntent::LayoutToggle => None,
    }
}

/// Renders a single key.
///
/// The caps key uses the suggested (accent) button class while active.
pub fn render_key<'a>(cell: &KeyCell, unit: f32) -> Element<'a, KeyMessage> {
    let width = key_width_units(cell) * unit;
    let height = unit;

    let face = container(render_label(cell))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Alignment::Center)
        .align_y(Alignment::Center);

    if cell.repeats {
        return mouse_area(
            container(face)
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .class(cosmic::style::Container::Card),
        )
        .on_press(KeyMessage::Backspace(PressEvent::PointerDown))
        .on_release(KeyMessage::Backspace(PressEvent::PointerUp))
        .on_exit(KeyMessage::Backspace(PressEvent::PointerLeave))
        .into();
    }

    let button_class = if cell.active {
        cosmic::style::Button::Suggested
    } else {
        cosmic::style::Button::Standard
    };

    button::custom(face)
        .on_press(KeyMessage::Tap(cell.intent))
        .class(button_class)
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .into()
}

/// Renders a key label as either an icon or text.
pub fn render_label<'a>(cell: &KeyCell) -> Element<'a, KeyMessage> {
    match icon_name(cell.intent) {
        Some(name) => icon::from_name(name).size(16).symbolic(true).into(),
        None => widget::text::body(cell.label.clone()).into(),
    }
}
