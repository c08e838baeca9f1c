// SPDX-License-Identifier: GPL-3.0-only

//! Messages emitted by the rendered keyboard.

use crate::input::{KeyIntent, PressEvent};
use crate::keyboard::Message;

/// Messages emitted by the keyboard renderer.
///
/// These are `Send` so they can travel through the libcosmic runtime; the
/// application converts them into keyboard [`Message`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMessage {
    /// A key was tapped.
    Tap(KeyIntent),

    /// A gesture on the repeating backspace key.
    Backspace(PressEvent),
}

impl From<KeyMessage> for Message {
    fn from(message: KeyMessage) -> Self {
        match message {
            KeyMessage::Tap(intent) => Message::Key(intent),
            KeyMessage::Backspace(event) => Message::Press(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion() {
        let tap = Message::from(KeyMessage::Tap(KeyIntent::Space));
        assert!(matches!(tap, Message::Key(KeyIntent::Space)));

        let press = Message::from(KeyMessage::Backspace(PressEvent::PointerDown));
        assert!(matches!(press, Message::Press(PressEvent::PointerDown)));
    }

    #[test]
    fn test_messages_are_send() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<KeyMessage>();
    }
}
