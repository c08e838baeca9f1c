// SPDX-License-Identifier: GPL-3.0-only

//! Single dispatch point for hardware and virtual key input.
//!
//! Virtual key taps produce a [`KeyIntent`] directly. Hardware keydowns are
//! mapped to the same intents by [`dispatch_hardware`]; every mapped key must
//! have its native default action suppressed so a character is never applied
//! twice.

use crate::input::keycode::HardwareKey;

/// An edit or state intent, shared by hardware and virtual input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyIntent {
    /// Insert a character.
    Character(char),
    /// Delete backwards.
    Backspace,
    /// Insert a space.
    Space,
    /// Commit the field.
    Enter,
    /// Flip caps lock.
    CapsToggle,
    /// Switch between letters and symbols. Only produced by virtual keys.
    LayoutToggle,
}

/// Outcome of routing a hardware keydown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDispatch {
    /// The key maps to an intent; its default action must be suppressed.
    Handled(KeyIntent),
    /// The key is not ours; the host handles it natively.
    PassThrough,
}

impl KeyDispatch {
    /// Returns `true` if the host must suppress the key's default action.
    #[must_use]
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

/// Maps a hardware key onto the shared intent set.
#[must_use]
pub fn dispatch_hardware(key: &HardwareKey) -> KeyDispatch {
    match key {
        HardwareKey::Backspace => KeyDispatch::Handled(KeyIntent::Backspace),
        HardwareKey::Enter => KeyDispatch::Handled(KeyIntent::Enter),
        HardwareKey::Space => KeyDispatch::Handled(KeyIntent::Space),
        HardwareKey::CapsLock => KeyDispatch::Handled(KeyIntent::CapsToggle),
        HardwareKey::Character(c) => KeyDispatch::Handled(KeyIntent::Character(*c)),
        HardwareKey::Named(_) => KeyDispatch::PassThrough,
    }
}
