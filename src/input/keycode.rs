// SPDX-License-Identifier: GPL-3.0-only

//! Parsing of hardware key identifiers.
//!
//! Hardware keydown events reach the keyboard in one of two spellings:
//!
//! 1. **Key names** as reported by web-style hosts: `"Backspace"`, `"Enter"`,
//!    `" "`, `"CapsLock"`, `"a"`, or a `"U+00E9"` codepoint
//! 2. **XKB keysym names** as reported by Wayland/X11 hosts: `"BackSpace"`,
//!    `"Return"`, `"space"`, `"Caps_Lock"`, `"eacute"`
//!
//! Both are resolved into a [`HardwareKey`].

use xkbcommon::xkb::Keysym;
use xkbcommon::xkb::keysyms::{
    KEY_BackSpace, KEY_Caps_Lock, KEY_KP_Enter, KEY_NoSymbol, KEY_Return, KEY_space,
};

/// A physical key press, resolved from its host spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HardwareKey {
    /// Delete backwards.
    Backspace,
    /// Return / Enter, including the keypad variant.
    Enter,
    /// The space bar.
    Space,
    /// Caps Lock.
    CapsLock,
    /// A key producing a single printable character.
    Character(char),
    /// Any other key (Tab, Escape, arrows, modifiers, function keys).
    Named(String),
}

impl HardwareKey {
    /// Parses a web-style key name.
    ///
    /// Returns `None` for an empty name or a malformed `U+` codepoint.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }

        match name {
            "Backspace" => return Some(Self::Backspace),
            "Enter" => return Some(Self::Enter),
            " " | "Space" | "Spacebar" => return Some(Self::Space),
            "CapsLock" => return Some(Self::CapsLock),
            _ => {}
        }

        if let Some(hex) = name.strip_prefix("U+").or_else(|| name.strip_prefix("u+")) {
            return parse_unicode_codepoint(hex).map(Self::from_char);
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Self::from_char(c)),
            _ => Some(Self::Named(name.to_string())),
        }
    }

    /// Parses an XKB keysym name such as `"BackSpace"` or `"eacute"`.
    ///
    /// Returns `None` if xkbcommon does not know the name.
    #[must_use]
    pub fn from_keysym_name(name: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }

        let keysym = xkbcommon::xkb::keysym_from_name(name, xkbcommon::xkb::KEYSYM_NO_FLAGS);
        let no_symbol: Keysym = KEY_NoSymbol.into();

        if keysym == no_symbol {
            return None;
        }

        Some(Self::from_keysym(keysym, name))
    }

    /// Resolves a keysym; `name` is kept for keys without a character.
    #[must_use]
    pub fn from_keysym(keysym: Keysym, name: &str) -> Self {
        match keysym.raw() {
            KEY_BackSpace => Self::Backspace,
            KEY_Return | KEY_KP_Enter => Self::Enter,
            KEY_space => Self::Space,
            KEY_Caps_Lock => Self::CapsLock,
            _ => match char::from_u32(xkbcommon::xkb::keysym_to_utf32(keysym)) {
                Some(c) if c != '\0' && !c.is_control() => Self::Character(c),
                _ => Self::Named(name.to_string()),
            },
        }
    }

    fn from_char(c: char) -> Self {
        match c {
            ' ' => Self::Space,
            c if c.is_control() => Self::Named(format!("U+{:04X}", c as u32)),
            c => Self::Character(c),
        }
    }
}

/// Parses a Unicode codepoint from a hex string.
///
/// Returns `None` if:
/// - The hex string is empty or contains invalid characters
/// - The codepoint is beyond 0x10FFFF
/// - The codepoint is a surrogate (0xD800-0xDFFF)
fn parse_unicode_codepoint(hex_str: &str) -> Option<char> {
    if hex_str.is_empty() {
        return None;
    }

    let codepoint = u32::from_str_radix(hex_str, 16).ok()?;
    char::from_u32(codepoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_edit_keys() {
        assert_eq!(HardwareKey::from_key_name("Backspace"), Some(HardwareKey::Backspace));
        assert_eq!(HardwareKey::from_key_name("Enter"), Some(HardwareKey::Enter));
        assert_eq!(HardwareKey::from_key_name(" "), Some(HardwareKey::Space));
        assert_eq!(HardwareKey::from_key_name("CapsLock"), Some(HardwareKey::CapsLock));
    }

    #[test]
    fn test_single_characters() {
        assert_eq!(HardwareKey::from_key_name("a"), Some(HardwareKey::Character('a')));
        assert_eq!(HardwareKey::from_key_name("Q"), Some(HardwareKey::Character('Q')));
        assert_eq!(HardwareKey::from_key_name("@"), Some(HardwareKey::Character('@')));
        assert_eq!(HardwareKey::from_key_name("é"), Some(HardwareKey::Character('é')));
    }

    #[test]
    fn test_other_named_keys_pass_through() {
        assert_eq!(
            HardwareKey::from_key_name("Tab"),
            Some(HardwareKey::Named("Tab".to_string()))
        );
        assert_eq!(
            HardwareKey::from_key_name("ArrowLeft"),
            Some(HardwareKey::Named("ArrowLeft".to_string()))
        );
    }

    #[test]
    fn test_unicode_codepoints() {
        assert_eq!(
            HardwareKey::from_key_name("U+03C0"),
            Some(HardwareKey::Character('π'))
        );
        assert_eq!(
            HardwareKey::from_key_name("u+00e9"),
            Some(HardwareKey::Character('é'))
        );
        assert_eq!(HardwareKey::from_key_name("U+0020"), Some(HardwareKey::Space));
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(HardwareKey::from_key_name(""), None);
        assert_eq!(HardwareKey::from_key_name("U+"), None);
        assert_eq!(HardwareKey::from_key_name("U+ZZZZ"), None);
        assert_eq!(HardwareKey::from_key_name("U+D800"), None);
        assert_eq!(HardwareKey::from_key_name("U+FFFFFF"), None);
    }

    #[test]
    fn test_control_characters_are_not_printable() {
        assert_eq!(
            HardwareKey::from_key_name("\u{7}"),
            Some(HardwareKey::Named("U+0007".to_string()))
        );
    }

    #[test]
    fn test_keysym_names() {
        assert_eq!(
            HardwareKey::from_keysym_name("BackSpace"),
            Some(HardwareKey::Backspace)
        );
        assert_eq!(HardwareKey::from_keysym_name("Return"), Some(HardwareKey::Enter));
        assert_eq!(HardwareKey::from_keysym_name("KP_Enter"), Some(HardwareKey::Enter));
        assert_eq!(HardwareKey::from_keysym_name("space"), Some(HardwareKey::Space));
        assert_eq!(
            HardwareKey::from_keysym_name("Caps_Lock"),
            Some(HardwareKey::CapsLock)
        );
        assert_eq!(
            HardwareKey::from_keysym_name("a"),
            Some(HardwareKey::Character('a'))
        );
        assert_eq!(
            HardwareKey::from_keysym_name("at"),
            Some(HardwareKey::Character('@'))
        );
        assert_eq!(
            HardwareKey::from_keysym_name("eacute"),
            Some(HardwareKey::Character('é'))
        );
    }

    #[test]
    fn test_keysym_without_character() {
        assert_eq!(
            HardwareKey::from_keysym_name("Shift_L"),
            Some(HardwareKey::Named("Shift_L".to_string()))
        );
        assert_eq!(HardwareKey::from_keysym_name("NotAKeysym"), None);
    }
}
