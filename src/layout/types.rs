// SPDX-License-Identifier: GPL-3.0-only

//! Layout variants and their static key tables.

use serde::{Deserialize, Serialize};

/// A key table: ordered rows of ordered character keys.
pub type KeyTable = &'static [&'static [char]];

/// Letters layout, lowercase. Caps is applied at render time.
pub const LETTERS: KeyTable = &[
    &['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'],
    &['q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p'],
    &['a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l'],
    &['z', 'x', 'c', 'v', 'b', 'n', 'm'],
];

/// Symbols layout.
pub const SYMBOLS: KeyTable = &[
    &['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'],
    &['!', '@', '#', '$', '%', '^', '&', '*', '(', ')'],
    &['-', '_', '=', '+', '[', ']', '{', '}', '\\', '|'],
    &[';', ':', '"', '\'', ',', '.', '<', '>', '/', '?'],
];

/// Numeric keypad layout.
pub const NUMBERS: KeyTable = &[
    &['7', '8', '9', '#'],
    &['4', '5', '6', '-'],
    &['1', '2', '3'],
    &[',', '0', '.'],
];

/// The active key grid variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    /// QWERTY letters with a digit row.
    #[default]
    Letters,
    /// Punctuation and symbols.
    Symbols,
    /// Numeric keypad.
    Numbers,
}

impl LayoutType {
    /// The static key table of this layout.
    #[must_use]
    pub fn table(self) -> KeyTable {
        match self {
            Self::Letters => LETTERS,
            Self::Symbols => SYMBOLS,
            Self::Numbers => NUMBERS,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Letters => "letters",
            Self::Symbols => "symbols",
            Self::Numbers => "numbers",
        }
    }
}

impl std::fmt::Display for LayoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shapes() {
        let widths = |table: KeyTable| table.iter().map(|row| row.len()).collect::<Vec<_>>();
        assert_eq!(widths(LETTERS), vec![10, 10, 9, 7]);
        assert_eq!(widths(SYMBOLS), vec![10, 10, 10, 10]);
        assert_eq!(widths(NUMBERS), vec![4, 4, 3, 3]);
    }

    #[test]
    fn test_letters_are_lowercase() {
        assert!(
            LETTERS
                .iter()
                .flat_map(|row| row.iter())
                .all(|c| !c.is_uppercase())
        );
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&LayoutType::Numbers).unwrap(),
            "\"numbers\""
        );
        let parsed: LayoutType = serde_json::from_str("\"symbols\"").unwrap();
        assert_eq!(parsed, LayoutType::Symbols);
        assert_eq!(LayoutType::default(), LayoutType::Letters);
    }
}
