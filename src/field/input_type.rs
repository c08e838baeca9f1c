// SPDX-License-Identifier: GPL-3.0-only

//! Classification of declared field types.
//!
//! The declared type of a field is an open-ended string owned by the host.
//! It is classified exactly once per focus session into the closed
//! [`InputTypeClass`], which every consumer matches exhaustively.

use serde::{Deserialize, Serialize};

use crate::field::FieldKind;

/// Declared single-line types that never receive the keyboard.
pub const EXCLUDED_TYPES: [&str; 14] = [
    "checkbox", "radio", "range", "date", "time", "color", "month", "week", "file", "hidden",
    "submit", "reset", "button", "image",
];

/// Semantic class of a focused field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputTypeClass {
    /// Free text; also every multiline field.
    #[default]
    Text,
    /// Email address.
    Email,
    /// Digits only.
    Number,
    /// Telephone number.
    Tel,
    /// URL.
    Url,
    /// Password.
    Password,
    /// Any other eligible declared type (e.g. `search`).
    Other,
    /// A declared type from [`EXCLUDED_TYPES`].
    Excluded,
}

impl InputTypeClass {
    /// Classifies a declared single-line type, ignoring ASCII case.
    ///
    /// An empty declared type is treated as `text`.
    #[must_use]
    pub fn from_declared_type(declared_type: &str) -> Self {
        let declared = declared_type.trim().to_ascii_lowercase();

        match declared.as_str() {
            "" | "text" => Self::Text,
            "email" => Self::Email,
            "number" => Self::Number,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "password" => Self::Password,
            other if EXCLUDED_TYPES.contains(&other) => Self::Excluded,
            _ => Self::Other,
        }
    }

    /// Classifies a field kind. Multiline fields are always text.
    #[must_use]
    pub fn classify(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Multiline => Self::Text,
            FieldKind::SingleLine { declared_type } => Self::from_declared_type(declared_type),
        }
    }

    /// Returns `true` if fields of this class may open the keyboard.
    #[must_use]
    pub fn is_eligible(self) -> bool {
        !matches!(self, Self::Excluded)
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Password => "password",
            Self::Other => "other",
            Self::Excluded => "excluded",
        }
    }
}

impl std::fmt::Display for InputTypeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` if the field's native type prevents caret manipulation.
///
/// Every single-line type other than `text` qualifies; multiline fields
/// never do.
#[must_use]
pub fn is_caret_hostile(kind: &FieldKind) -> bool {
    match kind {
        FieldKind::Multiline => false,
        FieldKind::SingleLine { declared_type } => {
            let declared = declared_type.trim();
            !(declared.is_empty() || declared.eq_ignore_ascii_case("text"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types_classify() {
        assert_eq!(InputTypeClass::from_declared_type("text"), InputTypeClass::Text);
        assert_eq!(InputTypeClass::from_declared_type("email"), InputTypeClass::Email);
        assert_eq!(InputTypeClass::from_declared_type("number"), InputTypeClass::Number);
        assert_eq!(InputTypeClass::from_declared_type("tel"), InputTypeClass::Tel);
        assert_eq!(InputTypeClass::from_declared_type("url"), InputTypeClass::Url);
        assert_eq!(
            InputTypeClass::from_declared_type("password"),
            InputTypeClass::Password
        );
    }

    #[test]
    fn test_case_and_empty_type() {
        assert_eq!(InputTypeClass::from_declared_type("EMAIL"), InputTypeClass::Email);
        assert_eq!(InputTypeClass::from_declared_type(""), InputTypeClass::Text);
    }

    #[test]
    fn test_every_excluded_type_is_ineligible() {
        for declared in EXCLUDED_TYPES {
            let class = InputTypeClass::from_declared_type(declared);
            assert_eq!(class, InputTypeClass::Excluded, "{declared} should be excluded");
            assert!(!class.is_eligible());
        }
    }

    #[test]
    fn test_unknown_types_are_other_and_eligible() {
        let class = InputTypeClass::from_declared_type("search");
        assert_eq!(class, InputTypeClass::Other);
        assert!(class.is_eligible());
    }

    #[test]
    fn test_multiline_is_text() {
        assert_eq!(
            InputTypeClass::classify(&FieldKind::Multiline),
            InputTypeClass::Text
        );
    }

    #[test]
    fn test_caret_hostile() {
        assert!(!is_caret_hostile(&FieldKind::Multiline));
        assert!(!is_caret_hostile(&FieldKind::single_line("text")));
        assert!(!is_caret_hostile(&FieldKind::single_line("")));
        assert!(is_caret_hostile(&FieldKind::single_line("email")));
        assert!(is_caret_hostile(&FieldKind::single_line("number")));
        assert!(is_caret_hostile(&FieldKind::single_line("search")));
    }
}
