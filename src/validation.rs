// SPDX-License-Identifier: GPL-3.0-only

//! Character validation and initial layout selection per input type.
//!
//! Validation always runs against the prospective full value of the field
//! after an insertion, never against the inserted text alone, so a
//! multi-character insert is accepted or rejected as a whole.

use crate::field::InputTypeClass;
use crate::layout::LayoutType;

/// Returns `true` if `value` may be the content of a field of `class`.
///
/// The empty string is always allowed.
#[must_use]
pub fn is_allowed(value: &str, class: InputTypeClass) -> bool {
    match class {
        InputTypeClass::Number => value.chars().all(|c| c.is_ascii_digit()),
        InputTypeClass::Email => value.chars().all(is_email_char),
        InputTypeClass::Tel => value.chars().all(is_tel_char),
        InputTypeClass::Url => value.chars().all(is_url_char),
        InputTypeClass::Text
        | InputTypeClass::Password
        | InputTypeClass::Other
        | InputTypeClass::Excluded => true,
    }
}

/// Returns the layout a session of `class` starts in.
///
/// Number fields always start in the numbers layout; every other class
/// keeps the requested default.
#[must_use]
pub fn initial_layout(class: InputTypeClass, requested: LayoutType) -> LayoutType {
    match class {
        InputTypeClass::Number => LayoutType::Numbers,
        InputTypeClass::Text
        | InputTypeClass::Email
        | InputTypeClass::Tel
        | InputTypeClass::Url
        | InputTypeClass::Password
        | InputTypeClass::Other
        | InputTypeClass::Excluded => requested,
    }
}

fn is_email_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '+' | '-')
}

fn is_tel_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' ')
}

fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ':' | '/' | '.' | '_' | '-')
}
