// SPDX-License-Identifier: GPL-3.0-only

//! Caret-accurate text mutation on a focused field.
//!
//! Every edit follows the same sequence:
//!
//! 1. Resolve the effective selection (unknown caret means end of value)
//! 2. Write the new value through the field's native setter
//! 3. Dispatch `input`, then `change`
//! 4. Re-focus the field and collapse the caret at its new position
//! 5. Restore the scroll offsets captured before the write
//!
//! Read-only and disabled fields are left untouched.

use crate::field::{FieldEvent, Selection, TextField};

/// Returns the effective selection of `field`, clamped to its value.
#[must_use]
pub fn effective_selection(field: &dyn TextField) -> Selection {
    let len = field.value().chars().count();
    field
        .selection()
        .map_or(Selection::caret(len), |selection| selection.clamped(len))
}

/// Returns the value `field` would hold after inserting `text` at its
/// current selection.
#[must_use]
pub fn prospective_value(field: &dyn TextField, text: &str) -> String {
    let value = field.value();
    let selection = effective_selection(field);
    splice(&value, selection, text)
}

/// Inserts `text` at the caret, replacing any selection.
///
/// Returns `true` if the field was mutated.
pub fn insert_text(field: &mut dyn TextField, text: &str) -> bool {
    if !is_editable(field) {
        tracing::trace!("insert ignored: field is read-only or disabled");
        return false;
    }

    let value = field.value();
    let selection = effective_selection(field);
    let new_value = splice(&value, selection, text);
    let caret = selection.start + text.chars().count();

    apply(field, &new_value, caret);
    true
}

/// Deletes the selection, or the character before the caret.
///
/// Returns `true` if the field was mutated. A collapsed caret at offset 0
/// leaves the field untouched.
pub fn backspace(field: &mut dyn TextField) -> bool {
    if !is_editable(field) {
        tracing::trace!("backspace ignored: field is read-only or disabled");
        return false;
    }

    let value = field.value();
    let selection = effective_selection(field);

    let (removed, caret) = if !selection.is_collapsed() {
        (selection, selection.start)
    } else if selection.start > 0 {
        (
            Selection::new(selection.start - 1, selection.start),
            selection.start - 1,
        )
    } else {
        return false;
    };

    let new_value = splice(&value, removed, "");
    apply(field, &new_value, caret);
    true
}

fn is_editable(field: &dyn TextField) -> bool {
    !field.is_read_only() && !field.is_disabled()
}

fn apply(field: &mut dyn TextField, new_value: &str, caret: usize) {
    let scroll = field.scroll_offset();

    field.set_value_native(new_value);
    field.dispatch(FieldEvent::input());
    field.dispatch(FieldEvent::change());

    field.focus();
    field.set_selection_range(caret, caret);
    field.set_scroll_offset(scroll);
}

/// Replaces the chars covered by `selection` with `text`.
fn splice(value: &str, selection: Selection, text: &str) -> String {
    let start = byte_offset(value, selection.start);
    let end = byte_offset(value, selection.end);

    let mut out = String::with_capacity(value.len() - (end - start) + text.len());
    out.push_str(&value[..start]);
    out.push_str(text);
    out.push_str(&value[end..]);
    out
}

/// Converts a char offset into a byte offset, clamping to the end.
fn byte_offset(value: &str, chars: usize) -> usize {
    value
        .char_indices()
        .nth(chars)
        .map_or(value.len(), |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldEventKind, MemoryField, ScrollOffset};

    #[test]
    fn test_insert_at_caret() {
        let mut field = MemoryField::single_line("text")
            .with_value("bc")
            .with_selection(1, 1);

        assert!(insert_text(&mut field, "a"));
        assert_eq!(field.text(), "bac");
        assert_eq!(field.selection(), Some(Selection::caret(2)));
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut field = MemoryField::single_line("text")
            .with_value("hello world")
            .with_selection(6, 11);

        insert_text(&mut field, "there");
        assert_eq!(field.text(), "hello there");
        assert_eq!(field.selection(), Some(Selection::caret(11)));
    }

    #[test]
    fn test_insert_with_unknown_caret_appends() {
        let mut field = MemoryField::single_line("text")
            .with_value("ab")
            .with_unknown_selection();

        insert_text(&mut field, "c");
        assert_eq!(field.text(), "abc");
        assert_eq!(field.selection(), Some(Selection::caret(3)));
    }

    #[test]
    fn test_insert_counts_chars_not_bytes() {
        let mut field = MemoryField::single_line("text")
            .with_value("héé")
            .with_selection(2, 2);

        insert_text(&mut field, "ü");
        assert_eq!(field.text(), "héüé");
        assert_eq!(field.selection(), Some(Selection::caret(3)));
    }

    #[test]
    fn test_events_replayed_in_order() {
        let mut field = MemoryField::single_line("text");
        insert_text(&mut field, "x");

        assert_eq!(
            field.event_kinds(),
            vec![FieldEventKind::Input, FieldEventKind::Change]
        );
        assert!(field.events().iter().all(|e| e.bubbles && e.cancelable));
        assert_eq!(field.native_writes(), 1);
        assert!(field.is_focused());
    }

    #[test]
    fn test_scroll_preserved() {
        let mut field = MemoryField::multiline()
            .with_value("line one\nline two")
            .with_scroll(42.0, 7.0);

        insert_text(&mut field, "!");
        assert_eq!(field.scroll_offset(), ScrollOffset { top: 42.0, left: 7.0 });

        backspace(&mut field);
        assert_eq!(field.scroll_offset(), ScrollOffset { top: 42.0, left: 7.0 });
    }

    #[test]
    fn test_read_only_and_disabled_are_untouched() {
        let mut read_only = MemoryField::single_line("text").with_value("a").read_only();
        assert!(!insert_text(&mut read_only, "b"));
        assert!(!backspace(&mut read_only));
        assert_eq!(read_only.text(), "a");
        assert!(read_only.events().is_empty());

        let mut disabled = MemoryField::single_line("text").with_value("a").disabled();
        assert!(!insert_text(&mut disabled, "b"));
        assert!(!backspace(&mut disabled));
        assert_eq!(disabled.text(), "a");
    }

    #[test]
    fn test_backspace_deletes_previous_char() {
        let mut field = MemoryField::single_line("text")
            .with_value("abc")
            .with_selection(2, 2);

        assert!(backspace(&mut field));
        assert_eq!(field.text(), "ac");
        assert_eq!(field.selection(), Some(Selection::caret(1)));
    }

    #[test]
    fn test_backspace_deletes_selection() {
        let mut field = MemoryField::single_line("text")
            .with_value("bc")
            .with_selection(0, 2);

        assert!(backspace(&mut field));
        assert_eq!(field.text(), "");
        assert_eq!(field.selection(), Some(Selection::caret(0)));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut field = MemoryField::single_line("text")
            .with_value("abc")
            .with_selection(0, 0);

        assert!(!backspace(&mut field));
        assert_eq!(field.text(), "abc");
        assert!(field.events().is_empty());
    }

    #[test]
    fn test_insert_then_backspace_round_trip() {
        let mut field = MemoryField::single_line("text")
            .with_value("start end")
            .with_selection(5, 5);
        let original = field.text().to_string();

        for c in ["x", "y", "z", "ü"] {
            insert_text(&mut field, c);
        }
        for _ in 0..4 {
            backspace(&mut field);
        }

        assert_eq!(field.text(), original);
        assert_eq!(field.selection(), Some(Selection::caret(5)));
    }

    #[test]
    fn test_prospective_value_matches_insert() {
        let field = MemoryField::single_line("text")
            .with_value("12")
            .with_selection(1, 1);
        assert_eq!(prospective_value(&field, "a"), "1a2");
    }
}
