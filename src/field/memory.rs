// SPDX-License-Identifier: GPL-3.0-only

//! In-memory text field.
//!
//! `MemoryField` behaves like a browser form control closely enough to drive
//! the keyboard without a toolkit: changing the declared type resets the
//! caret to 0, dispatched events are recorded, and form submission is
//! counted.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::field::{
    FieldEvent, FieldEventKind, FieldId, FieldKind, ScrollOffset, Selection, TextField,
};

static NEXT_FIELD_ID: AtomicU64 = AtomicU64::new(1);

/// A [`TextField`] that keeps all state in memory.
#[derive(Debug, Clone)]
pub struct MemoryField {
    id: FieldId,
    kind: FieldKind,
    value: String,
    selection: Option<Selection>,
    scroll: ScrollOffset,
    read_only: bool,
    disabled: bool,
    in_form: bool,
    focused: bool,
    events: Vec<FieldEvent>,
    native_writes: usize,
    submissions: usize,
}

impl MemoryField {
    fn with_kind(kind: FieldKind) -> Self {
        Self {
            id: FieldId(NEXT_FIELD_ID.fetch_add(1, Ordering::Relaxed)),
            kind,
            value: String::new(),
            selection: Some(Selection::caret(0)),
            scroll: ScrollOffset::default(),
            read_only: false,
            disabled: false,
            in_form: false,
            focused: false,
            events: Vec::new(),
            native_writes: 0,
            submissions: 0,
        }
    }

    /// Creates a single-line field with the given declared type.
    #[must_use]
    pub fn single_line(declared_type: &str) -> Self {
        Self::with_kind(FieldKind::single_line(declared_type))
    }

    /// Creates a multiline field.
    #[must_use]
    pub fn multiline() -> Self {
        Self::with_kind(FieldKind::Multiline)
    }

    /// Sets the initial value and places the caret at its end.
    #[must_use]
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.selection = Some(Selection::caret(value.chars().count()));
        self
    }

    /// Sets the initial selection.
    #[must_use]
    pub fn with_selection(mut self, start: usize, end: usize) -> Self {
        self.selection = Some(Selection::new(start, end).clamped(self.char_len()));
        self
    }

    /// Marks the caret position as unknown.
    #[must_use]
    pub fn with_unknown_selection(mut self) -> Self {
        self.selection = None;
        self
    }

    /// Sets the initial scroll offsets.
    #[must_use]
    pub fn with_scroll(mut self, top: f32, left: f32) -> Self {
        self.scroll = ScrollOffset { top, left };
        self
    }

    /// Makes the field read-only.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Makes the field disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Places the field inside a form.
    #[must_use]
    pub fn in_form(mut self) -> Self {
        self.in_form = true;
        self
    }

    /// Wraps the field into a shared cell.
    #[must_use]
    pub fn shared(self) -> Rc<RefCell<MemoryField>> {
        Rc::new(RefCell::new(self))
    }

    /// Current value without allocation.
    pub fn text(&self) -> &str {
        &self.value
    }

    /// Current declared type, `None` for multiline fields.
    pub fn declared_type(&self) -> Option<&str> {
        self.kind.declared_type()
    }

    /// Whether the field currently has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// All events dispatched so far.
    pub fn events(&self) -> &[FieldEvent] {
        &self.events
    }

    /// Kinds of all events dispatched so far.
    pub fn event_kinds(&self) -> Vec<FieldEventKind> {
        self.events.iter().map(|event| event.kind).collect()
    }

    /// Number of writes through the native setter.
    pub fn native_writes(&self) -> usize {
        self.native_writes
    }

    /// Number of successful form submissions.
    pub fn submissions(&self) -> usize {
        self.submissions
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }
}

impl TextField for MemoryField {
    fn id(&self) -> FieldId {
        self.id
    }

    fn kind(&self) -> FieldKind {
        self.kind.clone()
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn selection(&self) -> Option<Selection> {
        self.selection
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn set_value_native(&mut self, value: &str) {
        self.value = value.to_string();
        self.native_writes += 1;
        // Browsers move the caret to the end on programmatic writes.
        self.selection = Some(Selection::caret(self.char_len()));
    }

    fn dispatch(&mut self, event: FieldEvent) {
        self.events.push(event);
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn set_selection_range(&mut self, start: usize, end: usize) {
        self.selection = Some(Selection::new(start, end).clamped(self.char_len()));
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: ScrollOffset) {
        self.scroll = offset;
    }

    fn set_declared_type(&mut self, declared_type: &str) {
        if let FieldKind::SingleLine { declared_type: current } = &mut self.kind {
            if current != declared_type {
                *current = declared_type.to_string();
                self.selection = Some(Selection::caret(0));
            }
        }
    }

    fn submit_form(&mut self) -> bool {
        if self.in_form {
            self.submissions += 1;
        }
        self.in_form
    }
}
