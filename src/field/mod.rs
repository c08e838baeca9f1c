// SPDX-License-Identifier: GPL-3.0-only

//! Host text fields driven by the keyboard.
//!
//! The keyboard never owns the fields it edits. Hosts expose their editable
//! elements through the [`TextField`] trait and share them as
//! [`FieldHandle`]s; the focus controller only keeps a [`WeakField`] for the
//! duration of one focus session.
//!
//! # Offsets
//!
//! Caret and selection offsets are counted in Unicode scalar values
//! (`char`s), never in bytes.
//!
//! # Sub-modules
//!
//! - `input_type`: classification of declared field types
//! - `memory`: an in-memory [`TextField`] used by tests and the demo

pub mod input_type;
pub mod memory;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub use input_type::{EXCLUDED_TYPES, InputTypeClass, is_caret_hostile};
pub use memory::MemoryField;

/// Shared handle to a host field.
pub type FieldHandle = Rc<RefCell<dyn TextField>>;

/// Non-owning reference to a host field.
pub type WeakField = Weak<RefCell<dyn TextField>>;

/// Identity of a host field, stable for the lifetime of the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u64);

/// Structural kind of an editable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line input with its declared native type (e.g. `"email"`).
    SingleLine {
        /// The declared type attribute as reported by the host.
        declared_type: String,
    },
    /// Multiline text area.
    Multiline,
}

impl FieldKind {
    /// Creates a single-line kind with the given declared type.
    pub fn single_line(declared_type: impl Into<String>) -> Self {
        Self::SingleLine {
            declared_type: declared_type.into(),
        }
    }

    /// Returns the declared type of a single-line field.
    pub fn declared_type(&self) -> Option<&str> {
        match self {
            Self::SingleLine { declared_type } => Some(declared_type),
            Self::Multiline => None,
        }
    }
}

/// A selection range; a collapsed selection is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Start offset in chars.
    pub start: usize,
    /// End offset in chars, never smaller than `start`.
    pub end: usize,
}

impl Selection {
    /// Creates a selection, swapping the bounds if they are reversed.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Creates a collapsed selection at `offset`.
    #[must_use]
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns `true` if start and end are equal.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Clamps both bounds to `len`.
    #[must_use]
    pub fn clamped(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// Scroll position of a field's content box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOffset {
    /// Vertical scroll in pixels.
    pub top: f32,
    /// Horizontal scroll in pixels.
    pub left: f32,
}

/// Kind of a change notification replayed on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEventKind {
    /// The value is being edited.
    Input,
    /// The value was committed.
    Change,
}

/// A notification dispatched on a field after its value is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEvent {
    /// Which notification this is.
    pub kind: FieldEventKind,
    /// Whether the event propagates to ancestors.
    pub bubbles: bool,
    /// Whether listeners may cancel the event.
    pub cancelable: bool,
}

impl FieldEvent {
    /// A bubbling, cancelable `input` event.
    #[must_use]
    pub fn input() -> Self {
        Self {
            kind: FieldEventKind::Input,
            bubbles: true,
            cancelable: true,
        }
    }

    /// A bubbling, cancelable `change` event.
    #[must_use]
    pub fn change() -> Self {
        Self {
            kind: FieldEventKind::Change,
            bubbles: true,
            cancelable: true,
        }
    }
}

/// An editable element owned by the host.
///
/// Implementations forward to the host toolkit. `set_value_native` must write
/// through the path observed by any framework bound to the field, so that
/// the `input`/`change` events dispatched afterwards are seen consistently.
pub trait TextField {
    /// Identity of the element.
    fn id(&self) -> FieldId;

    /// Structural kind and declared type.
    fn kind(&self) -> FieldKind;

    /// Current value.
    fn value(&self) -> String;

    /// Current selection, or `None` if the caret position is unknown.
    fn selection(&self) -> Option<Selection>;

    /// Whether the field rejects edits because it is read-only.
    fn is_read_only(&self) -> bool;

    /// Whether the field rejects edits because it is disabled.
    fn is_disabled(&self) -> bool;

    /// Writes the value through the framework-visible setter.
    fn set_value_native(&mut self, value: &str);

    /// Dispatches a change notification on the field.
    fn dispatch(&mut self, event: FieldEvent);

    /// Gives the field input focus.
    fn focus(&mut self);

    /// Releases input focus.
    fn blur(&mut self);

    /// Sets the selection range in chars.
    fn set_selection_range(&mut self, start: usize, end: usize);

    /// Current scroll offsets.
    fn scroll_offset(&self) -> ScrollOffset;

    /// Restores scroll offsets.
    fn set_scroll_offset(&mut self, offset: ScrollOffset);

    /// Replaces the declared native type of a single-line field.
    fn set_declared_type(&mut self, declared_type: &str);

    /// Submits the enclosing form. Returns `false` if there is none.
    fn submit_form(&mut self) -> bool;
}

/// Returns `true` if both handles refer to the same element.
pub fn same_field(a: &FieldHandle, b: &FieldHandle) -> bool {
    Rc::ptr_eq(a, b) || a.borrow().id() == b.borrow().id()
}
