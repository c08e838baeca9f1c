// SPDX-License-Identifier: GPL-3.0-only

//! Conversion of layout state into a renderable key grid.
//!
//! # Text grid (letters and symbols)
//!
//! ```text
//! row 0..=2  table rows
//! row 3      [Caps]? table row [Backspace]        caps only in letters
//! bottom     [&123|ABC] [.]? [Space] [@]? [Enter] dot and at only for email
//! ```
//!
//! Row 3 above is the last table row (`zxcvbnm` in letters).
//!
//! # Numbers grid
//!
//! Table rows; row 2 ends with Backspace and row 3 with Enter.

use crate::field::InputTypeClass;
use crate::fl;
use crate::input::KeyIntent;
use crate::layout::{LayoutState, LayoutType};

/// One key of the rendered grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCell {
    /// What tapping the key does.
    pub intent: KeyIntent,
    /// Display label.
    pub label: String,
    /// Highlighted, e.g. the caps key while caps lock is on.
    pub active: bool,
    /// Repeats while held.
    pub repeats: bool,
}

impl KeyCell {
    fn character(c: char) -> Self {
        Self {
            intent: KeyIntent::Character(c),
            label: c.to_string(),
            active: false,
            repeats: false,
        }
    }

    fn special(intent: KeyIntent, label: String) -> Self {
        Self {
            intent,
            label,
            active: false,
            repeats: false,
        }
    }

}

/// A grid of key rows ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGrid {
    /// Layout the grid was built for.
    pub layout: LayoutType,
    /// Rows from top to bottom.
    pub rows: Vec<Vec<KeyCell>>,
}

impl KeyGrid {
    /// Builds the grid for the given state.
    #[must_use]
    pub fn build(state: &LayoutState) -> Self {
        let rows = match state.layout() {
            LayoutType::Numbers => numbers_rows(),
            layout @ (LayoutType::Letters | LayoutType::Symbols) => {
                text_rows(layout, state.caps_lock(), state.input_type())
            }
        };

        Self {
            layout: state.layout(),
            rows,
        }
    }

    /// Iterates over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &KeyCell> {
        self.rows.iter().flatten()
    }

    /// Finds the first cell with the given intent.
    pub fn find(&self, intent: KeyIntent) -> Option<&KeyCell> {
        self.cells().find(|cell| cell.intent == intent)
    }
}

fn text_rows(layout: LayoutType, caps_lock: bool, input_type: InputTypeClass) -> Vec<Vec<KeyCell>> {
    let upper = caps_lock && layout == LayoutType::Letters;

    let mut rows: Vec<Vec<KeyCell>> = layout
        .table()
        .iter()
        .map(|row| {
            row.iter()
                .map(|&c| KeyCell::character(if upper { to_upper(c) } else { c }))
                .collect()
        })
        .collect();

    if let Some(row) = rows.get_mut(3) {
        if layout == LayoutType::Letters {
            let mut caps = KeyCell::special(KeyIntent::CapsToggle, fl!("caps-lock"));
            caps.active = caps_lock;
            row.insert(0, caps);
        }
        row.push(backspace_cell());
    }

    let toggle_label = match layout {
        LayoutType::Letters => fl!("layout-symbols"),
        LayoutType::Symbols | LayoutType::Numbers => fl!("layout-letters"),
    };
    let is_email = input_type == InputTypeClass::Email;

    let mut bottom = vec![KeyCell::special(KeyIntent::LayoutToggle, toggle_label)];
    if is_email {
        bottom.push(KeyCell::character('.'));
    }
    bottom.push(KeyCell::special(KeyIntent::Space, fl!("space")));
    if is_email {
        bottom.push(KeyCell::character('@'));
    }
    bottom.push(KeyCell::special(KeyIntent::Enter, fl!("enter")));
    rows.push(bottom);

    rows
}

fn numbers_rows() -> Vec<Vec<KeyCell>> {
    let mut rows: Vec<Vec<KeyCell>> = LayoutType::Numbers
        .table()
        .iter()
        .map(|row| row.iter().copied().map(KeyCell::character).collect())
        .collect();

    if let Some(row) = rows.get_mut(2) {
        row.push(backspace_cell());
    }
    if let Some(row) = rows.get_mut(3) {
        row.push(KeyCell::special(KeyIntent::Enter, fl!("enter")));
    }

    rows
}

fn backspace_cell() -> KeyCell {
    let mut cell = KeyCell::special(KeyIntent::Backspace, fl!("backspace"));
    cell.repeats = true;
    cell
}

/// Single-char uppercase; keys whose uppercase expands stay unchanged.
fn to_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
