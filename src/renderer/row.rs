// SPDX-License-Identifier: GPL-3.0-only

//! Row rendering for the keyboard panel.

use cosmic::Element;
use cosmic::widget;

use crate::layout::KeyCell;
use crate::renderer::key::{key_width_units, render_key};
use crate::renderer::message::KeyMessage;

/// Renders a row of keys with `spacing` pixels between them.
pub fn render_row<'a>(row: &[KeyCell], unit: f32, spacing: f32) -> Element<'a, KeyMessage> {
    row.iter()
        .fold(widget::row::row().spacing(spacing), |row_widget, cell| {
            row_widget.push(render_key(cell, unit))
        })
        .into()
}

/// Width of a row in base units, excluding spacing.
#[must_use]
pub fn row_width_units(row: &[KeyCell]) -> f32 {
    row.iter().map(key_width_units).sum()
}
