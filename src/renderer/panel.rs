// SPDX-License-Identifier: GPL-3.0-only

//! Panel rendering: the full key grid.

use cosmic::Element;
use cosmic::iced::{Length, Padding};
use cosmic::widget::{self, container};

use crate::layout::KeyGrid;
use crate::renderer::message::KeyMessage;
use crate::renderer::row::{render_row, row_width_units};

/// Padding around the key grid in pixels.
pub const DEFAULT_PADDING: f32 = 8.0;

/// Spacing between keys and rows in pixels.
pub const DEFAULT_SPACING: f32 = 4.0;

/// Smallest base unit in pixels.
pub const MIN_UNIT: f32 = 24.0;

/// Largest base unit in pixels.
pub const MAX_UNIT: f32 = 64.0;

/// Computes the base unit so the widest row fits `surface_width`.
#[must_use]
pub fn base_unit(grid: &KeyGrid, surface_width: f32) -> f32 {
    let widest = grid
        .rows
        .iter()
        .map(|row| {
            let gaps = DEFAULT_SPACING * row.len().saturating_sub(1) as f32;
            (row_width_units(row), gaps)
        })
        .fold((1.0_f32, 0.0_f32), |(units, gaps), (row_units, row_gaps)| {
            if row_units > units {
                (row_units, row_gaps)
            } else {
                (units, gaps)
            }
        });

    let available = surface_width - DEFAULT_PADDING * 2.0 - widest.1;
    (available / widest.0).clamp(MIN_UNIT, MAX_UNIT)
}

/// Height of the rendered panel for a given base unit.
#[must_use]
pub fn panel_height(grid: &KeyGrid, unit: f32) -> f32 {
    let rows = grid.rows.len() as f32;
    rows * unit + DEFAULT_SPACING * (rows - 1.0).max(0.0) + DEFAULT_PADDING * 2.0
}

/// Renders the key grid, centered, on the theme background.
pub fn render_keyboard<'a>(grid: &KeyGrid, surface_width: f32) -> Element<'a, KeyMessage> {
    let unit = base_unit(grid, surface_width);

    let column = grid
        .rows
        .iter()
        .fold(widget::column::column().spacing(DEFAULT_SPACING), |column, row| {
            column.push(render_row(row, unit, DEFAULT_SPACING))
        });

    container(container(column).center_x(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fixed(panel_height(grid, unit)))
        .padding(Padding::from(DEFAULT_PADDING))
        .class(cosmic::style::Container::Background)
        .into()
}
