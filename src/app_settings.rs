// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Application ID in RDNN (reverse domain name notation) format.
pub const APP_ID: &str = "io.github.fieldboard.Fieldboard";

/// Delay before a held key starts repeating, in milliseconds.
pub const PRESS_INITIAL_DELAY_MS: u64 = 500;

/// Interval between repeats of a held key, in milliseconds.
pub const PRESS_INTERVAL_MS: u64 = 50;

/// Fraction of the viewport height covered by the keyboard panel.
pub const KEYBOARD_HEIGHT_RATIO: f32 = 0.38;

/// Clearance kept between a shifted field and the keyboard panel, in pixels.
pub const FIELD_PADDING_PX: f32 = 20.0;

/// Duration of the viewport shift transition, in milliseconds.
pub const SHIFT_TRANSITION_MS: u64 = 300;

/// Class token applied to shifted content while its transition runs.
pub const SHIFT_TRANSITION_CLASS: &str = "vk-keyboard-shift-transition";

/// Class token of the keyboard container; user class names are appended.
pub const CONTAINER_CLASS: &str = "vk-container";

/// Default window width of the demo application in pixels.
pub const DEMO_WIDTH: f32 = 900.0;

/// Default window height of the demo application in pixels.
pub const DEMO_HEIGHT: f32 = 640.0;
