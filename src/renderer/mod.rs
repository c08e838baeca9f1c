// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard renderer for libcosmic.
//!
//! Turns a [`KeyGrid`](crate::layout::KeyGrid) into libcosmic widgets. The
//! renderer is stateless: every frame is built from the grid returned by
//! [`VirtualKeyboard::key_grid`](crate::VirtualKeyboard::key_grid), and key
//! interactions come back as [`KeyMessage`]s.
//!
//! - **key**: a single key, with icon detection and press-and-hold handling
//! - **row**: horizontal layout of keys
//! - **panel**: the full grid, sized to the surface width
//! - **message**: messages emitted by the keys
//!
//! # Usage
//!
//! ```rust,ignore
//! use fieldboard::renderer::render_keyboard;
//!
//! let element = render_keyboard(&keyboard.key_grid(), 800.0)
//!     .map(AppMessage::Keyboard);
//! ```

pub mod key;
pub mod message;
pub mod panel;
pub mod row;

pub use key::{key_width_units, render_key};
pub use message::KeyMessage;
pub use panel::{base_unit, panel_height, render_keyboard};
pub use row::render_row;
