// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard layouts for Fieldboard.
//!
//! # Features
//!
//! - **Key tables**: static letters, symbols and numbers tables
//! - **State machine**: layout and caps lock of the current session
//! - **Key grid**: the state converted into rows of renderable keys
//!
//! # Example Usage
//!
//! ```rust
//! use fieldboard::field::InputTypeClass;
//! use fieldboard::layout::{KeyGrid, LayoutState, LayoutType};
//!
//! let mut state = LayoutState::new(LayoutType::Letters);
//! state.reset_for(InputTypeClass::Number);
//!
//! let grid = KeyGrid::build(&state);
//! assert_eq!(grid.layout, LayoutType::Numbers);
//! ```

pub mod grid;
pub mod state;
pub mod types;

pub use grid::{KeyCell, KeyGrid};
pub use state::LayoutState;
pub use types::{KeyTable, LETTERS, LayoutType, NUMBERS, SYMBOLS};
