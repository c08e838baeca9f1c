// SPDX-License-Identifier: GPL-3.0-only

//! Key input handling for Fieldboard.
//!
//! Hardware and virtual keys end up in the same place: a [`KeyIntent`].
//!
//! # Features
//!
//! - **Key parsing**: resolve web-style key names and XKB keysym names into a
//!   [`HardwareKey`]
//! - **Synchronization**: route hardware keys onto the intent set shared with
//!   the virtual keys, suppressing native insertion for every handled key
//! - **Continuous press**: repeat a held key after an initial delay
//!
//! # Example Usage
//!
//! ```rust
//! use fieldboard::input::{dispatch_hardware, HardwareKey, KeyDispatch, KeyIntent};
//!
//! let key = HardwareKey::from_key_name("Backspace").unwrap();
//! assert_eq!(dispatch_hardware(&key), KeyDispatch::Handled(KeyIntent::Backspace));
//!
//! let tab = HardwareKey::from_key_name("Tab").unwrap();
//! assert_eq!(dispatch_hardware(&tab), KeyDispatch::PassThrough);
//! ```

pub mod keycode;
pub mod press;
pub mod sync;

pub use keycode::HardwareKey;
pub use press::{ContinuousPress, PressEvent, PressOptions, PressResponse, ticks};
pub use sync::{KeyDispatch, KeyIntent, dispatch_hardware};
