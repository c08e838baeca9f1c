// SPDX-License-Identifier: GPL-3.0-only

//! Layout and caps lock state of one keyboard session.

use crate::field::InputTypeClass;
use crate::layout::LayoutType;
use crate::validation::initial_layout;

/// Current layout, caps lock and input type.
///
/// Reset at the start of every focus session; caps lock never carries over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutState {
    layout: LayoutType,
    caps_lock: bool,
    input_type: InputTypeClass,
    default_layout: LayoutType,
}

impl LayoutState {
    /// Creates a state starting in `default_layout` for a text field.
    #[must_use]
    pub fn new(default_layout: LayoutType) -> Self {
        Self {
            layout: initial_layout(InputTypeClass::Text, default_layout),
            caps_lock: false,
            input_type: InputTypeClass::Text,
            default_layout,
        }
    }

    /// Active layout.
    pub fn layout(&self) -> LayoutType {
        self.layout
    }

    /// Whether caps lock is on.
    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// Input type of the current session.
    pub fn input_type(&self) -> InputTypeClass {
        self.input_type
    }

    /// Starts a session for a field of `class`.
    ///
    /// The layout is re-derived from the input type, overriding whatever the
    /// user picked before, and caps lock is switched off.
    pub fn reset_for(&mut self, class: InputTypeClass) {
        self.input_type = class;
        self.layout = initial_layout(class, self.default_layout);
        self.caps_lock = false;
        tracing::debug!("layout reset to {} for {} field", self.layout, class);
    }

    /// Switches between letters and symbols.
    ///
    /// Number fields cannot leave the numbers layout. Returns `true` if the
    /// layout changed.
    pub fn toggle_layout(&mut self) -> bool {
        let next = match (self.input_type, self.layout) {
            (InputTypeClass::Number, _) => {
                tracing::trace!("layout toggle ignored on number field");
                return false;
            }
            (_, LayoutType::Letters) => LayoutType::Symbols,
            (_, LayoutType::Symbols | LayoutType::Numbers) => LayoutType::Letters,
        };

        self.layout = next;
        tracing::debug!("layout toggled to {next}");
        true
    }

    /// Flips caps lock and returns the new state.
    pub fn toggle_caps(&mut self) -> bool {
        self.caps_lock = !self.caps_lock;
        tracing::debug!("caps lock {}", if self.caps_lock { "on" } else { "off" });
        self.caps_lock
    }
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new(LayoutType::default())
    }
}
