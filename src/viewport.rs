// SPDX-License-Identifier: GPL-3.0-only

//! Viewport shift: keeps the focused field visible above the panel.
//!
//! The panel covers the bottom [`KEYBOARD_HEIGHT_RATIO`] of the viewport.
//! When the focused field's bottom edge plus [`FIELD_PADDING_PX`] would fall
//! behind it, every sibling of the panel that is neither fixed nor absolutely
//! positioned is translated up by the exact overflow.
//!
//! Measuring is deferred until the host has laid out the newly shown panel:
//! [`ViewportShift::request`] only records the field, and the host calls
//! [`ViewportShift::after_layout`] from its next layout pass.

use std::time::{Duration, Instant};

use crate::app_settings::{
    FIELD_PADDING_PX, KEYBOARD_HEIGHT_RATIO, SHIFT_TRANSITION_CLASS, SHIFT_TRANSITION_MS,
};
use crate::field::FieldId;

/// Identity of a host content node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Computed positioning scheme of a content node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Positioning {
    /// Normal flow.
    #[default]
    Static,
    /// Offset from its normal position.
    Relative,
    /// Sticky to its scroll container.
    Sticky,
    /// Fixed to the viewport; never shifted.
    Fixed,
    /// Absolutely positioned; never shifted.
    Absolute,
}

impl Positioning {
    /// Whether nodes with this positioning follow a shift.
    #[must_use]
    pub fn is_shiftable(self) -> bool {
        !matches!(self, Self::Fixed | Self::Absolute)
    }
}

/// A sibling of the keyboard panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentNode {
    /// Node identity.
    pub id: NodeId,
    /// Its computed positioning.
    pub position: Positioning,
}

/// Geometry and styling access provided by the host.
pub trait ViewportHost {
    /// Height of the visible viewport in pixels.
    fn viewport_height(&self) -> f32;

    /// Bottom edge of the field relative to the viewport top, if laid out.
    fn field_bottom(&self, field: FieldId) -> Option<f32>;

    /// Siblings of the keyboard panel, excluding the panel itself.
    fn panel_siblings(&self) -> Vec<ContentNode>;

    /// Sets the vertical translation of a node; negative moves it up.
    fn translate_y(&mut self, node: NodeId, offset: f32);

    /// Adds or removes a class token on a node.
    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool);

    /// Whether the node is still part of the document.
    fn is_attached(&self, node: NodeId) -> bool;
}

/// A host without geometry; shifts never happen.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoViewport;

impl ViewportHost for NoViewport {
    fn viewport_height(&self) -> f32 {
        0.0
    }

    fn field_bottom(&self, _field: FieldId) -> Option<f32> {
        None
    }

    fn panel_siblings(&self) -> Vec<ContentNode> {
        Vec::new()
    }

    fn translate_y(&mut self, _node: NodeId, _offset: f32) {}

    fn set_class(&mut self, _node: NodeId, _class: &str, _enabled: bool) {}

    fn is_attached(&self, _node: NodeId) -> bool {
        false
    }
}

/// Returns how far a field bottom overflows the uncovered viewport.
///
/// Zero when the field is already visible.
#[must_use]
pub fn shift_amount(viewport_height: f32, field_bottom: f32) -> f32 {
    let visible_height = viewport_height * (1.0 - KEYBOARD_HEIGHT_RATIO);
    let overflow = field_bottom + FIELD_PADDING_PX - visible_height;
    overflow.max(0.0)
}

/// The single set of shifted nodes and its pending work.
#[derive(Debug, Default)]
pub struct ViewportShift {
    shifted: Vec<NodeId>,
    offset: f32,
    pending: Option<FieldId>,
    cleanups: Vec<(Instant, Vec<NodeId>)>,
}

impl ViewportShift {
    /// Creates an empty shift state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes currently translated.
    pub fn shifted(&self) -> &[NodeId] {
        &self.shifted
    }

    /// Current translation in pixels, zero when nothing is shifted.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Returns `true` while a measurement waits for the next layout pass.
    pub fn has_pending_request(&self) -> bool {
        self.pending.is_some()
    }

    /// Earliest scheduled class cleanup.
    pub fn next_cleanup(&self) -> Option<Instant> {
        self.cleanups.iter().map(|(due, _)| *due).min()
    }

    /// Schedules a shift for `field` after the next layout pass.
    pub fn request(&mut self, field: FieldId) {
        self.pending = Some(field);
    }

    /// Runs the deferred request, if any.
    pub fn after_layout(&mut self, now: Instant, host: &mut dyn ViewportHost) {
        if let Some(field) = self.pending.take() {
            self.shift_into_view(field, now, host);
        }
    }

    /// Shifts content so `field` clears the panel.
    ///
    /// Any active shift is reset first.
    pub fn shift_into_view(&mut self, field: FieldId, now: Instant, host: &mut dyn ViewportHost) {
        self.reset(now, host);

        let Some(bottom) = host.field_bottom(field) else {
            tracing::trace!("shift skipped: field {field:?} has no layout");
            return;
        };

        let amount = shift_amount(host.viewport_height(), bottom);
        if amount <= 0.0 {
            return;
        }

        let nodes: Vec<NodeId> = host
            .panel_siblings()
            .into_iter()
            .filter(|node| node.position.is_shiftable())
            .map(|node| node.id)
            .collect();

        if nodes.is_empty() {
            return;
        }

        // Re-shifted nodes keep their transition class.
        for (_, pending) in &mut self.cleanups {
            pending.retain(|node| !nodes.contains(node));
        }
        self.cleanups.retain(|(_, pending)| !pending.is_empty());

        for &node in &nodes {
            host.set_class(node, SHIFT_TRANSITION_CLASS, true);
            host.translate_y(node, -amount);
        }

        tracing::debug!("shifted {} nodes up by {amount}px", nodes.len());
        self.shifted = nodes;
        self.offset = amount;
    }

    /// Moves shifted nodes back and schedules removal of their transition
    /// class once the transition has run. No-op when nothing is shifted.
    pub fn reset(&mut self, now: Instant, host: &mut dyn ViewportHost) {
        self.pending = None;
        if self.shifted.is_empty() {
            return;
        }

        let nodes = std::mem::take(&mut self.shifted);
        for &node in &nodes {
            if host.is_attached(node) {
                host.translate_y(node, 0.0);
            }
        }
        self.offset = 0.0;

        tracing::debug!("viewport shift reset for {} nodes", nodes.len());
        self.cleanups
            .push((now + Duration::from_millis(SHIFT_TRANSITION_MS), nodes));
    }

    /// Removes transition classes whose cleanup is due.
    pub fn run_cleanup(&mut self, now: Instant, host: &mut dyn ViewportHost) {
        let (due, later): (Vec<_>, Vec<_>) = std::mem::take(&mut self.cleanups)
            .into_iter()
            .partition(|(at, _)| *at <= now);
        self.cleanups = later;

        for node in due.into_iter().flat_map(|(_, nodes)| nodes) {
            if host.is_attached(node) {
                host.set_class(node, SHIFT_TRANSITION_CLASS, false);
            }
        }
    }
}
