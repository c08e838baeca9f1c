// SPDX-License-Identifier: GPL-3.0-only

//! Focus tracking for eligible host fields.
//!
//! A single focus-in/focus-out pair drives the whole keyboard. Each
//! transition updates the tracked session and returns the side effects the
//! orchestrator must carry out, in order. The only effect applied directly
//! is the declared-type override: caret-hostile single-line types are
//! switched to `text` for the duration of the session, with the selection
//! captured before and re-applied after every switch.

use std::rc::Rc;

use crate::field::{
    FieldHandle, FieldId, InputTypeClass, Selection, TextField, WeakField, is_caret_hostile,
    same_field,
};

/// Side effect of a focus transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEffect {
    /// Panel visibility changed; observers must be notified.
    VisibilityChanged(bool),
    /// A session started for a field of the given class.
    SessionOpened {
        /// The tracked field.
        field: FieldId,
        /// Its input type, classified once.
        class: InputTypeClass,
    },
    /// The tracked session ended.
    SessionClosed,
    /// The field should be scrolled clear of the panel.
    ShiftIntoView(FieldId),
    /// Any active viewport shift should be undone.
    ResetShift,
}

#[derive(Debug)]
struct Session {
    field: WeakField,
    id: FieldId,
    class: InputTypeClass,
    original_type: Option<String>,
}

/// Tracks the single focused field and panel visibility.
#[derive(Debug)]
pub struct FocusController {
    enabled: bool,
    visible: bool,
    session: Option<Session>,
}

impl FocusController {
    /// Creates a controller with no tracked field.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            visible: false,
            session: None,
        }
    }

    /// Whether focus events are handled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the panel is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The tracked field, if it is still alive.
    pub fn focused_field(&self) -> Option<FieldHandle> {
        self.session.as_ref().and_then(|session| session.field.upgrade())
    }

    /// Identity of the tracked field.
    pub fn focused_id(&self) -> Option<FieldId> {
        self.session.as_ref().map(|session| session.id)
    }

    /// Input type of the tracked field.
    pub fn input_type(&self) -> Option<InputTypeClass> {
        self.session.as_ref().map(|session| session.class)
    }

    /// Returns `true` if `field` is the tracked field.
    pub fn is_tracking(&self, field: &FieldHandle) -> bool {
        self.focused_field()
            .is_some_and(|tracked| same_field(&tracked, field))
    }

    /// Handles focus entering `field`.
    pub fn focus_in(&mut self, field: &FieldHandle) -> Vec<FocusEffect> {
        if !self.enabled {
            tracing::trace!("focus-in ignored: keyboard disabled");
            return Vec::new();
        }

        let (id, kind) = {
            let field = field.borrow();
            (field.id(), field.kind())
        };
        let class = InputTypeClass::classify(&kind);

        if !class.is_eligible() {
            tracing::debug!(
                "focus-in ignored: {:?} is not eligible",
                kind.declared_type().unwrap_or_default()
            );
            return Vec::new();
        }

        if self.focused_id() == Some(id) {
            tracing::trace!("focus-in ignored: field {id:?} already tracked");
            return Vec::new();
        }

        // Focus moved without a focus-out for the previous field.
        if self.session.is_some() {
            self.close_session();
        }

        let mut effects = Vec::new();
        if !self.visible {
            self.visible = true;
            effects.push(FocusEffect::VisibilityChanged(true));
        }

        let original_type = override_type(&mut *field.borrow_mut());
        if let Some(original) = &original_type {
            tracing::debug!("field {id:?}: declared type {original:?} overridden with \"text\"");
        }

        self.session = Some(Session {
            field: Rc::downgrade(field),
            id,
            class,
            original_type,
        });
        tracing::info!("focus session opened for {class} field {id:?}");

        effects.push(FocusEffect::SessionOpened { field: id, class });
        effects.push(FocusEffect::ShiftIntoView(id));
        effects
    }

    /// Handles focus leaving `field`. Ignored unless `field` is tracked.
    pub fn focus_out(&mut self, field: &FieldHandle) -> Vec<FocusEffect> {
        if !self.enabled {
            return Vec::new();
        }

        if !self.is_tracking(field) {
            tracing::trace!("focus-out ignored: field is not tracked");
            return Vec::new();
        }

        self.close_session();

        let mut effects = Vec::new();
        self.hide(&mut effects);
        effects.push(FocusEffect::SessionClosed);
        effects.push(FocusEffect::ResetShift);
        effects
    }

    /// Ends the session for an Enter commit.
    ///
    /// Hides the panel and restores the declared type, then hands the field
    /// back so the caller can blur it and submit its form. Its later
    /// focus-out is ignored since it is no longer tracked.
    pub fn commit(&mut self) -> (Vec<FocusEffect>, Option<FieldHandle>) {
        let mut effects = Vec::new();
        self.hide(&mut effects);

        let had_session = self.session.is_some();
        let field = self.close_session();
        if had_session {
            effects.push(FocusEffect::SessionClosed);
        }
        (effects, field)
    }

    /// Enables or disables focus handling.
    ///
    /// Disabling hides the panel and ends the session.
    pub fn set_enabled(&mut self, enabled: bool) -> Vec<FocusEffect> {
        if self.enabled == enabled {
            return Vec::new();
        }
        self.enabled = enabled;
        tracing::info!("keyboard {}", if enabled { "enabled" } else { "disabled" });

        let mut effects = Vec::new();
        if !enabled {
            self.hide(&mut effects);
            if self.session.is_some() {
                self.close_session();
                effects.push(FocusEffect::SessionClosed);
            }
            effects.push(FocusEffect::ResetShift);
        }
        effects
    }

    fn hide(&mut self, effects: &mut Vec<FocusEffect>) {
        if self.visible {
            self.visible = false;
            effects.push(FocusEffect::VisibilityChanged(false));
        }
    }

    /// Clears the session and restores the field's declared type.
    fn close_session(&mut self) -> Option<FieldHandle> {
        let session = self.session.take()?;
        let field = session.field.upgrade();

        match (&field, &session.original_type) {
            (Some(field), Some(original)) => {
                restore_type(&mut *field.borrow_mut(), original);
                tracing::debug!("field {:?}: declared type {original:?} restored", session.id);
            }
            (None, _) => tracing::debug!("field {:?} dropped during session", session.id),
            (Some(_), None) => {}
        }

        tracing::info!("focus session closed for field {:?}", session.id);
        field
    }
}

impl Default for FocusController {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Switches a caret-hostile field to `text`, keeping its selection.
///
/// Returns the original declared type if it was overridden.
fn override_type(field: &mut dyn TextField) -> Option<String> {
    let kind = field.kind();
    if !is_caret_hostile(&kind) {
        return None;
    }
    let original = kind.declared_type()?.to_string();

    switch_type(field, "text");
    Some(original)
}

fn restore_type(field: &mut dyn TextField, original: &str) {
    switch_type(field, original);
}

fn switch_type(field: &mut dyn TextField, declared_type: &str) {
    let len = field.value().chars().count();
    let selection = field
        .selection()
        .map_or(Selection::caret(len), |selection| selection.clamped(len));

    field.set_declared_type(declared_type);
    field.set_selection_range(selection.start, selection.end);
}
