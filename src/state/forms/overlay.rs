//! Validation state and the merged error overlay
//!
//! Three sources feed the display map: client validator output, errors set
//! directly by a collaborator, and errors returned by the server after a
//! rejected submission. Client and explicit errors only show once their
//! field is visible; server errors always show and win on collision.

use super::touch::TouchTracker;
use super::validation::FieldErrors;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    /// Last validator output for each validated field
    pub errors: FieldErrors,
    /// Errors injected outside the validator, such as async uniqueness checks
    pub field_errors: FieldErrors,
    /// What the user sees
    pub display_errors: FieldErrors,
    pub touched_fields: TouchTracker,
    pub server_errors: FieldErrors,
    pub submit_attempted: bool,
    pub force_show_all_errors: bool,
    /// Server keys outside this set are kept but never displayed; empty allows all
    known_fields: BTreeSet<String>,
}

impl ValidationState {
    /// Clean state for a form with the given fields
    pub fn for_fields<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            known_fields: names.into_iter().map(str::to_string).collect(),
            ..Default::default()
        }
    }

    fn surfaces(&self, name: &str) -> bool {
        self.known_fields.is_empty() || self.known_fields.contains(name)
    }

    pub fn should_validate(&self, name: &str) -> bool {
        self.touched_fields.is_touched(name) || self.force_show_all_errors || self.submit_attempted
    }

    /// Store the validator result for one field
    pub(crate) fn set_client_result(&mut self, name: &str, error: Option<String>) {
        match error {
            Some(err) => {
                self.errors.insert(name.to_string(), err);
            }
            None => {
                self.errors.remove(name);
            }
        }
        self.recompute_display();
    }

    /// Replace the validator output wholesale after a full validation.
    ///
    /// Explicit errors are dropped; only the rule result and sticky server
    /// errors remain.
    pub(crate) fn replace_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
        self.field_errors.clear();
        self.recompute_display();
    }

    pub(crate) fn set_field_error(&mut self, name: &str, message: String) {
        self.field_errors.insert(name.to_string(), message);
        self.recompute_display();
    }

    pub(crate) fn set_server_errors(&mut self, errors: FieldErrors) {
        self.server_errors = errors;
        self.force_show_all_errors = true;
        self.recompute_display();
    }

    /// Remove the client-side errors of a field.
    ///
    /// A pending server rejection blocks the clear; returns whether anything was cleared.
    pub(crate) fn clear_field_error(&mut self, name: &str) -> bool {
        if self.server_errors.contains_key(name) {
            return false;
        }
        self.errors.remove(name);
        self.field_errors.remove(name);
        self.recompute_display();
        true
    }

    /// Drop an injected error once the value it was raised against is gone
    pub(crate) fn clear_explicit_error(&mut self, name: &str) {
        if self.field_errors.remove(name).is_some() {
            self.recompute_display();
        }
    }

    pub(crate) fn clear_server_error(&mut self, name: &str) {
        if self.server_errors.remove(name).is_some() {
            self.recompute_display();
        }
    }

    /// Forget everything about a field that was reset by a cascade
    pub(crate) fn forget_field(&mut self, name: &str) {
        self.errors.remove(name);
        self.field_errors.remove(name);
        self.server_errors.remove(name);
        self.touched_fields.set(name, false);
        self.recompute_display();
    }

    pub(crate) fn recompute_display(&mut self) {
        let mut display = FieldErrors::new();
        for (name, err) in self.errors.iter().chain(self.field_errors.iter()) {
            if self.should_validate(name) {
                display.entry(name.clone()).or_insert_with(|| err.clone());
            }
        }
        for (name, err) in &self.server_errors {
            if self.surfaces(name) {
                display.insert(name.clone(), err.clone());
            }
        }
        self.display_errors = display;
    }

    pub fn has_errors(&self) -> bool {
        !self.display_errors.is_empty()
    }
}
