//! Form engine: owns values, visibility, cascades, panel gating and persistence
//!
//! Every operation is synchronous and leaves the derived state (display
//! errors, panel flags, available options) current, so callers can re-read
//! it immediately afterwards.

use super::error::FormError;
use super::field::{FieldRegistry, FieldValue, FormPatch, FormSnapshot};
use super::options::{AvailableOptions, OptionsLookup};
use super::overlay::ValidationState;
use super::panel::{Panel, PanelGate};
use super::persistence::{PersistenceScope, SessionStorage};
use super::schema::{FormMeta, FormMode, FormSchema};
use super::validation::FieldErrors;

#[derive(Debug)]
pub struct FormEngine {
    schema: Box<dyn FormSchema>,
    values: FormSnapshot,
    /// Values as of the last load, for dirty detection
    old_values: FormSnapshot,
    validation: ValidationState,
    meta: FormMeta,
    options: OptionsLookup,
    available: AvailableOptions,
    persistence: PersistenceScope,
}

impl FormEngine {
    /// Start a fresh session with every field at its default
    pub fn new(
        schema: impl FormSchema + 'static,
        mode: FormMode,
        storage: Box<dyn SessionStorage>,
    ) -> Self {
        let persistence = PersistenceScope::new(schema.storage_key(), storage);
        let defaults = schema.registry().defaults();
        let validation = ValidationState::for_fields(schema.registry().names());
        Self {
            schema: Box::new(schema),
            values: defaults.clone(),
            old_values: defaults,
            validation,
            meta: FormMeta {
                mode,
                ..Default::default()
            },
            options: OptionsLookup::default(),
            available: AvailableOptions::default(),
            persistence,
        }
    }

    /// Start a session from the persisted projection, if one exists.
    ///
    /// Only values and mode are restored; validation state always starts clean.
    pub fn rehydrate(
        schema: impl FormSchema + 'static,
        mode: FormMode,
        storage: Box<dyn SessionStorage>,
    ) -> Self {
        let mut engine = Self::new(schema, mode, storage);
        let Some(record) = engine.persistence.read() else {
            tracing::debug!(form = engine.schema.storage_key(), "no persisted record");
            return engine;
        };

        engine.meta.mode = record.mode;
        for (name, value) in record.values {
            if let Err(err) = engine.check(&name, &value) {
                tracing::warn!(form = engine.schema.storage_key(), "skipping persisted value: {err}");
                continue;
            }
            engine.values.insert(&name, value.normalized());
        }
        engine.old_values = engine.values.clone();
        engine.refresh_available();
        tracing::debug!(
            form = engine.schema.storage_key(),
            mode = ?engine.meta.mode,
            "rehydrated form values"
        );
        engine
    }

    fn check(&self, name: &str, value: &FieldValue) -> Result<(), FormError> {
        let def = self
            .schema
            .registry()
            .get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        if def.kind != value.kind() {
            return Err(FormError::KindMismatch {
                field: name.to_string(),
                expected: def.kind,
                actual: value.kind(),
            });
        }
        Ok(())
    }

    fn check_name(&self, name: &str) -> Result<(), FormError> {
        if self.schema.registry().contains(name) {
            Ok(())
        } else {
            Err(FormError::UnknownField(name.to_string()))
        }
    }

    fn refresh_available(&mut self) {
        self.available = match self.schema.options_binding() {
            Some(binding) => self.options.available_for(self.values.text(binding.parent)),
            None => AvailableOptions::default(),
        };
    }

    fn persist(&mut self) {
        self.persistence.write(&self.values, self.meta.mode);
    }

    // ---- values ----

    /// Store a value, cascade resets to its descendants and re-validate what is visible
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let value = value.into().normalized();
        self.check(name, &value)?;

        let previous = self.values.insert(name, value.clone());
        let changed = previous.as_ref() != Some(&value);

        if changed {
            // A new value supersedes whatever the server or a collaborator rejected
            self.validation.clear_server_error(name);
            self.validation.clear_explicit_error(name);

            for descendant in self.schema.dependencies().descendants(name) {
                if let Some(def) = self.schema.registry().get(descendant) {
                    self.values.insert(descendant, def.default.clone());
                }
                self.validation.forget_field(descendant);
                tracing::trace!(parent = name, field = descendant, "cascade reset");
            }

            if self
                .schema
                .options_binding()
                .is_some_and(|b| b.parent == name)
            {
                self.refresh_available();
            }
        }

        self.validate_field(name);
        for dependent in self.schema.rules().dependents_of(name) {
            self.validate_field(dependent);
        }

        if changed {
            self.persist();
        }
        Ok(())
    }

    /// Bulk-load values, e.g. pre-population in edit mode.
    ///
    /// Entries are applied field by field without cascading; mismatched
    /// entries are skipped and returned. Validation state is cleared so
    /// pre-filled data shows no errors.
    pub fn set_form_data(&mut self, patch: impl Into<FormPatch>) -> Vec<FormError> {
        let mut rejected = Vec::new();
        for (name, value) in patch.into().into_entries() {
            match self.check(&name, &value) {
                Ok(()) => {
                    self.values.insert(&name, value.normalized());
                }
                Err(err) => {
                    tracing::warn!(form = self.schema.storage_key(), "rejected form data: {err}");
                    rejected.push(err);
                }
            }
        }

        self.validation = ValidationState::for_fields(self.schema.registry().names());
        self.meta.is_valid = false;
        self.old_values = self.values.clone();
        self.refresh_available();
        self.persist();
        tracing::debug!(
            form = self.schema.storage_key(),
            rejected = rejected.len(),
            "loaded form data"
        );
        rejected
    }

    /// Return values and validation state to their initial shape.
    ///
    /// The mode and the options lookup survive.
    pub fn reset_form(&mut self) {
        self.values = self.schema.registry().defaults();
        self.old_values = self.values.clone();
        self.validation = ValidationState::for_fields(self.schema.registry().names());
        self.meta.is_submitting = false;
        self.meta.is_valid = false;
        self.refresh_available();
        self.persist();
        tracing::debug!(form = self.schema.storage_key(), "form reset");
    }

    pub fn set_mode(&mut self, mode: FormMode) {
        if self.meta.mode == mode {
            return;
        }
        self.meta.mode = mode;
        let names: Vec<&'static str> = self.schema.registry().names().collect();
        for name in names {
            self.validate_field(name);
        }
        self.persist();
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.meta.is_submitting = submitting;
    }

    /// Drop the persisted session once the form has been handed off
    pub fn clear_session(&mut self) {
        self.persistence.clear();
        tracing::debug!(form = self.schema.storage_key(), "cleared persisted session");
    }

    /// Replace the externally loaded option table
    pub fn set_options_lookup(&mut self, lookup: OptionsLookup) {
        self.options = lookup;
        self.refresh_available();
    }

    // ---- touch & validation ----

    /// Record a blur. A touched field is validated immediately, even when empty.
    pub fn set_touched(&mut self, name: &str, touched: bool) -> Result<(), FormError> {
        self.check_name(name)?;
        if self.validation.touched_fields.set(name, touched) {
            tracing::trace!(form = self.schema.storage_key(), field = name, "first touch");
        }
        if touched {
            self.validate_field(name);
        } else {
            self.validation.recompute_display();
        }
        Ok(())
    }

    pub fn should_validate(&self, name: &str) -> bool {
        self.validation.should_validate(name)
    }

    /// Run one field's rules, but only once the field's errors may be shown
    pub fn validate_field(&mut self, name: &str) {
        if !self.validation.should_validate(name) || !self.schema.registry().contains(name) {
            return;
        }
        let error = self
            .schema
            .validate_field(name, &self.values, self.meta.mode);
        self.validation.set_client_result(name, error);
    }

    pub fn validate_all_touched_fields(&mut self) {
        let touched: Vec<String> = self
            .validation
            .touched_fields
            .iter()
            .map(str::to_string)
            .collect();
        for name in touched {
            self.validate_field(&name);
        }
    }

    /// Submit-time validation: every rule runs and every error becomes visible.
    pub fn validate_form(&mut self) -> bool {
        self.validation.force_show_all_errors = true;
        self.validation.submit_attempted = true;
        let errors = self.schema.validate_form(&self.values, self.meta.mode);
        self.validation.replace_errors(errors);
        self.meta.is_valid = !self.validation.has_errors();
        tracing::debug!(
            form = self.schema.storage_key(),
            valid = self.meta.is_valid,
            errors = self.validation.display_errors.len(),
            "validated form"
        );
        self.meta.is_valid
    }

    // ---- error sources ----

    /// Ingest the errors of a rejected submission. They stay visible until
    /// the field gets a new value or the error is cleared explicitly.
    pub fn set_server_errors(&mut self, errors: FieldErrors) {
        tracing::debug!(
            form = self.schema.storage_key(),
            count = errors.len(),
            "server rejected submission"
        );
        self.validation.set_server_errors(errors);
        if self.validation.has_errors() {
            self.meta.is_valid = false;
        }
    }

    /// Inject an error from outside the rule set
    pub fn set_field_error(&mut self, name: &str, message: impl Into<String>) -> Result<(), FormError> {
        self.check_name(name)?;
        self.validation.set_field_error(name, message.into());
        Ok(())
    }

    /// Clear a field's client-side errors. A pending server error is left in
    /// place; returns whether the clear happened.
    pub fn clear_field_error(&mut self, name: &str) -> bool {
        self.validation.clear_field_error(name)
    }

    pub fn clear_server_error(&mut self, name: &str) {
        self.validation.clear_server_error(name);
    }

    // ---- panels ----

    fn gate(&self) -> PanelGate<'_> {
        PanelGate::new(
            self.schema.as_ref(),
            &self.values,
            &self.validation.display_errors,
            self.meta.mode,
        )
    }

    pub fn is_panel_valid(&self, number: usize) -> bool {
        self.gate().is_panel_valid(number)
    }

    pub fn is_panel_enabled(&self, number: usize) -> bool {
        self.gate().is_panel_enabled(number)
    }

    pub fn is_form_ready_for_submission(&self) -> bool {
        self.gate().all_panels_valid() && !self.validation.has_errors()
    }

    /// Whether the panel holding `name` accepts input
    pub fn is_field_enabled(&self, name: &str) -> bool {
        let gate = self.gate();
        gate.panel_of(name)
            .map_or(true, |number| gate.is_panel_enabled(number))
    }

    // ---- reads ----

    /// Plain snapshot for submission
    pub fn get_form_data(&self) -> FormSnapshot {
        self.values.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.old_values
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn values(&self) -> &FormSnapshot {
        &self.values
    }

    pub fn display_error(&self, name: &str) -> Option<&str> {
        self.validation.display_errors.get(name).map(String::as_str)
    }

    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    pub fn meta(&self) -> &FormMeta {
        &self.meta
    }

    pub fn mode(&self) -> FormMode {
        self.meta.mode
    }

    pub fn schema(&self) -> &dyn FormSchema {
        self.schema.as_ref()
    }

    pub fn registry(&self) -> &FieldRegistry {
        self.schema.registry()
    }

    pub fn panels(&self) -> &[Panel] {
        self.schema.panels()
    }

    pub fn options_lookup(&self) -> &OptionsLookup {
        &self.options
    }

    pub fn available_options(&self) -> &AvailableOptions {
        &self.available
    }

    /// Choices offered for a field: parents for the options parent, the
    /// current projection for mid and leaf, nothing for other fields
    pub fn choices_for(&self, name: &str) -> Vec<String> {
        match self.schema.options_binding() {
            Some(b) if b.parent == name => self.options.parents().map(str::to_string).collect(),
            Some(b) if b.mid == name => self.available.mid.clone(),
            Some(b) if b.leaf == name => self.available.leaf.clone(),
            _ => Vec::new(),
        }
    }
}
