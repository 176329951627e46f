//! Form schema trait and form-level metadata

use super::dependency::DependencyGraph;
use super::field::{FieldRegistry, FormSnapshot};
use super::options::OptionsBinding;
use super::panel::Panel;
use super::validation::{FieldErrors, RuleSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the form creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

impl FormMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit => "Edit",
        }
    }
}

/// Form-level flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormMeta {
    pub mode: FormMode,
    pub is_submitting: bool,
    /// Result of the last full validation
    pub is_valid: bool,
}

/// Static description of a form: fields, cascades, panels and rules
///
/// The engine is driven entirely through this trait, so every form shares
/// the same state and visibility semantics.
pub trait FormSchema: fmt::Debug {
    /// Human readable form title
    fn title(&self) -> &'static str;

    /// Key the persisted projection is stored under
    fn storage_key(&self) -> &'static str;

    fn registry(&self) -> &FieldRegistry;

    fn dependencies(&self) -> &DependencyGraph;

    fn panels(&self) -> &[Panel];

    fn rules(&self) -> &RuleSet;

    /// Fields whose options come from the external lookup
    fn options_binding(&self) -> Option<&OptionsBinding> {
        None
    }

    fn validate_field(&self, name: &str, snapshot: &FormSnapshot, mode: FormMode) -> Option<String> {
        self.rules()
            .validate_field(self.registry(), name, snapshot, mode)
    }

    fn validate_form(&self, snapshot: &FormSnapshot, mode: FormMode) -> FieldErrors {
        self.rules().validate_form(self.registry(), snapshot, mode)
    }

    fn is_required(&self, name: &str, mode: FormMode) -> bool {
        self.rules().is_required(name, mode)
    }
}
