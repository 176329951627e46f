//! Form domain layer
//!
//! Schema-parametric form state: field registry, cascades, validation
//! visibility, error overlay, panel gating and persistence, composed by
//! [`FormEngine`]. Two concrete schemas share the engine.

mod dependency;
mod engine;
mod error;
mod field;
mod issue_assignment;
mod options;
mod overlay;
mod panel;
mod persistence;
mod pr_review;
mod schema;
mod touch;
mod validation;

pub use dependency::{CascadeMode, DependencyGraph};
pub use engine::FormEngine;
pub use error::FormError;
pub use field::{FieldDef, FieldKind, FieldRegistry, FieldValue, FormPatch, FormSnapshot};
pub use issue_assignment::{IssueAssignmentData, IssueAssignmentForm};
pub use options::{AvailableOptions, OptionsBinding, OptionsLookup, ParentOptions};
pub use overlay::ValidationState;
pub use panel::{Panel, PanelGate};
pub use persistence::{
    FileStorage, MemoryStorage, NoopStorage, PersistedRecord, PersistenceScope, SessionStorage,
    StorageError,
};
pub use pr_review::{PrReviewData, PrReviewForm};
pub use schema::{FormMeta, FormMode, FormSchema};
pub use touch::TouchTracker;
pub use validation::{parse_date, FieldErrors, Requirement, Rule, RuleSet, DATE_FORMAT};
