//! Errors raised for misuse of the form API
//!
//! User input never produces one of these; invalid input is always reported
//! through the display error map instead.

use super::field::FieldKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{field}` holds a {expected} value, got {actual}")]
    KindMismatch {
        field: String,
        expected: FieldKind,
        actual: FieldKind,
    },
}
