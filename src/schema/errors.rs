//! Validation error types
//!
//! A payload that fails validation reports every offending field at once,
//! each with a short human-readable message.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as sent by the client (`$body` for the payload itself)
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "field required")
    }

    pub fn empty(field: impl Into<String>) -> Self {
        Self::new(field, "must not be empty")
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::new(field, format!("expected {}, found {}", expected, actual))
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation failure carrying one or more field errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", join_fields(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(error: FieldError) -> Self {
        Self::new(vec![error])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Names of the offending fields, in report order
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl From<FieldError> for ValidationError {
    fn from(error: FieldError) -> Self {
        Self::single(error)
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
