//! Validation for catalog records.
//!
//! Checks the invariants a `Record` must hold before it is handed to a
//! `CatalogStore`. `year` needs no check, it is unsigned.

use super::models::Record;
use std::fmt;

/// Validation error types
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "Field '{}' is required but was empty", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a record
pub fn validate_record(record: &Record) -> ValidationResult<()> {
    if record.code.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "code" });
    }
    Ok(())
}
