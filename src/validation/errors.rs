//! Validation error structures
//!
//! Validation never panics and never aborts early: every rule violation in
//! a payload is collected so the client sees all problems at once.

use serde::Serialize;
use std::fmt;

/// A single rule violation on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as it appears in the payload
    pub field: String,

    /// Human-readable rule description
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All violations found in one payload
pub type FieldErrors = Vec<FieldError>;

/// Violations for one item of a bulk payload, addressed by its index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkItemErrors {
    /// Zero-based position in the submitted `books` array
    pub index: usize,

    /// The item's field errors
    pub errors: FieldErrors,
}

/// Render a field error list as a single summary line
pub fn summarize(errors: &FieldErrors) -> String {
    let parts: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    parts.join("; ")
}
