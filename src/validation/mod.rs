//! # Validator
//!
//! Schema validation for incoming Book payloads. Runs before any store
//! access; returns structured per-field errors rather than raising.

pub mod errors;
pub mod validator;

pub use errors::{summarize, BulkItemErrors, FieldError, FieldErrors};
pub use validator::{validate_bulk, validate_new, validate_patch};
