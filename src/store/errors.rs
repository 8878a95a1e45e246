//! Store errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of the persistence backend
///
/// These are infrastructure failures, not domain outcomes: "record not
/// found" is expressed as `Ok(None)` / `Ok(false)` by the trait, so only
/// genuinely unexpected conditions land here.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Backend cannot serve requests (for the memory store, a poisoned lock)
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
