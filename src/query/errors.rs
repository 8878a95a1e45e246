//! Query parameter errors

use thiserror::Error;

/// Result type for parameter parsing
pub type ParamResult<T> = Result<T, ParamError>;

/// Rejected list query parameters, all client errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// Non-numeric or non-positive page/per_page
    #[error("Invalid query parameter: {0}")]
    InvalidParam(String),

    /// Sort field outside the enumerated set
    #[error("Invalid sort field: {0} (expected title, author or published_date)")]
    InvalidSortField(String),

    /// Order outside asc/desc
    #[error("Invalid sort order: {0} (expected asc or desc)")]
    InvalidSortOrder(String),

    /// per_page above the bound
    #[error("per_page {0} exceeds maximum {1}")]
    PerPageExceeded(u64, u64),
}
