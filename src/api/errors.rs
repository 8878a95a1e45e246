//! API error translator
//!
//! Every handler failure funnels through `ApiError`, which owns the mapping
//! to an HTTP status and the uniform `{"error": ...}` envelope. Validation
//! variants carry their structured detail into the body; store failures are
//! logged with detail and surfaced with an opaque message only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::observability::Logger;
use crate::query::ParamError;
use crate::store::StoreError;
use crate::validation::{summarize, BulkItemErrors, FieldErrors};

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure kinds of the request pipeline
#[derive(Debug, Error)]
pub enum ApiError {
    /// Payload failed schema validation
    #[error("{}", summarize(.0))]
    Validation(FieldErrors),

    /// One or more items of a bulk payload failed validation
    #[error("Validation errors occurred")]
    BulkValidation(Vec<BulkItemErrors>),

    /// Rejected list query parameter
    #[error("{0}")]
    Param(#[from] ParamError),

    /// Bulk delete without ids
    #[error("No book IDs provided")]
    NoIdsProvided,

    /// Unknown book id
    #[error("Book {0} not found")]
    NotFound(i64),

    /// Route quota exhausted for the current window
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Persistence backend failure; detail stays server-side
    #[error("An unexpected error occurred")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status for this failure kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::BulkValidation(_)
            | ApiError::Param(_)
            | ApiError::NoIdsProvided => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Structured detail for the response body, where the kind has any
    fn details(&self) -> Option<Value> {
        match self {
            ApiError::Validation(errors) => serde_json::to_value(errors).ok(),
            ApiError::BulkValidation(items) => serde_json::to_value(items).ok(),
            _ => None,
        }
    }
}

/// The uniform error envelope
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Internal detail is logged, never returned
        if let ApiError::Store(err) = &self {
            Logger::error("store.failure", &[("detail", &err.to_string())]);
        }

        let body = ErrorBody {
            error: self.to_string(),
            details: self.details(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
