//! # Observability
//!
//! Structured JSON logging for request outcomes. Fire-and-forget: logging
//! never returns errors into the request path.

pub mod logger;

pub use logger::{Logger, Severity};
