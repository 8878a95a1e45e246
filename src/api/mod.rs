//! # Book Manager API
//!
//! HTTP surface for the Book resource: list/search/create/update/delete,
//! bulk mutation, response caching and per-route rate limiting, with a
//! uniform success/error envelope throughout.

pub mod errors;
pub mod handlers;
pub mod response;
pub mod server;

pub use errors::{ApiError, ApiResult, ErrorBody};
pub use handlers::AppState;
pub use response::{
    BatchEnvelope, ListEnvelope, MessageEnvelope, RecordEnvelope, SingleEnvelope,
};
pub use server::{router, ApiServer};
