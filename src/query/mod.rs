//! # Query Builder
//!
//! Translates list request parameters (search, sort, page, per_page) into a
//! bounded, deterministic query plan the store executes. Sort columns are an
//! enumerated set, never caller-supplied field names.

pub mod errors;
pub mod params;
pub mod plan;

pub use errors::{ParamError, ParamResult};
pub use params::{ListParams, SortField, SortOrder, DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use plan::{page_count, QueryPage, QueryPlan};
