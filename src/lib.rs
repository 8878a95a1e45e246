//! bookstack - a book management REST API
//!
//! CRUD over a single Book resource with pagination, sorting, substring
//! search, bulk mutation, TTL response caching and per-route rate limiting.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod limiter;
pub mod model;
pub mod observability;
pub mod query;
pub mod store;
pub mod validation;
