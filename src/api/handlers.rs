//! Request handlers
//!
//! One handler per operation, each stateless per call. The pipeline order
//! is fixed: rate-limit check, then parameter/payload validation, then
//! cache lookup (reads) or store mutation plus cache invalidation (writes),
//! then envelope shaping. Dependencies arrive through `AppState`; there is
//! no global store or cache handle.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::cache::{self, ResponseCache};
use crate::config::Config;
use crate::limiter::{RateLimiter, RateQuotas, RouteKey};
use crate::observability::Logger;
use crate::query::{ListParams, QueryPlan};
use crate::store::{BookStore, MemoryStore};
use crate::validation::{validate_bulk, validate_new, validate_patch, FieldError};

use super::errors::{ApiError, ApiResult};
use super::response::{
    BatchEnvelope, ListEnvelope, MessageEnvelope, RecordEnvelope, SingleEnvelope,
};

/// Injected dependencies shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookStore>,
    pub cache: Arc<ResponseCache>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Wire up the default in-memory dependencies from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            cache: Arc::new(ResponseCache::with_ttl(std::time::Duration::from_secs(
                config.cache_ttl_secs,
            ))),
            limiter: Arc::new(RateLimiter::new(RateQuotas {
                reads_per_minute: config.reads_per_minute,
                writes_per_minute: config.writes_per_minute,
                bulk_per_minute: config.bulk_per_minute,
            })),
        }
    }

    fn check_rate(&self, route: RouteKey) -> ApiResult<()> {
        if self.limiter.allow(route) {
            Ok(())
        } else {
            Logger::warn("rate.denied", &[("route", route.as_str())]);
            Err(ApiError::RateLimited)
        }
    }
}

/// GET / — service banner
pub async fn home() -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": "Welcome to the Book Manager API",
        "version": "1.0",
    }))
}

/// GET /books — list with pagination, sorting and substring search
pub async fn list_books(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    state.check_rate(RouteKey::ListBooks)?;

    let params = ListParams::parse(&query)?;

    // The raw query string is the cache key, so each distinct
    // search/sort/page combination is cached independently
    let key = cache::list_key(raw_query.as_deref().unwrap_or(""));
    if let Some(hit) = state.cache.get(&key) {
        Logger::info("books.list", &[("cache", "hit")]);
        return Ok(Json(hit));
    }

    let plan = QueryPlan::new(params.clone());
    let page = state.store.list(&plan)?;

    let total = page.total_items.to_string();
    Logger::info("books.list", &[("cache", "miss"), ("total_items", &total)]);

    let envelope = ListEnvelope::new(page.items, page.total_items, page.total_pages, &params);
    let payload = serde_json::to_value(envelope).unwrap_or_default();

    state.cache.set(&key, payload.clone());
    Ok(Json(payload))
}

/// GET /books/{id} — fetch one record
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    state.check_rate(RouteKey::GetBook)?;

    let key = cache::book_key(id);
    if let Some(hit) = state.cache.get(&key) {
        return Ok(Json(hit));
    }

    let book = state.store.get(id)?.ok_or(ApiError::NotFound(id))?;
    let payload = serde_json::to_value(SingleEnvelope::new(book)).unwrap_or_default();

    state.cache.set(&key, payload.clone());
    Ok(Json(payload))
}

/// POST /books — create one record
pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<RecordEnvelope>)> {
    state.check_rate(RouteKey::CreateBook)?;

    let new = validate_new(&payload).map_err(ApiError::Validation)?;
    let book = state.store.insert(new)?;

    // A new record can appear on any cached page/sort/search result
    state.cache.invalidate_lists();

    let id = book.id.to_string();
    Logger::info("book.create", &[("id", &id)]);

    Ok((
        StatusCode::CREATED,
        Json(RecordEnvelope::new("Book created successfully", book)),
    ))
}

/// PUT /books/{id} — partial update
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<RecordEnvelope>> {
    state.check_rate(RouteKey::UpdateBook)?;

    // Existence is checked before payload validation: an unknown id is 404
    // even when the payload is also invalid
    if state.store.get(id)?.is_none() {
        return Err(ApiError::NotFound(id));
    }

    let patch = validate_patch(&payload).map_err(ApiError::Validation)?;
    let book = state
        .store
        .update(id, patch)?
        .ok_or(ApiError::NotFound(id))?;

    state.cache.delete(&cache::book_key(id));
    state.cache.invalidate_lists();

    let id_field = id.to_string();
    Logger::info("book.update", &[("id", &id_field)]);

    Ok(Json(RecordEnvelope::new("Book updated successfully", book)))
}

/// DELETE /books/{id} — delete one record
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageEnvelope>> {
    state.check_rate(RouteKey::DeleteBook)?;

    if !state.store.delete(id)? {
        return Err(ApiError::NotFound(id));
    }

    state.cache.delete(&cache::book_key(id));
    state.cache.invalidate_lists();

    let id_field = id.to_string();
    Logger::info("book.delete", &[("id", &id_field)]);

    Ok(Json(MessageEnvelope::new("Book deleted successfully")))
}

/// POST /books/bulk — create many, all-or-nothing
pub async fn bulk_create_books(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<BatchEnvelope>)> {
    state.check_rate(RouteKey::BulkCreateBooks)?;

    let items = payload
        .get("books")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ApiError::Validation(vec![FieldError::new(
                "books",
                "is required and must be an array",
            )])
        })?;

    // All items validate or nothing is written
    let batch = validate_bulk(items).map_err(ApiError::BulkValidation)?;
    let created = state.store.insert_many(batch)?;

    state.cache.invalidate_lists();

    let count = created.len().to_string();
    Logger::info("book.bulk_create", &[("count", &count)]);

    let message = format!("Successfully created {} books", created.len());
    Ok((
        StatusCode::CREATED,
        Json(BatchEnvelope::new(message, created)),
    ))
}

/// DELETE /books/bulk — delete many, unknown ids skipped
pub async fn bulk_delete_books(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<MessageEnvelope>> {
    state.check_rate(RouteKey::BulkDeleteBooks)?;

    let ids = parse_id_list(&payload)?;
    let deleted = state.store.delete_many(&ids)?;

    for id in &ids {
        state.cache.delete(&cache::book_key(*id));
    }
    state.cache.invalidate_lists();

    let count = deleted.to_string();
    Logger::info("book.bulk_delete", &[("deleted", &count)]);

    Ok(Json(MessageEnvelope::new(format!(
        "Successfully deleted {} books",
        deleted
    ))))
}

/// Extract a non-empty integer id list from `{"ids": [...]}`
fn parse_id_list(payload: &Value) -> ApiResult<Vec<i64>> {
    let raw = match payload.get("ids").and_then(Value::as_array) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(ApiError::NoIdsProvided),
    };

    let mut ids = Vec::with_capacity(raw.len());
    for value in raw {
        match value.as_i64() {
            Some(id) => ids.push(id),
            None => {
                return Err(ApiError::Validation(vec![FieldError::new(
                    "ids",
                    "must be an array of integers",
                )]))
            }
        }
    }
    Ok(ids)
}
