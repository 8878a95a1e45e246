//! End-to-end API tests
//!
//! Drives the real router in process: every request passes through the
//! rate-limit check, validation, cache and store exactly as it would in
//! production, with fresh state per test.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use bookstack::api::{router, AppState};
use bookstack::cache::ResponseCache;
use bookstack::config::Config;
use bookstack::limiter::{RateLimiter, RateQuotas};
use bookstack::store::MemoryStore;

// =============================================================================
// Helpers
// =============================================================================

fn app() -> Router {
    let config = Config::default();
    router(AppState::from_config(&config), &config)
}

fn app_with_quotas(quotas: RateQuotas) -> Router {
    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        cache: Arc::new(ResponseCache::new()),
        limiter: Arc::new(RateLimiter::new(quotas)),
    };
    router(state, &Config::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, title: &str, author: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/books",
        Some(json!({"title": title, "author": author})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_returns_201_with_record() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "T", "author": "A"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["title"], "T");
    assert_eq!(body["data"]["author"], "A");
    assert!(body["data"]["id"].is_i64());
}

#[tokio::test]
async fn test_create_empty_title_is_400_with_error() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "", "author": "A"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(body["details"][0]["field"], "title");
}

#[tokio::test]
async fn test_create_bad_date_is_400() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "T", "author": "A", "published_date": "01-01-1990"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Get
// =============================================================================

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "published_date": "1965-08-01",
            "summary": "Sand"
        })),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["title"], "Dune");
    assert_eq!(body["data"]["author"], "Frank Herbert");
    assert_eq!(body["data"]["published_date"], "1965-08-01");
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/books/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

// =============================================================================
// List, search, sort, pagination
// =============================================================================

#[tokio::test]
async fn test_list_search_matches_substring_only() {
    let app = app();
    create(&app, "Tom", "Writer One").await;
    create(&app, "Amy", "Writer Two").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/books?q=T&sort=title&order=desc&page=1&per_page=5",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["search_query"], "T");
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Tom"]);
}

#[tokio::test]
async fn test_list_sort_desc() {
    let app = app();
    create(&app, "Amy", "X").await;
    create(&app, "Tom", "Y").await;

    let (_, body) = send(&app, Method::GET, "/books?sort=title&order=desc", None).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Tom", "Amy"]);
}

#[tokio::test]
async fn test_pages_partition_the_set() {
    let app = app();
    for i in 0..12 {
        create(&app, &format!("Book {:02}", i), "X").await;
    }

    let mut seen = Vec::new();
    for page in 1..=3 {
        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/books?page={}&per_page=5", page),
            None,
        )
        .await;
        assert_eq!(body["total_items"], 12);
        assert_eq!(body["total_pages"], 3);
        seen.extend(
            body["data"]
                .as_array()
                .unwrap()
                .iter()
                .map(|b| b["id"].as_i64().unwrap()),
        );
    }

    assert_eq!(seen.len(), 12);
    let mut dedup = seen.clone();
    dedup.sort_unstable();
    dedup.dedup();
    assert_eq!(dedup.len(), 12, "pages overlap");
}

#[tokio::test]
async fn test_out_of_range_page_is_empty_with_totals() {
    let app = app();
    create(&app, "Only", "One").await;

    let (status, body) = send(&app, Method::GET, "/books?page=9&per_page=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["total_items"], 1);
    assert_eq!(body["total_pages"], 1);
}

#[tokio::test]
async fn test_extreme_page_number_is_empty_not_error() {
    let app = app();
    create(&app, "Only", "One").await;

    let uri = format!("/books?page={}&per_page=1000", u64::MAX);
    let (status, body) = send(&app, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["total_items"], 1);
}

#[tokio::test]
async fn test_invalid_list_params_are_400() {
    let app = app();
    for uri in ["/books?page=0", "/books?per_page=-2", "/books?sort=id", "/books?order=down"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {}", uri);
        assert!(body["error"].is_string());
    }
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_partial_update_touches_only_supplied_field() {
    let app = app();
    let id = create(&app, "Title", "Old").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(json!({"author": "New"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Title");
    assert_eq!(body["data"]["author"], "New");

    // Applying the same patch again yields the same final state
    let (_, again) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(json!({"author": "New"})),
    )
    .await;
    assert_eq!(again["data"], body["data"]);
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::PUT,
        "/books/42",
        Some(json!({"author": "New"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_invalid_field_is_400() {
    let app = app();
    let id = create(&app, "Title", "Author").await;
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(json!({"title": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = app();
    let id = create(&app, "Doomed", "X").await;

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book deleted successfully");

    let (status, _) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_id_is_404() {
    let app = app();
    let (status, _) = send(&app, Method::DELETE, "/books/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Bulk operations
// =============================================================================

#[tokio::test]
async fn test_bulk_create_success() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books/bulk",
        Some(json!({"books": [
            {"title": "A", "author": "X"},
            {"title": "B", "author": "Y"}
        ]})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Successfully created 2 books");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_bulk_create_is_all_or_nothing() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books/bulk",
        Some(json!({"books": [
            {"title": "A", "author": "X"},
            {"title": "", "author": "Y"},
            {"title": "C", "author": "Z"}
        ]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"].as_array().unwrap().len(), 1);
    assert_eq!(body["details"][0]["index"], 1);
    assert_eq!(body["details"][0]["errors"][0]["field"], "title");

    // Nothing was written
    let (_, list) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(list["total_items"], 0);
}

#[tokio::test]
async fn test_bulk_create_missing_books_key_is_400() {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/books/bulk", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bulk_delete_skips_unknown_ids() {
    let app = app();
    let a = create(&app, "A", "X").await;
    let b = create(&app, "B", "Y").await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/books/bulk",
        Some(json!({"ids": [a, b, 999]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully deleted 2 books");
}

#[tokio::test]
async fn test_bulk_delete_empty_ids_is_400() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::DELETE,
        "/books/bulk",
        Some(json!({"ids": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No book IDs provided");
}

// =============================================================================
// Caching
// =============================================================================

#[tokio::test]
async fn test_create_invalidates_cached_lists() {
    let app = app();
    create(&app, "First", "X").await;

    // Prime the list cache
    let (_, before) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(before["total_items"], 1);

    create(&app, "Second", "Y").await;

    // The cached list must not be served stale
    let (_, after) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(after["total_items"], 2);
}

#[tokio::test]
async fn test_update_invalidates_cached_record() {
    let app = app();
    let id = create(&app, "Old", "X").await;

    // Prime the singular cache
    let (_, first) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(first["data"]["title"], "Old");

    send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(json!({"title": "New"})),
    )
    .await;

    let (_, second) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(second["data"]["title"], "New");
}

#[tokio::test]
async fn test_distinct_query_strings_cached_independently() {
    let app = app();
    for i in 0..3 {
        create(&app, &format!("B{}", i), "X").await;
    }

    let (_, page1) = send(&app, Method::GET, "/books?page=1&per_page=2", None).await;
    let (_, page2) = send(&app, Method::GET, "/books?page=2&per_page=2", None).await;

    assert_eq!(page1["data"].as_array().unwrap().len(), 2);
    assert_eq!(page2["data"].as_array().unwrap().len(), 1);
}

// =============================================================================
// Rate limiting
// =============================================================================

#[tokio::test]
async fn test_write_quota_exhaustion_is_429() {
    let app = app_with_quotas(RateQuotas {
        writes_per_minute: 1,
        ..Default::default()
    });

    let (status, _) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "T", "author": "A"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "T2", "author": "A2"})),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_denied_write_leaves_store_untouched() {
    let app = app_with_quotas(RateQuotas {
        writes_per_minute: 1,
        ..Default::default()
    });

    create(&app, "Kept", "X").await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "Denied", "author": "Y"})),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let (_, list) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(list["total_items"], 1);
}

// =============================================================================
// Home
// =============================================================================

#[tokio::test]
async fn test_home_banner() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Welcome to the Book Manager API");
}
