//! HTTP API Tests
//!
//! Drives the full router in-process against a SQLite file:
//! - Status codes for every route
//! - Error body shapes
//! - Validation before persistence
//! - Pagination through query parameters

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use itemstore::http_server::{HttpServer, ServiceConfig};
use itemstore::storage::ItemStore;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

async fn setup_store(max_connections: u32) -> (TempDir, ItemStore) {
    let tmp = TempDir::new().unwrap();
    let url = format!("sqlite://{}?mode=rwc", tmp.path().join("items.db").display());
    let store = ItemStore::connect(&url, max_connections).await.unwrap();
    store.bootstrap().await.unwrap();
    (tmp, store)
}

async fn setup_app() -> (TempDir, Router) {
    let (tmp, store) = setup_store(2).await;
    let router = HttpServer::new(ServiceConfig::default(), store).router();
    (tmp, router)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, Method::POST, "/items", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json
}

// =============================================================================
// Create
// =============================================================================

/// Title-only payload gets defaults and a fresh id.
#[tokio::test]
async fn test_create_with_defaults() {
    let (_tmp, app) = setup_app().await;

    let item = create(&app, json!({"title": "buy milk"})).await;
    assert_eq!(item["title"], "buy milk");
    assert!(item["description"].is_null());
    assert_eq!(item["done"], false);
    assert!(item["id"].as_i64().unwrap() > 0);
}

/// Trailing slash form of the collection route works.
#[tokio::test]
async fn test_create_with_trailing_slash() {
    let (_tmp, app) = setup_app().await;

    let (status, item) = send(&app, Method::POST, "/items/", Some(json!({"name": "walk dog"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["title"], "walk dog");
}

/// Missing title is a 422 naming the field, and nothing is stored.
#[tokio::test]
async fn test_create_missing_title() {
    let (_tmp, app) = setup_app().await;

    let (status, body) = send(&app, Method::POST, "/items", Some(json!({"description": "x"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["field"], "title");

    let (_, list) = send(&app, Method::GET, "/items", None).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

/// Wrong field types are reported field by field.
#[tokio::test]
async fn test_create_wrong_types() {
    let (_tmp, app) = setup_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/items",
        Some(json!({"title": 5, "done": "yes"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let fields: Vec<&str> = body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "done"]);
}

/// Broken JSON is a validation error on the body.
#[tokio::test]
async fn test_create_malformed_json() {
    let (_tmp, app) = setup_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/items")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

/// Body without a JSON content type is rejected.
#[tokio::test]
async fn test_create_without_content_type() {
    let (_tmp, app) = setup_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/items")
        .body(Body::from(json!({"title": "x"}).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// =============================================================================
// Read
// =============================================================================

/// Get returns exactly what create returned.
#[tokio::test]
async fn test_get_after_create() {
    let (_tmp, app) = setup_app().await;

    let created = create(&app, json!({"title": "read", "description": "a book"})).await;
    let uri = format!("/items/{}", created["id"]);

    let (status, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

/// Unknown id is a 404 with the standard detail.
#[tokio::test]
async fn test_get_unknown_id() {
    let (_tmp, app) = setup_app().await;

    let (status, body) = send(&app, Method::GET, "/items/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Item not found"}));
}

/// Non-integer id is a validation error, not a 404.
#[tokio::test]
async fn test_get_non_integer_id() {
    let (_tmp, app) = setup_app().await;

    let (status, body) = send(&app, Method::GET, "/items/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["field"], "item_id");
}

/// List honours skip and limit in insertion order.
#[tokio::test]
async fn test_list_pagination() {
    let (_tmp, app) = setup_app().await;

    for i in 0..5 {
        create(&app, json!({"title": format!("item {}", i)})).await;
    }

    let (status, page) = send(&app, Method::GET, "/items?skip=1&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["item 1", "item 2"]);

    let (_, page) = send(&app, Method::GET, "/items?offset=4", None).await;
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["title"], "item 4");
}

/// Default limit is 10.
#[tokio::test]
async fn test_list_default_limit() {
    let (_tmp, app) = setup_app().await;

    for i in 0..12 {
        create(&app, json!({"title": format!("item {}", i)})).await;
    }

    let (_, page) = send(&app, Method::GET, "/items", None).await;
    assert_eq!(page.as_array().unwrap().len(), 10);
}

/// Negative paging values are rejected.
#[tokio::test]
async fn test_list_negative_params() {
    let (_tmp, app) = setup_app().await;

    let (status, body) = send(&app, Method::GET, "/items?skip=-1", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["field"], "skip");
}

// =============================================================================
// Update / Mark Done
// =============================================================================

/// PUT replaces every mutable field.
#[tokio::test]
async fn test_update_replaces_fields() {
    let (_tmp, app) = setup_app().await;

    let created = create(&app, json!({"title": "buy milk"})).await;
    let uri = format!("/items/{}", created["id"]);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"title": "buy bread", "description": "wholegrain", "done": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["title"], "buy bread");
    assert_eq!(fetched["description"], "wholegrain");
    assert_eq!(fetched["done"], true);
}

/// PUT on an unknown id is a 404.
#[tokio::test]
async fn test_update_unknown_id() {
    let (_tmp, app) = setup_app().await;

    let (status, _) = send(&app, Method::PUT, "/items/41", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// PUT with an invalid body leaves the item untouched.
#[tokio::test]
async fn test_update_invalid_body() {
    let (_tmp, app) = setup_app().await;

    let created = create(&app, json!({"title": "keep me"})).await;
    let uri = format!("/items/{}", created["id"]);

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["title"], "keep me");
}

/// PATCH done sets the flag, keeps other fields, and can be repeated.
#[tokio::test]
async fn test_mark_done_idempotent() {
    let (_tmp, app) = setup_app().await;

    let created = create(&app, json!({"title": "laundry", "description": "whites"})).await;
    let uri = format!("/items/{}/done", created["id"]);

    for _ in 0..2 {
        let (status, item) = send(&app, Method::PATCH, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(item["done"], true);
        assert_eq!(item["title"], "laundry");
        assert_eq!(item["description"], "whites");
    }
}

/// PATCH done on an unknown id is a 404.
#[tokio::test]
async fn test_mark_done_unknown_id() {
    let (_tmp, app) = setup_app().await;

    let (status, body) = send(&app, Method::PATCH, "/items/7/done", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Item not found");
}

// =============================================================================
// Delete
// =============================================================================

/// Delete acknowledges, then the item is gone from get and list.
#[tokio::test]
async fn test_delete_removes_item() {
    let (_tmp, app) = setup_app().await;

    let created = create(&app, json!({"title": "trash"})).await;
    let uri = format!("/items/{}", created["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item deleted successfully");

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, Method::GET, "/items", None).await;
    assert!(list.as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Health
// =============================================================================

/// Root liveness message and store-aware health check.
#[tokio::test]
async fn test_health_endpoints() {
    let (_tmp, app) = setup_app().await;

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
}

// =============================================================================
// Store Failures
// =============================================================================

/// A closed store answers 503 with an opaque body, and health degrades.
#[tokio::test]
async fn test_closed_store_is_unavailable() {
    let (_tmp, store) = setup_store(2).await;
    let app = HttpServer::new(ServiceConfig::default(), store.clone()).router();
    store.close().await.unwrap();

    let (status, body) = send(&app, Method::GET, "/items", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"detail": "Service unavailable"}));

    let (status, body) = send(&app, Method::POST, "/items", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"detail": "Service unavailable"}));

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "unavailable");
}

/// Validation still runs when the store is down.
#[tokio::test]
async fn test_closed_store_still_validates() {
    let (_tmp, store) = setup_store(2).await;
    let app = HttpServer::new(ServiceConfig::default(), store.clone()).router();
    store.close().await.unwrap();

    let (status, body) = send(&app, Method::POST, "/items", Some(json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["field"], "title");
}

// =============================================================================
// Concurrency
// =============================================================================

/// Concurrent PUT and PATCH on distinct rows all succeed.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writes_succeed() {
    let (_tmp, store) = setup_store(10).await;
    let app = HttpServer::new(ServiceConfig::default(), store).router();

    let mut ids = Vec::new();
    for i in 0..20 {
        let item = create(&app, json!({"title": format!("item {}", i)})).await;
        ids.push(item["id"].as_i64().unwrap());
    }

    let mut handles = Vec::new();
    for (i, id) in ids.iter().copied().enumerate() {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let result = if i % 2 == 0 {
                send(&app, Method::PATCH, &format!("/items/{}/done", id), None).await
            } else {
                let body = json!({"title": format!("renamed {}", i), "done": true});
                send(&app, Method::PUT, &format!("/items/{}", id), Some(body)).await
            };
            (id, result)
        }));
    }

    let mut failures = Vec::new();
    for handle in handles {
        let (id, (status, body)) = handle.await.unwrap();
        if status != StatusCode::OK {
            failures.push((id, status, body));
        }
    }
    assert!(failures.is_empty(), "failed writes: {:?}", failures);

    let (_, list) = send(&app, Method::GET, "/items?limit=100", None).await;
    let items = list.as_array().unwrap();
    assert_eq!(items.len(), 20);
    assert!(items.iter().all(|item| item["done"] == true));
}

/// Concurrent creates get distinct ids.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_ids() {
    let (_tmp, store) = setup_store(10).await;
    let app = HttpServer::new(ServiceConfig::default(), store).router();

    let mut handles = Vec::new();
    for i in 0..20 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            send(&app, Method::POST, "/items", Some(json!({"title": format!("item {}", i)}))).await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::CREATED, "body: {}", body);
        ids.push(body["id"].as_i64().unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}
