//! API Validation Tests
//!
//! Malformed input must be rejected at the edge with field-attributed
//! detail, before anything reaches the store.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use timetrack::http_server::{HttpServer, HttpServerConfig};
use timetrack::store::EntryStore;

// =============================================================================
// Helper Functions
// =============================================================================

async fn test_app() -> (TempDir, Router) {
    let tmp = TempDir::new().unwrap();
    let store = EntryStore::open(&tmp.path().join("api.db")).await.unwrap();
    let server = HttpServer::new(HttpServerConfig::default(), store, "test");
    (tmp, server.router())
}

async fn send(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
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

fn detail_fields(body: &Value) -> Vec<&str> {
    body["details"]
        .as_array()
        .map(|details| {
            details
                .iter()
                .filter_map(|d| d["field"].as_str())
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// Create Validation
// =============================================================================

/// All missing fields are reported together, not one at a time.
#[tokio::test]
async fn test_missing_fields_collected() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({ "start_time": "2026-02-14T08:00:00Z" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");
    assert_eq!(detail_fields(&body), vec!["end_time", "project"]);
}

#[tokio::test]
async fn test_invalid_timestamp() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({
            "start_time": "invalid-date",
            "end_time": "2026-02-14T09:00:00Z",
            "project": "Project A",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_fields(&body), vec!["start_time"]);
}

#[tokio::test]
async fn test_empty_project() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({
            "start_time": "2026-02-14T08:00:00Z",
            "end_time": "2026-02-14T09:00:00Z",
            "project": "   ",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"][0]["message"],
        "project cannot be empty"
    );
}

#[tokio::test]
async fn test_overlong_notes() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({
            "start_time": "2026-02-14T08:00:00Z",
            "end_time": "2026-02-14T09:00:00Z",
            "project": "Project A",
            "notes": "a".repeat(1001),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_fields(&body), vec!["notes"]);
}

/// Project is stored trimmed.
#[tokio::test]
async fn test_project_trimmed() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({
            "start_time": "2026-02-14T08:00:00Z",
            "end_time": "2026-02-14T09:00:00Z",
            "project": "  Project A  ",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["project"], "Project A");
}

// =============================================================================
// Path Id Validation
// =============================================================================

/// A non-integer id is a validation error, not a missing entry.
#[tokio::test]
async fn test_non_integer_id() {
    let (_tmp, app) = test_app().await;

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/api/entries/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"][0]["field"], "id");
        assert_eq!(body["details"][0]["message"], "id must be a valid integer");
    }

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/entries/abc",
        Some(json!({ "notes": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Query Parameter Validation
// =============================================================================

#[tokio::test]
async fn test_limit_above_maximum() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/entries?limit=9999", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "limit");
}

#[tokio::test]
async fn test_limit_zero() {
    let (_tmp, app) = test_app().await;

    let (status, _) = send(&app, Method::GET, "/api/entries?limit=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_offset() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/entries?offset=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "offset");
}

#[tokio::test]
async fn test_non_integer_query_params() {
    let (_tmp, app) = test_app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/entries?limit=abc&offset=xyz",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_fields(&body).len(), 2);
}
