//! Record API Contract Tests
//!
//! Drives the full router in-process and checks the status codes and
//! envelope shapes clients depend on.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use roster::http_server::{HttpServer, HttpServerConfig};
use roster::storage::{MemoryStore, RecordStore};
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

fn app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let router = HttpServer::with_config(HttpServerConfig::default(), store.clone()).router();
    (store, router)
}

async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header(header::CONTENT_TYPE, "application/json");
    }
    let request = request
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).expect("every response is a JSON envelope");
    (status, json)
}

// =============================================================================
// Full Lifecycle
// =============================================================================

#[tokio::test]
async fn test_create_update_delete_lifecycle() {
    let (_store, router) = app();

    let (status, created) = call(
        &router,
        Method::POST,
        "/api/records",
        Some(json!({"name": "Lan", "age": 16, "class": "10A1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    assert_eq!(created["message"], "Record created");
    let id = created["data"]["_id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 32);
    assert_eq!(created["data"]["createdAt"], created["data"]["updatedAt"]);

    let (status, listed) = call(&router, Method::GET, "/api/records", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["data"][0]["_id"], id.as_str());

    let (status, updated) = call(
        &router,
        Method::PUT,
        &format!("/api/records/{}", id),
        Some(json!({"name": "Lan", "age": 17, "class": "10A2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "Record updated");
    assert_eq!(updated["data"]["age"], 17);
    assert_eq!(updated["data"]["class"], "10A2");
    assert_eq!(updated["data"]["createdAt"], created["data"]["createdAt"]);
    assert!(
        updated["data"]["updatedAt"].as_str().unwrap()
            > created["data"]["updatedAt"].as_str().unwrap()
    );

    let (status, deleted) = call(&router, Method::DELETE, &format!("/api/records/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Record deleted");
    assert_eq!(deleted["data"]["age"], 17);

    let (status, listed) = call(&router, Method::GET, "/api/records", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["count"], 0);
    assert_eq!(listed["data"], json!([]));
}

#[tokio::test]
async fn test_update_with_same_fields_bumps_updated_at() {
    let (store, router) = app();
    let body = json!({"name": "Minh", "age": 15, "class": "9B"});

    let (_, created) = call(&router, Method::POST, "/api/records", Some(body.clone())).await;
    let id = created["data"]["_id"].as_str().unwrap();

    let (status, updated) =
        call(&router, Method::PUT, &format!("/api/records/{}", id), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        updated["data"]["updatedAt"].as_str().unwrap()
            > created["data"]["updatedAt"].as_str().unwrap()
    );
    assert_eq!(store.count().unwrap(), 1);
}

// =============================================================================
// Failure Contract
// =============================================================================

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let (_store, router) = app();
    let (_, created) = call(
        &router,
        Method::POST,
        "/api/records",
        Some(json!({"name": "Lan", "age": 16, "class": "10A1"})),
    )
    .await;
    let uri = format!("/api/records/{}", created["data"]["_id"].as_str().unwrap());

    let (first, _) = call(&router, Method::DELETE, &uri, None).await;
    let (second, body) = call(&router, Method::DELETE, &uri, None).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Record not found");
}

#[tokio::test]
async fn test_update_unknown_id_leaves_collection_alone() {
    let (store, router) = app();
    call(
        &router,
        Method::POST,
        "/api/records",
        Some(json!({"name": "Lan", "age": 16, "class": "10A1"})),
    )
    .await;
    let before = store.list().unwrap();

    let (status, body) = call(
        &router,
        Method::PUT,
        "/api/records/0123456789abcdef0123456789abcdef",
        Some(json!({"name": "X", "age": 20, "class": "12C"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Record not found");
    assert_eq!(store.list().unwrap(), before);
}

#[tokio::test]
async fn test_invalid_candidates_never_create() {
    let (store, router) = app();
    let cases = [
        json!({"age": 16, "class": "10A1"}),
        json!({"name": "Lan", "class": "10A1"}),
        json!({"name": "Lan", "age": 16}),
        json!({"name": "", "age": 16, "class": "10A1"}),
        json!({"name": "Lan", "age": 0, "class": "10A1"}),
        json!({"name": "Lan", "age": 101, "class": "10A1"}),
        json!({"name": "Lan", "age": -3, "class": "10A1"}),
        json!({"name": "   ", "age": 16, "class": "10A1"}),
        json!({"name": "Lan", "age": "old", "class": "10A1"}),
        json!(["Lan", 16, "10A1"]),
    ];

    for body in cases {
        let (status, envelope) = call(&router, Method::POST, "/api/records", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(envelope["success"], false);
        assert!(envelope["error"].is_string());
    }
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_missing_field_message() {
    let (_store, router) = app();
    let (status, body) = call(
        &router,
        Method::POST,
        "/api/records",
        Some(json!({"name": "Lan", "age": 16})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide all fields (name, age, class)");
}

#[tokio::test]
async fn test_age_bounds_are_inclusive() {
    let (store, router) = app();
    for age in [1, 100] {
        let (status, _) = call(
            &router,
            Method::POST,
            "/api/records",
            Some(json!({"name": "Edge", "age": age, "class": "1A"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    assert_eq!(store.count().unwrap(), 2);
}

#[tokio::test]
async fn test_duplicates_are_distinct_records() {
    let (_store, router) = app();
    let body = json!({"name": "Lan", "age": 16, "class": "10A1"});
    let (_, a) = call(&router, Method::POST, "/api/records", Some(body.clone())).await;
    let (_, b) = call(&router, Method::POST, "/api/records", Some(body)).await;

    assert_ne!(a["data"]["_id"], b["data"]["_id"]);
    let (_, listed) = call(&router, Method::GET, "/api/records", None).await;
    assert_eq!(listed["count"], 2);
    // newest first
    assert_eq!(listed["data"][0]["_id"], b["data"]["_id"]);
}

// =============================================================================
// Index Routes
// =============================================================================

#[tokio::test]
async fn test_health_and_unknown_route() {
    let (_store, router) = app();

    let (status, health) = call(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");

    let (status, body) = call(&router, Method::GET, "/api/students", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn test_unsupported_method_is_enveloped() {
    let (store, router) = app();
    let (_, created) = call(
        &router,
        Method::POST,
        "/api/records",
        Some(json!({"name": "Lan", "age": 16, "class": "10A1"})),
    )
    .await;
    let path = format!("/api/records/{}", created["data"]["_id"].as_str().unwrap());

    for (method, uri) in [
        (Method::PUT, "/api/records"),
        (Method::DELETE, "/api/records"),
        (Method::GET, path.as_str()),
        (Method::POST, "/"),
    ] {
        let (status, body) = call(&router, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Method not allowed");
        assert_eq!(body["error"], format!("{} is not supported on '{}'", method, uri));
    }
    assert_eq!(store.count().unwrap(), 1);
}

#[tokio::test]
async fn test_undecodable_id_is_record_not_found() {
    let (store, router) = app();
    call(
        &router,
        Method::POST,
        "/api/records",
        Some(json!({"name": "Lan", "age": 16, "class": "10A1"})),
    )
    .await;

    let (status, body) = call(
        &router,
        Method::PUT,
        "/api/records/%FF",
        Some(json!({"name": "Minh", "age": 17, "class": "11B2"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Record not found");

    let (status, body) = call(&router, Method::DELETE, "/api/records/%FF", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Record not found");

    let (_, listed) = call(&router, Method::GET, "/api/records", None).await;
    assert_eq!(listed["data"][0]["name"], "Lan");
    assert_eq!(store.count().unwrap(), 1);
}
