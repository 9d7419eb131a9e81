//! Record HTTP Routes
//!
//! CRUD endpoints over the single record collection. Presence and shape of
//! the body are checked here, before the storage engine is called.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{StatusCode, Uri},
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;

use crate::record::{parse_candidate, Record, RecordFields, RecordId, ValidationError};
use crate::storage::{RecordStore, StoreError, StoreResult};

use super::errors::{ApiError, ApiResult, Operation};
use super::index_routes::method_not_allowed_handler;
use super::response::Envelope;

/// Collection path under the API base path
pub const RECORDS_PATH: &str = "/records";

// ==================
// Shared State
// ==================

/// Record routes state shared across handlers
pub struct RecordState {
    pub store: Arc<dyn RecordStore>,
}

impl RecordState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

// ==================
// Record Routes
// ==================

/// Create record routes
pub fn record_routes(state: Arc<RecordState>) -> Router {
    Router::new()
        .route(RECORDS_PATH, get(list_handler).post(create_handler))
        .route("/records/:id", put(update_handler).delete(delete_handler))
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Presence/shape check of a JSON body.
fn parse_body(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<RecordFields> {
    let Json(body) =
        payload.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;
    Ok(parse_candidate(&body)?)
}

/// Resolves the `:id` segment. An id that cannot be decoded names no record.
fn record_id(path: Result<Path<String>, PathRejection>, uri: &Uri) -> ApiResult<RecordId> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            let raw = uri.path().rsplit('/').next().unwrap_or_default().to_string();
            tracing::debug!(id = %raw, reason = %rejection.body_text(), "undecodable record id");
            Err(ApiError::NotFound(raw))
        }
    }
}

/// Runs a storage call off the async workers; the file engine fsyncs.
async fn with_store<T, F>(state: &RecordState, operation: Operation, f: F) -> ApiResult<T>
where
    F: FnOnce(&dyn RecordStore) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| ApiError::Storage {
            operation,
            source: StoreError::unavailable(format!("storage task failed: {}", e)),
        })?
        .map_err(|e| ApiError::from_store(operation, e))
}

// ==================
// Handlers
// ==================

async fn list_handler(
    State(state): State<Arc<RecordState>>,
) -> ApiResult<Json<Envelope<Vec<Record>>>> {
    let records = with_store(&state, Operation::List, |store| store.list()).await?;
    tracing::debug!(count = records.len(), "records listed");
    Ok(Json(Envelope::list(records)))
}

async fn create_handler(
    State(state): State<Arc<RecordState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Record>>)> {
    let fields = parse_body(payload)?;

    let record = with_store(&state, Operation::Create, move |store| store.insert(&fields)).await?;
    tracing::info!(id = %record.id, "record created");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(record).with_message("Record created")),
    ))
}

async fn update_handler(
    State(state): State<Arc<RecordState>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Envelope<Record>>> {
    let fields = parse_body(payload)?;
    let id = record_id(path, &uri)?;

    let record = with_store(&state, Operation::Update, move |store| {
        store.replace(&id, &fields)
    })
    .await?;
    tracing::info!(id = %record.id, "record updated");

    Ok(Json(Envelope::ok(record).with_message("Record updated")))
}

async fn delete_handler(
    State(state): State<Arc<RecordState>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Envelope<Record>>> {
    let id = record_id(path, &uri)?;
    let record = with_store(&state, Operation::Delete, move |store| store.remove(&id)).await?;
    tracing::info!(id = %record.id, "record deleted");

    Ok(Json(Envelope::ok(record).with_message("Record deleted")))
}
