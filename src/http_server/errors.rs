//! # HTTP API Errors
//!
//! Maps validation and storage failures onto the status-code contract:
//!
//! | Category | Status |
//! |---|---|
//! | `Validation` | 400 |
//! | `NotFound`, `RouteNotFound` | 404 |
//! | `MethodNotAllowed` | 405 |
//! | `Storage` | 500 |

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use thiserror::Error;

use crate::record::{RecordId, ValidationError};
use crate::storage::StoreError;

use super::response::Envelope;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Operation being served, named in storage failure messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Candidate data violates the field constraints
    #[error("{}", .0.summary())]
    Validation(#[from] ValidationError),

    /// No record with the addressed id
    #[error("Record not found")]
    NotFound(RecordId),

    /// Unknown path
    #[error("Route not found")]
    RouteNotFound(String),

    /// Known path, unsupported method
    #[error("Method not allowed")]
    MethodNotAllowed { method: String, path: String },

    /// Engine unreachable or failed unexpectedly
    #[error("Failed to {operation} records")]
    Storage {
        operation: Operation,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Sorts an engine error into its contract category.
    pub fn from_store(operation: Operation, err: StoreError) -> Self {
        match err {
            StoreError::Validation(v) => ApiError::Validation(v),
            StoreError::NotFound(id) => ApiError::NotFound(id),
            source => ApiError::Storage { operation, source },
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Detail string for the envelope's `error` field.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Validation(v) => v.to_string(),
            ApiError::NotFound(id) => format!("no record with id '{}'", id),
            ApiError::RouteNotFound(path) => format!("no route for '{}'", path),
            ApiError::MethodNotAllowed { method, path } => {
                format!("{} is not supported on '{}'", method, path)
            }
            ApiError::Storage { source, .. } => source.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Storage { operation, source } => {
                tracing::error!(%operation, error = %source, "storage failure");
            }
            other => {
                tracing::info!(status = status.as_u16(), error = %other.detail(), "request rejected");
            }
        }

        let body: Envelope<Value> = Envelope::error(self.to_string(), self.detail());
        (status, Json(body)).into_response()
    }
}
