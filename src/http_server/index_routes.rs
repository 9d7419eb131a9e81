//! Index and health HTTP Routes
//!
//! `GET /` describes the record endpoints; `GET /health` reports liveness.

use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::errors::ApiError;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Static description of the record endpoints
#[derive(Debug, Serialize)]
pub struct ApiDescription {
    pub message: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    pub get_all: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// Create index and health routes
pub fn index_routes() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .method_not_allowed_fallback(method_not_allowed_handler)
}

async fn index_handler() -> Json<ApiDescription> {
    Json(ApiDescription {
        message: "Roster record API is running",
        endpoints: Endpoints {
            get_all: "GET /api/records",
            create: "POST /api/records",
            update: "PUT /api/records/:id",
            delete: "DELETE /api/records/:id",
        },
    })
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Fallback for unknown paths
pub async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}

/// Fallback for a known path hit with a method it does not serve
pub async fn method_not_allowed_handler(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
