//! # Roster HTTP Server Module
//!
//! The record API: validation of request bodies, the storage call, and the
//! mapping of outcomes onto the response envelope and status codes.
//!
//! # Endpoints
//!
//! - `GET /` - Endpoint description
//! - `GET /health` - Health check
//! - `GET|POST /api/records` - List and create
//! - `PUT|DELETE /api/records/:id` - Update and delete

pub mod config;
pub mod errors;
pub mod index_routes;
pub mod record_routes;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, Operation};
pub use record_routes::{RecordState, RECORDS_PATH};
pub use response::Envelope;
pub use server::{HttpServer, API_BASE_PATH};
