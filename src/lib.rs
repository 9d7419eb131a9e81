//! roster - student record service
//!
//! A CRUD API over a single collection of student records, a choice of
//! storage engines, and an interactive terminal client.
//!
//! - [`record`]: the record type and its validation
//! - [`storage`]: in-memory and durable file engines behind [`storage::RecordStore`]
//! - [`http_server`]: axum routes, response envelope, error mapping
//! - [`client`]: API client, client state, derived view, terminal shell
//! - [`cli`]: `serve` and `client` commands
//! - [`observability`]: log subscriber setup

pub mod cli;
pub mod client;
pub mod http_server;
pub mod observability;
pub mod record;
pub mod storage;
