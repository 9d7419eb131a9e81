//! Observability
//!
//! Structured logging through `tracing`. Library code only emits events;
//! the binary installs the subscriber once at startup.

mod logging;

pub use logging::{env_filter, init_logging, DEFAULT_LOG_FILTER};
