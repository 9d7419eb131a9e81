//! Storage engine errors
//!
//! Categories as seen by callers:
//! - `Validation`: the engine's own field check rejected the write
//! - `NotFound`: no record with the given id
//! - everything else: the engine cannot serve the request

use std::io;

use thiserror::Error;

use crate::record::{RecordId, ValidationError};

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage engine errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Second-line field validation failed
    #[error("record validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced record does not exist
    #[error("no record with id '{0}'")]
    NotFound(RecordId),

    /// Engine cannot be reached or opened
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Disk I/O failure
    #[error("storage I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Log entry failed its checksum or framing check
    #[error("data corruption at byte offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// Record could not be encoded or decoded
    #[error("record encoding error: {0}")]
    Encoding(String),
}

impl StoreError {
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            message: message.into(),
            source,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable(message.into())
    }

    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        StoreError::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn lock_poisoned() -> Self {
        StoreError::Unavailable("lock poisoned".to_string())
    }

    /// Corrupt data must stop the engine from opening.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::Corruption { .. })
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Encoding(e.to_string())
    }
}
