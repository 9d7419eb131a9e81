//! Client errors

use thiserror::Error;

use crate::record::ValidationError;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Form contents rejected before any call was made
    #[error("{}", .0.summary())]
    Invalid(#[from] ValidationError),

    /// Server unreachable or connection dropped
    #[error("could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a failure envelope
    #[error("{message} (HTTP {status})")]
    Api {
        status: u16,
        message: String,
        detail: Option<String>,
    },

    /// Response body did not match the envelope contract
    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid API URL '{0}'")]
    InvalidUrl(String),
}

impl ClientError {
    /// True when the server reported the addressed record missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}
