//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Service operations return these instead of swallowing failures; the
/// controller decides what to do with them (see `ActionOutcome`).
#[derive(Error, Debug)]
pub enum Error {
    /// Non-success HTTP status, or the request could not be sent at all
    #[error("Transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a transport error for a request that never got a response
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: msg.into(),
        }
    }

    /// Create a transport error for a non-success HTTP status
    pub fn status(status: u16, msg: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: msg.into(),
        }
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status attached to a transport error, if any
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
