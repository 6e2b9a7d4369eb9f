//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Backend rejected request: status {0:?}")]
    Backend(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),
}

impl Error {
    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this failure is worth another attempt. Not-found and
    /// auth failures are terminal; everything else (5xx, connection
    /// errors, timeouts) is treated as transient.
    pub fn is_transient(&self) -> bool {
        !matches!(self.status(), Some(401) | Some(403) | Some(404))
    }
}
