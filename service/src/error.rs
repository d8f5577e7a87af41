//! Error types for incoming notifications

use coarnotify_core::NotifyError;
use serde::Serialize;
use thiserror::Error;

/// A rejection, carrying the HTTP status to answer with
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{status}: {message}")]
pub struct ServerError {
    pub status: u16,
    pub message: String,
}

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

impl ServerError {
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    /// 422 Unprocessable Content
    #[must_use]
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(422, message)
    }

    /// 500 Internal Server Error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }
}

impl From<NotifyError> for ServerError {
    fn from(err: NotifyError) -> Self {
        if err.is_validation() {
            Self::bad_request(err.to_string())
        } else if err.is_dispatch() {
            Self::unprocessable(err.to_string())
        } else {
            Self::internal(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        Self::bad_request(format!("Unable to parse notification: {err}"))
    }
}
