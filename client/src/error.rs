//! Error types for notification delivery

use coarnotify_core::NotifyError;
use thiserror::Error;

/// Errors raised while sending a notification
#[derive(Error, Debug)]
pub enum ClientError {
    /// The notification failed validation or could not be serialized
    #[error(transparent)]
    Notify(#[from] NotifyError),

    /// No inbox was given, configured, or found on the notification's target
    #[error("No target inbox could be determined for the notification")]
    NoInbox,

    /// The inbox answered with a status other than 201 or 202
    #[error("Unexpected response from inbox: {0}")]
    UnexpectedStatus(u16),

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Create a transport error
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Validation errors when the notification was rejected before sending
    #[must_use]
    pub fn validation_errors(&self) -> Option<&coarnotify_core::ValidationError> {
        match self {
            Self::Notify(err) => err.validation_errors(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
