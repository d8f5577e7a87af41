//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a [`crate::NotifyClient`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Inbox used when `send` is given none
    pub inbox_url: Option<String>,

    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// User agent sent with every request
    pub user_agent: String,

    /// Validate notifications before they are sent
    pub validate_before_send: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            inbox_url: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("coarnotify-rs/{}", env!("CARGO_PKG_VERSION")),
            validate_before_send: true,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_inbox_url(mut self, inbox_url: impl Into<String>) -> Self {
        self.inbox_url = Some(inbox_url.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_validate_before_send(mut self, enabled: bool) -> Self {
        self.validate_before_send = enabled;
        self
    }
}
