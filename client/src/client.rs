//! Notification sender

use std::sync::Arc;

use coarnotify_core::{NotifyError, Pattern};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::http::{HttpLayer, ReqwestHttpLayer};

/// Content type of a notification body
pub const LDN_CONTENT_TYPE: &str = "application/ld+json;profile=\"https://www.w3.org/ns/activitystreams\"";

/// How the inbox disposed of a delivered notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyResponse {
    /// 201: the notification was stored, possibly at `location`
    Created { location: Option<String> },
    /// 202: the notification was accepted for later processing
    Accepted,
}

/// Sends notifications to LDN inboxes
pub struct NotifyClient {
    config: ClientConfig,
    http: Arc<dyn HttpLayer>,
}

impl std::fmt::Debug for NotifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NotifyClient {
    /// Create a client using the `reqwest` transport
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = ReqwestHttpLayer::new(&config)?;
        Ok(Self::with_http(config, Arc::new(http)))
    }

    /// Create a client over a custom transport
    #[must_use]
    pub fn with_http(config: ClientConfig, http: Arc<dyn HttpLayer>) -> Self {
        Self { config, http }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Inbox a notification would be sent to
    ///
    /// The explicit argument wins, then the configured default, then the
    /// inbox of the notification's target.
    #[must_use]
    pub fn resolve_inbox<P: Pattern + ?Sized>(&self, notification: &P, inbox_url: Option<&str>) -> Option<String> {
        inbox_url
            .map(ToString::to_string)
            .or_else(|| self.config.inbox_url.clone())
            .or_else(|| notification.target().and_then(|target| target.inbox()))
    }

    /// Send a notification
    ///
    /// `validate` overrides the configured `validate_before_send`.
    ///
    /// # Errors
    ///
    /// - `ClientError::NoInbox` when no inbox can be resolved
    /// - `ClientError::Notify` when validation fails; nothing is sent
    /// - `ClientError::UnexpectedStatus` for any status other than 201/202
    /// - `ClientError::Transport` when the request fails
    pub async fn send<P: Pattern + ?Sized>(
        &self,
        notification: &P,
        inbox_url: Option<&str>,
        validate: Option<bool>,
    ) -> Result<NotifyResponse> {
        let inbox = self
            .resolve_inbox(notification, inbox_url)
            .ok_or(ClientError::NoInbox)?;

        if validate.unwrap_or(self.config.validate_before_send) {
            notification.validate().map_err(NotifyError::from)?;
        }

        let body = serde_json::to_string(&notification.to_jsonld()).map_err(NotifyError::from)?;
        let headers = [("Content-Type".to_string(), LDN_CONTENT_TYPE.to_string())];

        debug!("Sending {} notification to {}", notification.model_name(), inbox);
        let response = self.http.post(&inbox, body, &headers).await?;

        match response.status {
            201 => {
                let location = response.header("Location").map(ToString::to_string);
                info!("Notification created at {} (location: {:?})", inbox, location);
                Ok(NotifyResponse::Created { location })
            }
            202 => {
                info!("Notification accepted by {}", inbox);
                Ok(NotifyResponse::Accepted)
            }
            status => {
                warn!("Unexpected status {} from inbox {}", status, inbox);
                Err(ClientError::UnexpectedStatus(status))
            }
        }
    }
}
