//! Incoming notification handling

use std::sync::Arc;

use coarnotify_core::factory::default_factory;
use coarnotify_core::{ModelOptions, NotifyError, NotifyFactory};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::binding::{NotifyReceipt, ServiceBinding};
use crate::error::{Result, ServerError};

/// Server behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Validate notifications before handing them to the binding
    pub validate_incoming: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            validate_incoming: true,
        }
    }
}

/// Body of an incoming request
#[derive(Debug, Clone)]
pub enum Payload {
    Text(String),
    Json(Value),
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Parses, validates and forwards incoming notifications
pub struct NotifyServer {
    binding: Arc<dyn ServiceBinding>,
    factory: Arc<NotifyFactory>,
    config: ServerConfig,
}

impl std::fmt::Debug for NotifyServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyServer")
            .field("factory", &self.factory)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NotifyServer {
    /// Server over the full pattern catalogue
    #[must_use]
    pub fn new(binding: Arc<dyn ServiceBinding>) -> Self {
        Self {
            binding,
            factory: default_factory(),
            config: ServerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_factory(mut self, factory: Arc<NotifyFactory>) -> Self {
        self.factory = factory;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Receive a notification
    ///
    /// `validate` overrides `ServerConfig::validate_incoming`.
    ///
    /// # Errors
    ///
    /// - 400 when the body is not JSON or the notification is invalid
    /// - 422 when the body is not a notification any pattern recognises
    /// - whatever the binding returns
    pub async fn receive(&self, payload: impl Into<Payload>, validate: Option<bool>) -> Result<NotifyReceipt> {
        let raw = match payload.into() {
            Payload::Text(text) => serde_json::from_str(&text).map_err(|err| {
                warn!("Rejecting unparseable notification: {}", err);
                ServerError::from(err)
            })?,
            Payload::Json(value) => value,
        };

        let options = ModelOptions::default()
            .with_validate_on_construct(false)
            .with_factory(Arc::clone(&self.factory));
        let notification = self.factory.get_by_object(raw, options).map_err(|err| {
            warn!("Rejecting notification: {}", err);
            ServerError::from(err)
        })?;

        if validate.unwrap_or(self.config.validate_incoming)
            && let Err(errors) = notification.validate()
        {
            warn!("Rejecting invalid {} notification", notification.model_name());
            return Err(NotifyError::from(errors).into());
        }

        debug!(
            model = notification.model_name(),
            id = ?notification.id(),
            "notification received"
        );
        self.binding.notification_received(notification).await
    }
}
