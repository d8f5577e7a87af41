//! Application hook for received notifications

use async_trait::async_trait;
use coarnotify_core::NotifyModel;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Disposition the inbox reports for a stored notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptStatus {
    /// Stored; answered with 201 and usually a `Location`
    Created,
    /// Queued for later processing; answered with 202
    Accepted,
}

impl ReceiptStatus {
    #[must_use]
    pub fn http_status(self) -> u16 {
        match self {
            Self::Created => 201,
            Self::Accepted => 202,
        }
    }
}

/// What the binding did with a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyReceipt {
    pub status: ReceiptStatus,
    pub location: Option<String>,
}

impl NotifyReceipt {
    #[must_use]
    pub fn created(location: impl Into<String>) -> Self {
        Self {
            status: ReceiptStatus::Created,
            location: Some(location.into()),
        }
    }

    #[must_use]
    pub fn accepted() -> Self {
        Self {
            status: ReceiptStatus::Accepted,
            location: None,
        }
    }
}

/// Implemented by the application hosting the inbox
#[async_trait]
pub trait ServiceBinding: Send + Sync {
    /// Handle a notification that has been parsed and, if requested, validated
    ///
    /// # Errors
    ///
    /// The returned `ServerError` is passed straight back to the sender.
    async fn notification_received(&self, notification: Box<dyn NotifyModel>) -> Result<NotifyReceipt>;
}
