//! # COAR Notify Client
//!
//! Delivers COAR Notify notifications to an LDN inbox.
//!
//! The client serializes a pattern to JSON-LD, optionally validates it first,
//! and POSTs it to the inbox of the receiving service. The HTTP transport sits
//! behind the [`HttpLayer`] trait so it can be swapped out; a `reqwest`-backed
//! implementation is used by default.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use coarnotify_client::{ClientConfig, NotifyClient};
//! use coarnotify_core::{ModelType, RequestReview};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NotifyClient::new(ClientConfig::default())?;
//! let offer = RequestReview::new();
//! // ... populate origin, target and object ...
//! let response = client.send(&offer, Some("https://example.com/inbox"), None).await?;
//! println!("{response:?}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Client configuration
pub mod config;

/// Client error types
pub mod error;

/// Pluggable HTTP transport
pub mod http;

/// Notification sender
pub mod client;

pub use client::{LDN_CONTENT_TYPE, NotifyClient, NotifyResponse};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use http::{HttpLayer, HttpResponse, ReqwestHttpLayer};
