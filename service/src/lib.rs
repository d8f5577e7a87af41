//! # COAR Notify Service
//!
//! Receive-side binding for an LDN inbox.
//!
//! [`NotifyServer`] turns an incoming request body into a pattern model via
//! the factory, validates it, and hands it to an application-supplied
//! [`ServiceBinding`]. Errors carry the HTTP status the inbox should answer
//! with. Listening for requests and persisting notifications are left to the
//! embedding application.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Server errors with HTTP status mapping
pub mod error;

/// Application hook and receipts
pub mod binding;

/// Incoming notification handling
pub mod server;

pub use binding::{NotifyReceipt, ReceiptStatus, ServiceBinding};
pub use error::{Result, ServerError};
pub use server::{NotifyServer, Payload, ServerConfig};
