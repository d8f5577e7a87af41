//! # COAR Notify Core
//!
//! Object model and validation engine for COAR Notify notification patterns.
//!
//! Notifications are JSON-LD documents following the W3C `ActivityStreams` 2.0
//! vocabulary extended with COAR-specific terms. This crate provides:
//!
//! - **Document store**: namespace-aware storage of a JSON-LD document with
//!   optional live aliasing between a pattern and its nested parts
//! - **Validation engine**: a rule table keyed by property and context,
//!   evaluated eagerly on set and exhaustively on `validate()`
//! - **Pattern catalogue**: the concrete COAR Notify patterns and the parts
//!   they are composed of
//! - **Factory**: type-driven dispatch from a raw document to a pattern model

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Core error types
pub mod error;

/// Property identifiers, namespaces and the notification vocabulary
pub mod vocabulary;

/// JSON-LD document storage
pub mod document;

/// Structured validation error tree
pub mod validation;

/// Rule table and value validators
pub mod validator;

/// Model traits, shared model state and notification parts
pub mod model;

/// Concrete notification patterns
pub mod patterns;

/// Type-driven pattern dispatch
pub mod factory;

/// Model options and crate configuration
pub mod config;

pub use config::{CopyMode, ModelOptions, NotifyConfig};
pub use document::{ContextEntry, DocumentStore, Node};
pub use error::{NotifyError, Result, RuleViolation};
pub use factory::{NotifyFactory, PatternClass};
pub use model::{
    Field, ModelCore, ModelType, NotifyActor, NotifyItem, NotifyModel, NotifyObject,
    NotifyPattern, NotifyService, PartProfile, PartRequirements, Pattern, TypePolicy,
};
pub use model::capabilities::{NestedPatternObject, Summary};
pub use patterns::{
    Accept, AnnounceEndorsement, AnnounceRelationship, AnnounceReview, AnnounceServiceResult,
    Reject, RequestEndorsement, RequestReview, TentativelyAccept, TentativelyReject, UndoOffer,
    UnprocessableNotification,
};
pub use validation::{ErrorNode, ValidationError};
pub use validator::{TypeConstraints, Validator, ValidatorFn};
pub use vocabulary::{Namespace, PropertyId};
