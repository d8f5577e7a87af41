//! Error types for COAR Notify operations

use std::fmt;

use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for COAR Notify operations
#[derive(Error, Debug)]
pub enum NotifyError {
    /// A whole-model validation pass found problems
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A single property value was rejected on set
    #[error("{violation}")]
    InvalidProperty {
        /// Bare name of the property being set
        property: String,
        /// The rule that rejected the value
        violation: RuleViolation,
    },

    /// A part's type setter was given a token outside its permitted list
    #[error("Type value {value} is not one of the permitted values")]
    DisallowedType {
        /// Offending type token
        value: String,
        /// Tokens the part accepts
        allowed: Vec<String>,
    },

    /// The document carries no `type` to dispatch on
    #[error("No type found in object")]
    NoTypeFound,

    /// No registered pattern matches the document's types
    #[error("No model found for type(s): {}", .types.join(", "))]
    NoModelFound {
        /// Type tokens present in the document
        types: Vec<String>,
    },

    /// The raw input could not be used as a notification document
    #[error("Invalid notification document: {0}")]
    InvalidDocument(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for COAR Notify operations
pub type Result<T> = std::result::Result<T, NotifyError>;

impl NotifyError {
    /// Create a property error from a rule violation
    #[must_use]
    pub fn invalid_property(property: impl Into<String>, violation: RuleViolation) -> Self {
        Self::InvalidProperty {
            property: property.into(),
            violation,
        }
    }

    /// Create a disallowed type error
    #[must_use]
    pub fn disallowed_type(value: impl Into<String>, allowed: &[&str]) -> Self {
        Self::DisallowedType {
            value: value.into(),
            allowed: allowed.iter().map(ToString::to_string).collect(),
        }
    }

    /// Create a dispatch error for unmatched types
    #[must_use]
    pub fn no_model_found(types: &[String]) -> Self {
        Self::NoModelFound {
            types: types.to_vec(),
        }
    }

    /// Create an invalid document error
    #[must_use]
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument(message.into())
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The validation tree, when this error came from a validation pass
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidProperty { .. } | Self::DisallowedType { .. }
        )
    }

    /// Whether the payload could not be turned into a pattern model
    #[must_use]
    pub fn is_dispatch(&self) -> bool {
        matches!(
            self,
            Self::NoTypeFound | Self::NoModelFound { .. } | Self::InvalidDocument(_)
        )
    }
}

impl From<serde_json::Error> for NotifyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for NotifyError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// URI component named in a grammar failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriComponent {
    Scheme,
    Authority,
    Path,
    Query,
    Fragment,
}

impl fmt::Display for UriComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scheme => "scheme",
            Self::Authority => "authority",
            Self::Path => "path",
            Self::Query => "query",
            Self::Fragment => "fragment",
        };
        f.write_str(name)
    }
}

/// A single rejected value, as reported by one validator function
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("URI requires a scheme (this may be a relative rather than absolute URI)")]
    MissingScheme,

    #[error("Invalid URI {component} `{value}`")]
    InvalidComponent {
        component: UriComponent,
        value: String,
    },

    #[error("URL scheme must be http or https, found `{0}`")]
    UnsupportedScheme(String),

    #[error("Does not appear to be a valid URL")]
    MissingHost,

    #[error("`{value}` is not one of the valid values: {}", .allowed.join(", "))]
    NotOneOf { value: String, allowed: Vec<String> },

    #[error("`{value}` does not contain any of the valid values: {}", .allowed.join(", "))]
    NoneOf { value: String, allowed: Vec<String> },

    #[error("`{value}` does not contain the required value(s): {}", .required.join(", "))]
    MissingRequired { value: String, required: Vec<String> },

    #[error("expected a string value, found `{0}`")]
    NotAString(String),

    #[error("`{0}` is a required field")]
    Required(String),

    #[error("`{0}` must be a JSON object")]
    NotAnObject(String),

    #[error(
        "Expected inReplyTo id to be the same as the nested object id. inReplyTo: {in_reply_to}, object.id: {object_id}"
    )]
    InReplyToMismatch {
        in_reply_to: String,
        object_id: String,
    },
}

impl RuleViolation {
    /// Create an invalid URI component error
    #[must_use]
    pub fn component(component: UriComponent, value: impl Into<String>) -> Self {
        Self::InvalidComponent {
            component,
            value: value.into(),
        }
    }

    /// Create a missing required field error
    #[must_use]
    pub fn required(property: impl Into<String>) -> Self {
        Self::Required(property.into())
    }
}
