//! Structured validation error tree
//!
//! A [`ValidationError`] maps each failing property to the messages raised
//! against it, plus a nested tree for failures inside parts:
//!
//! ```text
//! { "origin": { "errors": [], "nested": { "id": { "errors": ["..."] } } } }
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::vocabulary::PropertyId;

/// Errors recorded against one property
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorNode {
    /// Messages raised against the property itself
    pub errors: Vec<String>,
    /// Errors raised inside the property's value
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub nested: IndexMap<PropertyId, ErrorNode>,
}

impl ErrorNode {
    fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
        for (property, node) in other.nested {
            self.nested.entry(property).or_default().merge(node);
        }
    }

    /// Whether the node or anything below it carries a message
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.nested.values().any(Self::has_errors)
    }

    /// Nested node for a bare property name
    #[must_use]
    pub fn nested(&self, name: &str) -> Option<&Self> {
        self.nested
            .iter()
            .find(|(property, _)| property.is_named(name))
            .map(|(_, node)| node)
    }
}

/// Accumulated validation failures for a model
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationError {
    errors: IndexMap<PropertyId, ErrorNode>,
}

impl ValidationError {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a property
    pub fn add_error(&mut self, property: &PropertyId, message: impl Into<String>) {
        self.errors
            .entry(property.clone())
            .or_default()
            .errors
            .push(message.into());
    }

    /// Graft a part's error tree under `property`
    ///
    /// Entries already nested under the property are kept; entries for the
    /// same nested key are merged.
    pub fn add_nested_errors(&mut self, property: &PropertyId, sub: Self) {
        let node = self.errors.entry(property.clone()).or_default();
        for (nested_property, nested_node) in sub.errors {
            node.nested
                .entry(nested_property)
                .or_default()
                .merge(nested_node);
        }
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(ErrorNode::has_errors)
    }

    /// Top-level entry for a property
    #[must_use]
    pub fn get(&self, property: &PropertyId) -> Option<&ErrorNode> {
        self.errors.get(property)
    }

    /// Top-level entry for a bare property name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ErrorNode> {
        self.errors
            .iter()
            .find(|(property, _)| property.is_named(name))
            .map(|(_, node)| node)
    }

    /// Walk the tree by bare property names, e.g. `["target", "id"]`
    #[must_use]
    pub fn at(&self, path: &[&str]) -> Option<&ErrorNode> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.find(first)?, |node, name| node.nested(name))
    }

    /// Failing properties in the order they were recorded
    pub fn properties(&self) -> impl Iterator<Item = &PropertyId> {
        self.errors.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when nothing was recorded, otherwise the tree itself
    ///
    /// # Errors
    ///
    /// Returns `self` when any message was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }

    /// The tree as JSON
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation Error: {}", self.to_json())
    }
}

impl std::error::Error for ValidationError {}
