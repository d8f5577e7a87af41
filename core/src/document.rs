//! JSON-LD document storage
//!
//! A [`DocumentStore`] keeps the properties of a notification separately
//! from the namespaces of its `@context`. Objects inside the document are
//! held in shared, lockable maps so that a part handed out by reference and
//! the pattern it came from observe each other's writes.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{NotifyError, Result};
use crate::vocabulary::{Namespace, PropertyId};

/// Key of the JSON-LD context
pub const CONTEXT_KEY: &str = "@context";

/// Property map of one JSON object, shareable between models
pub type SharedObject = Arc<RwLock<IndexMap<String, Node>>>;

/// One entry of a document's `@context`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextEntry {
    /// A namespace URI
    Uri(String),
    /// A prefix mapping such as `{"sorg": "https://schema.org/"}`
    Mapping(Map<String, Value>),
}

/// A value stored in a document
///
/// Cloning a node is shallow: cloned objects share their property map.
#[derive(Debug, Clone)]
pub enum Node {
    Scalar(Value),
    List(Vec<Node>),
    Object(SharedObject),
}

impl Node {
    /// Build a node tree that owns a copy of `value`
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_value).collect()),
            Value::Object(map) => Self::Object(Arc::new(RwLock::new(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from_value(value)))
                    .collect(),
            ))),
            scalar => Self::Scalar(scalar),
        }
    }

    /// Snapshot the node as plain JSON
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::List(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            Self::Object(fields) => Value::Object(object_to_map(&fields.read())),
        }
    }

    /// Copy the node with no sharing left between the copy and the original
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        match self {
            Self::Scalar(value) => Self::Scalar(value.clone()),
            Self::List(items) => Self::List(items.iter().map(Self::deep_clone).collect()),
            Self::Object(fields) => {
                let copy = fields
                    .read()
                    .iter()
                    .map(|(key, node)| (key.clone(), node.deep_clone()))
                    .collect();
                Self::Object(Arc::new(RwLock::new(copy)))
            }
        }
    }

    /// The shared map, when the node is an object
    #[must_use]
    pub fn as_object(&self) -> Option<&SharedObject> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Value::Null))
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

fn object_to_map(fields: &IndexMap<String, Node>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, node)| (key.clone(), node.to_value()))
        .collect()
}

/// Namespace-aware storage for one notification document
#[derive(Debug)]
pub struct DocumentStore {
    fields: SharedObject,
    namespaces: Vec<ContextEntry>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Create an empty document
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: Arc::new(RwLock::new(IndexMap::new())),
            namespaces: Vec::new(),
        }
    }

    /// Load a raw JSON-LD document
    ///
    /// The `@context` is lifted out of the properties; a single entry is
    /// promoted to a one-element list.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidDocument` when `raw` is not a JSON object
    /// or its `@context` holds something other than URIs and prefix maps.
    pub fn from_value(raw: Value) -> Result<Self> {
        let Value::Object(map) = raw else {
            return Err(NotifyError::invalid_document(
                "a notification document must be a JSON object",
            ));
        };

        let mut context = None;
        let mut fields = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            if key == CONTEXT_KEY {
                context = Some(value);
            } else {
                fields.insert(key, Node::from_value(value));
            }
        }

        let namespaces = match context {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries
                .into_iter()
                .map(parse_context_entry)
                .collect::<Result<Vec<_>>>()?,
            Some(single) => vec![parse_context_entry(single)?],
        };

        Ok(Self {
            fields: Arc::new(RwLock::new(fields)),
            namespaces,
        })
    }

    /// Wrap an existing shared map; the view starts with no namespaces
    #[must_use]
    pub fn from_shared(fields: SharedObject) -> Self {
        Self {
            fields,
            namespaces: Vec::new(),
        }
    }

    /// The shared property map backing this store
    #[must_use]
    pub fn shared_fields(&self) -> SharedObject {
        Arc::clone(&self.fields)
    }

    /// Whether two stores read and write the same property map
    #[must_use]
    pub fn shares_fields_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }

    /// The node stored under a property
    ///
    /// Object nodes in the result are still linked to this document.
    #[must_use]
    pub fn get(&self, property: &PropertyId) -> Option<Node> {
        self.fields.read().get(property.name()).cloned()
    }

    /// A plain JSON copy of the value stored under a property
    #[must_use]
    pub fn get_value(&self, property: &PropertyId) -> Option<Value> {
        self.fields.read().get(property.name()).map(Node::to_value)
    }

    #[must_use]
    pub fn contains(&self, property: &PropertyId) -> bool {
        self.fields.read().contains_key(property.name())
    }

    /// Store a node under the property's bare name and register its namespace
    pub fn set(&mut self, property: &PropertyId, node: Node) {
        self.fields.write().insert(property.name().to_string(), node);
        if let Some(namespace) = property.namespace() {
            self.register_namespace(namespace);
        }
    }

    /// Store a plain JSON value
    pub fn set_value(&mut self, property: &PropertyId, value: Value) {
        self.set(property, Node::from_value(value));
    }

    /// Add a namespace to the `@context` unless an equal entry is present
    pub fn register_namespace(&mut self, namespace: &Namespace) {
        let entry = namespace.to_context_entry();
        if !self.namespaces.contains(&entry) {
            trace!(namespace = namespace.namespace_uri(), "registering namespace");
            self.namespaces.push(entry);
        }
    }

    /// Registered `@context` entries in insertion order
    #[must_use]
    pub fn namespaces(&self) -> &[ContextEntry] {
        &self.namespaces
    }

    /// Property names in insertion order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.fields.read().keys().cloned().collect()
    }

    /// Serialize the document with its `@context` first
    #[must_use]
    pub fn to_document(&self) -> Value {
        let fields = self.fields.read();
        let mut document = Map::with_capacity(fields.len() + 1);
        let context = self
            .namespaces
            .iter()
            .map(|entry| match entry {
                ContextEntry::Uri(uri) => Value::String(uri.clone()),
                ContextEntry::Mapping(mapping) => Value::Object(mapping.clone()),
            })
            .collect();
        document.insert(CONTEXT_KEY.to_string(), Value::Array(context));
        for (key, node) in fields.iter() {
            document.insert(key.clone(), node.to_value());
        }
        Value::Object(document)
    }

    /// Copy the store with no sharing left between copy and original
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        let fields = self
            .fields
            .read()
            .iter()
            .map(|(key, node)| (key.clone(), node.deep_clone()))
            .collect();
        Self {
            fields: Arc::new(RwLock::new(fields)),
            namespaces: self.namespaces.clone(),
        }
    }
}

fn parse_context_entry(value: Value) -> Result<ContextEntry> {
    serde_json::from_value(value).map_err(|_| {
        NotifyError::invalid_document("@context entries must be URIs or prefix mappings")
    })
}
