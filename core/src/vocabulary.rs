//! Property identifiers, namespaces and the notification vocabulary
//!
//! A [`PropertyId`] is either a bare name or a name paired with the
//! namespace it belongs to. The namespace is what gets registered in the
//! document's `@context` when the property is written.

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::document::ContextEntry;

/// `ActivityStreams` 2.0 namespace
pub const ACTIVITY_STREAMS_NAMESPACE: &str = "https://www.w3.org/ns/activitystreams";

/// COAR Notify namespace
pub const NOTIFY_NAMESPACE: &str = "https://coar-notify.net";

/// A namespace that a property belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// A plain namespace URI
    Uri(Cow<'static, str>),
    /// A prefix bound to a namespace URI, registered as `{prefix: uri}`
    Prefixed {
        prefix: Cow<'static, str>,
        uri: Cow<'static, str>,
    },
}

impl Namespace {
    /// `ActivityStreams` namespace
    pub const ACTIVITY_STREAMS: Self = Self::Uri(Cow::Borrowed(ACTIVITY_STREAMS_NAMESPACE));

    /// COAR Notify namespace
    pub const NOTIFY: Self = Self::Uri(Cow::Borrowed(NOTIFY_NAMESPACE));

    /// Create a namespace from a URI
    #[must_use]
    pub fn uri(uri: impl Into<Cow<'static, str>>) -> Self {
        Self::Uri(uri.into())
    }

    /// Create a prefixed namespace
    #[must_use]
    pub fn prefixed(prefix: impl Into<Cow<'static, str>>, uri: impl Into<Cow<'static, str>>) -> Self {
        Self::Prefixed {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }

    /// The namespace URI
    #[must_use]
    pub fn namespace_uri(&self) -> &str {
        match self {
            Self::Uri(uri) | Self::Prefixed { uri, .. } => uri,
        }
    }

    /// The `@context` entry this namespace contributes
    #[must_use]
    pub fn to_context_entry(&self) -> ContextEntry {
        match self {
            Self::Uri(uri) => ContextEntry::Uri(uri.to_string()),
            Self::Prefixed { prefix, uri } => {
                let mut mapping = Map::new();
                mapping.insert(prefix.to_string(), Value::String(uri.to_string()));
                ContextEntry::Mapping(mapping)
            }
        }
    }
}

/// Identifier of a document property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyId {
    /// A property with no namespace of its own
    Name(Cow<'static, str>),
    /// A property registered under a namespace
    Namespaced {
        name: Cow<'static, str>,
        namespace: Namespace,
    },
}

impl PropertyId {
    /// Create a namespaced property
    #[must_use]
    pub fn namespaced(name: impl Into<Cow<'static, str>>, namespace: Namespace) -> Self {
        Self::Namespaced {
            name: name.into(),
            namespace,
        }
    }

    /// The key the property is stored under
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Namespaced { name, .. } => name,
        }
    }

    /// The namespace, when the property has one
    #[must_use]
    pub fn namespace(&self) -> Option<&Namespace> {
        match self {
            Self::Name(_) => None,
            Self::Namespaced { namespace, .. } => Some(namespace),
        }
    }

    /// Whether the property has the given bare name
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name() == name
    }
}

impl From<&'static str> for PropertyId {
    fn from(name: &'static str) -> Self {
        Self::Name(Cow::Borrowed(name))
    }
}

impl From<String> for PropertyId {
    fn from(name: String) -> Self {
        Self::Name(Cow::Owned(name))
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PropertyId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

const fn activity_streams(name: &'static str) -> PropertyId {
    PropertyId::Namespaced {
        name: Cow::Borrowed(name),
        namespace: Namespace::ACTIVITY_STREAMS,
    }
}

const fn notify(name: &'static str) -> PropertyId {
    PropertyId::Namespaced {
        name: Cow::Borrowed(name),
        namespace: Namespace::NOTIFY,
    }
}

const fn bare(name: &'static str) -> PropertyId {
    PropertyId::Name(Cow::Borrowed(name))
}

/// `ActivityStreams` properties used by notification patterns
pub mod properties {
    use super::{PropertyId, activity_streams};

    pub const ID: PropertyId = activity_streams("id");
    pub const TYPE: PropertyId = activity_streams("type");
    pub const ORIGIN: PropertyId = activity_streams("origin");
    pub const OBJECT: PropertyId = activity_streams("object");
    pub const TARGET: PropertyId = activity_streams("target");
    pub const ACTOR: PropertyId = activity_streams("actor");
    pub const IN_REPLY_TO: PropertyId = activity_streams("inReplyTo");
    pub const CONTEXT: PropertyId = activity_streams("context");
    pub const SUMMARY: PropertyId = activity_streams("summary");
    pub const SUBJECT_TRIPLE: PropertyId = activity_streams("as:subject");
    pub const OBJECT_TRIPLE: PropertyId = activity_streams("as:object");
    pub const RELATIONSHIP_TRIPLE: PropertyId = activity_streams("as:relationship");
}

/// COAR Notify properties
pub mod notify_properties {
    use super::{PropertyId, bare, notify};

    pub const INBOX: PropertyId = notify("inbox");
    pub const CITE_AS: PropertyId = notify("ietf:cite-as");
    pub const ITEM: PropertyId = notify("ietf:item");
    pub const NAME: PropertyId = bare("name");
    pub const MEDIA_TYPE: PropertyId = bare("mediaType");
}

/// `ActivityStreams` type tokens
pub mod activity_types {
    pub const ACCEPT: &str = "Accept";
    pub const ANNOUNCE: &str = "Announce";
    pub const REJECT: &str = "Reject";
    pub const OFFER: &str = "Offer";
    pub const TENTATIVE_ACCEPT: &str = "TentativeAccept";
    pub const TENTATIVE_REJECT: &str = "TentativeReject";
    pub const FLAG: &str = "Flag";
    pub const UNDO: &str = "Undo";

    pub const OBJECT: &str = "Object";
    pub const SERVICE: &str = "Service";
    pub const APPLICATION: &str = "Application";
    pub const GROUP: &str = "Group";
    pub const ORGANIZATION: &str = "Organization";
    pub const PERSON: &str = "Person";

    /// Object types defined by the `ActivityStreams` vocabulary
    pub const ACTIVITY_STREAMS_OBJECTS: &[&str] = &[
        "Activity",
        "Application",
        "Article",
        "Audio",
        "Collection",
        "CollectionPage",
        "Relationship",
        "Document",
        "Event",
        "Group",
        "Image",
        "IntransitiveActivity",
        "Note",
        "Object",
        "OrderedCollection",
        "OrderedCollectionPage",
        "Organization",
        "Page",
        "Person",
        "Place",
        "Profile",
        "Question",
        "Service",
        "Tombstone",
        "Video",
    ];

    /// Types an actor may take
    pub const ACTOR_TYPES: &[&str] = &[SERVICE, APPLICATION, GROUP, ORGANIZATION, PERSON];
}

/// COAR Notify type tokens
pub mod notify_types {
    pub const ENDORSEMENT_ACTION: &str = "coar-notify:EndorsementAction";
    pub const INGEST_ACTION: &str = "coar-notify:IngestAction";
    pub const RELATIONSHIP_ACTION: &str = "coar-notify:RelationshipAction";
    pub const REVIEW_ACTION: &str = "coar-notify:ReviewAction";
    pub const UNPROCESSABLE_NOTIFICATION: &str = "coar-notify:UnprocessableNotification";
    pub const ABOUT_PAGE: &str = "sorg:AboutPage";
}
