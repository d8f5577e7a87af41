//! Model traits, shared model state and notification parts
//!
//! Every model wraps a [`ModelCore`]: the document store plus the options and
//! type policy it was built with. [`NotifyModel`] is the object-safe surface
//! shared by patterns and parts; [`ModelType`] adds the constructors.

pub mod capabilities;
mod parts;
mod pattern;
mod state;

use std::any::Any;
use std::fmt;

use bitflags::bitflags;
use serde_json::Value;
use tracing::warn;

use crate::config::ModelOptions;
use crate::document::DocumentStore;
use crate::error::Result;
use crate::validation::ValidationError;
use crate::validator::TypeConstraints;
use crate::vocabulary::{PropertyId, properties};

pub use state::{Field, ModelCore};
pub use parts::{NotifyActor, NotifyItem, NotifyObject, NotifyService, Triple};
pub use pattern::{NotifyPattern, Pattern};

/// Whether a model is a top-level pattern or a nested part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Pattern,
    Part,
}

/// Type tokens a model requires, permits and defaults to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypePolicy {
    pub kind: ModelKind,
    /// Tokens a pattern's `type` always contains
    pub required: &'static [&'static str],
    /// Exact tokens a part's `type` may take; empty when unrestricted
    pub allowed: &'static [&'static str],
    /// Type given to a part constructed without one
    pub default: Option<&'static str>,
}

impl TypePolicy {
    #[must_use]
    pub const fn pattern(required: &'static [&'static str]) -> Self {
        Self {
            kind: ModelKind::Pattern,
            required,
            allowed: &[],
            default: None,
        }
    }

    #[must_use]
    pub const fn part(default: Option<&'static str>, allowed: &'static [&'static str]) -> Self {
        Self {
            kind: ModelKind::Part,
            required: &[],
            allowed,
            default,
        }
    }
}

impl TypeConstraints for TypePolicy {
    fn allowed_types(&self) -> &[&'static str] {
        self.allowed
    }

    fn required_types(&self) -> &[&'static str] {
        self.required
    }
}

bitflags! {
    /// Fields a part must carry beyond its own defaults
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PartRequirements: u8 {
        /// `type` is present and valid
        const TYPE = 1;
        /// `mediaType` is present
        const MEDIA_TYPE = 1 << 1;
        /// `as:subject`, `as:relationship` and `as:object` are present and valid
        const TRIPLE = 1 << 2;
    }
}

/// Requirements for a part and for the item nested inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartProfile {
    pub requirements: PartRequirements,
    pub item: PartRequirements,
}

impl PartProfile {
    pub const NONE: Self = Self::new(PartRequirements::empty(), PartRequirements::empty());

    #[must_use]
    pub const fn new(requirements: PartRequirements, item: PartRequirements) -> Self {
        Self { requirements, item }
    }
}

/// Behaviour shared by every notification pattern and part
pub trait NotifyModel: Send + Sync + fmt::Debug {
    fn core(&self) -> &ModelCore;

    fn core_mut(&mut self) -> &mut ModelCore;

    /// Name of the concrete model
    fn model_name(&self) -> &'static str;

    /// Check the whole model, collecting every failure
    ///
    /// # Errors
    ///
    /// Returns the tree of failures when any rule is not met.
    fn validate(&self) -> std::result::Result<(), ValidationError>;

    fn as_any(&self) -> &dyn Any;

    fn id(&self) -> Option<String> {
        self.core().get_string(&properties::ID)
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the id is rejected.
    fn set_id(&mut self, id: &str) -> Result<()> {
        self.core_mut()
            .set_property(&properties::ID, Value::from(id))
    }

    /// The raw `type` value, a string or a list of strings
    fn type_value(&self) -> Option<Value> {
        self.core().get_property(&properties::TYPE)
    }

    /// The `type` tokens
    fn types(&self) -> Vec<String> {
        self.core().types()
    }

    /// Replace the `type`; a single token is stored as a string
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::DisallowedType` when a part is given a token
    /// outside its permitted list, or `NotifyError::InvalidProperty` when the
    /// rule table rejects the value.
    fn set_type(&mut self, types: &[&str]) -> Result<()> {
        self.core_mut().set_type(types)
    }

    fn get_property(&self, property: &PropertyId) -> Option<Value> {
        self.core().get_property(property)
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the value is rejected.
    fn set_property(&mut self, property: &PropertyId, value: Value) -> Result<()> {
        self.core_mut().set_property(property, value)
    }

    fn validation_context(&self) -> Option<&PropertyId> {
        self.core().validation_context()
    }

    /// The document as JSON-LD, `@context` first
    fn to_jsonld(&self) -> Value {
        self.core().to_jsonld()
    }
}

impl dyn NotifyModel + '_ {
    pub fn downcast_ref<T: NotifyModel + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: NotifyModel + 'static>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Constructors for a concrete model
pub trait ModelType: NotifyModel + Sized + 'static {
    const NAME: &'static str;
    const POLICY: TypePolicy;

    fn from_core(core: ModelCore) -> Self;

    /// An empty model with a fresh id and its default type
    #[must_use]
    fn new() -> Self {
        Self::with_options(ModelOptions::default())
    }

    #[must_use]
    fn with_options(options: ModelOptions) -> Self {
        Self::from_core(ModelCore::blank(options, Self::POLICY))
    }

    /// Build from a raw JSON-LD document
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidDocument` for unusable input, and the
    /// validation failure when `validate_on_construct` is set.
    fn from_value(raw: Value, options: ModelOptions) -> Result<Self> {
        Self::from_store(DocumentStore::from_value(raw)?, options)
    }

    /// Build over an existing store, normalising id and type
    ///
    /// # Errors
    ///
    /// Returns the type normalisation failure, and the validation failure
    /// when `validate_on_construct` is set.
    fn from_store(store: DocumentStore, options: ModelOptions) -> Result<Self> {
        let validate_on_construct = options.validate_on_construct;
        let model = Self::from_core(ModelCore::from_store(store, options, Self::POLICY)?);
        if validate_on_construct {
            if let Err(errors) = model.validate() {
                warn!(
                    model = Self::NAME,
                    id = ?model.id(),
                    "notification failed validation on construction"
                );
                return Err(errors.into());
            }
        }
        Ok(model)
    }

    /// Wrap a store as-is; nothing is synthesized or validated
    #[must_use]
    fn view(store: DocumentStore, options: ModelOptions) -> Self {
        Self::from_core(ModelCore::view(store, options, Self::POLICY))
    }
}

/// Define a model struct wrapping a [`ModelCore`]
///
/// The struct must provide an inherent
/// `fn validate_model(&self) -> Result<(), ValidationError>`.
#[macro_export]
macro_rules! notify_model {
    ($(#[$meta:meta])* $vis:vis struct $model:ident => $policy:expr;) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis struct $model {
            core: $crate::model::ModelCore,
        }

        impl $crate::model::NotifyModel for $model {
            fn core(&self) -> &$crate::model::ModelCore {
                &self.core
            }

            fn core_mut(&mut self) -> &mut $crate::model::ModelCore {
                &mut self.core
            }

            fn model_name(&self) -> &'static str {
                stringify!($model)
            }

            fn validate(&self) -> ::std::result::Result<(), $crate::validation::ValidationError> {
                self.validate_model()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }

        impl $crate::model::ModelType for $model {
            const NAME: &'static str = stringify!($model);
            const POLICY: $crate::model::TypePolicy = $policy;

            fn from_core(core: $crate::model::ModelCore) -> Self {
                Self { core }
            }
        }
    };
}
