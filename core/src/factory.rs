//! Type-driven pattern dispatch
//!
//! The factory keeps an ordered registry of pattern classes and picks the one
//! whose required type tokens best fit a document's `type`.

use std::any::TypeId;
use std::fmt;
use std::sync::{Arc, LazyLock};

use serde_json::Value;
use tracing::debug;

use crate::config::ModelOptions;
use crate::document::DocumentStore;
use crate::error::{NotifyError, Result};
use crate::model::{ModelType, NotifyModel};
use crate::patterns::{
    Accept, AnnounceEndorsement, AnnounceRelationship, AnnounceReview, AnnounceServiceResult,
    Reject, RequestEndorsement, RequestReview, TentativelyAccept, TentativelyReject, UndoOffer,
    UnprocessableNotification,
};
use crate::validator::values::tokens;
use crate::vocabulary::properties;

type BuildFn = fn(DocumentStore, ModelOptions) -> Result<Box<dyn NotifyModel>>;

fn build_model<T: ModelType>(store: DocumentStore, options: ModelOptions) -> Result<Box<dyn NotifyModel>> {
    Ok(Box::new(T::from_store(store, options)?))
}

/// A registered pattern: its name, required types and constructor
#[derive(Clone)]
pub struct PatternClass {
    name: &'static str,
    type_id: TypeId,
    types: &'static [&'static str],
    build: BuildFn,
}

impl fmt::Debug for PatternClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternClass")
            .field("name", &self.name)
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}

impl PatternClass {
    /// The class for model `T`
    #[must_use]
    pub fn of<T: ModelType>() -> Self {
        Self {
            name: T::NAME,
            type_id: TypeId::of::<T>(),
            types: T::POLICY.required,
            build: build_model::<T>,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type tokens the class requires
    #[must_use]
    pub fn types(&self) -> &'static [&'static str] {
        self.types
    }

    #[must_use]
    pub fn is<T: ModelType>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Construct the class over a store
    ///
    /// # Errors
    ///
    /// Returns the construction failure of the model.
    pub fn build(&self, store: DocumentStore, options: ModelOptions) -> Result<Box<dyn NotifyModel>> {
        (self.build)(store, options)
    }
}

/// Ordered registry of pattern classes
#[derive(Debug, Clone)]
pub struct NotifyFactory {
    classes: Vec<PatternClass>,
}

impl Default for NotifyFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyFactory {
    /// A factory holding the full pattern catalogue
    #[must_use]
    pub fn new() -> Self {
        Self {
            classes: vec![
                PatternClass::of::<Accept>(),
                PatternClass::of::<AnnounceEndorsement>(),
                PatternClass::of::<AnnounceRelationship>(),
                PatternClass::of::<AnnounceReview>(),
                PatternClass::of::<AnnounceServiceResult>(),
                PatternClass::of::<Reject>(),
                PatternClass::of::<RequestEndorsement>(),
                PatternClass::of::<RequestReview>(),
                PatternClass::of::<TentativelyAccept>(),
                PatternClass::of::<TentativelyReject>(),
                PatternClass::of::<UnprocessableNotification>(),
                PatternClass::of::<UndoOffer>(),
            ],
        }
    }

    /// A factory with nothing registered
    #[must_use]
    pub fn empty() -> Self {
        Self { classes: Vec::new() }
    }

    /// Registered classes in scan order
    #[must_use]
    pub fn classes(&self) -> &[PatternClass] {
        &self.classes
    }

    /// The class best fitting a set of type tokens
    ///
    /// A class is a candidate when all its required types are present. An
    /// exact fit wins outright; otherwise the candidate with the fewest
    /// unmatched tokens wins, the earlier one on ties.
    #[must_use]
    pub fn get_by_types<S: AsRef<str>>(&self, types: &[S]) -> Option<&PatternClass> {
        let mut best: Option<(&PatternClass, usize)> = None;
        for class in &self.classes {
            let is_candidate = class
                .types
                .iter()
                .all(|required| types.iter().any(|t| t.as_ref() == *required));
            if !is_candidate {
                continue;
            }
            let fit = types.len().abs_diff(class.types.len());
            if fit == 0 {
                return Some(class);
            }
            if best.is_none_or(|(_, best_fit)| fit < best_fit) {
                best = Some((class, fit));
            }
        }
        best.map(|(class, _)| class)
    }

    /// Build the most specific pattern for a raw document
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::NoTypeFound` when the document has no `type`,
    /// `NotifyError::NoModelFound` when no class fits, and any construction
    /// failure of the chosen class.
    pub fn get_by_object(&self, raw: Value, options: ModelOptions) -> Result<Box<dyn NotifyModel>> {
        self.get_by_store(DocumentStore::from_value(raw)?, options)
    }

    /// [`Self::get_by_object`] over an already loaded store
    ///
    /// # Errors
    ///
    /// As [`Self::get_by_object`].
    pub fn get_by_store(&self, store: DocumentStore, options: ModelOptions) -> Result<Box<dyn NotifyModel>> {
        let types: Vec<String> = match store.get_value(&properties::TYPE) {
            None | Some(Value::Null) => return Err(NotifyError::NoTypeFound),
            Some(value) => tokens(&value).into_iter().map(str::to_string).collect(),
        };

        let class = self
            .get_by_types(&types)
            .ok_or_else(|| NotifyError::no_model_found(&types))?;
        debug!(model = class.name, types = ?types, "dispatching notification");
        class.build(store, options)
    }

    /// Add a class, replacing the one its types currently resolve to
    pub fn register(&mut self, class: PatternClass) {
        if let Some(position) = self
            .get_by_types(class.types)
            .and_then(|existing| self.classes.iter().position(|c| std::ptr::eq(c, existing)))
        {
            let replaced = self.classes.remove(position);
            debug!(replaced = replaced.name, model = class.name, "replacing registered pattern");
        } else {
            debug!(model = class.name, "registering pattern");
        }
        self.classes.push(class);
    }
}

static DEFAULT_FACTORY: LazyLock<Arc<NotifyFactory>> = LazyLock::new(|| Arc::new(NotifyFactory::new()));

/// Shared factory holding the full catalogue
#[must_use]
pub fn default_factory() -> Arc<NotifyFactory> {
    Arc::clone(&DEFAULT_FACTORY)
}
