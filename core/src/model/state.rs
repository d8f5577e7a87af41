//! State shared by every model: the document, its options and type policy

use std::sync::Arc;

use serde_json::Value;
use tracing::trace;
use uuid::Uuid;

use super::{ModelKind, ModelType, NotifyModel, PartProfile, TypePolicy};
use crate::config::{CopyMode, ModelOptions};
use crate::document::{DocumentStore, Node};
use crate::error::{NotifyError, Result, RuleViolation};
use crate::validation::ValidationError;
use crate::validator::values::tokens;
use crate::validator::{Validator, ValidatorFn, default_validator};
use crate::vocabulary::{PropertyId, properties};

/// A value handed to the requirement checks
#[derive(Debug)]
pub enum Field<'a> {
    /// A plain value, checked against the rule table
    Value(Value),
    /// A nested model, checked by its own `validate()`
    Model(&'a dyn NotifyModel),
}

/// Document, options and type policy of one model
#[derive(Debug)]
pub struct ModelCore {
    store: DocumentStore,
    options: ModelOptions,
    validators: Arc<Validator>,
    policy: TypePolicy,
    profile: PartProfile,
}

impl ModelCore {
    /// Wrap a store without touching its content
    #[must_use]
    pub fn view(store: DocumentStore, options: ModelOptions, policy: TypePolicy) -> Self {
        let validators = options.validators.clone().unwrap_or_else(default_validator);
        Self {
            store,
            options,
            validators,
            policy,
            profile: PartProfile::NONE,
        }
    }

    /// A fresh document with a synthesized id and the policy's type
    #[must_use]
    pub fn blank(options: ModelOptions, policy: TypePolicy) -> Self {
        let mut core = Self::view(DocumentStore::new(), options, policy);
        core.ensure_id();
        match policy.kind {
            ModelKind::Pattern => {
                let value = type_value(policy.required);
                core.store.set_value(&properties::TYPE, value);
            }
            ModelKind::Part => {
                if let Some(default) = policy.default {
                    core.store.set_value(&properties::TYPE, Value::from(default));
                }
            }
        }
        core
    }

    /// Adopt a loaded document, filling in a missing id and type
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the normalised type is
    /// rejected by the rule table.
    pub fn from_store(store: DocumentStore, options: ModelOptions, policy: TypePolicy) -> Result<Self> {
        let mut core = Self::view(store, options, policy);
        core.ensure_id();
        match policy.kind {
            ModelKind::Pattern => core.ensure_type_contains(policy.required)?,
            ModelKind::Part => {
                if let (Some(default), None) = (policy.default, core.get_property(&properties::TYPE)) {
                    core.store.set_value(&properties::TYPE, Value::from(default));
                }
            }
        }
        Ok(core)
    }

    fn ensure_id(&mut self) {
        if self.get_property(&properties::ID).is_none() {
            let id = format!("urn:uuid:{}", Uuid::new_v4().simple());
            self.store.set_value(&properties::ID, Value::String(id));
        }
    }

    #[must_use]
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DocumentStore {
        &mut self.store
    }

    #[must_use]
    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    #[must_use]
    pub fn validators(&self) -> &Validator {
        &self.validators
    }

    #[must_use]
    pub fn validation_context(&self) -> Option<&PropertyId> {
        self.options.validation_context.as_ref()
    }

    #[must_use]
    pub fn policy(&self) -> &TypePolicy {
        &self.policy
    }

    #[must_use]
    pub fn profile(&self) -> PartProfile {
        self.profile
    }

    pub fn set_profile(&mut self, profile: PartProfile) {
        self.profile = profile;
    }

    /// A JSON copy of a property; explicit nulls read as absent
    #[must_use]
    pub fn get_property(&self, property: &PropertyId) -> Option<Value> {
        self.store
            .get_value(property)
            .filter(|value| !value.is_null())
    }

    #[must_use]
    pub fn get_string(&self, property: &PropertyId) -> Option<String> {
        match self.get_property(property)? {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    /// The stored node, linked to the document or copied
    ///
    /// `mode` overrides the model's copy mode for this read.
    #[must_use]
    pub fn get_node(&self, property: &PropertyId, mode: Option<CopyMode>) -> Option<Node> {
        let node = self.store.get(property).filter(|node| !node.is_null())?;
        match mode.unwrap_or(self.options.copy_mode) {
            CopyMode::ByReference => Some(node),
            CopyMode::ByValue => Some(node.deep_clone()),
        }
    }

    /// Validate and store a value
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the value is rejected.
    pub fn set_property(&mut self, property: &PropertyId, value: Value) -> Result<()> {
        self.set_node(property, Node::from_value(value), None)
    }

    /// Validate and store a node, linked or copied per `mode`
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the value is rejected.
    pub fn set_node(&mut self, property: &PropertyId, node: Node, mode: Option<CopyMode>) -> Result<()> {
        if !node.is_null() && self.options.validate_properties {
            if let Some(rule) = self.rule_for(property) {
                rule(&self.policy, &node.to_value())
                    .map_err(|violation| NotifyError::invalid_property(property.name(), violation))?;
            }
        }
        let node = match mode.unwrap_or(self.options.copy_mode) {
            CopyMode::ByReference => node,
            CopyMode::ByValue => node.deep_clone(),
        };
        trace!(property = %property, "setting property");
        self.store.set(property, node);
        Ok(())
    }

    /// Store another model's document under `property`
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the part is rejected.
    pub fn set_part(&mut self, property: &PropertyId, part: &Self) -> Result<()> {
        let node = Node::Object(part.store.shared_fields());
        self.set_node(property, node, None)
    }

    /// Store for the object held under `property`
    #[must_use]
    pub fn nested_store(&self, property: &PropertyId) -> Option<DocumentStore> {
        let node = self.store.get(property)?;
        let view = DocumentStore::from_shared(Arc::clone(node.as_object()?));
        match self.options.copy_mode {
            CopyMode::ByReference => Some(view),
            CopyMode::ByValue => Some(view.deep_copy()),
        }
    }

    /// Options for a part read from this model
    #[must_use]
    pub fn nested_options(&self, context: Option<PropertyId>) -> ModelOptions {
        self.options
            .clone()
            .with_validate_on_construct(false)
            .with_validators(Arc::clone(&self.validators))
            .with_validation_context(context)
    }

    /// The part held under `property`, validated in that context
    #[must_use]
    pub fn nested<T: ModelType>(&self, property: &PropertyId) -> Option<T> {
        let store = self.nested_store(property)?;
        Some(T::view(store, self.nested_options(Some(property.clone()))))
    }

    fn rule_for(&self, property: &PropertyId) -> Option<&ValidatorFn> {
        self.validators
            .resolve(property, self.options.validation_context.as_ref())
    }

    /// Run the rule for `property` against `value`
    ///
    /// Nothing is checked for null values, or when property validation is
    /// off and `force` is not set.
    ///
    /// # Errors
    ///
    /// Returns the violation raised by the rule.
    pub fn validate_property(
        &self,
        property: &PropertyId,
        value: &Value,
        force: bool,
    ) -> std::result::Result<(), RuleViolation> {
        if value.is_null() || !(self.options.validate_properties || force) {
            return Ok(());
        }
        match self.rule_for(property) {
            Some(rule) => rule(&self.policy, value),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn types(&self) -> Vec<String> {
        self.get_property(&properties::TYPE)
            .map(|value| tokens(&value).into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Replace the type after checking a part's permitted list
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::DisallowedType` or `NotifyError::InvalidProperty`.
    pub fn set_type(&mut self, types: &[&str]) -> Result<()> {
        if self.policy.kind == ModelKind::Part && !self.policy.allowed.is_empty() {
            if let Some(token) = types.iter().find(|t| !self.policy.allowed.contains(t)) {
                return Err(NotifyError::disallowed_type(*token, self.policy.allowed));
            }
        }
        self.set_property(&properties::TYPE, type_value(types))
    }

    /// Add any of `required` missing from the type
    ///
    /// Existing entries are kept as they are, non-string ones included.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the merged type is rejected.
    pub fn ensure_type_contains(&mut self, required: &[&str]) -> Result<()> {
        let stored = self.get_property(&properties::TYPE);
        let present = stored.is_some();
        let mut entries = match stored {
            None => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(single) => vec![single],
        };
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|token| !entries.iter().any(|entry| entry.as_str() == Some(*token)))
            .collect();
        if present && missing.is_empty() {
            return Ok(());
        }
        entries.extend(missing.into_iter().map(Value::from));
        let merged = match <[Value; 1]>::try_from(entries) {
            Ok([single]) => single,
            Err(many) => Value::Array(many),
        };
        self.set_property(&properties::TYPE, merged)
    }

    /// Record a required-field error when `present` is false
    pub fn required(&self, ve: &mut ValidationError, property: &PropertyId, present: bool) {
        if !present {
            ve.add_error(property, RuleViolation::required(property.name()).to_string());
        }
    }

    /// Record an error for an absent field, otherwise validate it
    pub fn required_and_validate(&self, ve: &mut ValidationError, property: &PropertyId, field: Option<Field<'_>>) {
        match field {
            Some(field) => self.check_field(ve, property, field),
            None => ve.add_error(property, RuleViolation::required(property.name()).to_string()),
        }
    }

    /// Validate a field when present
    pub fn optional_and_validate(&self, ve: &mut ValidationError, property: &PropertyId, field: Option<Field<'_>>) {
        if let Some(field) = field {
            self.check_field(ve, property, field);
        }
    }

    /// [`Self::required_and_validate`] over the stored value
    pub fn required_value(&self, ve: &mut ValidationError, property: &PropertyId) {
        let value = self.get_property(property).map(Field::Value);
        self.required_and_validate(ve, property, value);
    }

    /// [`Self::optional_and_validate`] over the stored value
    pub fn optional_value(&self, ve: &mut ValidationError, property: &PropertyId) {
        let value = self.get_property(property).map(Field::Value);
        self.optional_and_validate(ve, property, value);
    }

    /// Require a part; a stored non-object is reported as such
    pub fn required_part(&self, ve: &mut ValidationError, property: &PropertyId, part: Option<&dyn NotifyModel>) {
        match part {
            Some(part) => self.check_field(ve, property, Field::Model(part)),
            None if self.get_property(property).is_some() => {
                ve.add_error(property, RuleViolation::NotAnObject(property.name().to_string()).to_string());
            }
            None => ve.add_error(property, RuleViolation::required(property.name()).to_string()),
        }
    }

    /// Validate a part when present
    pub fn optional_part(&self, ve: &mut ValidationError, property: &PropertyId, part: Option<&dyn NotifyModel>) {
        match part {
            Some(part) => self.check_field(ve, property, Field::Model(part)),
            None if self.get_property(property).is_some() => {
                ve.add_error(property, RuleViolation::NotAnObject(property.name().to_string()).to_string());
            }
            None => {}
        }
    }

    fn check_field(&self, ve: &mut ValidationError, property: &PropertyId, field: Field<'_>) {
        match field {
            Field::Value(value) => self.register_property_validation_error(ve, property, &value),
            Field::Model(model) => {
                if let Err(nested) = model.validate() {
                    ve.add_nested_errors(property, nested);
                }
            }
        }
    }

    /// Force-validate a value and record any violation
    pub fn register_property_validation_error(&self, ve: &mut ValidationError, property: &PropertyId, value: &Value) {
        if let Err(violation) = self.validate_property(property, value, true) {
            ve.add_error(property, violation.to_string());
        }
    }

    /// `id` and `type` are present and valid
    #[must_use]
    pub fn base_errors(&self) -> ValidationError {
        let mut ve = ValidationError::new();
        self.required_value(&mut ve, &properties::ID);
        self.required_value(&mut ve, &properties::TYPE);
        ve
    }

    #[must_use]
    pub fn to_jsonld(&self) -> Value {
        self.store.to_document()
    }
}

fn type_value(types: &[&str]) -> Value {
    match types {
        [single] => Value::from(*single),
        many => Value::Array(many.iter().map(|t| Value::from(*t)).collect()),
    }
}
