//! Model options and crate configuration

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::factory::NotifyFactory;
use crate::validator::Validator;
use crate::vocabulary::PropertyId;

/// How values cross the boundary between a model and its callers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyMode {
    /// Nested parts share storage with the document they were read from
    #[default]
    ByReference,
    /// Every read and write works on an independent copy
    ByValue,
}

/// Construction options for a notification model
#[derive(Debug, Clone)]
pub struct ModelOptions {
    /// Run `validate()` once construction has normalised the document
    pub validate_on_construct: bool,
    /// Validate each value as it is set
    pub validate_properties: bool,
    pub copy_mode: CopyMode,
    /// Rule table; the shared default table when `None`
    pub validators: Option<Arc<Validator>>,
    /// Property under which the model sits in its parent
    pub validation_context: Option<PropertyId>,
    /// Registry used to resolve nested pattern objects
    pub factory: Option<Arc<NotifyFactory>>,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            validate_on_construct: true,
            validate_properties: true,
            copy_mode: CopyMode::ByReference,
            validators: None,
            validation_context: None,
            factory: None,
        }
    }
}

impl ModelOptions {
    #[must_use]
    pub fn with_validate_on_construct(mut self, enabled: bool) -> Self {
        self.validate_on_construct = enabled;
        self
    }

    #[must_use]
    pub fn with_validate_properties(mut self, enabled: bool) -> Self {
        self.validate_properties = enabled;
        self
    }

    #[must_use]
    pub fn with_copy_mode(mut self, copy_mode: CopyMode) -> Self {
        self.copy_mode = copy_mode;
        self
    }

    #[must_use]
    pub fn with_validators(mut self, validators: Arc<Validator>) -> Self {
        self.validators = Some(validators);
        self
    }

    #[must_use]
    pub fn with_validation_context(mut self, context: Option<PropertyId>) -> Self {
        self.validation_context = context;
        self
    }

    #[must_use]
    pub fn with_factory(mut self, factory: Arc<NotifyFactory>) -> Self {
        self.factory = Some(factory);
        self
    }
}

/// Validation behaviour applied to models built from configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub validate_on_construct: bool,
    pub validate_properties: bool,
    pub copy_mode: CopyMode,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            validate_on_construct: true,
            validate_properties: true,
            copy_mode: CopyMode::ByReference,
        }
    }
}

/// Top-level configuration for COAR Notify models
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub validation: ValidationConfig,
}

impl NotifyConfig {
    /// Parse configuration from YAML
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Config` when the YAML does not describe a
    /// configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Model options carrying this configuration
    #[must_use]
    pub fn model_options(&self) -> ModelOptions {
        ModelOptions::default()
            .with_validate_on_construct(self.validation.validate_on_construct)
            .with_validate_properties(self.validation.validate_properties)
            .with_copy_mode(self.validation.copy_mode)
    }
}
