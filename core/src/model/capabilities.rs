//! Capabilities shared by several patterns

use serde_json::Value;
use tracing::debug;

use super::{ModelType, NotifyModel, NotifyObject, Pattern};
use crate::error::{Result, RuleViolation};
use crate::factory::default_factory;
use crate::validation::ValidationError;
use crate::vocabulary::properties;

/// A pattern carrying a human-readable `summary`
pub trait Summary: NotifyModel {
    fn summary(&self) -> Option<String> {
        self.core().get_string(&properties::SUMMARY)
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the rule table rejects the value.
    fn set_summary(&mut self, summary: &str) -> Result<()> {
        self.core_mut()
            .set_property(&properties::SUMMARY, Value::from(summary))
    }
}

/// A pattern whose `object` is itself a notification, e.g. the offer an
/// `Accept` responds to
pub trait NestedPatternObject: Pattern {
    /// The `object` as its most specific model
    ///
    /// The object is dispatched through the factory; when no pattern matches
    /// it is read as a plain [`NotifyObject`].
    fn nested_object(&self) -> Option<Box<dyn NotifyModel>> {
        let core = self.core();
        let raw = core.get_property(&properties::OBJECT)?;
        if !raw.is_object() {
            return None;
        }

        let factory = core.options().factory.clone().unwrap_or_else(default_factory);
        match factory.get_by_object(raw, core.nested_options(None)) {
            Ok(model) => Some(model),
            Err(err) => {
                debug!(error = %err, "nested object is not a known pattern");
                let store = core.nested_store(&properties::OBJECT)?;
                let options = core.nested_options(Some(properties::OBJECT));
                Some(Box::new(NotifyObject::view(store, options)))
            }
        }
    }

    /// Record errors unless `inReplyTo` is present and names the nested object
    fn in_reply_to_errors(&self, ve: &mut ValidationError) {
        let Some(in_reply_to) = self.in_reply_to() else {
            ve.add_error(
                &properties::IN_REPLY_TO,
                RuleViolation::required(properties::IN_REPLY_TO.name()).to_string(),
            );
            return;
        };

        let object_id = self.nested_object().and_then(|object| object.id());
        if object_id.as_deref() != Some(in_reply_to.as_str()) {
            let violation = RuleViolation::InReplyToMismatch {
                in_reply_to,
                object_id: object_id.unwrap_or_default(),
            };
            ve.add_error(&properties::IN_REPLY_TO, violation.to_string());
        }
    }
}
