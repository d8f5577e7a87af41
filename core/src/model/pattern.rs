//! The pattern surface shared by every notification

use serde_json::Value;

use super::{NotifyActor, NotifyModel, NotifyObject, NotifyService, PartProfile, TypePolicy};
use crate::error::Result;
use crate::notify_model;
use crate::validation::ValidationError;
use crate::vocabulary::activity_types::OBJECT;
use crate::vocabulary::properties;

/// Accessors and validation common to all notification patterns
///
/// Concrete patterns tighten validation through the profile hooks and by
/// adding checks on top of [`Pattern::pattern_errors`].
pub trait Pattern: NotifyModel {
    /// What `validate()` demands of the `object` part
    fn object_profile(&self) -> PartProfile {
        PartProfile::NONE
    }

    /// What `validate()` demands of the `context` part
    fn context_profile(&self) -> PartProfile {
        PartProfile::NONE
    }

    /// The model the `object` is validated as
    fn resolve_object(&self) -> Option<Box<dyn NotifyModel>> {
        self.object()
            .map(|object| Box::new(object) as Box<dyn NotifyModel>)
    }

    fn origin(&self) -> Option<NotifyService> {
        self.core().nested(&properties::ORIGIN)
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the rule table rejects the part.
    fn set_origin(&mut self, origin: &NotifyService) -> Result<()> {
        self.core_mut().set_part(&properties::ORIGIN, origin.core())
    }

    fn target(&self) -> Option<NotifyService> {
        self.core().nested(&properties::TARGET)
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the rule table rejects the part.
    fn set_target(&mut self, target: &NotifyService) -> Result<()> {
        self.core_mut().set_part(&properties::TARGET, target.core())
    }

    fn object(&self) -> Option<NotifyObject> {
        let profile = self.object_profile();
        self.core()
            .nested::<NotifyObject>(&properties::OBJECT)
            .map(|object| object.with_profile(profile))
    }

    /// Set the `object`; any model may be nested, including another pattern
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the rule table rejects the part.
    fn set_object(&mut self, object: &dyn NotifyModel) -> Result<()> {
        self.core_mut().set_part(&properties::OBJECT, object.core())
    }

    fn actor(&self) -> Option<NotifyActor> {
        self.core().nested(&properties::ACTOR)
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the rule table rejects the part.
    fn set_actor(&mut self, actor: &NotifyActor) -> Result<()> {
        self.core_mut().set_part(&properties::ACTOR, actor.core())
    }

    fn context(&self) -> Option<NotifyObject> {
        let profile = self.context_profile();
        self.core()
            .nested::<NotifyObject>(&properties::CONTEXT)
            .map(|context| context.with_profile(profile))
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the rule table rejects the part.
    fn set_context(&mut self, context: &NotifyObject) -> Result<()> {
        self.core_mut().set_part(&properties::CONTEXT, context.core())
    }

    fn in_reply_to(&self) -> Option<String> {
        self.core().get_string(&properties::IN_REPLY_TO)
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the value is not an absolute URI.
    fn set_in_reply_to(&mut self, in_reply_to: &str) -> Result<()> {
        self.core_mut()
            .set_property(&properties::IN_REPLY_TO, Value::from(in_reply_to))
    }

    /// Failures of the checks every pattern shares
    ///
    /// `id` and `type` must be valid; `origin`, `target` and `object` are
    /// required; `actor`, `inReplyTo` and `context` are checked when present.
    fn pattern_errors(&self) -> ValidationError {
        let core = self.core();
        let mut ve = core.base_errors();

        let origin = self.origin();
        core.required_part(&mut ve, &properties::ORIGIN, origin.as_ref().map(|p| p as &dyn NotifyModel));

        let target = self.target();
        core.required_part(&mut ve, &properties::TARGET, target.as_ref().map(|p| p as &dyn NotifyModel));

        let object = self.resolve_object();
        core.required_part(&mut ve, &properties::OBJECT, object.as_deref());

        let actor = self.actor();
        core.optional_part(&mut ve, &properties::ACTOR, actor.as_ref().map(|p| p as &dyn NotifyModel));

        core.optional_value(&mut ve, &properties::IN_REPLY_TO);

        let context = self.context();
        core.optional_part(&mut ve, &properties::CONTEXT, context.as_ref().map(|p| p as &dyn NotifyModel));

        ve
    }
}

notify_model! {
    /// A notification of no more specific pattern
    pub struct NotifyPattern => TypePolicy::pattern(&[OBJECT]);
}

impl NotifyPattern {
    fn validate_model(&self) -> std::result::Result<(), ValidationError> {
        self.pattern_errors().into_result()
    }
}

impl Pattern for NotifyPattern {}
