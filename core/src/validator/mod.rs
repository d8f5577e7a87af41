//! Rule table and value validators
//!
//! A [`Validator`] maps each property to an optional default rule and to
//! per-context overrides. The context is the property under which the model
//! being validated sits in its parent, so the same `id` can be an absolute URI
//! at the top level and an http(s) URL inside `origin`.

pub mod uri;
pub mod values;

use std::fmt;
use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

use crate::error::RuleViolation;
use crate::vocabulary::activity_types::{ACTIVITY_STREAMS_OBJECTS, ACTOR_TYPES};
use crate::vocabulary::{PropertyId, notify_properties, properties};

/// Type constraints of the model a rule is evaluated for
pub trait TypeConstraints {
    /// Exact values a `type` may take; empty when unconstrained
    fn allowed_types(&self) -> &[&'static str] {
        &[]
    }

    /// Values a `type` must contain; empty when unconstrained
    fn required_types(&self) -> &[&'static str] {
        &[]
    }
}

impl TypeConstraints for () {}

/// A rule: accepts or rejects a value on behalf of a model
pub type ValidatorFn =
    Arc<dyn Fn(&dyn TypeConstraints, &Value) -> Result<(), RuleViolation> + Send + Sync>;

/// Rule used when a property is validated inside a particular context
#[derive(Clone, Default)]
pub struct ContextRule {
    pub default: Option<ValidatorFn>,
}

/// Rules attached to one property
#[derive(Clone, Default)]
pub struct PropertyRules {
    pub default: Option<ValidatorFn>,
    pub context: IndexMap<PropertyId, ContextRule>,
}

impl PropertyRules {
    /// Rules with only a default
    #[must_use]
    pub fn with_default(rule: ValidatorFn) -> Self {
        Self {
            default: Some(rule),
            context: IndexMap::new(),
        }
    }

    /// Add a context override
    #[must_use]
    pub fn with_context(mut self, context: PropertyId, rule: ValidatorFn) -> Self {
        self.context.insert(context, ContextRule { default: Some(rule) });
        self
    }
}

/// Property rule table
#[derive(Clone, Default)]
pub struct Validator {
    rules: IndexMap<PropertyId, PropertyRules>,
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("properties", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Validator {
    /// A validator with no rules
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A validator over the given table
    #[must_use]
    pub fn new(rules: IndexMap<PropertyId, PropertyRules>) -> Self {
        Self { rules }
    }

    /// The rule table used by notification models unless told otherwise
    #[must_use]
    pub fn notify_rules() -> Self {
        let url_contexts = [
            properties::CONTEXT,
            properties::ORIGIN,
            properties::TARGET,
            notify_properties::ITEM,
        ];
        let id = url_contexts.into_iter().fold(
            PropertyRules::with_default(rules::absolute_uri()),
            |id, context| id.with_context(context, rules::url()),
        );

        let objects = rules::at_least_one_of(ACTIVITY_STREAMS_OBJECTS);
        let type_rules = PropertyRules::with_default(rules::type_checker())
            .with_context(properties::ACTOR, rules::one_of(ACTOR_TYPES))
            .with_context(properties::OBJECT, Arc::clone(&objects))
            .with_context(properties::CONTEXT, Arc::clone(&objects))
            .with_context(notify_properties::ITEM, objects);

        let mut table = IndexMap::new();
        table.insert(properties::ID, id);
        table.insert(properties::TYPE, type_rules);
        table.insert(
            notify_properties::CITE_AS,
            PropertyRules::with_default(rules::url()),
        );
        table.insert(
            notify_properties::INBOX,
            PropertyRules::with_default(rules::url()),
        );
        for property in [
            properties::IN_REPLY_TO,
            properties::SUBJECT_TRIPLE,
            properties::OBJECT_TRIPLE,
            properties::RELATIONSHIP_TRIPLE,
        ] {
            table.insert(property, PropertyRules::with_default(rules::absolute_uri()));
        }
        Self::new(table)
    }

    /// Rule for a property, preferring a context override
    #[must_use]
    pub fn resolve(&self, property: &PropertyId, context: Option<&PropertyId>) -> Option<&ValidatorFn> {
        let rules = self.rules.get(property)?;
        let contextual = context
            .and_then(|ctx| rules.context.get(ctx))
            .and_then(|rule| rule.default.as_ref());
        trace!(
            property = %property,
            context = ?context.map(PropertyId::name),
            contextual = contextual.is_some(),
            "resolving rule"
        );
        contextual.or(rules.default.as_ref())
    }

    /// Deep-merge another table into this one; incoming rules win
    pub fn merge(&mut self, rules: IndexMap<PropertyId, PropertyRules>) {
        for (property, incoming) in rules {
            let existing = self.rules.entry(property).or_default();
            if incoming.default.is_some() {
                existing.default = incoming.default;
            }
            for (context, rule) in incoming.context {
                let slot = existing.context.entry(context).or_default();
                if rule.default.is_some() {
                    slot.default = rule.default;
                }
            }
        }
    }

    /// The full rule table
    #[must_use]
    pub fn rules(&self) -> &IndexMap<PropertyId, PropertyRules> {
        &self.rules
    }
}

static DEFAULT_VALIDATOR: LazyLock<Arc<Validator>> =
    LazyLock::new(|| Arc::new(Validator::notify_rules()));

/// Shared instance of [`Validator::notify_rules`]
#[must_use]
pub fn default_validator() -> Arc<Validator> {
    Arc::clone(&DEFAULT_VALIDATOR)
}

/// Rule constructors wrapping the validators in [`uri`] and [`values`]
pub mod rules {
    use std::sync::Arc;

    use serde_json::Value;

    use super::{TypeConstraints, ValidatorFn, uri, values};
    use crate::error::RuleViolation;

    fn as_str(value: &Value) -> Result<&str, RuleViolation> {
        value
            .as_str()
            .ok_or_else(|| RuleViolation::NotAString(value.to_string()))
    }

    /// Wrap a closure as a rule
    pub fn from_fn<F>(rule: F) -> ValidatorFn
    where
        F: Fn(&dyn TypeConstraints, &Value) -> Result<(), RuleViolation> + Send + Sync + 'static,
    {
        Arc::new(rule)
    }

    #[must_use]
    pub fn absolute_uri() -> ValidatorFn {
        from_fn(|_, value| uri::absolute_uri(as_str(value)?))
    }

    #[must_use]
    pub fn url() -> ValidatorFn {
        from_fn(|_, value| uri::url(as_str(value)?))
    }

    #[must_use]
    pub fn one_of(allowed: &'static [&'static str]) -> ValidatorFn {
        from_fn(move |_, value| values::one_of(allowed, value))
    }

    #[must_use]
    pub fn at_least_one_of(allowed: &'static [&'static str]) -> ValidatorFn {
        from_fn(move |_, value| values::at_least_one_of(allowed, value))
    }

    #[must_use]
    pub fn contains(required: &'static [&'static str]) -> ValidatorFn {
        from_fn(move |_, value| values::contains(required, value))
    }

    #[must_use]
    pub fn type_checker() -> ValidatorFn {
        from_fn(values::type_checker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(validator: &Validator, property: &PropertyId, context: Option<&PropertyId>, value: Value) -> bool {
        validator
            .resolve(property, context)
            .is_some_and(|rule| rule(&(), &value).is_ok())
    }

    #[test]
    fn context_overrides_the_default() {
        let validator = Validator::notify_rules();
        let id = json!("urn:uuid:4fb3af44-d4f8-4226-9475-2d09c2d8d9e0");

        assert!(check(&validator, &properties::ID, None, id.clone()));
        assert!(check(&validator, &properties::ID, Some(&properties::ACTOR), id.clone()));
        assert!(!check(&validator, &properties::ID, Some(&properties::ORIGIN), id.clone()));
        assert!(!check(&validator, &properties::ID, Some(&notify_properties::ITEM), id));
    }

    #[test]
    fn unknown_properties_have_no_rule() {
        let validator = Validator::notify_rules();
        assert!(validator.resolve(&properties::SUMMARY, None).is_none());
        assert!(validator.resolve(&"anything".into(), Some(&properties::OBJECT)).is_none());
    }

    #[test]
    fn actor_type_must_be_a_single_agent_type() {
        let validator = Validator::notify_rules();
        assert!(check(&validator, &properties::TYPE, Some(&properties::ACTOR), json!("Person")));
        assert!(!check(&validator, &properties::TYPE, Some(&properties::ACTOR), json!("Document")));
        assert!(check(&validator, &properties::TYPE, Some(&properties::OBJECT), json!(["sorg:AboutPage", "Page"])));
    }

    #[test]
    fn merge_overrides_only_what_it_names() {
        let mut validator = Validator::notify_rules();
        let mut extra = IndexMap::new();
        extra.insert(
            properties::ID,
            PropertyRules::default().with_context(properties::ORIGIN, rules::absolute_uri()),
        );
        validator.merge(extra);

        let urn = json!("urn:uuid:1");
        assert!(check(&validator, &properties::ID, Some(&properties::ORIGIN), urn.clone()));
        assert!(!check(&validator, &properties::ID, Some(&properties::TARGET), urn));
        assert!(!check(&validator, &properties::ID, None, json!("relative")));
    }

    #[test]
    fn non_string_uris_are_rejected() {
        let validator = Validator::notify_rules();
        let rule = validator
            .resolve(&properties::ID, None)
            .expect("Test operation failed");
        assert_eq!(rule(&(), &json!(12)), Err(RuleViolation::NotAString("12".into())));
    }
}
