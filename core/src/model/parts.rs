//! Parts: the reusable objects a pattern is composed of

use serde_json::Value;

use super::{NotifyModel, PartProfile, PartRequirements, TypePolicy};
use crate::error::Result;
use crate::notify_model;
use crate::validation::ValidationError;
use crate::vocabulary::activity_types::{ACTOR_TYPES, SERVICE};
use crate::vocabulary::{notify_properties, properties};

notify_model! {
    /// A service taking part in a notification exchange, usually `origin` or `target`
    pub struct NotifyService => TypePolicy::part(Some(SERVICE), &[]);
}

impl NotifyService {
    /// The LDN inbox of the service
    #[must_use]
    pub fn inbox(&self) -> Option<String> {
        self.core.get_string(&notify_properties::INBOX)
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the inbox is not an http(s) URL.
    pub fn set_inbox(&mut self, inbox: &str) -> Result<()> {
        self.core
            .set_property(&notify_properties::INBOX, Value::from(inbox))
    }

    fn validate_model(&self) -> std::result::Result<(), ValidationError> {
        let mut ve = self.core.base_errors();
        self.core.optional_value(&mut ve, &notify_properties::INBOX);
        ve.into_result()
    }
}

notify_model! {
    /// The party on whose behalf a notification is sent
    pub struct NotifyActor => TypePolicy::part(Some(SERVICE), ACTOR_TYPES);
}

impl NotifyActor {
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.core.get_string(&notify_properties::NAME)
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the rule table rejects the name.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.core
            .set_property(&notify_properties::NAME, Value::from(name))
    }

    fn validate_model(&self) -> std::result::Result<(), ValidationError> {
        self.core.base_errors().into_result()
    }
}

/// Subject, relationship and object of an `as:Relationship`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Triple {
    pub subject: Option<String>,
    pub relationship: Option<String>,
    pub object: Option<String>,
}

notify_model! {
    /// A resource a notification is about, used for `object` and `context`
    pub struct NotifyObject => TypePolicy::part(None, &[]);
}

impl NotifyObject {
    /// Tighten what `validate()` demands of this object and its item
    #[must_use]
    pub fn with_profile(mut self, profile: PartProfile) -> Self {
        self.core.set_profile(profile);
        self
    }

    #[must_use]
    pub fn cite_as(&self) -> Option<String> {
        self.core.get_string(&notify_properties::CITE_AS)
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the value is not an http(s) URL.
    pub fn set_cite_as(&mut self, cite_as: &str) -> Result<()> {
        self.core
            .set_property(&notify_properties::CITE_AS, Value::from(cite_as))
    }

    /// The item held under `ietf:item`
    #[must_use]
    pub fn item(&self) -> Option<NotifyItem> {
        let item_requirements = self.core.profile().item;
        self.core
            .nested::<NotifyItem>(&notify_properties::ITEM)
            .map(|item| item.with_requirements(item_requirements))
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the rule table rejects the item.
    pub fn set_item(&mut self, item: &NotifyItem) -> Result<()> {
        self.core.set_part(&notify_properties::ITEM, item.core())
    }

    #[must_use]
    pub fn triple(&self) -> Triple {
        Triple {
            subject: self.core.get_string(&properties::SUBJECT_TRIPLE),
            relationship: self.core.get_string(&properties::RELATIONSHIP_TRIPLE),
            object: self.core.get_string(&properties::OBJECT_TRIPLE),
        }
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when any member is not an absolute URI.
    pub fn set_triple(&mut self, subject: &str, relationship: &str, object: &str) -> Result<()> {
        self.core
            .set_property(&properties::SUBJECT_TRIPLE, Value::from(subject))?;
        self.core
            .set_property(&properties::RELATIONSHIP_TRIPLE, Value::from(relationship))?;
        self.core
            .set_property(&properties::OBJECT_TRIPLE, Value::from(object))
    }

    fn validate_model(&self) -> std::result::Result<(), ValidationError> {
        let core = &self.core;
        let requirements = core.profile().requirements;
        let mut ve = ValidationError::new();
        core.required_value(&mut ve, &properties::ID);
        if requirements.contains(PartRequirements::TYPE) {
            core.required_value(&mut ve, &properties::TYPE);
        }
        if requirements.contains(PartRequirements::TRIPLE) {
            core.required_value(&mut ve, &properties::SUBJECT_TRIPLE);
            core.required_value(&mut ve, &properties::RELATIONSHIP_TRIPLE);
            core.required_value(&mut ve, &properties::OBJECT_TRIPLE);
        }
        core.optional_value(&mut ve, &notify_properties::CITE_AS);
        let item = self.item();
        core.optional_part(
            &mut ve,
            &notify_properties::ITEM,
            item.as_ref().map(|item| item as &dyn NotifyModel),
        );
        ve.into_result()
    }
}

notify_model! {
    /// A concrete manifestation of a resource, such as a PDF of a preprint
    pub struct NotifyItem => TypePolicy::part(None, &[]);
}

impl NotifyItem {
    #[must_use]
    pub fn with_requirements(mut self, requirements: PartRequirements) -> Self {
        self.core
            .set_profile(PartProfile::new(requirements, PartRequirements::empty()));
        self
    }

    #[must_use]
    pub fn media_type(&self) -> Option<String> {
        self.core.get_string(&notify_properties::MEDIA_TYPE)
    }

    /// # Errors
    ///
    /// Returns `NotifyError::InvalidProperty` when the rule table rejects the value.
    pub fn set_media_type(&mut self, media_type: &str) -> Result<()> {
        self.core
            .set_property(&notify_properties::MEDIA_TYPE, Value::from(media_type))
    }

    fn validate_model(&self) -> std::result::Result<(), ValidationError> {
        let core = &self.core;
        let requirements = core.profile().requirements;
        let mut ve = ValidationError::new();
        core.required_value(&mut ve, &properties::ID);
        if requirements.contains(PartRequirements::TYPE) {
            core.required_value(&mut ve, &properties::TYPE);
        }
        if requirements.contains(PartRequirements::MEDIA_TYPE) {
            let present = core.get_property(&notify_properties::MEDIA_TYPE).is_some();
            core.required(&mut ve, &notify_properties::MEDIA_TYPE, present);
        }
        ve.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelOptions;
    use crate::error::NotifyError;
    use crate::model::ModelType;
    use serde_json::json;

    #[test]
    fn parts_default_their_type() {
        let service = NotifyService::new();
        assert_eq!(service.types(), vec!["Service".to_string()]);
        assert!(service.id().is_some_and(|id| id.starts_with("urn:uuid:")));

        let object = NotifyObject::new();
        assert!(object.type_value().is_none());
    }

    #[test]
    fn actor_rejects_types_outside_its_list() {
        let mut actor = NotifyActor::new();
        assert!(actor.set_type(&["Person"]).is_ok());
        let err = actor.set_type(&["Document"]).expect_err("Test operation failed");
        assert!(matches!(err, NotifyError::DisallowedType { .. }));
        assert_eq!(
            err.to_string(),
            "Type value Document is not one of the permitted values"
        );
    }

    #[test]
    fn service_inbox_must_be_a_url() {
        let mut service = NotifyService::new();
        assert!(service.set_inbox("https://example.com/inbox/").is_ok());
        assert!(service.set_inbox("urn:uuid:1234").is_err());
        assert_eq!(service.inbox().as_deref(), Some("https://example.com/inbox/"));
    }

    #[test]
    fn stored_inbox_is_checked_on_validate() {
        let service = NotifyService::from_value(
            json!({"id": "https://example.com/", "type": "Service", "inbox": "not a uri"}),
            ModelOptions::default().with_validate_on_construct(false),
        )
        .expect("Test operation failed");

        let errors = service.validate().expect_err("Test operation failed");
        assert!(errors.find("inbox").is_some());
        assert!(errors.find("id").is_none());
    }

    #[test]
    fn stored_cite_as_is_checked_on_validate() {
        let object = NotifyObject::from_value(
            json!({"id": "https://example.com/object", "ietf:cite-as": "urn:uuid:1234"}),
            ModelOptions::default().with_validate_on_construct(false),
        )
        .expect("Test operation failed");

        let errors = object.validate().expect_err("Test operation failed");
        assert_eq!(
            errors.find("ietf:cite-as").map(|node| node.errors.clone()),
            Some(vec!["URL scheme must be http or https, found `urn`".to_string()])
        );
    }

    #[test]
    fn item_requirements_follow_the_profile() {
        let object = NotifyObject::from_value(
            json!({
                "id": "https://example.com/object",
                "ietf:item": {"id": "https://example.com/object/content"}
            }),
            ModelOptions::default(),
        )
        .expect("Test operation failed");
        assert!(object.validate().is_ok());

        let strict = object.with_profile(PartProfile::new(
            PartRequirements::empty(),
            PartRequirements::TYPE | PartRequirements::MEDIA_TYPE,
        ));
        let errors = strict.validate().expect_err("Test operation failed");
        assert!(errors.at(&["ietf:item", "type"]).is_some());
        assert!(errors.at(&["ietf:item", "mediaType"]).is_some());
    }

    #[test]
    fn triple_members_are_absolute_uris() {
        let mut object = NotifyObject::new();
        assert!(object
            .set_triple("https://example.com/a", "http://purl.org/vocab/frbr/core#supplement", "https://example.com/b")
            .is_ok());
        assert_eq!(object.triple().relationship.as_deref(), Some("http://purl.org/vocab/frbr/core#supplement"));
        assert!(object.set_triple("not a uri", "x:y", "x:z").is_err());
    }
}
