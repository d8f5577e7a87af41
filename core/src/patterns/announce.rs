//! Announcements of a service result to a repository

use crate::model::{PartProfile, PartRequirements, Pattern, TypePolicy};
use crate::notify_model;
use crate::validation::ValidationError;
use crate::vocabulary::activity_types::ANNOUNCE;
use crate::vocabulary::notify_types::{ENDORSEMENT_ACTION, RELATIONSHIP_ACTION, REVIEW_ACTION};
use crate::vocabulary::properties;

const TYPED: PartRequirements = PartRequirements::TYPE;
const TYPED_MEDIA: PartRequirements = PartRequirements::TYPE.union(PartRequirements::MEDIA_TYPE);

/// Shared validation: the pattern checks plus a required `context`
fn announce_errors(pattern: &impl Pattern) -> ValidationError {
    let mut ve = pattern.pattern_errors();
    let present = pattern.get_property(&properties::CONTEXT).is_some();
    pattern.core().required(&mut ve, &properties::CONTEXT, present);
    ve
}

notify_model! {
    /// Announcement that a resource has been endorsed
    pub struct AnnounceEndorsement => TypePolicy::pattern(&[ANNOUNCE, ENDORSEMENT_ACTION]);
}

impl AnnounceEndorsement {
    fn validate_model(&self) -> std::result::Result<(), ValidationError> {
        announce_errors(self).into_result()
    }
}

impl Pattern for AnnounceEndorsement {
    fn context_profile(&self) -> PartProfile {
        PartProfile::new(PartRequirements::empty(), TYPED_MEDIA)
    }
}

notify_model! {
    /// Announcement of a relationship between two resources
    pub struct AnnounceRelationship => TypePolicy::pattern(&[ANNOUNCE, RELATIONSHIP_ACTION]);
}

impl AnnounceRelationship {
    fn validate_model(&self) -> std::result::Result<(), ValidationError> {
        announce_errors(self).into_result()
    }
}

impl Pattern for AnnounceRelationship {
    fn object_profile(&self) -> PartProfile {
        PartProfile::new(TYPED.union(PartRequirements::TRIPLE), PartRequirements::empty())
    }
}

notify_model! {
    /// Announcement that a review of a resource is available
    pub struct AnnounceReview => TypePolicy::pattern(&[ANNOUNCE, REVIEW_ACTION]);
}

impl AnnounceReview {
    fn validate_model(&self) -> std::result::Result<(), ValidationError> {
        announce_errors(self).into_result()
    }
}

impl Pattern for AnnounceReview {
    fn object_profile(&self) -> PartProfile {
        PartProfile::new(TYPED, PartRequirements::empty())
    }

    fn context_profile(&self) -> PartProfile {
        PartProfile::new(PartRequirements::empty(), TYPED_MEDIA)
    }
}

notify_model! {
    /// Announcement of the outcome of a service, such as an ingest
    pub struct AnnounceServiceResult => TypePolicy::pattern(&[ANNOUNCE]);
}

impl AnnounceServiceResult {
    fn validate_model(&self) -> std::result::Result<(), ValidationError> {
        announce_errors(self).into_result()
    }
}

impl Pattern for AnnounceServiceResult {
    fn object_profile(&self) -> PartProfile {
        PartProfile::new(TYPED, PartRequirements::empty())
    }

    fn context_profile(&self) -> PartProfile {
        PartProfile::new(PartRequirements::empty(), TYPED_MEDIA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelOptions;
    use crate::model::{ModelType, NotifyModel};
    use serde_json::json;

    fn review(object_type: Option<&str>, with_context: bool) -> AnnounceReview {
        let mut document = json!({
            "@context": ["https://www.w3.org/ns/activitystreams", "https://coar-notify.net"],
            "id": "urn:uuid:94ecae35-dcfd-4182-8550-22c7164fe23f",
            "object": {
                "id": "https://review-service.com/review/geo/202103/0021",
                "ietf:cite-as": "https://doi.org/10.3214/987654"
            },
            "origin": {
                "id": "https://review-service.com/system",
                "inbox": "https://review-service.com/inbox/",
                "type": "Service"
            },
            "target": {
                "id": "https://generic-service.com/system",
                "inbox": "https://generic-service.com/inbox/",
                "type": "Service"
            },
            "type": ["Announce", "coar-notify:ReviewAction"]
        });
        if let Some(object_type) = object_type {
            document["object"]["type"] = json!(object_type);
        }
        if with_context {
            document["context"] = json!({"id": "https://research-organisation.org/repository/preprint/201203/421/"});
        }
        AnnounceReview::from_value(document, ModelOptions::default().with_validate_on_construct(false))
            .expect("Test operation failed")
    }

    #[test]
    fn complete_review_announcement_is_valid() {
        assert!(review(Some("Document"), true).validate().is_ok());
    }

    #[test]
    fn context_is_required() {
        let errors = review(Some("Document"), false).validate().expect_err("Test operation failed");
        assert_eq!(
            errors.find("context").map(|node| node.errors.clone()),
            Some(vec!["`context` is a required field".to_string()])
        );
    }

    #[test]
    fn object_type_is_required() {
        let errors = review(None, true).validate().expect_err("Test operation failed");
        assert!(errors.at(&["object", "type"]).is_some());
    }

    #[test]
    fn relationship_object_needs_the_triple() {
        let mut announce = AnnounceRelationship::new();
        let mut object = crate::model::NotifyObject::new();
        object.set_type(&["Relationship"]).expect("Test operation failed");
        announce.set_object(&object).expect("Test operation failed");

        let errors = announce.validate().expect_err("Test operation failed");
        assert!(errors.at(&["object", "as:subject"]).is_some());
        assert!(errors.at(&["object", "as:relationship"]).is_some());
        assert!(errors.at(&["object", "as:object"]).is_some());
        assert!(errors.at(&["object", "type"]).is_none());
    }
}
