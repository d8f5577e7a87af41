//! Offers asking a service to act on a resource

use crate::model::{PartProfile, PartRequirements, Pattern, TypePolicy};
use crate::notify_model;
use crate::validation::ValidationError;
use crate::vocabulary::activity_types::OFFER;
use crate::vocabulary::notify_types::{ENDORSEMENT_ACTION, REVIEW_ACTION};

/// The object's item must state its type and media type
const OFFER_OBJECT: PartProfile = PartProfile::new(
    PartRequirements::empty(),
    PartRequirements::TYPE.union(PartRequirements::MEDIA_TYPE),
);

notify_model! {
    /// Request for a resource to be endorsed
    pub struct RequestEndorsement => TypePolicy::pattern(&[OFFER, ENDORSEMENT_ACTION]);
}

impl RequestEndorsement {
    fn validate_model(&self) -> std::result::Result<(), ValidationError> {
        self.pattern_errors().into_result()
    }
}

impl Pattern for RequestEndorsement {
    fn object_profile(&self) -> PartProfile {
        OFFER_OBJECT
    }
}

notify_model! {
    /// Request for a resource to be reviewed
    pub struct RequestReview => TypePolicy::pattern(&[OFFER, REVIEW_ACTION]);
}

impl RequestReview {
    fn validate_model(&self) -> std::result::Result<(), ValidationError> {
        self.pattern_errors().into_result()
    }
}

impl Pattern for RequestReview {
    fn object_profile(&self) -> PartProfile {
        OFFER_OBJECT
    }
}
