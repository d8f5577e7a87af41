//! Responses to an earlier offer
//!
//! Each response nests the notification it answers as its `object`, and its
//! `inReplyTo` must name that notification.

use crate::model::capabilities::{NestedPatternObject, Summary};
use crate::model::{NotifyModel, Pattern, TypePolicy};
use crate::notify_model;
use crate::validation::ValidationError;
use crate::vocabulary::activity_types::{ACCEPT, REJECT, TENTATIVE_ACCEPT, TENTATIVE_REJECT, UNDO};

macro_rules! response_pattern {
    ($(#[$meta:meta])* $model:ident => $type:expr) => {
        notify_model! {
            $(#[$meta])*
            pub struct $model => TypePolicy::pattern(&[$type]);
        }

        impl $model {
            fn validate_model(&self) -> std::result::Result<(), ValidationError> {
                let mut ve = self.pattern_errors();
                self.in_reply_to_errors(&mut ve);
                ve.into_result()
            }
        }

        impl Pattern for $model {
            fn resolve_object(&self) -> Option<Box<dyn NotifyModel>> {
                self.nested_object()
            }
        }

        impl NestedPatternObject for $model {}
    };
}

response_pattern! {
    /// Acceptance of an offer
    Accept => ACCEPT
}

response_pattern! {
    /// Rejection of an offer
    Reject => REJECT
}

response_pattern! {
    /// Provisional acceptance of an offer
    TentativelyAccept => TENTATIVE_ACCEPT
}

response_pattern! {
    /// Provisional rejection of an offer
    TentativelyReject => TENTATIVE_REJECT
}

response_pattern! {
    /// Retraction of an earlier offer
    UndoOffer => UNDO
}

impl Summary for Reject {}
impl Summary for TentativelyAccept {}
impl Summary for TentativelyReject {}
impl Summary for UndoOffer {}
