//! Reply to a notification that could not be processed

use crate::model::capabilities::Summary;
use crate::model::{NotifyModel, Pattern, TypePolicy};
use crate::notify_model;
use crate::validation::ValidationError;
use crate::vocabulary::activity_types::FLAG;
use crate::vocabulary::notify_types::UNPROCESSABLE_NOTIFICATION;
use crate::vocabulary::properties;

notify_model! {
    /// Flags an incoming notification as unprocessable
    pub struct UnprocessableNotification => TypePolicy::pattern(&[FLAG, UNPROCESSABLE_NOTIFICATION]);
}

impl UnprocessableNotification {
    fn validate_model(&self) -> std::result::Result<(), ValidationError> {
        let core = self.core();
        let mut ve = self.pattern_errors();
        let has_in_reply_to = self.in_reply_to().is_some();
        core.required(&mut ve, &properties::IN_REPLY_TO, has_in_reply_to);
        let has_summary = self.summary().is_some();
        core.required(&mut ve, &properties::SUMMARY, has_summary);
        ve.into_result()
    }
}

impl Pattern for UnprocessableNotification {}

impl Summary for UnprocessableNotification {}
