//! Concrete notification patterns
//!
//! Each pattern fixes the type tokens it requires and adds its own checks on
//! top of the shared pattern validation.

mod announce;
mod request;
mod responses;
mod unprocessable;

pub use announce::{AnnounceEndorsement, AnnounceRelationship, AnnounceReview, AnnounceServiceResult};
pub use request::{RequestEndorsement, RequestReview};
pub use responses::{Accept, Reject, TentativelyAccept, TentativelyReject, UndoOffer};
pub use unprocessable::UnprocessableNotification;
