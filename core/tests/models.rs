//! Pattern model construction, accessors and validation

mod common;

use coarnotify_core::{
    Accept, AnnounceEndorsement, AnnounceRelationship, AnnounceReview, AnnounceServiceResult,
    CopyMode, ModelOptions, ModelType, NestedPatternObject, NotifyError, NotifyModel, NotifyObject,
    NotifyPattern, NotifyService, Pattern, Reject, RequestEndorsement, RequestReview, Summary,
    TentativelyAccept, TentativelyReject, UndoOffer, UnprocessableNotification,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn roundtrip<T: ModelType>(source: Value) -> T {
    let model = T::from_value(source.clone(), ModelOptions::default()).expect("Test operation failed");
    assert_eq!(model.to_jsonld(), source, "{} did not round-trip", T::NAME);
    model
}

fn unvalidated() -> ModelOptions {
    ModelOptions::default().with_validate_on_construct(false)
}

#[test]
fn every_fixture_constructs_and_round_trips() {
    roundtrip::<NotifyPattern>(common::notify());
    roundtrip::<Accept>(common::accept());
    roundtrip::<AnnounceEndorsement>(common::announce_endorsement());
    roundtrip::<AnnounceRelationship>(common::announce_relationship());
    roundtrip::<AnnounceReview>(common::announce_review());
    roundtrip::<AnnounceServiceResult>(common::announce_service_result());
    roundtrip::<Reject>(common::reject());
    roundtrip::<RequestEndorsement>(common::request_endorsement());
    roundtrip::<RequestReview>(common::request_review());
    roundtrip::<TentativelyAccept>(common::tentatively_accept());
    roundtrip::<TentativelyReject>(common::tentatively_reject());
    roundtrip::<UnprocessableNotification>(common::unprocessable_notification());
    roundtrip::<UndoOffer>(common::undo_offer());
}

#[test]
fn accessors_read_the_generic_notification() {
    let source = common::notify();
    let pattern = roundtrip::<NotifyPattern>(source);

    assert_eq!(pattern.id().as_deref(), Some("urn:uuid:94ecae35-dcfd-4182-8550-22c7164fe23f"));
    assert_eq!(pattern.in_reply_to().as_deref(), Some(common::OFFER_ID));
    assert_eq!(pattern.types(), vec!["Object".to_string()]);

    let actor = pattern.actor().expect("Test operation failed");
    assert_eq!(actor.name().as_deref(), Some("Overlay Journal"));

    let origin = pattern.origin().expect("Test operation failed");
    assert_eq!(origin.inbox().as_deref(), Some("https://overlay-journal.com/inbox/"));
    assert_eq!(pattern.target().and_then(|t| t.id()).as_deref(), Some("https://research-organisation.org/repository"));

    let object = pattern.object().expect("Test operation failed");
    assert_eq!(object.cite_as().as_deref(), Some("https://overlay-journal.com/articles/00001/"));
    assert_eq!(object.types(), vec!["Page".to_string(), "sorg:WebPage".to_string()]);

    let item = pattern.context().and_then(|c| c.item()).expect("Test operation failed");
    assert_eq!(item.media_type().as_deref(), Some("application/pdf"));
    assert_eq!(item.validation_context().map(ToString::to_string).as_deref(), Some("ietf:item"));
}

#[test]
fn construction_fills_in_a_missing_id_and_type() {
    let pattern = Accept::from_value(json!({"origin": {"id": "https://example.com/"}}), unvalidated())
        .expect("Test operation failed");
    assert!(pattern.id().is_some_and(|id| id.starts_with("urn:uuid:")));
    assert_eq!(pattern.type_value(), Some(json!("Accept")));

    let review = AnnounceReview::from_value(json!({"type": "Announce"}), unvalidated())
        .expect("Test operation failed");
    assert_eq!(review.type_value(), Some(json!(["Announce", "coar-notify:ReviewAction"])));
}

#[test]
fn construction_validates_when_asked() {
    let err = NotifyPattern::from_value(common::invalid(common::notify()), ModelOptions::default())
        .expect_err("Test operation failed");
    assert!(matches!(err, NotifyError::Validation(_)));
}

#[test]
fn invalid_fixture_reports_each_failure() {
    let pattern = NotifyPattern::from_value(common::invalid(common::notify()), unvalidated())
        .expect("Test operation failed");
    let errors = pattern.validate().expect_err("Test operation failed");

    assert_eq!(
        errors.find("id").map(|node| node.errors.clone()),
        Some(vec!["URI requires a scheme (this may be a relative rather than absolute URI)".to_string()])
    );
    assert!(errors.find("inReplyTo").is_some());
    assert!(errors.at(&["origin", "id"]).is_some());
    assert!(errors.at(&["target", "id"]).is_some());
    assert!(errors.at(&["origin", "inbox"]).is_some());
    assert!(errors.at(&["target", "inbox"]).is_some());
    assert!(errors.find("object").is_none());
    assert!(errors.find("actor").is_none());
}

#[test]
fn response_fixtures_fail_with_their_own_rules() {
    let accept = Accept::from_value(common::invalid(common::accept()), unvalidated())
        .expect("Test operation failed");
    let errors = accept.validate().expect_err("Test operation failed");
    let messages = &errors.find("inReplyTo").expect("Test operation failed").errors;
    assert_eq!(messages.len(), 2);
    assert!(messages[1].starts_with("Expected inReplyTo id to be the same as the nested object id"));
}

#[test]
fn accept_resolves_its_nested_offer() {
    let accept = roundtrip::<Accept>(common::accept());
    let offer = accept.nested_object().expect("Test operation failed");
    assert!(offer.is::<RequestEndorsement>());
    assert_eq!(offer.id().as_deref(), Some(common::OFFER_ID));

    let endorsement = offer
        .downcast_ref::<RequestEndorsement>()
        .expect("Test operation failed");
    assert_eq!(
        endorsement.origin().and_then(|o| o.inbox()).as_deref(),
        Some("https://research-organisation.org/inbox/")
    );
}

#[test]
fn summaries_are_readable() {
    let reject = roundtrip::<Reject>(common::reject());
    assert_eq!(reject.summary().as_deref(), Some("The offer has been rejected because..."));

    let flag = roundtrip::<UnprocessableNotification>(common::unprocessable_notification());
    assert!(flag.summary().is_some_and(|s| s.starts_with("Unable to process URL")));
}

#[test]
fn relationship_triple_is_read_in_order() {
    let announce = roundtrip::<AnnounceRelationship>(common::announce_relationship());
    let triple = announce.object().expect("Test operation failed").triple();
    assert_eq!(triple.subject.as_deref(), Some("https://research-organisation.org/repository/item/201203/421/"));
    assert_eq!(triple.relationship.as_deref(), Some("http://purl.org/vocab/frbr/core#supplement"));
    assert_eq!(
        triple.object.as_deref(),
        Some("https://research-organisation.org/repository/item/201203/421/datasets/1")
    );
}

#[test]
fn eager_validation_rejects_bad_values() {
    let mut pattern = NotifyPattern::new();
    let err = pattern.set_id("9whatever:none").expect_err("Test operation failed");
    assert_eq!(err.to_string(), "Invalid URI scheme `9whatever`");
    assert!(pattern.id().is_some_and(|id| id.starts_with("urn:uuid:")));

    let err = pattern.set_in_reply_to("not a uri").expect_err("Test operation failed");
    assert!(matches!(err, NotifyError::InvalidProperty { ref property, .. } if property == "inReplyTo"));
}

#[test]
fn disabled_property_validation_defers_to_validate() {
    let mut pattern = NotifyPattern::with_options(ModelOptions::default().with_validate_properties(false));
    pattern.set_id("not a uri").expect("Test operation failed");
    assert_eq!(pattern.id().as_deref(), Some("not a uri"));

    let errors = pattern.validate().expect_err("Test operation failed");
    assert_eq!(
        errors.find("id").map(|node| node.errors.clone()),
        Some(vec!["URI requires a scheme (this may be a relative rather than absolute URI)".to_string()])
    );
}

#[test]
fn by_reference_parts_alias_the_document() {
    let mut pattern = NotifyPattern::new();
    let mut origin = NotifyService::new();
    origin.set_id("https://example.com/origin").expect("Test operation failed");
    pattern.set_origin(&origin).expect("Test operation failed");

    origin.set_inbox("https://example.com/inbox/").expect("Test operation failed");
    assert_eq!(
        pattern.origin().and_then(|o| o.inbox()).as_deref(),
        Some("https://example.com/inbox/")
    );
    assert_eq!(
        pattern.to_jsonld()["origin"]["inbox"],
        json!("https://example.com/inbox/")
    );

    let view = pattern.origin().expect("Test operation failed");
    assert!(view.core().store().shares_fields_with(origin.core().store()));
}

#[test]
fn by_value_parts_are_copied_on_read_and_write() {
    let options = ModelOptions::default().with_copy_mode(CopyMode::ByValue);
    let mut pattern = NotifyPattern::with_options(options);
    let mut object = NotifyObject::new();
    object.set_id("https://example.com/object").expect("Test operation failed");
    pattern.set_object(&object).expect("Test operation failed");

    object.set_id("https://example.com/changed").expect("Test operation failed");
    let mut view = pattern.object().expect("Test operation failed");
    assert_eq!(view.id().as_deref(), Some("https://example.com/object"));

    view.set_id("https://example.com/view").expect("Test operation failed");
    assert_eq!(pattern.object().and_then(|o| o.id()).as_deref(), Some("https://example.com/object"));
}

#[test]
fn generic_properties_can_be_read_and_written() {
    let mut pattern = roundtrip::<NotifyPattern>(common::notify());
    assert_eq!(pattern.get_property(&"summary".into()), None);

    pattern
        .set_property(&coarnotify_core::vocabulary::properties::SUMMARY, json!("A summary"))
        .expect("Test operation failed");
    assert_eq!(pattern.to_jsonld()["summary"], json!("A summary"));
}

#[test]
fn cleared_id_and_type_are_required() {
    use coarnotify_core::vocabulary::properties;

    let mut pattern = NotifyPattern::new();
    pattern.set_property(&properties::ID, Value::Null).expect("Test operation failed");
    pattern.set_property(&properties::TYPE, Value::Null).expect("Test operation failed");

    assert!(pattern.id().is_none());
    let errors = pattern.validate().expect_err("Test operation failed");
    assert_eq!(
        errors.find("id").map(|node| node.errors.clone()),
        Some(vec!["`id` is a required field".to_string()])
    );
    assert_eq!(
        errors.find("type").map(|node| node.errors.clone()),
        Some(vec!["`type` is a required field".to_string()])
    );
}

#[test]
fn required_types_are_appended_to_non_string_entries() {
    let accept = Accept::from_value(
        json!({"id": "urn:uuid:4fb3af44-d4f8-4226-9475-2d09c2d8d9e0", "type": 12}),
        unvalidated(),
    )
    .expect("Test operation failed");
    assert_eq!(accept.type_value(), Some(json!([12, "Accept"])));

    let reject = Reject::from_value(
        json!({"id": "urn:uuid:4fb3af44-d4f8-4226-9475-2d09c2d8d9e0", "type": [true, "Offer"]}),
        unvalidated(),
    )
    .expect("Test operation failed");
    assert_eq!(reject.type_value(), Some(json!([true, "Offer", "Reject"])));
}
