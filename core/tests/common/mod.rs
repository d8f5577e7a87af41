//! JSON fixtures for the notification patterns

#![allow(dead_code)]

use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

/// Route dispatch logging to the test output, filtered by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub const OFFER_ID: &str = "urn:uuid:0370c0fb-bb78-4a9b-87f5-bed307a509dd";
pub const INVALID_URN: &str = "urn:uuid:4fb3af44-d4f8-4226-9475-2d09c2d8d9e0";

/// A generic notification exercising every pattern property
pub fn notify() -> Value {
    with_type(json!("Object"))
}

fn with_type(types: Value) -> Value {
    json!({
        "@context": [
            "https://www.w3.org/ns/activitystreams",
            "https://coar-notify.net"
        ],
        "actor": {
            "id": "https://overlay-journal.com",
            "name": "Overlay Journal",
            "type": "Service"
        },
        "context": {
            "id": "https://research-organisation.org/repository/preprint/201203/421/",
            "ietf:item": {
                "id": "https://research-organisation.org/repository/preprint/201203/421/content",
                "mediaType": "application/pdf",
                "type": "Document"
            }
        },
        "id": "urn:uuid:94ecae35-dcfd-4182-8550-22c7164fe23f",
        "inReplyTo": OFFER_ID,
        "object": {
            "id": "https://overlay-journal.com/articles/00001/",
            "ietf:cite-as": "https://overlay-journal.com/articles/00001/",
            "type": ["Page", "sorg:WebPage"]
        },
        "origin": {
            "id": "https://overlay-journal.com/system",
            "inbox": "https://overlay-journal.com/inbox/",
            "type": "Service"
        },
        "target": {
            "id": "https://research-organisation.org/repository",
            "inbox": "https://research-organisation.org/inbox/",
            "type": "Service"
        },
        "type": types
    })
}

/// The endorsement request that the response fixtures answer
pub fn endorsement_offer() -> Value {
    json!({
        "actor": {
            "id": "https://orcid.org/0000-0002-1825-0097",
            "name": "Josiah Carberry",
            "type": "Person"
        },
        "id": OFFER_ID,
        "object": {
            "id": "https://research-organisation.org/repository/preprint/201203/421/",
            "ietf:cite-as": "https://doi.org/10.5555/12345680",
            "ietf:item": {
                "id": "https://research-organisation.org/repository/preprint/201203/421/content.pdf",
                "mediaType": "application/pdf",
                "type": ["Article", "sorg:ScholarlyArticle"]
            },
            "type": ["Page", "sorg:AboutPage"]
        },
        "origin": {
            "id": "https://research-organisation.org/repository",
            "inbox": "https://research-organisation.org/inbox/",
            "type": "Service"
        },
        "target": {
            "id": "https://overlay-journal.com/system",
            "inbox": "https://overlay-journal.com/inbox/",
            "type": "Service"
        },
        "type": ["Offer", "coar-notify:EndorsementAction"]
    })
}

fn response(types: Value, object: Value) -> Value {
    let mut source = with_type(types);
    source["object"] = object;
    source
}

fn plain_offer() -> Value {
    json!({"id": OFFER_ID, "type": "Offer"})
}

pub fn accept() -> Value {
    response(json!("Accept"), endorsement_offer())
}

pub fn reject() -> Value {
    let mut source = response(json!("Reject"), plain_offer());
    source["summary"] = json!("The offer has been rejected because...");
    source
}

pub fn tentatively_accept() -> Value {
    let mut source = response(json!("TentativeAccept"), plain_offer());
    source["summary"] = json!("The offer has been tentatively accepted, subject to further review");
    source
}

pub fn tentatively_reject() -> Value {
    let mut source = response(json!(["TentativeReject"]), plain_offer());
    source["summary"] = json!("The offer has been tentatively rejected, subject to further review");
    source
}

pub fn undo_offer() -> Value {
    let mut source = response(json!(["Undo", "coar-notify:UndoOffer"]), plain_offer());
    source["summary"] = json!("The offer has been withdrawn because...");
    source
}

pub fn announce_endorsement() -> Value {
    let mut source = with_type(json!(["Announce", "coar-notify:EndorsementAction"]));
    source["context"] = json!({"id": "https://research-organisation.org/repository/preprint/201203/421/"});
    source
}

pub fn announce_relationship() -> Value {
    let mut source = with_type(json!(["Announce", "coar-notify:RelationshipAction"]));
    source["object"] = json!({
        "as:subject": "https://research-organisation.org/repository/item/201203/421/",
        "as:relationship": "http://purl.org/vocab/frbr/core#supplement",
        "as:object": "https://research-organisation.org/repository/item/201203/421/datasets/1",
        "id": "urn:uuid:74FFB356-0632-44D9-B176-888DA85758DC",
        "type": "Relationship"
    });
    source
}

pub fn announce_review() -> Value {
    let mut source = with_type(json!(["Announce", "coar-notify:ReviewAction"]));
    source["object"]["type"] = json!(["Document", "sorg:Review"]);
    source
}

pub fn announce_service_result() -> Value {
    let mut source = with_type(json!("Announce"));
    source["object"]["type"] = json!(["Page", "sorg:WebPage"]);
    source
}

pub fn request_endorsement() -> Value {
    let mut source = endorsement_offer();
    source["@context"] = json!([
        "https://www.w3.org/ns/activitystreams",
        "https://coar-notify.net"
    ]);
    source
}

pub fn request_review() -> Value {
    let mut source = request_endorsement();
    source["type"] = json!(["Offer", "coar-notify:ReviewAction"]);
    source
}

pub fn unprocessable_notification() -> Value {
    let mut source = with_type(json!(["Flag", "coar-notify:UnprocessableNotification"]));
    source["object"] = json!({"id": OFFER_ID});
    source["summary"] = json!("Unable to process URL: http://example.com/somewhere - it does not appear to be a supported resource");
    source
}

/// Break the properties every pattern validates
pub fn invalid(mut source: Value) -> Value {
    source["id"] = json!("not a uri");
    source["inReplyTo"] = json!("not a uri");
    source["origin"]["id"] = json!(INVALID_URN);
    source["origin"]["inbox"] = json!("not a uri");
    source["target"]["id"] = json!(INVALID_URN);
    source["target"]["inbox"] = json!("not a uri");
    source
}
