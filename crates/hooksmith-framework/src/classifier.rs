//! Event classification.
//!
//! [`classify`] decides which [`EventCategory`] an [`Envelope`] represents.
//! A single envelope can structurally satisfy more than one rule (an echo also
//! carries message fields, a postback may carry a referral), so the rules are
//! checked in a fixed order and the first hit wins:
//!
//! | # | Envelope carries              | Category                          |
//! |---|-------------------------------|-----------------------------------|
//! | 1 | delivery receipt              | `Delivery`                        |
//! | 2 | read receipt                  | `Read`                            |
//! | 3 | payment                       | `Payment`                         |
//! | 4 | pre-checkout                  | `PreCheckout`                     |
//! | 5 | checkout update               | `CheckoutUpdate`                  |
//! | 6 | postback                      | `Postback`                        |
//! | 7 | top-level referral            | `Referral`                        |
//! | 8 | opt-in / account linking      | `Authentication` / `AccountLinking` |
//! | 9 | message marked as echo        | `Echo`                            |
//! | 10| message with quick reply      | `QuickReplyMessage`               |
//! | 11| message with attachment       | `File` / `Video` / `Audio` / `Image` / `Location` |
//! | 12| message with text             | `Message`                         |
//!
//! Anything else is unroutable and yields `None`.

use hooksmith_core::{AttachmentKind, Envelope, EventCategory};

/// Determines the concrete category of `envelope`.
///
/// Pure and total: the same envelope always yields the same answer, and
/// `Some(EventCategory::Any)` is never returned.
pub fn classify(envelope: &Envelope) -> Option<EventCategory> {
    if envelope.has_delivery() {
        return Some(EventCategory::Delivery);
    }
    if envelope.has_read() {
        return Some(EventCategory::Read);
    }
    if envelope.has_payment() {
        return Some(EventCategory::Payment);
    }
    if envelope.has_pre_checkout() {
        return Some(EventCategory::PreCheckout);
    }
    if envelope.has_checkout_update() {
        return Some(EventCategory::CheckoutUpdate);
    }
    if envelope.has_postback() {
        return Some(EventCategory::Postback);
    }
    if envelope.has_referral() {
        return Some(EventCategory::Referral);
    }
    if envelope.has_optin() {
        return Some(EventCategory::Authentication);
    }
    if envelope.has_account_linking() {
        return Some(EventCategory::AccountLinking);
    }

    let message = envelope.message()?;

    if message.is_echo {
        return Some(EventCategory::Echo);
    }
    if message.quick_reply.is_some() {
        return Some(EventCategory::QuickReplyMessage);
    }
    if let Some(category) = envelope.attachment_kind().and_then(attachment_category) {
        return Some(category);
    }
    if !envelope.message_text().is_empty() {
        return Some(EventCategory::Message);
    }

    None
}

/// Returns `true` iff `expected` is the wildcard or equals the envelope's category.
pub fn verify(envelope: &Envelope, expected: EventCategory) -> bool {
    expected.is_wildcard() || classify(envelope) == Some(expected)
}

// Templates, fallbacks and unknown attachment types are not routable by type.
fn attachment_category(kind: AttachmentKind) -> Option<EventCategory> {
    match kind {
        AttachmentKind::File => Some(EventCategory::File),
        AttachmentKind::Video => Some(EventCategory::Video),
        AttachmentKind::Audio => Some(EventCategory::Audio),
        AttachmentKind::Image => Some(EventCategory::Image),
        AttachmentKind::Location => Some(EventCategory::Location),
        AttachmentKind::Template | AttachmentKind::Fallback | AttachmentKind::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn envelope(value: Value) -> Envelope {
        Envelope::from_value(value).unwrap()
    }

    #[test]
    fn test_text_message() {
        let e = envelope(json!({ "message": { "text": "hello" } }));
        assert_eq!(classify(&e), Some(EventCategory::Message));
    }

    #[test]
    fn test_delivery_wins_over_everything() {
        let e = envelope(json!({
            "delivery": { "mids": ["m1"], "watermark": 10 },
            "read": { "watermark": 10 },
            "payment": { "payload": "p" },
            "postback": { "payload": "P" },
            "referral": { "ref": "r" },
            "optin": { "ref": "o" },
            "message": { "text": "hi", "is_echo": true, "quick_reply": { "payload": "Q" } }
        }));
        assert_eq!(classify(&e), Some(EventCategory::Delivery));
    }

    #[test]
    fn test_precedence_chain() {
        let cases = [
            (
                json!({ "read": { "watermark": 1 }, "payment": {}, "message": { "text": "x" } }),
                EventCategory::Read,
            ),
            (
                json!({ "payment": {}, "pre_checkout": {}, "checkout_update": {} }),
                EventCategory::Payment,
            ),
            (
                json!({ "pre_checkout": {}, "checkout_update": {} }),
                EventCategory::PreCheckout,
            ),
            (
                json!({ "checkout_update": {}, "postback": { "payload": "P" } }),
                EventCategory::CheckoutUpdate,
            ),
            (
                json!({ "postback": { "payload": "P" }, "referral": { "ref": "r" } }),
                EventCategory::Postback,
            ),
            (
                json!({ "referral": { "ref": "r" }, "optin": { "ref": "o" } }),
                EventCategory::Referral,
            ),
            (
                json!({ "optin": { "ref": "o" }, "account_linking": { "status": "linked" } }),
                EventCategory::Authentication,
            ),
            (
                json!({ "account_linking": { "status": "unlinked" }, "message": { "text": "x" } }),
                EventCategory::AccountLinking,
            ),
            (
                json!({ "message": { "text": "x", "is_echo": true, "quick_reply": { "payload": "Q" } } }),
                EventCategory::Echo,
            ),
            (
                json!({ "message": { "text": "Yes", "quick_reply": { "payload": "YES" } } }),
                EventCategory::QuickReplyMessage,
            ),
        ];

        for (value, expected) in cases {
            let e = envelope(value.clone());
            assert_eq!(classify(&e), Some(expected), "envelope: {value}");
        }
    }

    #[test]
    fn test_attachment_subtypes() {
        let cases = [
            ("file", EventCategory::File),
            ("video", EventCategory::Video),
            ("audio", EventCategory::Audio),
            ("image", EventCategory::Image),
            ("location", EventCategory::Location),
        ];

        for (kind, expected) in cases {
            let e = envelope(json!({ "message": { "attachments": [{ "type": kind }] } }));
            assert_eq!(classify(&e), Some(expected), "attachment type: {kind}");
        }
    }

    #[test]
    fn test_unroutable_attachment_falls_back_to_text() {
        let with_text = envelope(json!({
            "message": { "text": "look", "attachments": [{ "type": "fallback" }] }
        }));
        assert_eq!(classify(&with_text), Some(EventCategory::Message));

        let without_text = envelope(json!({
            "message": { "attachments": [{ "type": "template" }] }
        }));
        assert_eq!(classify(&without_text), None);
    }

    #[test]
    fn test_unroutable() {
        assert_eq!(classify(&envelope(json!({}))), None);
        assert_eq!(
            classify(&envelope(json!({ "sender": { "id": "u" }, "timestamp": 5 }))),
            None
        );
        assert_eq!(classify(&envelope(json!({ "message": { "text": "" } }))), None);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let e = envelope(json!({ "message": { "text": "again", "quick_reply": { "payload": "A" } } }));
        assert_eq!(classify(&e), classify(&e));
    }

    #[test]
    fn test_never_classifies_as_any() {
        let samples = [
            json!({}),
            json!({ "message": { "text": "x" } }),
            json!({ "delivery": {} }),
            json!({ "postback": {} }),
        ];
        for value in samples {
            assert_ne!(classify(&envelope(value)), Some(EventCategory::Any));
        }
    }

    #[test]
    fn test_verify() {
        let e = envelope(json!({ "postback": { "payload": "P" } }));
        assert!(verify(&e, EventCategory::Postback));
        assert!(verify(&e, EventCategory::Any));
        assert!(!verify(&e, EventCategory::Message));

        let unroutable = envelope(json!({}));
        assert!(verify(&unroutable, EventCategory::Any));
        assert!(!verify(&unroutable, EventCategory::Message));
    }
}
