//! Fluent response builder.
//!
//! A [`Reply`] describes what to send back without knowing to whom. It is
//! built by value and never mutated afterwards, so a single `Reply` can serve
//! as the response builder of a handler that fires on many envelopes:
//!
//! ```rust,ignore
//! let menu = Reply::new()
//!     .text("What would you like?")
//!     .quick_reply(QuickReply::text("Coffee", "ORDER_COFFEE"))
//!     .quick_reply(QuickReply::text("Tea", "ORDER_TEA"));
//!
//! registry.add(on_message_text("menu").ignore_case().reply(menu));
//! ```

use serde_json::{Value, json};

use crate::handler::ResponseBuilder;
use hooksmith_core::{
    Button, Envelope, MessagingType, OutgoingAttachment, OutgoingAttachmentKind, OutgoingMessage,
    OutgoingResponse, QuickReply, SenderAction,
};

/// An immutable description of an outgoing response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    message: OutgoingMessage,
    action: Option<SenderAction>,
    messaging_type: Option<MessagingType>,
}

impl Reply {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.message.text = Some(text.into());
        self
    }

    /// Attaches media by URL.
    pub fn attachment(mut self, kind: OutgoingAttachmentKind, url: impl Into<String>) -> Self {
        self.message.attachment = Some(OutgoingAttachment {
            kind,
            payload: json!({ "url": url.into() }),
        });
        self
    }

    /// Attaches a structured template. `payload` is sent as-is.
    pub fn template(mut self, payload: Value) -> Self {
        self.message.attachment = Some(OutgoingAttachment {
            kind: OutgoingAttachmentKind::Template,
            payload,
        });
        self
    }

    /// Attaches a button template with the given text and buttons.
    pub fn buttons(
        self,
        text: impl Into<String>,
        buttons: impl IntoIterator<Item = Button>,
    ) -> Self {
        let buttons: Vec<Button> = buttons.into_iter().collect();
        self.template(json!({
            "template_type": "button",
            "text": text.into(),
            "buttons": buttons,
        }))
    }

    /// Appends a quick reply button.
    pub fn quick_reply(mut self, quick_reply: QuickReply) -> Self {
        self.message.quick_replies.push(quick_reply);
        self
    }

    /// Appends several quick reply buttons.
    pub fn quick_replies(mut self, quick_replies: impl IntoIterator<Item = QuickReply>) -> Self {
        self.message.quick_replies.extend(quick_replies);
        self
    }

    /// Sets the developer-defined metadata echoed back by the platform.
    pub fn metadata(mut self, metadata: impl Into<String>) -> Self {
        self.message.metadata = Some(metadata.into());
        self
    }

    /// Sends a sender action instead of a message.
    ///
    /// Ignored when the reply also carries message content.
    pub fn action(mut self, action: SenderAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Overrides the messaging type (defaults to `RESPONSE`).
    pub fn messaging_type(mut self, messaging_type: MessagingType) -> Self {
        self.messaging_type = Some(messaging_type);
        self
    }

    /// Whether the reply carries any message content.
    pub fn has_message(&self) -> bool {
        self.message.text.is_some()
            || self.message.attachment.is_some()
            || !self.message.quick_replies.is_empty()
    }

    /// Addresses the reply to `recipient_id`.
    ///
    /// Returns `None` when there is nothing to send.
    pub fn to(&self, recipient_id: impl Into<String>) -> Option<OutgoingResponse> {
        if self.has_message() {
            let mut response = OutgoingResponse::message(recipient_id, self.message.clone());
            if let Some(messaging_type) = self.messaging_type {
                response.messaging_type = Some(messaging_type);
            }
            return Some(response);
        }

        self.action
            .map(|action| OutgoingResponse::action(recipient_id, action))
    }

    /// Addresses the reply to the sender of `envelope`.
    ///
    /// Returns `None` when the envelope has no sender.
    pub fn reply_to(&self, envelope: &Envelope) -> Option<OutgoingResponse> {
        let sender = envelope.sender_id();
        if sender.is_empty() {
            return None;
        }
        self.to(sender)
    }
}

impl ResponseBuilder for Reply {
    fn build(&self, envelope: &Envelope) -> Option<OutgoingResponse> {
        self.reply_to(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from(sender: &str) -> Envelope {
        Envelope::from_value(json!({ "sender": { "id": sender }, "message": { "text": "hi" } }))
            .unwrap()
    }

    #[test]
    fn test_text_reply_shape() {
        let response = Reply::new().text("Hello!").reply_to(&from("u1")).unwrap();

        assert_eq!(
            response.to_json(),
            json!({
                "recipient": { "id": "u1" },
                "messaging_type": "RESPONSE",
                "message": { "text": "Hello!" }
            })
        );
    }

    #[test]
    fn test_quick_replies_and_metadata() {
        let response = Reply::new()
            .text("Pick")
            .quick_replies([QuickReply::text("A", "PICK_A"), QuickReply::location()])
            .metadata("menu")
            .to("u2")
            .unwrap();

        let json = response.to_json();
        assert_eq!(json["message"]["quick_replies"][0]["payload"], "PICK_A");
        assert_eq!(json["message"]["quick_replies"][1]["content_type"], "location");
        assert_eq!(json["message"]["metadata"], "menu");
    }

    #[test]
    fn test_attachment_by_url() {
        let response = Reply::new()
            .attachment(OutgoingAttachmentKind::Image, "https://example.com/cat.png")
            .to("u1")
            .unwrap();

        let json = response.to_json();
        assert_eq!(json["message"]["attachment"]["type"], "image");
        assert_eq!(
            json["message"]["attachment"]["payload"]["url"],
            "https://example.com/cat.png"
        );
    }

    #[test]
    fn test_button_template() {
        let response = Reply::new()
            .buttons(
                "Choose",
                [
                    Button::postback("Buy", "BUY_1"),
                    Button::web_url("Details", "https://example.com/1"),
                ],
            )
            .to("u1")
            .unwrap();

        let payload = &response.to_json()["message"]["attachment"]["payload"];
        assert_eq!(payload["template_type"], "button");
        assert_eq!(payload["text"], "Choose");
        assert_eq!(
            payload["buttons"],
            json!([
                { "type": "postback", "title": "Buy", "payload": "BUY_1" },
                { "type": "web_url", "title": "Details", "url": "https://example.com/1" }
            ])
        );
    }

    #[test]
    fn test_action_only() {
        let response = Reply::new()
            .action(SenderAction::TypingOn)
            .to("u1")
            .unwrap();

        assert_eq!(
            response.to_json(),
            json!({ "recipient": { "id": "u1" }, "sender_action": "typing_on" })
        );
    }

    #[test]
    fn test_message_takes_precedence_over_action() {
        let response = Reply::new()
            .action(SenderAction::MarkSeen)
            .text("hi")
            .to("u1")
            .unwrap();
        assert!(response.sender_action.is_none());
        assert!(response.message.is_some());
    }

    #[test]
    fn test_messaging_type_override() {
        let response = Reply::new()
            .text("news")
            .messaging_type(MessagingType::Update)
            .to("u1")
            .unwrap();
        assert_eq!(response.messaging_type, Some(MessagingType::Update));
    }

    #[test]
    fn test_nothing_to_send() {
        assert!(Reply::new().to("u1").is_none());
        assert!(Reply::new().text("x").reply_to(&Envelope::default()).is_none());
    }

    #[test]
    fn test_reply_is_reusable() {
        let reply = Reply::new().text("same");
        let a = reply.build(&from("a")).unwrap();
        let b = reply.build(&from("b")).unwrap();
        assert_eq!(a.recipient.id, "a");
        assert_eq!(b.recipient.id, "b");
        assert_eq!(a.message, b.message);
    }
}
