//! Outgoing response payloads.
//!
//! An [`OutgoingResponse`] serialises to the send API request body:
//!
//! ```json
//! {
//!   "recipient": { "id": "USER_ID" },
//!   "messaging_type": "RESPONSE",
//!   "message": { "text": "hello", "quick_replies": [ ... ] }
//! }
//! ```
//!
//! Values are immutable once built; construct them with the fluent `Reply`
//! builder in `hooksmith-framework` or directly through the constructors here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A complete send API request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingResponse {
    pub recipient: Recipient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_type: Option<MessagingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<OutgoingMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_action: Option<SenderAction>,
}

impl OutgoingResponse {
    /// A response carrying a message.
    pub fn message(recipient_id: impl Into<String>, message: OutgoingMessage) -> Self {
        Self {
            recipient: Recipient::new(recipient_id),
            messaging_type: Some(MessagingType::Response),
            message: Some(message),
            sender_action: None,
        }
    }

    /// A response carrying only a sender action (typing indicator, mark seen).
    pub fn action(recipient_id: impl Into<String>, action: SenderAction) -> Self {
        Self {
            recipient: Recipient::new(recipient_id),
            messaging_type: None,
            message: None,
            sender_action: Some(action),
        }
    }

    /// Serialises to the send API JSON body.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// The user a response is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
}

impl Recipient {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Why the message is being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessagingType {
    Response,
    Update,
    MessageTag,
}

/// Typing indicators and read marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderAction {
    MarkSeen,
    TypingOn,
    TypingOff,
}

/// Message body of a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<OutgoingAttachment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<QuickReply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

/// An outgoing attachment (media by URL, or a template payload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingAttachment {
    #[serde(rename = "type")]
    pub kind: OutgoingAttachmentKind,
    pub payload: Value,
}

/// Outgoing attachment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutgoingAttachmentKind {
    Image,
    Audio,
    Video,
    File,
    Template,
}

/// A quick reply button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReply {
    pub content_type: QuickReplyContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl QuickReply {
    /// A text quick reply that posts `payload` back when tapped.
    pub fn text(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            content_type: QuickReplyContentType::Text,
            title: Some(title.into()),
            payload: Some(payload.into()),
            image_url: None,
        }
    }

    /// A quick reply asking the user to share their location.
    pub fn location() -> Self {
        Self {
            content_type: QuickReplyContentType::Location,
            title: None,
            payload: None,
            image_url: None,
        }
    }

    /// Adds an icon to the quick reply.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// Quick reply content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickReplyContentType {
    Text,
    Location,
    UserPhoneNumber,
    UserEmail,
}

/// A template button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Button {
    /// Opens `url` in the in-app browser.
    WebUrl { title: String, url: String },
    /// Sends a postback carrying `payload`.
    Postback { title: String, payload: String },
    /// Dials `payload`, a phone number in `+<country><number>` form.
    PhoneNumber { title: String, payload: String },
    /// Opens the share dialog for the template.
    ElementShare,
    /// Starts account linking at `url`.
    AccountLink { url: String },
    AccountUnlink,
}

impl Button {
    pub fn web_url(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::WebUrl {
            title: title.into(),
            url: url.into(),
        }
    }

    pub fn postback(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::Postback {
            title: title.into(),
            payload: payload.into(),
        }
    }

    pub fn phone_number(title: impl Into<String>, number: impl Into<String>) -> Self {
        Self::PhoneNumber {
            title: title.into(),
            payload: number.into(),
        }
    }

    pub fn account_link(url: impl Into<String>) -> Self {
        Self::AccountLink { url: url.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_message_shape() {
        let response = OutgoingResponse::message(
            "user-1",
            OutgoingMessage {
                text: Some("Pick one".into()),
                quick_replies: vec![QuickReply::text("Yes", "YES"), QuickReply::location()],
                ..Default::default()
            },
        );

        assert_eq!(
            response.to_json(),
            json!({
                "recipient": { "id": "user-1" },
                "messaging_type": "RESPONSE",
                "message": {
                    "text": "Pick one",
                    "quick_replies": [
                        { "content_type": "text", "title": "Yes", "payload": "YES" },
                        { "content_type": "location" }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_button_shapes() {
        let buttons = vec![
            Button::web_url("Visit", "https://example.com"),
            Button::postback("Buy", "BUY_1"),
            Button::phone_number("Call", "+15105551234"),
            Button::ElementShare,
            Button::account_link("https://example.com/login"),
        ];

        assert_eq!(
            serde_json::to_value(&buttons).unwrap(),
            json!([
                { "type": "web_url", "title": "Visit", "url": "https://example.com" },
                { "type": "postback", "title": "Buy", "payload": "BUY_1" },
                { "type": "phone_number", "title": "Call", "payload": "+15105551234" },
                { "type": "element_share" },
                { "type": "account_link", "url": "https://example.com/login" }
            ])
        );
    }

    #[test]
    fn test_sender_action_shape() {
        let response = OutgoingResponse::action("user-1", SenderAction::TypingOn);
        assert_eq!(
            response.to_json(),
            json!({ "recipient": { "id": "user-1" }, "sender_action": "typing_on" })
        );
    }
}
