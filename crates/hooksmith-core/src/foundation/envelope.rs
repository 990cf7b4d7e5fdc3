//! Inbound envelope model.
//!
//! An [`Envelope`] is one element of a callback entry's `messaging` array:
//! exactly one notification from the platform (a message, a postback, a
//! delivery receipt, ...). Every field on the wire is optional, so the type
//! exposes accessors that never fail: a missing string is `""`, a missing
//! number is `0`, a missing marker is `false`.
//!
//! ```text
//! Envelope { sender, recipient, timestamp, ... }
//! ├── message          { mid, text, is_echo, quick_reply, attachments }
//! ├── postback         { title, payload, referral }
//! ├── delivery / read  { watermark, seq }
//! ├── optin / account_linking
//! ├── referral
//! └── checkout_update / pre_checkout / payment
//! ```
//!
//! Envelopes are built by deserialisation only and expose no `&mut` API, so a
//! value seen by the dispatcher is the value the platform sent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de::{lossy_vec, null_as_default};
use super::error::ParseError;

// ============================================================================
// Envelope
// ============================================================================

/// One parsed inbound notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sender: Option<Participant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recipient: Option<Participant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<ReceivedMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    postback: Option<Postback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delivery: Option<Delivery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    read: Option<Read>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    optin: Option<Optin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    account_linking: Option<AccountLinking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    referral: Option<Referral>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    checkout_update: Option<CheckoutUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pre_checkout: Option<PreCheckout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payment: Option<Payment>,
}

impl Envelope {
    /// Parses a single envelope from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds an envelope from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        Ok(serde_json::from_value(value)?)
    }

    // ------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------

    /// ID of the user (or page, for echoes) that sent the notification.
    pub fn sender_id(&self) -> &str {
        self.sender.as_ref().map_or("", |p| p.id.as_str())
    }

    /// ID of the receiving page (or user, for echoes).
    pub fn recipient_id(&self) -> &str {
        self.recipient.as_ref().map_or("", |p| p.id.as_str())
    }

    /// Notification timestamp in epoch milliseconds, `0` when absent.
    pub fn timestamp(&self) -> i64 {
        self.timestamp.unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Sections
    // ------------------------------------------------------------------

    /// The message section, if any.
    pub fn message(&self) -> Option<&ReceivedMessage> {
        self.message.as_ref()
    }

    /// The postback section, if any.
    pub fn postback(&self) -> Option<&Postback> {
        self.postback.as_ref()
    }

    /// The delivery receipt, if any.
    pub fn delivery(&self) -> Option<&Delivery> {
        self.delivery.as_ref()
    }

    /// The read receipt, if any.
    pub fn read(&self) -> Option<&Read> {
        self.read.as_ref()
    }

    /// The opt-in (authentication) section, if any.
    pub fn optin(&self) -> Option<&Optin> {
        self.optin.as_ref()
    }

    /// The account linking section, if any.
    pub fn account_linking(&self) -> Option<&AccountLinking> {
        self.account_linking.as_ref()
    }

    /// The top-level referral, if any. A referral carried inside a postback
    /// is reachable through [`Postback::referral`] instead.
    pub fn referral(&self) -> Option<&Referral> {
        self.referral.as_ref()
    }

    /// The checkout update section, if any.
    pub fn checkout_update(&self) -> Option<&CheckoutUpdate> {
        self.checkout_update.as_ref()
    }

    /// The pre-checkout section, if any.
    pub fn pre_checkout(&self) -> Option<&PreCheckout> {
        self.pre_checkout.as_ref()
    }

    /// The payment section, if any.
    pub fn payment(&self) -> Option<&Payment> {
        self.payment.as_ref()
    }

    // ------------------------------------------------------------------
    // Markers
    // ------------------------------------------------------------------

    pub fn has_delivery(&self) -> bool {
        self.delivery.is_some()
    }

    pub fn has_read(&self) -> bool {
        self.read.is_some()
    }

    pub fn has_payment(&self) -> bool {
        self.payment.is_some()
    }

    pub fn has_pre_checkout(&self) -> bool {
        self.pre_checkout.is_some()
    }

    pub fn has_checkout_update(&self) -> bool {
        self.checkout_update.is_some()
    }

    pub fn has_postback(&self) -> bool {
        self.postback.is_some()
    }

    pub fn has_referral(&self) -> bool {
        self.referral.is_some()
    }

    pub fn has_optin(&self) -> bool {
        self.optin.is_some()
    }

    pub fn has_account_linking(&self) -> bool {
        self.account_linking.is_some()
    }

    // ------------------------------------------------------------------
    // Extracted text fields
    // ------------------------------------------------------------------

    /// Text of the message, `""` when there is no message or no text.
    pub fn message_text(&self) -> &str {
        self.message
            .as_ref()
            .and_then(|m| m.text.as_deref())
            .unwrap_or("")
    }

    /// Payload of the tapped quick reply, `""` when absent.
    pub fn quick_reply_payload(&self) -> &str {
        self.message
            .as_ref()
            .and_then(|m| m.quick_reply.as_ref())
            .map_or("", |q| q.payload.as_str())
    }

    /// Payload of the postback, `""` when absent.
    pub fn postback_payload(&self) -> &str {
        self.postback
            .as_ref()
            .and_then(|p| p.payload.as_deref())
            .unwrap_or("")
    }

    /// Whether the message is an echo of something the page itself sent.
    pub fn is_echo(&self) -> bool {
        self.message.as_ref().is_some_and(|m| m.is_echo)
    }

    /// Whether the message carries a quick-reply payload.
    pub fn has_quick_reply(&self) -> bool {
        self.message
            .as_ref()
            .is_some_and(|m| m.quick_reply.is_some())
    }

    /// Kind of the first attachment of the message, if any.
    pub fn attachment_kind(&self) -> Option<AttachmentKind> {
        self.message
            .as_ref()
            .and_then(|m| m.attachments.first())
            .map(|a| a.kind)
    }

    /// Coordinates of the first location attachment, if any.
    pub fn location(&self) -> Option<Coordinates> {
        self.message.as_ref().and_then(|m| {
            m.attachments
                .iter()
                .filter(|a| a.kind == AttachmentKind::Location)
                .find_map(|a| a.payload.as_ref().and_then(|p| p.coordinates))
        })
    }

    /// Status of the account linking event (`"linked"` / `"unlinked"`), `""` when absent.
    pub fn account_linking_status(&self) -> &str {
        self.account_linking
            .as_ref()
            .map_or("", |a| a.status.as_str())
    }

    /// `ref` parameter of the top-level referral, falling back to the
    /// postback's referral. `""` when neither exists.
    pub fn referral_ref(&self) -> &str {
        self.referral
            .as_ref()
            .or_else(|| self.postback.as_ref().and_then(|p| p.referral.as_ref()))
            .and_then(|r| r.reference.as_deref())
            .unwrap_or("")
    }
}

// ============================================================================
// Sections
// ============================================================================

/// A user or page reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
}

/// A message received from (or echoed to) a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceivedMessage {
    /// Message ID.
    #[serde(default)]
    pub mid: Option<String>,
    /// Text content.
    #[serde(default)]
    pub text: Option<String>,
    /// Set on echoes of messages sent by the page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_echo: bool,
    /// App that sent the echoed message.
    #[serde(default)]
    pub app_id: Option<i64>,
    /// Developer metadata attached to the echoed message.
    #[serde(default)]
    pub metadata: Option<String>,
    #[serde(default)]
    pub quick_reply: Option<QuickReplyPayload>,
    #[serde(default, deserialize_with = "lossy_vec")]
    pub attachments: Vec<Attachment>,
}

/// Payload of a tapped quick reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReplyPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub payload: String,
}

/// A received attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// [`AttachmentKind::Other`] when the type is absent or `null`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: AttachmentKind,
    #[serde(default)]
    pub payload: Option<AttachmentPayload>,
}

/// Attachment type discriminator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Audio,
    Video,
    File,
    Location,
    Template,
    Fallback,
    #[default]
    #[serde(other)]
    Other,
}

/// Attachment payload; only the fields needed to route and reply are modelled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentPayload {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

/// Geographic coordinates of a shared location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default, deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub long: f64,
}

/// A button or menu postback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Postback {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub referral: Option<Referral>,
}

/// Delivery receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    #[serde(default, deserialize_with = "null_as_default")]
    pub mids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub watermark: i64,
    #[serde(default)]
    pub seq: Option<i64>,
}

/// Read receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Read {
    #[serde(default, deserialize_with = "null_as_default")]
    pub watermark: i64,
    #[serde(default)]
    pub seq: Option<i64>,
}

/// Opt-in through the "Send to Messenger" plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Optin {
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
}

/// Account linking / unlinking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountLinking {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub authorization_code: Option<String>,
}

/// Referral (m.me link, ad, shortlink).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Referral {
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Shipping update during checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutUpdate {
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<Value>,
}

/// Pre-checkout confirmation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreCheckout {
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub requested_user_info: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
}

/// Completed payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub requested_user_info: Option<Value>,
    #[serde(default)]
    pub payment_credential: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
}
