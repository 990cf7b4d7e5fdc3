//! Event categories.
//!
//! Every routable [`Envelope`](super::envelope::Envelope) belongs to exactly
//! one concrete [`EventCategory`]. [`EventCategory::Any`] is a wildcard used
//! when registering handlers; classification never produces it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::UnknownCategory;

/// Semantic kind of an inbound notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Plain text message.
    Message,
    /// Message sent by tapping a quick reply.
    QuickReplyMessage,
    /// Button / persistent menu / get-started postback.
    Postback,
    /// Delivery receipt.
    Delivery,
    /// Read receipt.
    Read,
    /// Echo of a message sent by the page.
    Echo,
    /// Referral through m.me link, ad or shortlink.
    Referral,
    /// Completed payment.
    Payment,
    /// Opt-in through the "Send to Messenger" plugin.
    Authentication,
    /// Account linked or unlinked.
    AccountLinking,
    /// Shipping address update during checkout.
    CheckoutUpdate,
    /// Pre-checkout confirmation request.
    PreCheckout,
    /// Shared location.
    Location,
    /// File attachment.
    File,
    /// Video attachment.
    Video,
    /// Audio attachment.
    Audio,
    /// Image attachment.
    Image,
    /// Wildcard; matches every concrete category.
    Any,
}

impl EventCategory {
    /// All concrete categories, in classification precedence order.
    pub const CONCRETE: [EventCategory; 17] = [
        Self::Delivery,
        Self::Read,
        Self::Payment,
        Self::PreCheckout,
        Self::CheckoutUpdate,
        Self::Postback,
        Self::Referral,
        Self::Authentication,
        Self::AccountLinking,
        Self::Echo,
        Self::QuickReplyMessage,
        Self::File,
        Self::Video,
        Self::Audio,
        Self::Image,
        Self::Location,
        Self::Message,
    ];

    /// Stable snake_case name, used in logs and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::QuickReplyMessage => "quick_reply_message",
            Self::Postback => "postback",
            Self::Delivery => "delivery",
            Self::Read => "read",
            Self::Echo => "echo",
            Self::Referral => "referral",
            Self::Payment => "payment",
            Self::Authentication => "authentication",
            Self::AccountLinking => "account_linking",
            Self::CheckoutUpdate => "checkout_update",
            Self::PreCheckout => "pre_checkout",
            Self::Location => "location",
            Self::File => "file",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Image => "image",
            Self::Any => "any",
        }
    }

    /// Returns `true` for the [`Any`](Self::Any) wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Whether a handler registered for `self` accepts an envelope of `actual`.
    pub fn accepts(&self, actual: EventCategory) -> bool {
        self.is_wildcard() || *self == actual
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::CONCRETE
            .iter()
            .chain(std::iter::once(&Self::Any))
            .find(|c| c.as_str() == lower)
            .copied()
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for category in EventCategory::CONCRETE {
            assert_eq!(category.as_str().parse::<EventCategory>().unwrap(), category);
        }
        assert_eq!("ANY".parse::<EventCategory>().unwrap(), EventCategory::Any);
    }

    #[test]
    fn test_unknown_name() {
        let err = "standby".parse::<EventCategory>().unwrap_err();
        assert_eq!(err.to_string(), "unknown event category: standby");
    }

    #[test]
    fn test_wildcard_accepts_everything() {
        for category in EventCategory::CONCRETE {
            assert!(EventCategory::Any.accepts(category));
        }
        assert!(EventCategory::Message.accepts(EventCategory::Message));
        assert!(!EventCategory::Message.accepts(EventCategory::Postback));
    }

    #[test]
    fn test_concrete_excludes_wildcard() {
        assert!(!EventCategory::CONCRETE.contains(&EventCategory::Any));
    }
}
