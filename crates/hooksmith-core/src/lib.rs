//! # Hooksmith Core
//!
//! The core types of the Hooksmith webhook bot framework.
//!
//! This crate provides the data model shared by every other layer: inbound
//! envelopes, event categories, outgoing responses, and the traits the
//! transport and runtime meet at.
//!
//! ## Architecture Layers
//!
//! ### Foundation Layer
//!
//! The data model:
//! - **Envelopes**: one inbound notification with non-failing accessors ([`Envelope`])
//! - **Callbacks**: batches of envelopes as POSTed by the platform ([`Callback`])
//! - **Categories**: the semantic kind of an envelope ([`EventCategory`])
//! - **Responses**: send API payloads ([`OutgoingResponse`])
//!
//! ### Integration Layer
//!
//! External system interfaces:
//! - **Webhook handling**: what the transport calls with parsed batches ([`WebhookHandler`])
//! - **Outbound delivery**: how responses leave the process ([`OutboundSender`])
//! - **Handshake**: the subscription verification rule ([`SubscriptionRequest`])
//!
//! ## Flow
//!
//! ```text
//! ┌───────────┐     ┌─────────────┐     ┌────────────┐     ┌────────────┐
//! │ Transport │────▶│   Webhook   │────▶│ Dispatcher │────▶│  Outbound  │
//! │  (axum)   │     │   Handler   │     │ (framework)│     │   Sender   │
//! └───────────┘     └─────────────┘     └────────────┘     └────────────┘
//! ```

// Architectural layers
pub mod foundation;
pub mod integration;

// Re-export foundation types
pub use foundation::{
    AccountLinking, Attachment, AttachmentKind, AttachmentPayload, Button, Callback,
    CallbackEntry, CheckoutUpdate, Coordinates, Delivery, Envelope, EventCategory, MessagingType, Optin,
    OutgoingAttachment, OutgoingAttachmentKind, OutgoingMessage, OutgoingResponse, ParseError,
    Participant, Payment, PreCheckout, Postback, QuickReply, QuickReplyContentType,
    QuickReplyPayload, Read, ReceivedMessage, Recipient, Referral, SendError, SendResult,
    SenderAction, TransportError, TransportResult, UnknownCategory,
};

// Re-export integration types
pub use integration::{
    BoxedSender, BoxedWebhookHandler, ListenerHandle, LoggingSender, OutboundSender,
    SUBSCRIBE_MODE, SubscriptionRequest, WebhookHandler,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::foundation::*;
    pub use super::integration::{OutboundSender, WebhookHandler};
}
