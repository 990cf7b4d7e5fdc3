//! Foundation layer - the data model.
//!
//! This module contains the values that flow through the framework:
//! - Inbound envelopes and callback batches
//! - Event categories
//! - Outgoing response payloads

pub mod callback;
pub mod category;
mod de;
pub mod envelope;
pub mod error;
pub mod response;

pub use callback::{Callback, CallbackEntry};
pub use category::EventCategory;
pub use envelope::{
    AccountLinking, Attachment, AttachmentKind, AttachmentPayload, CheckoutUpdate, Coordinates,
    Delivery, Envelope, Optin, Participant, Payment, PreCheckout, Postback, QuickReplyPayload,
    Read, ReceivedMessage, Referral,
};
pub use error::{ParseError, SendError, SendResult, TransportError, TransportResult, UnknownCategory};
pub use response::{
    Button, MessagingType, OutgoingAttachment, OutgoingAttachmentKind, OutgoingMessage, OutgoingResponse,
    QuickReply, QuickReplyContentType, Recipient, SenderAction,
};
