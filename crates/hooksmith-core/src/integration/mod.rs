//! Integration layer - seams to the outside world.
//!
//! This module contains the traits the transport and runtime meet at:
//! - [`WebhookHandler`]: receives parsed callback batches from the transport
//! - [`OutboundSender`]: delivers outgoing responses to the platform
//! - [`SubscriptionRequest`]: the subscription handshake rule

pub mod sender;
pub mod webhook;

pub use sender::{BoxedSender, LoggingSender, OutboundSender};
pub use webhook::{
    BoxedWebhookHandler, ListenerHandle, SUBSCRIBE_MODE, SubscriptionRequest, WebhookHandler,
};
