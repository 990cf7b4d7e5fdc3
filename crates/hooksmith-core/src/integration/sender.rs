//! Outbound delivery seam.
//!
//! The dispatcher produces [`OutgoingResponse`] values; an [`OutboundSender`]
//! is responsible for actually transmitting them. The runtime defaults to
//! [`LoggingSender`]; `hooksmith-transport` provides an HTTP implementation
//! for the platform's send API behind the `http-client` feature.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::foundation::error::{SendError, SendResult};
use crate::foundation::response::OutgoingResponse;

/// Delivers outgoing responses to the platform.
#[async_trait]
pub trait OutboundSender: Send + Sync {
    /// Sends one response. Implementations perform a single attempt.
    async fn send(&self, response: &OutgoingResponse) -> SendResult<()>;

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "sender"
    }
}

/// Type alias for a shared sender.
pub type BoxedSender = Arc<dyn OutboundSender>;

/// A sender that only logs the payload it would have sent.
///
/// Used when no send API credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSender;

impl LoggingSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutboundSender for LoggingSender {
    async fn send(&self, response: &OutgoingResponse) -> SendResult<()> {
        let body =
            serde_json::to_string(response).map_err(|e| SendError::Serialize(e.to_string()))?;
        info!(
            recipient = %response.recipient.id,
            payload = %body,
            "Outgoing response (not delivered: no send API configured)"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}
