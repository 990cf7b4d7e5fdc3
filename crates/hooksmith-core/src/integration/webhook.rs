//! Webhook integration seam.
//!
//! The transport layer owns the HTTP server; what happens to a parsed
//! callback is decided by a [`WebhookHandler`] supplied by the runtime.
//!
//! ```text
//! Transport ──GET──▶ SubscriptionRequest::verify(validation_token)
//!           ──POST─▶ Callback::parse ──▶ Arc<dyn WebhookHandler>::on_callback
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::foundation::callback::Callback;

/// The `hub.mode` value the platform sends when subscribing a webhook.
pub const SUBSCRIBE_MODE: &str = "subscribe";

// =============================================================================
// Subscription Handshake
// =============================================================================

/// Query parameters of the subscription handshake.
///
/// Missing parameters deserialise as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    #[serde(rename = "hub.mode", default)]
    pub mode: String,
    #[serde(rename = "hub.verify_token", default)]
    pub verify_token: String,
    #[serde(rename = "hub.challenge", default)]
    pub challenge: String,
}

impl SubscriptionRequest {
    pub fn new(
        mode: impl Into<String>,
        verify_token: impl Into<String>,
        challenge: impl Into<String>,
    ) -> Self {
        Self {
            mode: mode.into(),
            verify_token: verify_token.into(),
            challenge: challenge.into(),
        }
    }

    /// Returns the challenge to echo back when the request is a subscription
    /// carrying the expected validation token, `None` otherwise.
    pub fn verify(&self, validation_token: &str) -> Option<&str> {
        (self.mode == SUBSCRIBE_MODE && self.verify_token == validation_token)
            .then_some(self.challenge.as_str())
    }
}

// =============================================================================
// Callback Handler
// =============================================================================

/// Receives parsed callback batches from the transport.
///
/// Implementations must not fail. The transport acknowledges the POST
/// before the handler runs, so a callback is never retried on handler
/// errors.
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    /// Handles one callback batch.
    async fn on_callback(&self, callback: Callback);
}

/// Type alias for a shared webhook handler.
pub type BoxedWebhookHandler = Arc<dyn WebhookHandler>;

// =============================================================================
// Handles
// =============================================================================

/// Handle to a running listener.
///
/// Dropping this handle stops the listener.
#[derive(Debug)]
pub struct ListenerHandle {
    /// Unique identifier for this listener.
    pub id: String,
    /// Shutdown signal sender.
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl ListenerHandle {
    /// Creates a new listener handle.
    pub fn new(id: impl Into<String>, shutdown_tx: tokio::sync::oneshot::Sender<()>) -> Self {
        Self {
            id: id.into(),
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Stops the listener.
    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_matching_token() {
        let request = SubscriptionRequest::new("subscribe", "secret", "1234");
        assert_eq!(request.verify("secret"), Some("1234"));
    }

    #[test]
    fn test_verify_rejects_wrong_token() {
        let request = SubscriptionRequest::new("subscribe", "wrong", "1234");
        assert_eq!(request.verify("secret"), None);
    }

    #[test]
    fn test_verify_rejects_other_mode() {
        let request = SubscriptionRequest::new("unsubscribe", "secret", "1234");
        assert_eq!(request.verify("secret"), None);
    }

    #[test]
    fn test_missing_parameters_are_empty() {
        let request: SubscriptionRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, SubscriptionRequest::default());
        assert_eq!(request.verify("secret"), None);
    }

    #[test]
    fn test_listener_handle_stop_signals() {
        let (tx, mut rx) = tokio::sync::oneshot::channel();
        let handle = ListenerHandle::new("test", tx);
        handle.stop();
        assert!(rx.try_recv().is_ok());
    }
}
