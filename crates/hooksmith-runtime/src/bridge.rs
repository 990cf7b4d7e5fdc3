//! Glue between the transport and the framework.
//!
//! [`DispatchBridge`] is the [`WebhookHandler`] the webhook server calls. For
//! every entry of a callback it dispatches the entry's most recent envelope
//! and hands the response, if any, to the outbound sender. Earlier envelopes
//! of the same entry are not dispatched.

use async_trait::async_trait;
use tracing::{debug, error, trace};

use hooksmith_core::{BoxedSender, Callback, Envelope, WebhookHandler};
use hooksmith_framework::Dispatcher;

/// Dispatches callbacks and sends the responses.
#[derive(Clone)]
pub struct DispatchBridge {
    dispatcher: Dispatcher,
    sender: BoxedSender,
}

impl DispatchBridge {
    pub fn new(dispatcher: Dispatcher, sender: BoxedSender) -> Self {
        Self { dispatcher, sender }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Dispatches one envelope and delivers the response.
    ///
    /// Send failures are logged, never returned.
    pub async fn handle_envelope(&self, envelope: &Envelope) {
        let Some(response) = self.dispatcher.dispatch(envelope) else {
            return;
        };

        if let Err(e) = self.sender.send(&response).await {
            error!(
                sender = self.sender.name(),
                recipient = %response.recipient.id,
                error = %e,
                "Failed to deliver response"
            );
        }
    }
}

impl std::fmt::Debug for DispatchBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchBridge")
            .field("dispatcher", &self.dispatcher)
            .field("sender", &self.sender.name())
            .finish()
    }
}

#[async_trait]
impl WebhookHandler for DispatchBridge {
    async fn on_callback(&self, callback: Callback) {
        for entry in &callback.entry {
            let Some(envelope) = entry.last_envelope() else {
                debug!(entry = %entry.id, "Entry without envelopes, skipping");
                continue;
            };

            if entry.messaging.len() > 1 {
                trace!(
                    entry = %entry.id,
                    skipped = entry.messaging.len() - 1,
                    "Dispatching only the most recent envelope"
                );
            }

            self.handle_envelope(envelope).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hooksmith_core::{OutboundSender, OutgoingResponse, SendError, SendResult};
    use hooksmith_framework::{HandlerRegistry, Reply, on_any, on_message_text};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<OutgoingResponse>>,
        fail: bool,
    }

    #[async_trait]
    impl OutboundSender for RecordingSender {
        async fn send(&self, response: &OutgoingResponse) -> SendResult<()> {
            self.sent.lock().unwrap().push(response.clone());
            if self.fail {
                return Err(SendError::Http("connection refused".into()));
            }
            Ok(())
        }
    }

    fn bridge(sender: Arc<RecordingSender>) -> DispatchBridge {
        let registry = HandlerRegistry::new()
            .with(on_message_text("hi").reply(Reply::new().text("hello")))
            .with(on_any().reply(|e: &Envelope| {
                Reply::new()
                    .text(format!("echo: {}", e.message_text()))
                    .reply_to(e)
            }));
        DispatchBridge::new(Dispatcher::new(registry), sender)
    }

    fn callback(json: &str) -> Callback {
        Callback::parse(json.as_bytes()).unwrap()
    }

    #[tokio::test]
    async fn test_last_envelope_per_entry() {
        let sender = Arc::new(RecordingSender::default());
        let bridge = bridge(sender.clone());

        bridge
            .on_callback(callback(
                r#"{
                "object": "page",
                "entry": [
                    { "id": "p1", "messaging": [
                        { "sender": { "id": "a" }, "message": { "text": "hi" } },
                        { "sender": { "id": "a" }, "message": { "text": "later" } }
                    ] },
                    { "id": "p2", "messaging": [] },
                    { "id": "p3", "messaging": [
                        { "sender": { "id": "b" }, "message": { "text": "hi" } }
                    ] }
                ]
            }"#,
            ))
            .await;

        let sent = sender.sent.lock().unwrap();
        let texts: Vec<_> = sent
            .iter()
            .map(|r| (r.recipient.id.as_str(), r.message.as_ref().unwrap().text.as_deref()))
            .collect();
        assert_eq!(
            texts,
            vec![("a", Some("echo: later")), ("b", Some("hello"))]
        );
    }

    #[test]
    fn test_bridge_shares_the_frozen_registry() {
        let registry = HandlerRegistry::new().with(on_any().reply(Reply::new()));
        let dispatcher = Dispatcher::new(registry);
        let sender = Arc::new(RecordingSender::default());
        let bridge = DispatchBridge::new(dispatcher.clone(), sender);

        assert!(std::ptr::eq(
            bridge.dispatcher().registry(),
            dispatcher.registry()
        ));
        assert_eq!(bridge.dispatcher().handler_count(), 1);
    }

    #[tokio::test]
    async fn test_unroutable_envelope_sends_nothing() {
        let sender = Arc::new(RecordingSender::default());
        let bridge = bridge(sender.clone());

        bridge
            .on_callback(callback(
                r#"{ "entry": [ { "messaging": [ { "sender": { "id": "a" } } ] } ] }"#,
            ))
            .await;

        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_is_swallowed() {
        let sender = Arc::new(RecordingSender {
            fail: true,
            ..Default::default()
        });
        let bridge = bridge(sender.clone());

        bridge
            .on_callback(callback(
                r#"{ "entry": [
                    { "messaging": [ { "sender": { "id": "a" }, "message": { "text": "hi" } } ] },
                    { "messaging": [ { "sender": { "id": "b" }, "message": { "text": "hi" } } ] }
                ] }"#,
            ))
            .await;

        assert_eq!(sender.sent.lock().unwrap().len(), 2);
    }
}
