//! Envelope dispatcher for the Hooksmith framework.
//!
//! This module provides the [`Dispatcher`], which classifies an incoming
//! envelope and hands it to the first registered handler that claims it.
//!
//! # Dispatch
//!
//! 1. The envelope is classified once; unroutable envelopes are dropped
//! 2. Handlers are scanned in registration order
//! 3. The first handler whose category and matcher both accept wins
//! 4. The winner's response builder produces the (optional) response
//!
//! At most one handler fires per envelope.
//!
//! ```rust,ignore
//! use hooksmith_framework::{Dispatcher, HandlerRegistry, on_any, on_message_text};
//!
//! let registry = HandlerRegistry::new()
//!     .with(on_message_text("hi").reply(Reply::new().text("Hello!")))
//!     .with(on_any().reply(NoResponse));
//!
//! let dispatcher = Dispatcher::new(registry);
//! let response = dispatcher.dispatch(&envelope);
//! ```
//!
//! # Tower Service Integration
//!
//! `Dispatcher` implements `tower::Service<Envelope>`, so middleware can be
//! layered on top of it.

use std::convert::Infallible;
use std::future::{Ready, ready};
use std::sync::Arc;
use std::task::{Context, Poll};

use tower::Service;
use tracing::{Level, debug, span, trace};

use crate::classifier::classify;
use crate::handler::RegisteredHandler;
use crate::registry::HandlerRegistry;
use hooksmith_core::{Envelope, OutgoingResponse};

/// Routes envelopes to handlers.
///
/// Construction freezes the registry: from then on it is only read, so a
/// `Dispatcher` is cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
}

impl Dispatcher {
    /// Creates a dispatcher over `registry`.
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The frozen registry.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.registry.len()
    }

    /// Returns the handler that would fire for `envelope`, if any.
    pub fn winner(&self, envelope: &Envelope) -> Option<&RegisteredHandler> {
        self.registry.find(envelope, classify(envelope))
    }

    /// Dispatches an envelope to the first handler that claims it.
    ///
    /// Returns the winner's response, or `None` when the envelope is
    /// unroutable, unclaimed, or the winner declines to answer.
    pub fn dispatch(&self, envelope: &Envelope) -> Option<OutgoingResponse> {
        let Some(category) = classify(envelope) else {
            trace!(sender = envelope.sender_id(), "Unroutable envelope, dropping");
            return None;
        };

        let span = span!(Level::DEBUG, "dispatch", category = %category);
        let _enter = span.enter();

        let Some(handler) = self.registry.find(envelope, Some(category)) else {
            debug!(sender = envelope.sender_id(), "No handler claimed envelope");
            return None;
        };

        debug!(
            handler = handler.get_name().unwrap_or("unnamed"),
            matcher = handler.matcher().kind(),
            "Handler matched"
        );

        let response = handler.respond(envelope);
        if response.is_none() {
            trace!("Handler produced no response");
        }
        response
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handler_count", &self.registry.len())
            .finish()
    }
}

impl Service<Envelope> for Dispatcher {
    type Response = Option<OutgoingResponse>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, envelope: Envelope) -> Self::Future {
        ready(Ok(self.dispatch(&envelope)))
    }
}
