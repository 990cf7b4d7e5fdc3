//! Handler registry.
//!
//! The [`HandlerRegistry`] is an ordered list of [`RegisteredHandler`]s.
//! Registration order is priority order: when several handlers claim an
//! envelope, the one registered first wins. Duplicates are allowed and never
//! removed.

use crate::handler::{RegisteredHandler, ResponseBuilder};
use crate::matcher::EventMatcher;
use hooksmith_core::{Envelope, EventCategory};

/// Ordered collection of handlers.
#[derive(Debug, Default, Clone)]
pub struct HandlerRegistry {
    handlers: Vec<RegisteredHandler>,
}

impl HandlerRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler built from its parts.
    pub fn register<B>(&mut self, category: EventCategory, matcher: EventMatcher, builder: B)
    where
        B: ResponseBuilder + 'static,
    {
        self.handlers
            .push(RegisteredHandler::new(category, matcher, builder));
    }

    /// Appends a pre-built handler.
    pub fn add(&mut self, handler: RegisteredHandler) {
        self.handlers.push(handler);
    }

    /// Appends a handler (builder pattern).
    pub fn with(mut self, handler: RegisteredHandler) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Returns the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handlers in registration order.
    pub fn handlers(&self) -> &[RegisteredHandler] {
        &self.handlers
    }

    /// Returns the first handler claiming `envelope`.
    ///
    /// `actual` is the envelope's classification; an unroutable envelope
    /// (`None`) is claimed by nobody, including `Any` handlers.
    pub fn find(
        &self,
        envelope: &Envelope,
        actual: Option<EventCategory>,
    ) -> Option<&RegisteredHandler> {
        let actual = actual?;
        self.handlers
            .iter()
            .find(|handler| handler.claims(envelope, actual))
    }
}

impl Extend<RegisteredHandler> for HandlerRegistry {
    fn extend<I: IntoIterator<Item = RegisteredHandler>>(&mut self, iter: I) {
        self.handlers.extend(iter);
    }
}

impl FromIterator<RegisteredHandler> for HandlerRegistry {
    fn from_iter<I: IntoIterator<Item = RegisteredHandler>>(iter: I) -> Self {
        Self {
            handlers: iter.into_iter().collect(),
        }
    }
}
