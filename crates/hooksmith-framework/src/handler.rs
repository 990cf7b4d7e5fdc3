//! Registered handlers.
//!
//! A [`RegisteredHandler`] pairs a category gate and an [`EventMatcher`] with
//! a [`ResponseBuilder`] that produces the reply once the handler wins.
//!
//! Any `Fn(&Envelope) -> Option<OutgoingResponse>` closure is a response
//! builder, and so is the fluent [`Reply`](crate::reply::Reply):
//!
//! ```rust,ignore
//! let greet = RegisteredHandler::new(
//!     EventCategory::Message,
//!     EventMatcher::exact_ignore_case("hi", TextSource::MessageText),
//!     Reply::new().text("Hello!"),
//! );
//!
//! let echo = RegisteredHandler::new(
//!     EventCategory::Message,
//!     EventMatcher::TypeOnly,
//!     |envelope: &Envelope| Reply::new().text(envelope.message_text()).reply_to(envelope),
//! );
//! ```

use std::fmt;
use std::sync::Arc;

use crate::matcher::EventMatcher;
use hooksmith_core::{Envelope, EventCategory, OutgoingResponse};

// =============================================================================
// Response Builder
// =============================================================================

/// Produces the response for an envelope a handler has claimed.
///
/// Returning `None` declines to answer; the envelope is still considered
/// handled.
pub trait ResponseBuilder: Send + Sync {
    fn build(&self, envelope: &Envelope) -> Option<OutgoingResponse>;
}

impl<F> ResponseBuilder for F
where
    F: Fn(&Envelope) -> Option<OutgoingResponse> + Send + Sync,
{
    fn build(&self, envelope: &Envelope) -> Option<OutgoingResponse> {
        self(envelope)
    }
}

/// A type-erased response builder.
pub type BoxedResponseBuilder = Arc<dyn ResponseBuilder>;

/// A builder that never answers. Useful for swallowing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResponse;

impl ResponseBuilder for NoResponse {
    fn build(&self, _envelope: &Envelope) -> Option<OutgoingResponse> {
        None
    }
}

// =============================================================================
// Registered Handler
// =============================================================================

/// A category gate, a matcher and a response builder.
#[derive(Clone)]
pub struct RegisteredHandler {
    category: EventCategory,
    matcher: EventMatcher,
    builder: BoxedResponseBuilder,
    name: Option<String>,
}

impl RegisteredHandler {
    pub fn new<B>(category: EventCategory, matcher: EventMatcher, builder: B) -> Self
    where
        B: ResponseBuilder + 'static,
    {
        Self::from_boxed(category, matcher, Arc::new(builder))
    }

    pub fn from_boxed(
        category: EventCategory,
        matcher: EventMatcher,
        builder: BoxedResponseBuilder,
    ) -> Self {
        Self {
            category,
            matcher,
            builder,
            name: None,
        }
    }

    /// Sets a name for this handler (useful for debugging).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn category(&self) -> EventCategory {
        self.category
    }

    pub fn matcher(&self) -> &EventMatcher {
        &self.matcher
    }

    /// Whether this handler claims an envelope already classified as `actual`.
    pub fn claims(&self, envelope: &Envelope, actual: EventCategory) -> bool {
        self.category.accepts(actual) && self.matcher.matches(envelope)
    }

    /// Runs the response builder.
    pub fn respond(&self, envelope: &Envelope) -> Option<OutgoingResponse> {
        self.builder.build(envelope)
    }
}

impl fmt::Debug for RegisteredHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredHandler")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("matcher", &self.matcher.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::TextSource;
    use hooksmith_core::SenderAction;
    use serde_json::json;

    fn message(text: &str) -> Envelope {
        Envelope::from_value(json!({ "sender": { "id": "u1" }, "message": { "text": text } }))
            .unwrap()
    }

    #[test]
    fn test_claims_requires_category_and_matcher() {
        let handler = RegisteredHandler::new(
            EventCategory::Message,
            EventMatcher::exact("hi", TextSource::MessageText),
            NoResponse,
        );

        assert!(handler.claims(&message("hi"), EventCategory::Message));
        assert!(!handler.claims(&message("hi"), EventCategory::Echo));
        assert!(!handler.claims(&message("bye"), EventCategory::Message));
    }

    #[test]
    fn test_any_accepts_every_category() {
        let handler = RegisteredHandler::new(EventCategory::Any, EventMatcher::TypeOnly, NoResponse);
        assert!(handler.claims(&message("x"), EventCategory::Message));
        assert!(handler.claims(&message("x"), EventCategory::Delivery));
    }

    #[test]
    fn test_closure_builder() {
        let handler = RegisteredHandler::new(
            EventCategory::Message,
            EventMatcher::TypeOnly,
            |envelope: &Envelope| {
                Some(OutgoingResponse::action(
                    envelope.sender_id(),
                    SenderAction::TypingOn,
                ))
            },
        )
        .name("typing");

        let response = handler.respond(&message("x")).unwrap();
        assert_eq!(response.recipient.id, "u1");
        assert_eq!(handler.get_name(), Some("typing"));
    }

    #[test]
    fn test_no_response() {
        let handler = RegisteredHandler::new(EventCategory::Any, EventMatcher::TypeOnly, NoResponse);
        assert!(handler.respond(&message("x")).is_none());
    }
}
