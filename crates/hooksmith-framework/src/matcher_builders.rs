//! Builder functions for common handlers.
//!
//! This module provides convenient functions for creating handlers that
//! filter on a category and, optionally, on the text of the envelope.
//!
//! # Example
//!
//! ```rust,ignore
//! use hooksmith_framework::{HandlerRegistry, Reply, on_any, on_message_text, on_postback};
//!
//! let registry = HandlerRegistry::new()
//!     .with(on_message_text("hello").ignore_case().reply(Reply::new().text("Hi there!")))
//!     .with(on_postback("GET_STARTED").name("welcome").reply(welcome))
//!     .with(on_any().reply(NoResponse));
//! ```

use crate::error::MatcherResult;
use crate::handler::{RegisteredHandler, ResponseBuilder};
use crate::matcher::{EventMatcher, TextSource};
use hooksmith_core::EventCategory;

/// A handler under construction: category and matcher are set, the response
/// builder is supplied last with [`reply`](Self::reply).
#[derive(Debug, Clone)]
pub struct HandlerBuilder {
    category: EventCategory,
    matcher: EventMatcher,
    name: Option<String>,
}

impl HandlerBuilder {
    pub fn new(category: EventCategory, matcher: EventMatcher) -> Self {
        Self {
            category,
            matcher,
            name: None,
        }
    }

    /// Sets a name for the handler (useful for debugging).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Makes an exact-text matcher case-insensitive.
    pub fn ignore_case(mut self) -> Self {
        self.matcher = self.matcher.ignore_case();
        self
    }

    /// Finishes the handler with its response builder.
    pub fn reply<B>(self, builder: B) -> RegisteredHandler
    where
        B: ResponseBuilder + 'static,
    {
        let handler = RegisteredHandler::new(self.category, self.matcher, builder);
        match self.name {
            Some(name) => handler.name(name),
            None => handler,
        }
    }
}

/// Creates a handler for every text message.
///
/// # Example
///
/// ```rust,ignore
/// let handler = on_message().reply(|e: &Envelope| Reply::new().text(e.message_text()).reply_to(e));
/// ```
pub fn on_message() -> HandlerBuilder {
    on_category(EventCategory::Message)
}

/// Creates a handler for text messages equal to `text`.
///
/// Matching is case-sensitive unless [`ignore_case`](HandlerBuilder::ignore_case)
/// is applied.
pub fn on_message_text(text: impl Into<String>) -> HandlerBuilder {
    HandlerBuilder::new(
        EventCategory::Message,
        EventMatcher::exact(text, TextSource::MessageText),
    )
}

/// Creates a handler for text messages containing a match of `pattern`.
///
/// # Example
///
/// ```rust,ignore
/// let handler = on_message_pattern("ye+s")?.reply(Reply::new().text("Great!"));
/// ```
pub fn on_message_pattern(pattern: &str) -> MatcherResult<HandlerBuilder> {
    Ok(HandlerBuilder::new(
        EventCategory::Message,
        EventMatcher::regex(pattern, TextSource::MessageText)?,
    ))
}

/// Creates a handler for quick replies whose payload equals `payload`.
pub fn on_quick_reply(payload: impl Into<String>) -> HandlerBuilder {
    HandlerBuilder::new(
        EventCategory::QuickReplyMessage,
        EventMatcher::exact(payload, TextSource::QuickReplyPayload),
    )
}

/// Creates a handler for quick replies whose payload contains a match of
/// `pattern`.
///
/// # Example
///
/// ```rust,ignore
/// let handler = on_quick_reply_pattern("^SIZE_(S|M|L)$")?.reply(pick_size);
/// ```
pub fn on_quick_reply_pattern(pattern: &str) -> MatcherResult<HandlerBuilder> {
    Ok(HandlerBuilder::new(
        EventCategory::QuickReplyMessage,
        EventMatcher::regex(pattern, TextSource::QuickReplyPayload)?,
    ))
}

/// Creates a handler for postbacks whose payload equals `payload`.
pub fn on_postback(payload: impl Into<String>) -> HandlerBuilder {
    HandlerBuilder::new(
        EventCategory::Postback,
        EventMatcher::exact(payload, TextSource::PostbackPayload),
    )
}

/// Creates a handler for postbacks whose payload contains a match of `pattern`.
///
/// # Example
///
/// ```rust,ignore
/// let handler = on_postback_pattern("^BUY_[0-9]+$")?.reply(checkout);
/// ```
pub fn on_postback_pattern(pattern: &str) -> MatcherResult<HandlerBuilder> {
    Ok(HandlerBuilder::new(
        EventCategory::Postback,
        EventMatcher::postback_pattern(pattern)?,
    ))
}

/// Creates a handler for every envelope of `category`.
pub fn on_category(category: EventCategory) -> HandlerBuilder {
    HandlerBuilder::new(category, EventMatcher::TypeOnly)
}

/// Creates a catch-all handler.
///
/// Register it last: a catch-all registered first shadows everything after it.
pub fn on_any() -> HandlerBuilder {
    on_category(EventCategory::Any)
}
