//! # Hooksmith Framework
//!
//! Event classification and dispatch for webhook bots.
//!
//! This layer provides:
//! - The classifier that decides what kind of event an envelope is
//! - A closed set of matchers for claiming envelopes by text or payload
//! - The ordered handler registry and the dispatcher that scans it
//! - A fluent [`Reply`] builder for outgoing responses
//! - Convenience functions for common handlers (on_message, on_postback, etc.)
//!
//! Everything here is synchronous and free of I/O; delivering the responses
//! is left to the runtime.

pub mod classifier;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod matcher;
pub mod matcher_builders;
pub mod registry;
pub mod reply;

pub use classifier::{classify, verify};
pub use dispatcher::Dispatcher;
pub use error::{MatcherError, MatcherResult};
pub use handler::{BoxedResponseBuilder, NoResponse, RegisteredHandler, ResponseBuilder};
pub use matcher::{EventMatcher, TextSource};
pub use matcher_builders::{
    HandlerBuilder, on_any, on_category, on_message, on_message_pattern, on_message_text,
    on_postback, on_postback_pattern, on_quick_reply, on_quick_reply_pattern,
};
pub use registry::HandlerRegistry;
pub use reply::Reply;
