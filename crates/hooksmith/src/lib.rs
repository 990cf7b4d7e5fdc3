//! # Hooksmith
//!
//! A typed webhook bot framework for messaging-platform callbacks.
//!
//! ## Overview
//!
//! The platform POSTs batches of envelopes to a webhook. Hooksmith parses
//! them, decides what kind of event each envelope is, hands it to the first
//! registered handler that claims it, and sends that handler's response back
//! through the send API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌────────────┐     ┌────────────┐     ┌─────────────────┐
//! │   Webhook   │────▶│ Classifier │────▶│ Dispatcher │────▶│ Outbound Sender │
//! │   (axum)    │     │            │     │ (registry) │     │   (send API)    │
//! └─────────────┘     └────────────┘     └────────────┘     └─────────────────┘
//! ```
//!
//! - **Runtime**: Loads configuration, owns the registry and serves the webhook
//! - **Classifier**: Maps an envelope to exactly one event category
//! - **Matchers**: Type-only, exact text, regex or structured postback payload
//! - **Registry**: Ordered handlers; the first one to claim an envelope wins
//! - **Replies**: Fluent builders for send API payloads
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hooksmith::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut runtime = HooksmithRuntime::builder().build()?;
//!
//!     runtime
//!         .register(on_message_text("hi").ignore_case().reply(Reply::new().text("Hello!")))
//!         .register(on_postback("GET_STARTED").reply(Reply::new().text("Welcome!")))
//!         .register(on_any().reply(NoResponse));
//!
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config`: Load `hooksmith.toml` files (default)
//! - `yaml-config`: Load `hooksmith.yaml` files
//! - `json-log`: Enable the JSON log format
//! - `http-client`: Deliver responses to the send API over HTTP

pub use hooksmith_core as core;
pub use hooksmith_framework as framework;
pub use hooksmith_runtime as runtime;
pub use hooksmith_transport as transport;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use hooksmith::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use hooksmith_runtime::{HooksmithRuntime, RuntimeBuilder};

    // Handler registration
    pub use hooksmith_framework::{
        EventMatcher, HandlerRegistry, NoResponse, RegisteredHandler, Reply, ResponseBuilder,
        TextSource, on_any, on_category, on_message, on_message_pattern, on_message_text,
        on_postback, on_postback_pattern, on_quick_reply, on_quick_reply_pattern,
    };

    // Data model - for reading envelopes in response builders
    pub use hooksmith_core::{
        AttachmentKind, Button, Envelope, EventCategory, MessagingType, OutgoingResponse,
        QuickReply, SenderAction,
    };

    // Core traits for custom implementations
    pub use hooksmith_core::{OutboundSender, WebhookHandler};
}
