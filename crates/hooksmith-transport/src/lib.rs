//! # Hooksmith Transport
//!
//! Network transport for the Hooksmith webhook bot framework.
//!
//! This crate owns everything that touches the network: the HTTP endpoint the
//! platform calls and the client that posts responses back. It knows nothing
//! about classification or dispatch; parsed callbacks are handed to a
//! [`WebhookHandler`](hooksmith_core::WebhookHandler) from `hooksmith-core`.
//!
//! ## Features
//!
//! - `http-server` (default): the webhook endpoint ([`WebhookServer`])
//! - `http-client`: the send API client ([`GraphApiSender`])
//! - `full`: both
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  hooksmith-runtime  │  (dispatch bridge)
//! ├─────────────────────┤
//! │  hooksmith-core     │  (WebhookHandler / OutboundSender)
//! ├─────────────────────┤
//! │  hooksmith-transport│  <- This crate
//! ├─────────────────────┤
//! │  Network (HTTP)     │
//! └─────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hooksmith_transport::WebhookServer;
//!
//! let server = WebhookServer::new("/webhook", "my-validation-token", handler);
//! let handle = server.listen("0.0.0.0:8080").await?;
//! ```

pub mod http;

#[cfg(feature = "http-client")]
pub use http::GraphApiSender;
#[cfg(feature = "http-server")]
pub use http::WebhookServer;
