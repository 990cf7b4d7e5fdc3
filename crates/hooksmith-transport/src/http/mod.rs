//! HTTP transport.
//!
//! This module provides the webhook server and the send API client.

#[cfg(feature = "http-client")]
mod client;
#[cfg(feature = "http-client")]
pub use client::GraphApiSender;

#[cfg(feature = "http-server")]
mod server;
#[cfg(feature = "http-server")]
pub use server::WebhookServer;
