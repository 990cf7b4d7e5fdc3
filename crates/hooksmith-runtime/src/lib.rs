//! Hooksmith Runtime - Orchestration layer for the Hooksmith webhook bot framework.
//!
//! This crate provides:
//! - Layered configuration loading and validation (`config`)
//! - Logging setup from configuration (`logging`)
//! - The bridge from webhook callbacks to the dispatcher (`DispatchBridge`)
//! - Runtime orchestration (`HooksmithRuntime`)
//!
//! ```ignore
//! use hooksmith_runtime::HooksmithRuntime;
//! use hooksmith_framework::{Reply, on_any, on_message_text};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut runtime = HooksmithRuntime::builder().build()?;
//!
//!     runtime.register(on_message_text("hi").ignore_case().reply(Reply::new().text("Hello!")));
//!     runtime.register(on_any().reply(Reply::new().text("Sorry, I didn't get that.")));
//!
//!     // Run until Ctrl+C
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Outbound Delivery
//!
//! Responses go to the send API when `send_api.page_token` is configured and
//! the `http-client` feature is enabled. Otherwise they are only logged.

pub mod bridge;
pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

// Re-exports
pub use bridge::DispatchBridge;
pub use config::{ConfigError, ConfigLoader, ConfigResult, HooksmithConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::LoggingBuilder;
pub use runtime::{HooksmithRuntime, RunningRuntime, RuntimeBuilder, wait_for_shutdown};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// This provides all the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use tracing::{Level, debug, error, event, info, instrument, span, trace, warn};
}
