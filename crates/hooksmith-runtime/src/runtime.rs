//! Runtime orchestration.
//!
//! The runtime owns the handler registry while the application sets it up.
//! Starting the runtime freezes the registry into a shared [`Dispatcher`],
//! wires it to the outbound sender through a [`DispatchBridge`], and serves
//! the webhook.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hooksmith_runtime::HooksmithRuntime;
//!
//! // Loads hooksmith.toml and HOOKSMITH_* variables
//! let mut runtime = HooksmithRuntime::builder().build()?;
//!
//! runtime.register(on_message_text("hi").ignore_case().reply(Reply::new().text("Hello!")));
//! runtime.run().await?;
//! ```

use std::sync::Arc;

use tokio::signal;
use tracing::{error, info, warn};

use crate::bridge::DispatchBridge;
use crate::config::{ConfigLoader, ConfigResult, HooksmithConfig, validate_config};
use crate::error::RuntimeResult;
use crate::logging;
use hooksmith_core::{BoxedSender, ListenerHandle, LoggingSender};
use hooksmith_framework::{Dispatcher, HandlerRegistry, RegisteredHandler};
use hooksmith_transport::WebhookServer;

/// The Hooksmith runtime.
///
/// # Example
///
/// ```rust,ignore
/// let config = load_config_from_file("hooksmith.toml")?;
/// let mut runtime = HooksmithRuntime::from_config(config);
///
/// runtime.register(on_postback("GET_STARTED").reply(welcome));
/// runtime.register(on_any().reply(NoResponse));
/// runtime.run().await?;
/// ```
pub struct HooksmithRuntime {
    config: HooksmithConfig,
    registry: HandlerRegistry,
    sender: Option<BoxedSender>,
}

impl HooksmithRuntime {
    /// Creates a runtime builder for custom configuration.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Creates a runtime from configuration and initializes logging from it.
    pub fn from_config(config: HooksmithConfig) -> Self {
        logging::init_from_config(&config.logging);

        info!(
            log_level = %config.logging.level,
            log_format = ?config.logging.format,
            "Runtime initialized from configuration"
        );

        Self {
            config,
            registry: HandlerRegistry::new(),
            sender: None,
        }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &HooksmithConfig {
        &self.config
    }

    /// Appends a handler. Handlers are tried in registration order.
    pub fn register(&mut self, handler: RegisteredHandler) -> &mut Self {
        self.registry.add(handler);
        self
    }

    /// Appends several handlers, keeping their order.
    pub fn register_handlers(
        &mut self,
        handlers: impl IntoIterator<Item = RegisteredHandler>,
    ) -> &mut Self {
        self.registry.extend(handlers);
        self
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.registry.len()
    }

    /// Overrides the outbound sender chosen from configuration.
    pub fn set_sender(&mut self, sender: BoxedSender) -> &mut Self {
        self.sender = Some(sender);
        self
    }

    /// Picks the sender: an explicit one, the send API when a page token is
    /// configured, otherwise a sender that only logs.
    fn resolve_sender(&mut self) -> RuntimeResult<BoxedSender> {
        if let Some(sender) = self.sender.take() {
            return Ok(sender);
        }

        if self.config.send_api.is_configured() {
            #[cfg(feature = "http-client")]
            {
                let send_api = &self.config.send_api;
                let sender = hooksmith_transport::GraphApiSender::new(
                    &send_api.url,
                    send_api.page_token.as_deref().unwrap_or_default(),
                    send_api.timeout(),
                )?;
                return Ok(Arc::new(sender));
            }

            #[cfg(not(feature = "http-client"))]
            warn!("send_api.page_token is set but the http-client feature is disabled");
        }

        Ok(Arc::new(LoggingSender::new()))
    }

    /// Validates the configuration, freezes the registry and starts serving.
    pub async fn start(mut self) -> RuntimeResult<RunningRuntime> {
        validate_config(&self.config)?;

        if self.registry.is_empty() {
            warn!("No handlers registered, every envelope will be dropped");
        }

        let sender = self.resolve_sender()?;
        let registry = std::mem::take(&mut self.registry);
        let dispatcher = Dispatcher::new(registry);
        let bridge = DispatchBridge::new(dispatcher.clone(), Arc::clone(&sender));

        let webhook = &self.config.webhook;
        let server = WebhookServer::new(
            webhook.path.clone(),
            webhook.validation_token.clone(),
            Arc::new(bridge),
        );
        let listener = server.listen(&webhook.bind_addr()).await?;

        info!(
            handlers = dispatcher.handler_count(),
            sender = sender.name(),
            "Hooksmith runtime started"
        );

        Ok(RunningRuntime {
            dispatcher,
            listener,
        })
    }

    /// Runs until Ctrl+C or SIGTERM.
    pub async fn run(self) -> RuntimeResult<()> {
        let running = self.start().await?;
        info!("Hooksmith runtime is now running. Press Ctrl+C to stop.");

        wait_for_shutdown().await;

        running.stop();
        Ok(())
    }

    /// Runs until `shutdown` completes.
    pub async fn run_until<F>(self, shutdown: F) -> RuntimeResult<()>
    where
        F: std::future::Future<Output = ()>,
    {
        let running = self.start().await?;
        shutdown.await;
        running.stop();
        Ok(())
    }
}

impl std::fmt::Debug for HooksmithRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HooksmithRuntime")
            .field("handler_count", &self.registry.len())
            .field("webhook", &self.config.webhook.bind_addr())
            .finish()
    }
}

/// A started runtime. Dropping it stops the webhook server.
#[derive(Debug)]
pub struct RunningRuntime {
    dispatcher: Dispatcher,
    listener: ListenerHandle,
}

impl RunningRuntime {
    /// The frozen dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn listener_id(&self) -> &str {
        &self.listener.id
    }

    /// Stops the webhook server.
    pub fn stop(self) {
        info!("Stopping Hooksmith runtime");
        self.listener.stop();
    }
}

/// Waits for Ctrl+C, or SIGTERM on unix.
pub async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = signal::ctrl_c() => {
                        info!("Received Ctrl+C, shutting down");
                    }
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down");
                    }
                }
                return;
            }
            Err(e) => {
                error!(error = %e, "Failed to register SIGTERM handler");
            }
        }
    }

    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => error!(error = %e, "Failed to listen for Ctrl+C"),
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for creating a `HooksmithRuntime` with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// let runtime = HooksmithRuntime::builder()
///     .config_file("config/hooksmith.toml")
///     .profile("production")
///     .build()?;
/// ```
pub struct RuntimeBuilder {
    config_loader: ConfigLoader,
}

impl RuntimeBuilder {
    /// Creates a new runtime builder.
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new(),
        }
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Sets the configuration profile (e.g., "development", "production").
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: HooksmithConfig) -> Self {
        self.config_loader = self.config_loader.merge(config);
        self
    }

    /// Loads the configuration and builds the runtime.
    pub fn build(self) -> ConfigResult<HooksmithRuntime> {
        let config = self.config_loader.load()?;
        Ok(HooksmithRuntime::from_config(config))
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
