//! Configuration module for the Hooksmith runtime.
//!
//! This module provides layered configuration loading (defaults, files,
//! environment) and validation for the webhook endpoint, the send API and
//! logging.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    HooksmithConfig, LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, SendApiConfig,
    SpanEventConfig, WebhookConfig,
};
pub use validation::validate_config;
