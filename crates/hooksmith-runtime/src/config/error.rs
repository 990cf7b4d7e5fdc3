//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Why configuration could not be loaded or was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file extension is unknown or its format feature is disabled.
    #[error("unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The merged sources do not deserialize into [`HooksmithConfig`](super::HooksmithConfig).
    #[error("failed to extract configuration: {0}")]
    Extract(String),

    /// A required value is empty or absent.
    #[error("missing required configuration field: {0}")]
    MissingField(&'static str),

    #[error("invalid webhook port: {0}")]
    InvalidPort(u16),

    /// The webhook path is not absolute.
    #[error("webhook path must start with '/': {0:?}")]
    InvalidPath(String),

    #[error("invalid send API url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: &'static str },

    /// The send API timeout is zero.
    #[error("send_api.timeout_secs must be greater than 0")]
    InvalidTimeout,
}

pub type ConfigResult<T> = Result<T, ConfigError>;
