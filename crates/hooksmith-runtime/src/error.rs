//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;
use hooksmith_core::{SendError, TransportError};

/// Errors that can occur while starting or running the runtime.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The webhook server could not be started.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The outbound sender could not be created.
    #[error("Sender error: {0}")]
    Sender(#[from] SendError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
