//! Unified error types for the Hooksmith core.
//!
//! Framework-level errors (like `MatcherError`) are defined in
//! hooksmith-framework; configuration errors live in hooksmith-runtime.

use thiserror::Error;

// =============================================================================
// Parse Errors
// =============================================================================

/// Failed to parse an inbound payload.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body is not valid JSON or does not fit the callback shape.
    #[error("failed to parse payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// A category name that does not correspond to any [`EventCategory`](super::category::EventCategory).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event category: {0}")]
pub struct UnknownCategory(pub String);

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors that can occur while serving the webhook.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Binding the listen address failed.
    #[error("failed to bind {addr}: {reason}")]
    BindFailed {
        addr: String,
        reason: String,
    },

    /// The listener failed after binding.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// =============================================================================
// Send Errors
// =============================================================================

/// Errors that can occur while delivering an outgoing response.
#[derive(Debug, Clone, Error)]
pub enum SendError {
    /// The request could not be performed.
    #[error("send request failed: {0}")]
    Http(String),

    /// The platform answered with a non-success status.
    #[error("send API returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response could not be serialised.
    #[error("failed to serialize response: {0}")]
    Serialize(String),

    /// No credentials configured for the send API.
    #[error("send API is not configured: {0}")]
    NotConfigured(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for outbound delivery.
pub type SendResult<T> = Result<T, SendError>;
