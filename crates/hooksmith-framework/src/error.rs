//! Error types for the Hooksmith framework.

use thiserror::Error;

/// Errors that can occur while building matchers.
#[derive(Debug, Clone, Error)]
pub enum MatcherError {
    /// The regular expression failed to compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compilation error.
        #[source]
        source: regex::Error,
    },
}

impl MatcherError {
    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}

/// Result type for matcher construction.
pub type MatcherResult<T> = Result<T, MatcherError>;
