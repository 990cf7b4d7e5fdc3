//! Configuration schema definitions.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HooksmithConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// The inbound webhook endpoint.
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// The outbound send API.
    #[serde(default)]
    pub send_api: SendApiConfig,
}

// =============================================================================
// Logging
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Output destination.
    #[serde(default)]
    pub output: LogOutput,

    /// Log file, required when `output = "file"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,

    /// Rotation policy for file output.
    #[serde(default)]
    pub rotation: LogRotation,

    /// Include thread IDs.
    #[serde(default)]
    pub thread_ids: bool,

    /// Include file names and line numbers.
    #[serde(default)]
    pub file_location: bool,

    /// Span lifecycle events to log.
    #[serde(default)]
    pub span_events: SpanEventConfig,

    /// Per-module level overrides, e.g. `hooksmith_framework = "debug"`.
    #[serde(default)]
    pub filters: HashMap<String, LogLevel>,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    #[cfg(feature = "json-log")]
    Json,
}

/// Log output destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// Log file rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Hourly,
    Daily,
}

/// Which span lifecycle events to log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanEventConfig {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub enter: bool,
    #[serde(default)]
    pub exit: bool,
    #[serde(default)]
    pub close: bool,
}

impl SpanEventConfig {
    pub const NONE: Self = Self {
        new: false,
        enter: false,
        exit: false,
        close: false,
    };

    /// Span creation and close, one line each per dispatch.
    pub const LIFECYCLE: Self = Self {
        new: true,
        enter: false,
        exit: false,
        close: true,
    };

    pub const FULL: Self = Self {
        new: true,
        enter: true,
        exit: true,
        close: true,
    };
}

// =============================================================================
// Webhook
// =============================================================================

/// The inbound webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Host to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path the webhook is served on.
    #[serde(default = "default_path")]
    pub path: String,

    /// Token the platform must present during the subscription handshake.
    #[serde(default)]
    pub validation_token: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
            validation_token: String::new(),
        }
    }
}

impl WebhookConfig {
    /// The `host:port` bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_path() -> String {
    "/webhook".to_string()
}

// =============================================================================
// Send API
// =============================================================================

/// The outbound send API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendApiConfig {
    /// Endpoint responses are posted to.
    #[serde(default = "default_send_api_url")]
    pub url: String,

    /// Page access token. Without one, responses are only logged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SendApiConfig {
    fn default() -> Self {
        Self {
            url: default_send_api_url(),
            page_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SendApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether a page token is configured.
    pub fn is_configured(&self) -> bool {
        self.page_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

fn default_send_api_url() -> String {
    "https://graph.facebook.com/v2.6/me/messages".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HooksmithConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.webhook.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.webhook.path, "/webhook");
        assert_eq!(config.send_api.timeout(), Duration::from_secs(30));
        assert!(!config.send_api.is_configured());
    }

    #[test]
    fn test_empty_token_is_not_configured() {
        let send_api = SendApiConfig {
            page_token: Some(String::new()),
            ..Default::default()
        };
        assert!(!send_api.is_configured());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: HooksmithConfig = serde_json::from_str(
            r#"{ "webhook": { "port": 3000, "validation_token": "t" }, "logging": { "level": "debug" } }"#,
        )
        .unwrap();
        assert_eq!(config.webhook.port, 3000);
        assert_eq!(config.webhook.host, "0.0.0.0");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_log_level_names_are_filter_directives() {
        let levels = [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ];
        for level in levels {
            let parsed: LogLevel =
                serde_json::from_value(serde_json::Value::from(level.as_str())).unwrap();
            assert_eq!(parsed, level);
            assert_eq!(level.to_string(), level.as_str());
            assert!(level.as_str().parse::<tracing_subscriber::filter::LevelFilter>().is_ok());
        }
    }
}
