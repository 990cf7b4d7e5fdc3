//! Logging setup for Hooksmith.
//!
//! Installs a `tracing-subscriber` registry with two layers: an `EnvFilter`
//! and a fmt layer in the configured format. `RUST_LOG`, when set, replaces
//! the configured level; per-module filters are added on top either way.
//!
//! ```rust,ignore
//! use hooksmith_runtime::config::{LogFormat, SpanEventConfig};
//! use hooksmith_runtime::logging::LoggingBuilder;
//!
//! LoggingBuilder::new()
//!     .directive("hooksmith_framework=debug")
//!     .span_events(SpanEventConfig::LIFECYCLE)
//!     .format(LogFormat::Pretty)
//!     .init();
//! ```
//!
//! The runtime calls [`init_from_config`] when built from configuration, so
//! applications only need the builder to log before that point.

use std::path::Path;

use tracing::{Subscriber, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::{LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, SpanEventConfig};

/// Installs logging from `config` unless a global subscriber already exists.
pub fn init_from_config(config: &LoggingConfig) {
    LoggingBuilder::from_config(config).init();
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Never => Rotation::NEVER,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
        }
    }
}

fn fmt_span(events: SpanEventConfig) -> FmtSpan {
    [
        (events.new, FmtSpan::NEW),
        (events.enter, FmtSpan::ENTER),
        (events.exit, FmtSpan::EXIT),
        (events.close, FmtSpan::CLOSE),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .fold(FmtSpan::NONE, |acc, (_, span)| acc | span)
}

/// Builds and installs the global subscriber.
///
/// Starts from a [`LoggingConfig`]; every setter edits that config, so a
/// builder made with [`from_config`](Self::from_config) can still be tweaked.
#[derive(Debug, Clone)]
pub struct LoggingBuilder {
    config: LoggingConfig,
    extra_directives: Vec<String>,
    with_target: bool,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingBuilder {
    /// `info` and above, compact, to stdout.
    pub fn new() -> Self {
        Self::from_config(&LoggingConfig::default())
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            config: config.clone(),
            extra_directives: Vec::new(),
            with_target: true,
        }
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Adds a raw filter directive such as `hooksmith_transport=trace`.
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.extra_directives.push(directive.into());
        self
    }

    pub fn span_events(mut self, events: SpanEventConfig) -> Self {
        self.config.span_events = events;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.config.output = output;
        self
    }

    /// Writes to `path`, rotated per `rotation`.
    pub fn file(mut self, path: impl AsRef<Path>, rotation: LogRotation) -> Self {
        self.config.output = LogOutput::File;
        self.config.file_path = Some(path.as_ref().to_path_buf());
        self.config.rotation = rotation;
        self
    }

    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.config.thread_ids = enabled;
        self
    }

    /// File names and line numbers on every event.
    pub fn with_file_location(mut self, enabled: bool) -> Self {
        self.config.file_location = enabled;
        self
    }

    /// Filter directives in the order they are applied: the level, the
    /// configured per-module filters sorted by module, then raw directives.
    pub fn directives(&self) -> Vec<String> {
        let mut filters: Vec<_> = self.config.filters.iter().collect();
        filters.sort_by_key(|(module, _)| module.as_str());

        std::iter::once(self.config.level.as_str().to_string())
            .chain(
                filters
                    .into_iter()
                    .map(|(module, level)| format!("{module}={level}")),
            )
            .chain(self.extra_directives.iter().cloned())
            .collect()
    }

    fn filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.config.level.as_str()));

        for directive in self.directives().into_iter().skip(1) {
            match directive.parse() {
                Ok(parsed) => filter = filter.add_directive(parsed),
                Err(e) => warn!(%directive, error = %e, "Ignoring invalid log directive"),
            }
        }
        filter
    }

    fn writer(&self) -> BoxMakeWriter {
        match (self.config.output, self.config.file_path.as_deref()) {
            (LogOutput::Stdout, _) => BoxMakeWriter::new(std::io::stdout),
            (LogOutput::Stderr, _) => BoxMakeWriter::new(std::io::stderr),
            (LogOutput::File, Some(path)) => {
                let dir = path.parent().unwrap_or_else(|| Path::new("."));
                let name = path
                    .file_name()
                    .map_or_else(|| "hooksmith.log".into(), |n| n.to_os_string());
                BoxMakeWriter::new(RollingFileAppender::new(
                    self.config.rotation.into(),
                    dir,
                    name,
                ))
            }
            (LogOutput::File, None) => {
                warn!("Log output is 'file' but no file_path is set, logging to stdout");
                BoxMakeWriter::new(std::io::stdout)
            }
        }
    }

    fn fmt_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    {
        let layer = fmt::layer()
            .with_writer(self.writer())
            .with_span_events(fmt_span(self.config.span_events))
            .with_target(self.with_target)
            .with_thread_ids(self.config.thread_ids)
            .with_file(self.config.file_location)
            .with_line_number(self.config.file_location);

        match self.config.format {
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Full => layer.boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            #[cfg(feature = "json-log")]
            LogFormat::Json => layer.json().boxed(),
        }
    }

    /// Installs the subscriber. Fails if one is already installed.
    pub fn try_init(self) -> Result<(), TryInitError> {
        tracing_subscriber::registry()
            .with(self.fmt_layer())
            .with(self.filter())
            .try_init()
    }

    /// Like [`try_init`](Self::try_init), ignoring an existing subscriber.
    pub fn init(self) {
        let _ = self.try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_span_from_config() {
        assert_eq!(fmt_span(SpanEventConfig::NONE), FmtSpan::NONE);
        assert_eq!(
            fmt_span(SpanEventConfig::LIFECYCLE),
            FmtSpan::NEW | FmtSpan::CLOSE
        );
        assert_eq!(fmt_span(SpanEventConfig::FULL), FmtSpan::FULL);
    }

    #[test]
    fn test_directives_order() {
        let mut config = LoggingConfig {
            level: LogLevel::Warn,
            ..Default::default()
        };
        config
            .filters
            .insert("hooksmith_transport".to_string(), LogLevel::Trace);
        config
            .filters
            .insert("hooksmith_framework".to_string(), LogLevel::Debug);

        let builder = LoggingBuilder::from_config(&config).directive("axum=error");
        assert_eq!(
            builder.directives(),
            vec![
                "warn",
                "hooksmith_framework=debug",
                "hooksmith_transport=trace",
                "axum=error",
            ]
        );
    }

    #[test]
    fn test_setters_edit_config() {
        let builder = LoggingBuilder::new()
            .level(LogLevel::Debug)
            .file("/var/log/hooksmith/bot.log", LogRotation::Daily);
        assert_eq!(builder.config.output, LogOutput::File);
        assert_eq!(builder.config.rotation, LogRotation::Daily);
        assert_eq!(builder.directives(), vec!["debug"]);
    }

    #[test]
    fn test_rotation_mapping() {
        assert_eq!(Rotation::from(LogRotation::Daily), Rotation::DAILY);
        assert_eq!(Rotation::from(LogRotation::Never), Rotation::NEVER);
    }
}
