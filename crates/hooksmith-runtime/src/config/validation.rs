//! Checks run on a loaded configuration before the runtime starts.
//!
//! Loading never fails on empty or out-of-range values; `validate_config`
//! does, so a missing validation token is reported before anything binds.

use super::error::{ConfigError, ConfigResult};
use super::schema::{HooksmithConfig, LogOutput, LoggingConfig, SendApiConfig, WebhookConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &HooksmithConfig) -> ConfigResult<()> {
    check_logging(&config.logging)?;
    check_webhook(&config.webhook)?;
    check_send_api(&config.send_api)
}

fn check_logging(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::MissingField("logging.file_path"));
    }
    Ok(())
}

fn check_webhook(webhook: &WebhookConfig) -> ConfigResult<()> {
    if webhook.validation_token.is_empty() {
        return Err(ConfigError::MissingField("webhook.validation_token"));
    }
    if webhook.host.is_empty() {
        return Err(ConfigError::MissingField("webhook.host"));
    }
    if webhook.port == 0 {
        return Err(ConfigError::InvalidPort(webhook.port));
    }
    if !webhook.path.starts_with('/') {
        return Err(ConfigError::InvalidPath(webhook.path.clone()));
    }
    Ok(())
}

/// Only checked when a page token is set; otherwise the send API is unused.
fn check_send_api(send_api: &SendApiConfig) -> ConfigResult<()> {
    if !send_api.is_configured() {
        return Ok(());
    }

    if send_api.url.is_empty() {
        return Err(ConfigError::MissingField("send_api.url"));
    }
    if !(send_api.url.starts_with("https://") || send_api.url.starts_with("http://")) {
        return Err(ConfigError::InvalidUrl {
            url: send_api.url.clone(),
            reason: "expected an http or https url",
        });
    }
    if send_api.timeout_secs == 0 {
        return Err(ConfigError::InvalidTimeout);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn valid() -> HooksmithConfig {
        let mut config = HooksmithConfig::default();
        config.webhook.validation_token = "secret".to_string();
        config
    }

    #[test]
    fn test_validate_minimal_config() {
        assert_eq!(validate_config(&valid()), Ok(()));
    }

    #[test]
    fn test_validation_token_is_required() {
        assert_eq!(
            validate_config(&HooksmithConfig::default()),
            Err(ConfigError::MissingField("webhook.validation_token"))
        );
    }

    #[test]
    fn test_validate_port() {
        let mut config = valid();
        config.webhook.port = 0;
        assert_eq!(validate_config(&config), Err(ConfigError::InvalidPort(0)));
    }

    #[test]
    fn test_validate_path() {
        let mut config = valid();
        config.webhook.path = "webhook".to_string();
        assert_eq!(
            validate_config(&config),
            Err(ConfigError::InvalidPath("webhook".to_string()))
        );
    }

    #[test]
    fn test_file_output_requires_path() {
        let mut config = valid();
        config.logging.output = LogOutput::File;
        assert_eq!(
            validate_config(&config),
            Err(ConfigError::MissingField("logging.file_path"))
        );

        config.logging.file_path = Some(PathBuf::from("/tmp/hooksmith.log"));
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_send_api_checked_only_when_configured() {
        let mut config = valid();
        config.send_api.url = "ftp://example.com".to_string();
        config.send_api.timeout_secs = 0;
        assert_eq!(validate_config(&config), Ok(()));

        config.send_api.page_token = Some("token".to_string());
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::InvalidUrl { .. })
        ));

        config.send_api.url = "https://example.com/messages".to_string();
        assert_eq!(validate_config(&config), Err(ConfigError::InvalidTimeout));
    }
}
