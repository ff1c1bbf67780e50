// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{
    ConfigFile, MonitorConfig, MonitorSection, NotifyConfig, NotifySection, RawConfigFile,
};
use crate::errors::{MonitorError, Result};
use crate::types::parse_duration;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = MonitorError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        Ok(ConfigFile {
            monitor: validate_monitor(raw.monitor)?,
            notify: validate_notify(raw.notify)?,
        })
    }
}

fn validate_monitor(section: MonitorSection) -> Result<MonitorConfig> {
    validate_interval(section.interval)?;
    let query_timeout = positive_duration("[monitor].query_timeout", &section.query_timeout)?;

    if let Some(user) = &section.user {
        if user.trim().is_empty() {
            return Err(MonitorError::ConfigError(
                "[monitor].user must not be empty".to_string(),
            ));
        }
    }

    Ok(MonitorConfig {
        interval: Duration::from_secs(section.interval),
        all_users: section.all_users,
        compact: section.compact,
        user: section.user,
        query_timeout,
        on_query_failure: section.on_query_failure,
    })
}

fn validate_notify(section: NotifySection) -> Result<NotifyConfig> {
    let timeout = positive_duration("[notify].timeout", &section.timeout)?;
    if let Some(url) = &section.webhook_url {
        validate_webhook_url(url)?;
    }

    Ok(NotifyConfig {
        enabled: section.enabled,
        webhook_url: section.webhook_url,
        timeout,
    })
}

/// Poll interval must be a whole number of seconds, at least one.
pub fn validate_interval(secs: u64) -> Result<()> {
    if secs == 0 {
        return Err(MonitorError::ConfigError(
            "poll interval must be >= 1 second (got 0)".to_string(),
        ));
    }
    Ok(())
}

/// Webhook URLs must be http(s).
pub fn validate_webhook_url(url: &str) -> Result<()> {
    let url = url.trim();
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(MonitorError::ConfigError(format!(
            "webhook url '{url}' must start with http:// or https://"
        )))
    }
}

fn positive_duration(field: &str, raw: &str) -> Result<Duration> {
    let value = parse_duration(raw)
        .map_err(|e| MonitorError::ConfigError(format!("{field}: {e}")))?;
    if value.is_zero() {
        return Err(MonitorError::ConfigError(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(value)
}
