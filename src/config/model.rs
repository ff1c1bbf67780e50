// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::types::QueryFailurePolicy;

/// Raw configuration as read from a TOML file, before validation.
///
/// ```toml
/// [monitor]
/// interval = 5
/// all_users = false
/// compact = false
/// query_timeout = "30s"
/// on_query_failure = "skip"
///
/// [notify]
/// enabled = true
/// webhook_url = "https://hooks.slack.com/services/..."
/// timeout = "10s"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub monitor: MonitorSection,

    #[serde(default)]
    pub notify: NotifySection,
}

/// `[monitor]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSection {
    /// Seconds between polls.
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Show jobs of every user instead of only `user`.
    #[serde(default)]
    pub all_users: bool,

    /// Use the single-table view.
    #[serde(default)]
    pub compact: bool,

    /// User to watch; falls back to `$USER`.
    #[serde(default)]
    pub user: Option<String>,

    /// Upper bound for each scheduler query, e.g. `"30s"`.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: String,

    #[serde(default)]
    pub on_query_failure: QueryFailurePolicy,
}

fn default_interval() -> u64 {
    5
}

fn default_query_timeout() -> String {
    "30s".to_string()
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            all_users: false,
            compact: false,
            user: None,
            query_timeout: default_query_timeout(),
            on_query_failure: QueryFailurePolicy::default(),
        }
    }
}

/// `[notify]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifySection {
    #[serde(default)]
    pub enabled: bool,

    /// Slack-compatible incoming webhook. Without one, notifications are
    /// written to the log.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Upper bound for one delivery, e.g. `"10s"`.
    #[serde(default = "default_notify_timeout")]
    pub timeout: String,
}

fn default_notify_timeout() -> String {
    "10s".to_string()
}

impl Default for NotifySection {
    fn default() -> Self {
        Self {
            enabled: false,
            webhook_url: None,
            timeout: default_notify_timeout(),
        }
    }
}

/// Validated configuration file.
///
/// Constructed through `TryFrom<RawConfigFile>` (see `validate.rs`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub monitor: MonitorConfig,
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub interval: Duration,
    pub all_users: bool,
    pub compact: bool,
    pub user: Option<String>,
    pub query_timeout: Duration,
    pub on_query_failure: QueryFailurePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    pub enabled: bool,
    pub webhook_url: Option<String>,
    pub timeout: Duration,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            monitor: MonitorConfig {
                interval: Duration::from_secs(default_interval()),
                all_users: false,
                compact: false,
                user: None,
                query_timeout: Duration::from_secs(30),
                on_query_failure: QueryFailurePolicy::default(),
            },
            notify: NotifyConfig {
                enabled: false,
                webhook_url: None,
                timeout: Duration::from_secs(10),
            },
        }
    }
}
