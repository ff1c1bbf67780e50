// src/config/settings.rs

//! Final settings: CLI flags over environment over config file over defaults.

use std::time::Duration;

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::config::validate::{validate_interval, validate_webhook_url};
use crate::dashboard::ViewMode;
use crate::errors::Result;
use crate::types::QueryFailurePolicy;

/// Environment variable holding the webhook URL.
pub const WEBHOOK_ENV: &str = "SLURM_MONITOR_WEBHOOK_URL";

/// Notification settings; present only when notifications are enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifySettings {
    /// `None` means notifications go to the log.
    pub webhook_url: Option<String>,
    pub timeout: Duration,
}

/// Everything `run` needs, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    /// User passed to `squeue -u`; `None` lists all users.
    pub user_filter: Option<String>,
    /// Shown in the header and in the shutdown notice.
    pub user_label: String,
    pub interval: Duration,
    pub once: bool,
    pub mode: ViewMode,
    pub query_timeout: Duration,
    pub on_query_failure: QueryFailurePolicy,
    pub announce_existing: bool,
    pub notify: Option<NotifySettings>,
}

impl MonitorSettings {
    /// Resolve from the process environment.
    pub fn resolve(args: &CliArgs, file: ConfigFile) -> Result<Self> {
        Self::resolve_with_env(args, file, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup.
    pub fn resolve_with_env<F>(args: &CliArgs, file: ConfigFile, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let monitor = file.monitor;

        let interval_secs = args.interval.unwrap_or(monitor.interval.as_secs());
        validate_interval(interval_secs)?;

        let all_users = args.all_users || (monitor.all_users && args.user.is_none());
        let user = args
            .user
            .clone()
            .or(monitor.user)
            .or_else(|| env("USER"))
            .unwrap_or_else(|| "unknown".to_string());
        let (user_filter, user_label) = if all_users {
            (None, "All Users".to_string())
        } else {
            (Some(user.clone()), user)
        };

        let mode = if args.compact || monitor.compact {
            ViewMode::Compact
        } else {
            ViewMode::Dashboard
        };

        let notify_enabled = !args.no_notify && (args.notify || file.notify.enabled);
        let notify = if notify_enabled {
            let webhook_url = args
                .webhook_url
                .clone()
                .or_else(|| env(WEBHOOK_ENV).filter(|s| !s.trim().is_empty()))
                .or(file.notify.webhook_url);
            if let Some(url) = &webhook_url {
                validate_webhook_url(url)?;
            }
            Some(NotifySettings {
                webhook_url,
                timeout: file.notify.timeout,
            })
        } else {
            None
        };

        Ok(Self {
            user_filter,
            user_label,
            interval: Duration::from_secs(interval_secs),
            once: args.once,
            mode,
            query_timeout: monitor.query_timeout,
            on_query_failure: args.on_query_failure.unwrap_or(monitor.on_query_failure),
            announce_existing: args.announce_existing,
            notify,
        })
    }
}
