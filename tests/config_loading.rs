// tests/config_loading.rs

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tempfile::TempDir;

use slurm_monitor::cli::CliArgs;
use slurm_monitor::config::{load_and_validate, ConfigFile, MonitorSettings, NotifySettings};
use slurm_monitor::dashboard::ViewMode;
use slurm_monitor::errors::MonitorError;
use slurm_monitor::types::{parse_duration, QueryFailurePolicy};

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(contents: &str) -> Result<(TempDir, PathBuf), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("SlurmMonitor.toml");
    fs::write(&path, contents)?;
    Ok((dir, path))
}

fn args(argv: &[&str]) -> CliArgs {
    CliArgs::parse_from(std::iter::once("slurm-monitor").chain(argv.iter().copied()))
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn empty_file_uses_defaults() -> TestResult {
    let (_dir, path) = write_config("")?;

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg, ConfigFile::default());
    assert_eq!(cfg.monitor.interval, Duration::from_secs(5));
    assert_eq!(cfg.monitor.query_timeout, Duration::from_secs(30));
    assert_eq!(cfg.monitor.on_query_failure, QueryFailurePolicy::Skip);
    assert!(!cfg.notify.enabled);
    Ok(())
}

#[test]
fn full_file_is_parsed() -> TestResult {
    let (_dir, path) = write_config(
        r#"
[monitor]
interval = 10
all_users = true
compact = true
query_timeout = "45s"
on_query_failure = "empty"

[notify]
enabled = true
webhook_url = "https://hooks.example.com/T000/B000"
timeout = "500ms"
"#,
    )?;

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.monitor.interval, Duration::from_secs(10));
    assert!(cfg.monitor.all_users);
    assert!(cfg.monitor.compact);
    assert_eq!(cfg.monitor.query_timeout, Duration::from_secs(45));
    assert_eq!(cfg.monitor.on_query_failure, QueryFailurePolicy::Empty);
    assert!(cfg.notify.enabled);
    assert_eq!(
        cfg.notify.webhook_url.as_deref(),
        Some("https://hooks.example.com/T000/B000")
    );
    assert_eq!(cfg.notify.timeout, Duration::from_millis(500));
    Ok(())
}

#[test]
fn zero_interval_is_rejected() -> TestResult {
    let (_dir, path) = write_config("[monitor]\ninterval = 0\n")?;

    let err = load_and_validate(&path).expect_err("interval 0 must be rejected");
    assert!(matches!(err, MonitorError::ConfigError(ref msg) if msg.contains(">= 1 second")));
    Ok(())
}

#[test]
fn invalid_durations_are_rejected() -> TestResult {
    for contents in [
        "[monitor]\nquery_timeout = \"soon\"\n",
        "[monitor]\nquery_timeout = \"30\"\n",
        "[notify]\ntimeout = \"0s\"\n",
    ] {
        let (_dir, path) = write_config(contents)?;
        let err = load_and_validate(&path).expect_err(contents);
        assert!(matches!(err, MonitorError::ConfigError(_)), "{contents}: {err:?}");
    }
    Ok(())
}

#[test]
fn bad_webhook_url_is_rejected() -> TestResult {
    let (_dir, path) = write_config("[notify]\nwebhook_url = \"hooks.example.com\"\n")?;

    assert!(matches!(
        load_and_validate(&path),
        Err(MonitorError::ConfigError(_))
    ));
    Ok(())
}

#[test]
fn unknown_policy_is_a_toml_error() -> TestResult {
    let (_dir, path) = write_config("[monitor]\non_query_failure = \"retry\"\n")?;

    assert!(matches!(load_and_validate(&path), Err(MonitorError::TomlError(_))));
    Ok(())
}

#[test]
fn duration_units() {
    assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
    assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
    assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
    assert!(parse_duration("").is_err());
    assert!(parse_duration("5d").is_err());
}

#[test]
fn defaults_watch_the_current_user() -> TestResult {
    let settings = MonitorSettings::resolve_with_env(&args(&[]), ConfigFile::default(), |key| {
        (key == "USER").then(|| "alice".to_string())
    })?;

    assert_eq!(settings.user_filter.as_deref(), Some("alice"));
    assert_eq!(settings.user_label, "alice");
    assert_eq!(settings.interval, Duration::from_secs(5));
    assert_eq!(settings.mode, ViewMode::Dashboard);
    assert!(!settings.once);
    assert!(!settings.announce_existing);
    assert_eq!(settings.notify, None);
    Ok(())
}

#[test]
fn missing_user_falls_back_to_unknown() -> TestResult {
    let settings = MonitorSettings::resolve_with_env(&args(&[]), ConfigFile::default(), no_env)?;

    assert_eq!(settings.user_label, "unknown");
    Ok(())
}

#[test]
fn all_users_drops_the_filter() -> TestResult {
    let settings = MonitorSettings::resolve_with_env(
        &args(&["-a", "-c", "-1", "-i", "30"]),
        ConfigFile::default(),
        no_env,
    )?;

    assert_eq!(settings.user_filter, None);
    assert_eq!(settings.user_label, "All Users");
    assert_eq!(settings.mode, ViewMode::Compact);
    assert!(settings.once);
    assert_eq!(settings.interval, Duration::from_secs(30));
    Ok(())
}

#[test]
fn cli_overrides_file() -> TestResult {
    let (_dir, path) = write_config(
        "[monitor]\ninterval = 10\nall_users = true\non_query_failure = \"empty\"\n",
    )?;
    let file = load_and_validate(&path)?;

    let settings = MonitorSettings::resolve_with_env(
        &args(&["--interval", "2", "--user", "bob", "--on-query-failure", "skip"]),
        file,
        no_env,
    )?;

    assert_eq!(settings.interval, Duration::from_secs(2));
    assert_eq!(settings.user_filter.as_deref(), Some("bob"));
    assert_eq!(settings.on_query_failure, QueryFailurePolicy::Skip);
    Ok(())
}

#[test]
fn webhook_precedence_is_cli_then_env_then_file() -> TestResult {
    let (_dir, path) = write_config(
        "[notify]\nenabled = true\nwebhook_url = \"https://file.example.com/hook\"\ntimeout = \"3s\"\n",
    )?;
    let env = |key: &str| {
        (key == "SLURM_MONITOR_WEBHOOK_URL").then(|| "https://env.example.com/hook".to_string())
    };

    let from_file = MonitorSettings::resolve_with_env(&args(&[]), load_and_validate(&path)?, no_env)?;
    assert_eq!(
        from_file.notify,
        Some(NotifySettings {
            webhook_url: Some("https://file.example.com/hook".to_string()),
            timeout: Duration::from_secs(3),
        })
    );

    let from_env = MonitorSettings::resolve_with_env(&args(&[]), load_and_validate(&path)?, env)?;
    assert_eq!(
        from_env.notify.and_then(|n| n.webhook_url).as_deref(),
        Some("https://env.example.com/hook")
    );

    let from_cli = MonitorSettings::resolve_with_env(
        &args(&["--webhook-url", "https://cli.example.com/hook"]),
        load_and_validate(&path)?,
        env,
    )?;
    assert_eq!(
        from_cli.notify.and_then(|n| n.webhook_url).as_deref(),
        Some("https://cli.example.com/hook")
    );

    let disabled =
        MonitorSettings::resolve_with_env(&args(&["--no-notify"]), load_and_validate(&path)?, env)?;
    assert_eq!(disabled.notify, None);
    Ok(())
}

#[test]
fn notify_without_webhook_logs_instead() -> TestResult {
    let settings =
        MonitorSettings::resolve_with_env(&args(&["--notify"]), ConfigFile::default(), no_env)?;

    assert_eq!(
        settings.notify,
        Some(NotifySettings {
            webhook_url: None,
            timeout: Duration::from_secs(10),
        })
    );
    Ok(())
}

#[test]
fn invalid_cli_webhook_is_rejected() {
    let result = MonitorSettings::resolve_with_env(
        &args(&["--notify", "--webhook-url", "ftp://example.com"]),
        ConfigFile::default(),
        no_env,
    );

    assert!(matches!(result, Err(MonitorError::ConfigError(_))));
}

#[test]
fn conflicting_flags_are_rejected_by_the_parser() {
    let argv = ["slurm-monitor", "--all-users", "--user", "bob"];
    assert!(CliArgs::try_parse_from(argv).is_err());

    let argv = ["slurm-monitor", "--interval", "0"];
    assert!(CliArgs::try_parse_from(argv).is_err());
}
