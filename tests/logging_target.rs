// tests/logging_target.rs

use std::path::{Path, PathBuf};

use slurm_monitor::logging::{default_log_path, log_target, parse_level_str, LogTarget};

#[test]
fn live_dashboard_never_logs_to_the_terminal() {
    assert_eq!(log_target(false, None), LogTarget::File(default_log_path()));
    assert_ne!(log_target(false, None), LogTarget::Stderr);
}

#[test]
fn explicit_log_file_wins() {
    let path = Path::new("/var/log/slurm-monitor.log");

    assert_eq!(log_target(false, Some(path)), LogTarget::File(PathBuf::from(path)));
    assert_eq!(log_target(true, Some(path)), LogTarget::File(PathBuf::from(path)));
}

#[test]
fn one_shot_logs_to_stderr() {
    assert_eq!(log_target(true, None), LogTarget::Stderr);
}

#[test]
fn default_log_file_lives_in_temp_dir() {
    let path = default_log_path();

    assert!(path.starts_with(std::env::temp_dir()));
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("slurm-monitor.log"));
}

#[test]
fn level_names() {
    assert_eq!(parse_level_str(" Warning "), Some(tracing::Level::WARN));
    assert_eq!(parse_level_str("debug"), Some(tracing::Level::DEBUG));
    assert_eq!(parse_level_str("loud"), None);
}
