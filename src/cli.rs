// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::QueryFailurePolicy;

/// Command-line arguments for `slurm-monitor`.
///
/// Flags left unset fall back to the config file, then to defaults.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "slurm-monitor",
    version,
    about = "Real-time terminal dashboard and job notifications for SLURM.",
    long_about = None
)]
pub struct CliArgs {
    /// Refresh interval in seconds.
    #[arg(short, long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Show jobs from all users.
    #[arg(short, long)]
    pub all_users: bool,

    /// Watch this user instead of `$USER`.
    #[arg(short, long, value_name = "NAME", conflicts_with = "all_users")]
    pub user: Option<String>,

    /// Print once and exit.
    #[arg(short = '1', long)]
    pub once: bool,

    /// Compact single-table view.
    #[arg(short, long)]
    pub compact: bool,

    /// Path to the config file (TOML).
    ///
    /// Default: `SlurmMonitor.toml` in the current working directory, if it
    /// exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Send a notification when jobs start or finish.
    #[arg(long, conflicts_with = "no_notify")]
    pub notify: bool,

    /// Disable notifications even if the config file enables them.
    #[arg(long)]
    pub no_notify: bool,

    /// Incoming webhook for notifications (also `SLURM_MONITOR_WEBHOOK_URL`).
    #[arg(long, value_name = "URL")]
    pub webhook_url: Option<String>,

    /// Announce jobs that are already running when the monitor starts.
    #[arg(long)]
    pub announce_existing: bool,

    /// What to do when a job query fails: `skip` the cycle or treat it as an
    /// `empty` queue.
    #[arg(long, value_name = "POLICY")]
    pub on_query_failure: Option<QueryFailurePolicy>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SLURM_MONITOR_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Write logs to this file.
    ///
    /// Default: stderr with `--once`, otherwise `slurm-monitor.log` in the
    /// system temp directory, so the live dashboard is never overwritten.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
