// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! The IO boundaries carry their own typed errors ([`SourceError`] for
//! scheduler queries, [`NotifyError`] for notification delivery) so the poll
//! loop can branch on them and never abort on them; [`MonitorError`] covers
//! configuration and startup failures.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Failure to obtain a snapshot from the scheduler.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("`{command}` timed out after {after:?}")]
    Timeout { command: String, after: Duration },

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}: {stderr}")]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("`{command}` produced non UTF-8 output")]
    InvalidUtf8 { command: String },
}

/// Failure to deliver a notification. Never fatal.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sink returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
