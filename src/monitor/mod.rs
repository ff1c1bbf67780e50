// src/monitor/mod.rs

//! The poll loop.
//!
//! One task drives source → tracker → presenter → sleep in strict sequence.
//! Shutdown requests arrive as [`MonitorEvent`]s over an mpsc channel and are
//! only looked at between polls, never in the middle of one.

use std::time::Duration;

use crate::types::QueryFailurePolicy;

/// Events flowing into the poll loop from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Graceful shutdown requested (e.g. Ctrl-C or SIGTERM).
    ShutdownRequested,
}

/// Poll loop options.
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    pub interval: Duration,
    pub on_query_failure: QueryFailurePolicy,
    /// Report jobs already running at startup instead of adopting them
    /// silently.
    pub announce_existing: bool,
    pub user_label: String,
}

pub mod poll_loop;
pub mod signals;

pub use poll_loop::{snapshot_view, Monitor, PollOutcome};
pub use signals::spawn_signal_listener;
