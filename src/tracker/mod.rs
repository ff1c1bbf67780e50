// src/tracker/mod.rs

//! Job lifecycle tracking.
//!
//! The scheduler listing only ever says which jobs exist *now*. Starts and
//! completions are inferred by diffing successive snapshots:
//!
//! - the pure diffing state machine lives in [`core`] (`JobTracker`);
//! - [`runtime`] wraps it with batch notification delivery (`Tracker`).

use std::fmt;

use crate::slurm::JobRecord;

/// Inferred lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The job was first seen RUNNING (new, or previously PENDING).
    Started,
    /// The job left the queue while RUNNING. Cancelled, failed and preempted
    /// jobs look exactly the same from the queue listing.
    Completed,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Started => f.write_str("started"),
            EventKind::Completed => f.write_str("completed"),
        }
    }
}

/// A transition together with the record it applies to.
///
/// For `Started` this is the current record, for `Completed` the last record
/// seen before the job disappeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEvent {
    pub record: JobRecord,
    pub kind: EventKind,
}

impl JobEvent {
    pub fn started(record: JobRecord) -> Self {
        Self {
            record,
            kind: EventKind::Started,
        }
    }

    pub fn completed(record: JobRecord) -> Self {
        Self {
            record,
            kind: EventKind::Completed,
        }
    }
}

pub mod core;
pub mod runtime;

pub use self::core::JobTracker;
pub use runtime::Tracker;
