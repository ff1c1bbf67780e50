// src/slurm/job.rs

//! Job records and point-in-time queue snapshots.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::str::FromStr;

/// Scheduler job identifier.
///
/// Kept as a string: array and step jobs carry suffixes like `1234_7` or
/// `1234.0`.
pub type JobId = String;

/// Scheduler job state as far as the monitor cares.
///
/// Only `RUNNING` and `PENDING` drive tracking decisions; every other state
/// string is carried through for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobState {
    Running,
    Pending,
    Other(String),
}

impl JobState {
    pub fn is_running(&self) -> bool {
        matches!(self, JobState::Running)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, JobState::Pending)
    }
}

impl FromStr for JobState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Ok(match upper.as_str() {
            "RUNNING" | "R" => JobState::Running,
            "PENDING" | "PD" => JobState::Pending,
            _ => JobState::Other(upper),
        })
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobState::Running => f.write_str("RUNNING"),
            JobState::Pending => f.write_str("PENDING"),
            JobState::Other(s) => f.write_str(s),
        }
    }
}

/// One row of the job queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub id: JobId,
    pub name: String,
    pub user: String,
    pub partition: String,
    pub state: JobState,
    /// Elapsed run time as printed by the scheduler (`%M`).
    pub elapsed: String,
    /// Time limit as printed by the scheduler (`%l`).
    pub time_limit: String,
    /// Node count (`%D`).
    pub nodes: String,
    /// Pending reason or node list (`%R`).
    pub reason: String,
    /// Requested generic resources (`%b`), e.g. `gpu:a100:2`.
    pub gres: String,
}

/// All jobs visible at one poll, keyed by id.
///
/// Iteration is ordered by id so every consumer sees the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    jobs: BTreeMap<JobId, JobRecord>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any previous record with the same id.
    pub fn insert(&mut self, record: JobRecord) -> Option<JobRecord> {
        self.jobs.insert(record.id.clone(), record)
    }

    pub fn get(&self, id: &str) -> Option<&JobRecord> {
        self.jobs.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.jobs.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &JobId> {
        self.jobs.keys()
    }

    pub fn records(&self) -> impl Iterator<Item = &JobRecord> {
        self.jobs.values()
    }

    pub fn running(&self) -> impl Iterator<Item = &JobRecord> {
        self.records().filter(|r| r.state.is_running())
    }

    pub fn pending(&self) -> impl Iterator<Item = &JobRecord> {
        self.records().filter(|r| r.state.is_pending())
    }
}

impl FromIterator<JobRecord> for Snapshot {
    fn from_iter<I: IntoIterator<Item = JobRecord>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for record in iter {
            snapshot.insert(record);
        }
        snapshot
    }
}

impl IntoIterator for Snapshot {
    type Item = (JobId, JobRecord);
    type IntoIter = btree_map::IntoIter<JobId, JobRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.into_iter()
    }
}
