// src/tracker/core.rs

//! Pure job-tracking state machine.
//!
//! `JobTracker` consumes whole queue snapshots and produces the lifecycle
//! events implied by the difference to the previous one. It has no channels,
//! no Tokio types and performs no IO, so it can be driven step by step in
//! tests.

use std::collections::HashSet;

use tracing::debug;

use crate::slurm::{JobId, JobState, Snapshot};
use crate::tracker::JobEvent;

/// Diffing state carried from one poll to the next.
///
/// - `previous` is the last snapshot processed, replaced wholesale on every
///   update.
/// - `announced_starts` holds ids already credited with a `Started` event. It
///   only ever contains ids present in `previous`.
#[derive(Debug, Default)]
pub struct JobTracker {
    previous: Snapshot,
    announced_starts: HashSet<JobId>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tracker that treats `initial` as already known.
    pub fn seeded(initial: Snapshot) -> Self {
        let mut tracker = Self::new();
        tracker.seed(initial);
        tracker
    }

    /// Adopt `initial` as the baseline without emitting anything.
    ///
    /// Jobs already running are credited with their start, so only changes
    /// after this point are reported.
    pub fn seed(&mut self, initial: Snapshot) {
        self.announced_starts = initial.running().map(|r| r.id.clone()).collect();
        debug!(
            jobs = initial.len(),
            running = self.announced_starts.len(),
            "seeded job tracker"
        );
        self.previous = initial;
    }

    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    pub fn announced_starts(&self) -> &HashSet<JobId> {
        &self.announced_starts
    }

    /// Compare `current` with the previous snapshot and return the inferred
    /// events: completions first, then starts, each in id order.
    ///
    /// An empty `current` means every previously running job completed.
    pub fn diff(&mut self, current: Snapshot) -> Vec<JobEvent> {
        let mut events = Vec::new();

        // Left the queue while running. Jobs that vanish while pending
        // (cancelled before they ever ran) are dropped silently.
        for prev in self.previous.records() {
            if !current.contains(&prev.id) && prev.state == JobState::Running {
                debug!(job_id = %prev.id, "job left the queue while running");
                events.push(JobEvent::completed(prev.clone()));
            }
        }

        for record in current.running() {
            if self.announced_starts.contains(&record.id) {
                continue;
            }

            let newly_running = match self.previous.get(&record.id) {
                None => true,
                Some(prev) => prev.state.is_pending(),
            };
            if newly_running {
                debug!(job_id = %record.id, "job started");
                self.announced_starts.insert(record.id.clone());
                events.push(JobEvent::started(record.clone()));
            }
        }

        // Ids that disappeared may be reused by the scheduler later.
        self.announced_starts.retain(|id| current.contains(id));
        self.previous = current;

        events
    }
}
