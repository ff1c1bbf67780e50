#![allow(dead_code, unused_imports)]

pub use slurm_monitor_test_utils::{builders, fake_presenter, fake_sink, fake_source};
pub use slurm_monitor_test_utils::{init_tracing, with_timeout};

use slurm_monitor::slurm::JobId;
use slurm_monitor::tracker::{EventKind, JobEvent};

/// `(id, kind)` pairs, in emission order.
pub fn summarize(events: &[JobEvent]) -> Vec<(JobId, EventKind)> {
    events
        .iter()
        .map(|e| (e.record.id.clone(), e.kind))
        .collect()
}
