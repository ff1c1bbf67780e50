#![allow(dead_code)]

use slurm_monitor::slurm::{JobRecord, JobState, Snapshot};

/// Builder for `JobRecord` to simplify test setup.
pub struct JobRecordBuilder {
    record: JobRecord,
}

impl JobRecordBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            record: JobRecord {
                id: id.to_string(),
                name: format!("job-{id}"),
                user: "alice".to_string(),
                partition: "gpu".to_string(),
                state: JobState::Pending,
                elapsed: "0:00".to_string(),
                time_limit: "1-00:00:00".to_string(),
                nodes: "1".to_string(),
                reason: "(Priority)".to_string(),
                gres: "N/A".to_string(),
            },
        }
    }

    pub fn running(mut self) -> Self {
        self.record.state = JobState::Running;
        self.record.reason = "node01".to_string();
        self
    }

    pub fn pending(mut self) -> Self {
        self.record.state = JobState::Pending;
        self
    }

    pub fn state(mut self, state: JobState) -> Self {
        self.record.state = state;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.record.name = name.to_string();
        self
    }

    pub fn user(mut self, user: &str) -> Self {
        self.record.user = user.to_string();
        self
    }

    pub fn partition(mut self, partition: &str) -> Self {
        self.record.partition = partition.to_string();
        self
    }

    pub fn gres(mut self, gres: &str) -> Self {
        self.record.gres = gres.to_string();
        self
    }

    pub fn reason(mut self, reason: &str) -> Self {
        self.record.reason = reason.to_string();
        self
    }

    pub fn elapsed(mut self, elapsed: &str) -> Self {
        self.record.elapsed = elapsed.to_string();
        self
    }

    pub fn build(self) -> JobRecord {
        self.record
    }
}

/// Builder for `Snapshot`.
#[derive(Default)]
pub struct SnapshotBuilder {
    records: Vec<JobRecord>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running(mut self, id: &str) -> Self {
        self.records.push(JobRecordBuilder::new(id).running().build());
        self
    }

    pub fn pending(mut self, id: &str) -> Self {
        self.records.push(JobRecordBuilder::new(id).pending().build());
        self
    }

    pub fn with(mut self, record: JobRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn build(self) -> Snapshot {
        self.records.into_iter().collect()
    }
}

/// Shorthand: snapshot of the given `(id, running?)` pairs.
pub fn snapshot_of(jobs: &[(&str, bool)]) -> Snapshot {
    jobs.iter()
        .fold(SnapshotBuilder::new(), |b, (id, running)| {
            if *running {
                b.running(id)
            } else {
                b.pending(id)
            }
        })
        .build()
}
