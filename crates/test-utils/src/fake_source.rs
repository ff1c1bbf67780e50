use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use slurm_monitor::errors::SourceError;
use slurm_monitor::monitor::MonitorEvent;
use slurm_monitor::slurm::source::SourceFuture;
use slurm_monitor::slurm::{ClusterInfo, Snapshot, SnapshotSource};

/// A scripted snapshot source that:
/// - returns the queued job results in order
/// - keeps returning the last snapshot once the script runs out, and
///   requests shutdown (if wired to the monitor channel) at that point.
pub struct FakeSource {
    script: VecDeque<Result<Snapshot, SourceError>>,
    last: Snapshot,
    cluster: Option<ClusterInfo>,
    polls: Arc<AtomicUsize>,
    shutdown_tx: Option<mpsc::Sender<MonitorEvent>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            last: Snapshot::new(),
            cluster: Some(ClusterInfo::default()),
            polls: Arc::new(AtomicUsize::new(0)),
            shutdown_tx: None,
        }
    }

    /// Queue a successful poll.
    pub fn then(mut self, snapshot: Snapshot) -> Self {
        self.script.push_back(Ok(snapshot));
        self
    }

    /// Queue a failed poll.
    pub fn then_fail(mut self) -> Self {
        self.script.push_back(Err(query_timeout()));
        self
    }

    pub fn with_cluster(mut self, cluster: Option<ClusterInfo>) -> Self {
        self.cluster = cluster;
        self
    }

    /// Send `ShutdownRequested` once the script is exhausted.
    pub fn shutdown_when_done(mut self, tx: mpsc::Sender<MonitorEvent>) -> Self {
        self.shutdown_tx = Some(tx);
        self
    }

    /// Shared counter of job polls served.
    pub fn polls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.polls)
    }
}

impl Default for FakeSource {
    fn default() -> Self {
        Self::new()
    }
}

/// The error a stalled `squeue` produces.
pub fn query_timeout() -> SourceError {
    SourceError::Timeout {
        command: "squeue".to_string(),
        after: Duration::from_secs(30),
    }
}

impl SnapshotSource for FakeSource {
    fn fetch_jobs(&mut self) -> SourceFuture<'_, Snapshot> {
        self.polls.fetch_add(1, Ordering::SeqCst);

        let result = match self.script.pop_front() {
            Some(Ok(snapshot)) => {
                self.last = snapshot.clone();
                Ok(snapshot)
            }
            Some(Err(err)) => Err(err),
            None => Ok(self.last.clone()),
        };

        if self.script.is_empty() {
            if let Some(tx) = self.shutdown_tx.take() {
                let _ = tx.try_send(MonitorEvent::ShutdownRequested);
            }
        }

        Box::pin(async move { result })
    }

    fn fetch_cluster(&mut self) -> SourceFuture<'_, ClusterInfo> {
        let cluster = self.cluster.clone();
        Box::pin(async move {
            cluster.ok_or_else(|| SourceError::NonZeroExit {
                command: "sinfo".to_string(),
                code: 1,
                stderr: "slurm_load_partitions: Unable to contact slurm controller".to_string(),
            })
        })
    }
}
