// src/monitor/poll_loop.rs

use std::fmt;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::dashboard::{DashboardView, Presenter, ViewContext};
use crate::errors::Result;
use crate::notify::shutdown_notification;
use crate::slurm::{ClusterInfo, Snapshot, SnapshotSource};
use crate::tracker::{JobEvent, Tracker};
use crate::types::QueryFailurePolicy;

use super::{MonitorEvent, MonitorOptions};

/// What a single poll did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollOutcome {
    pub events: Vec<JobEvent>,
    /// The job query failed this cycle.
    pub query_failed: bool,
    /// This poll established the tracker baseline.
    pub seeded: bool,
}

/// Drives the tracker and the dashboard from a `SnapshotSource`.
///
/// Owns all state that survives between polls: the tracker, the last good
/// snapshot and the last cluster summary.
pub struct Monitor<S: SnapshotSource, P: Presenter> {
    source: S,
    tracker: Tracker,
    presenter: P,
    event_rx: mpsc::Receiver<MonitorEvent>,
    options: MonitorOptions,
    seeded: bool,
    last_snapshot: Snapshot,
    last_cluster: Option<ClusterInfo>,
}

impl<S: SnapshotSource, P: Presenter> fmt::Debug for Monitor<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Monitor")
            .field("tracker", &self.tracker)
            .field("options", &self.options)
            .field("seeded", &self.seeded)
            .finish_non_exhaustive()
    }
}

impl<S: SnapshotSource, P: Presenter> Monitor<S, P> {
    pub fn new(
        source: S,
        tracker: Tracker,
        presenter: P,
        event_rx: mpsc::Receiver<MonitorEvent>,
        options: MonitorOptions,
    ) -> Self {
        Self {
            source,
            tracker,
            presenter,
            event_rx,
            seeded: options.announce_existing,
            options,
            last_snapshot: Snapshot::new(),
            last_cluster: None,
        }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Main loop: poll, present, sleep, until shutdown is requested.
    pub async fn run(mut self) -> Result<()> {
        info!(
            interval_secs = self.options.interval.as_secs(),
            user = %self.options.user_label,
            "monitor started"
        );

        loop {
            self.poll().await;

            if self.shutdown_pending() {
                break;
            }

            tokio::select! {
                _ = sleep(self.options.interval) => {}
                event = self.event_rx.recv() => match event {
                    Some(MonitorEvent::ShutdownRequested) => {
                        debug!("shutdown requested while sleeping");
                        break;
                    }
                    None => {
                        info!("monitor event channel closed; exiting");
                        break;
                    }
                },
            }
        }

        self.shutdown().await;
        info!("monitor exiting");
        Ok(())
    }

    /// Run one poll cycle: query, track, present.
    pub async fn poll(&mut self) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        let jobs = self.source.fetch_jobs().await;
        match self.source.fetch_cluster().await {
            Ok(cluster) => self.last_cluster = Some(cluster),
            Err(err) => warn!(error = %err, "cluster query failed; keeping previous summary"),
        }

        match jobs {
            Ok(snapshot) => {
                self.last_snapshot = snapshot.clone();
                if self.seeded {
                    outcome.events = self.tracker.update(snapshot).await;
                } else {
                    self.tracker.seed(snapshot);
                    self.seeded = true;
                    outcome.seeded = true;
                }
            }
            Err(err) => {
                outcome.query_failed = true;
                match self.options.on_query_failure {
                    QueryFailurePolicy::Skip => {
                        warn!(error = %err, "job query failed; skipping this cycle");
                    }
                    QueryFailurePolicy::Empty => {
                        warn!(error = %err, "job query failed; treating queue as empty");
                        self.last_snapshot = Snapshot::new();
                        if self.seeded {
                            outcome.events = self.tracker.update(Snapshot::new()).await;
                        }
                    }
                }
            }
        }

        for event in &outcome.events {
            info!(job_id = %event.record.id, name = %event.record.name, kind = %event.kind, "job event");
        }

        self.present(outcome.query_failed);
        outcome
    }

    fn present(&mut self, stale: bool) {
        let ctx = ViewContext {
            user_label: self.options.user_label.clone(),
            refresh: self.options.interval,
            timestamp: now_hms(),
            stale,
        };
        let view = DashboardView::build(&self.last_snapshot, self.last_cluster.as_ref(), &ctx);
        if let Err(err) = self.presenter.present(&view) {
            warn!(error = %err, "failed to draw dashboard");
        }
    }

    fn shutdown_pending(&mut self) -> bool {
        match self.event_rx.try_recv() {
            Ok(MonitorEvent::ShutdownRequested) => true,
            Err(mpsc::error::TryRecvError::Empty) => false,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                info!("monitor event channel closed; exiting");
                true
            }
        }
    }

    /// Best-effort final notification, then restore the terminal.
    async fn shutdown(&mut self) {
        info!("stopping monitor");

        if self.tracker.has_sink() {
            let notice = shutdown_notification(&self.options.user_label);
            if let Err(err) = self.tracker.deliver(&notice).await {
                warn!(error = %err, "failed to deliver shutdown notification");
            }
        }

        if let Err(err) = self.presenter.finish() {
            warn!(error = %err, "failed to restore terminal");
        }
    }
}

/// Poll once without tracking, for `--once`.
///
/// A failed job query shows an empty, stale table rather than aborting.
pub async fn snapshot_view<S: SnapshotSource>(
    source: &mut S,
    user_label: &str,
    refresh: std::time::Duration,
) -> DashboardView {
    let (snapshot, stale) = match source.fetch_jobs().await {
        Ok(snapshot) => (snapshot, false),
        Err(err) => {
            warn!(error = %err, "job query failed");
            (Snapshot::new(), true)
        }
    };
    let cluster = match source.fetch_cluster().await {
        Ok(cluster) => Some(cluster),
        Err(err) => {
            warn!(error = %err, "cluster query failed");
            None
        }
    };

    let ctx = ViewContext {
        user_label: user_label.to_string(),
        refresh,
        timestamp: now_hms(),
        stale,
    };
    DashboardView::build(&snapshot, cluster.as_ref(), &ctx)
}

fn now_hms() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
