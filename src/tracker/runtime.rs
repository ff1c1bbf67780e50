// src/tracker/runtime.rs

use std::fmt;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::errors::NotifyError;
use crate::notify::{format_batch, Notification, NotificationSink};
use crate::slurm::Snapshot;

use super::core::JobTracker;
use super::JobEvent;

/// Job tracker plus notification delivery.
///
/// This is a thin IO shell around `JobTracker`, which contains all the
/// diffing semantics. Each `update` delivers at most one batched notification,
/// bounded by `notify_timeout`; delivery failures are logged and dropped.
pub struct Tracker {
    core: JobTracker,
    sink: Option<Box<dyn NotificationSink>>,
    notify_timeout: Duration,
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("core", &self.core)
            .field("has_sink", &self.sink.is_some())
            .field("notify_timeout", &self.notify_timeout)
            .finish()
    }
}

impl Tracker {
    pub fn new(sink: Option<Box<dyn NotificationSink>>, notify_timeout: Duration) -> Self {
        Self {
            core: JobTracker::new(),
            sink,
            notify_timeout,
        }
    }

    /// Tracker that never notifies.
    pub fn without_sink() -> Self {
        Self::new(None, Duration::ZERO)
    }

    /// See [`JobTracker::seed`].
    pub fn seed(&mut self, initial: Snapshot) {
        self.core.seed(initial);
    }

    pub fn core(&self) -> &JobTracker {
        &self.core
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Diff `current` against the previous snapshot, notify once if anything
    /// changed, and return the events.
    pub async fn update(&mut self, current: Snapshot) -> Vec<JobEvent> {
        let events = self.core.diff(current);
        if events.is_empty() {
            return events;
        }

        info!(events = events.len(), "job transitions detected");

        if self.sink.is_some() {
            let notification = format_batch(&events);
            if let Err(err) = self.deliver(&notification).await {
                warn!(error = %err, events = events.len(), "failed to deliver job notification");
            }
        }

        events
    }

    /// Send one notification through the sink, bounded by the notify timeout.
    ///
    /// Without a sink this is a no-op.
    pub async fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        let Some(sink) = &self.sink else {
            return Ok(());
        };

        match timeout(self.notify_timeout, sink.send(notification)).await {
            Ok(result) => {
                if result.is_ok() {
                    debug!(icon = notification.icon.as_str(), "notification delivered");
                }
                result
            }
            Err(_) => Err(NotifyError::Timeout(self.notify_timeout)),
        }
    }
}
