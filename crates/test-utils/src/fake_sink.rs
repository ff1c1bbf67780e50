use std::sync::{Arc, Mutex};
use std::time::Duration;

use slurm_monitor::errors::NotifyError;
use slurm_monitor::notify::sink::NotifyFuture;
use slurm_monitor::notify::{Notification, NotificationSink};

/// A sink that records every notification it is given.
#[derive(Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn send<'a>(&'a self, notification: &'a Notification) -> NotifyFuture<'a> {
        let sent = Arc::clone(&self.sent);
        Box::pin(async move {
            sent.lock().unwrap().push(notification.clone());
            Ok(())
        })
    }
}

/// A sink that counts attempts and always fails.
#[derive(Clone, Default)]
pub struct FailingSink {
    attempts: Arc<Mutex<usize>>,
}

impl FailingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl NotificationSink for FailingSink {
    fn send<'a>(&'a self, _notification: &'a Notification) -> NotifyFuture<'a> {
        let attempts = Arc::clone(&self.attempts);
        Box::pin(async move {
            *attempts.lock().unwrap() += 1;
            Err(NotifyError::Status {
                status: 500,
                body: "internal error".to_string(),
            })
        })
    }
}

/// A sink that never finishes within any reasonable timeout.
#[derive(Clone)]
pub struct StalledSink {
    delay: Duration,
}

impl StalledSink {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl NotificationSink for StalledSink {
    fn send<'a>(&'a self, _notification: &'a Notification) -> NotifyFuture<'a> {
        let delay = self.delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(())
        })
    }
}
