// tests/tracker_notification.rs

mod common;
use crate::common::builders::snapshot_of;
use crate::common::fake_sink::{FailingSink, RecordingSink, StalledSink};
use crate::common::{init_tracing, summarize, with_timeout};

use std::error::Error;

use tokio::time::Duration;

use slurm_monitor::errors::NotifyError;
use slurm_monitor::notify::{shutdown_notification, Icon};
use slurm_monitor::slurm::Snapshot;
use slurm_monitor::tracker::{EventKind, Tracker};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn one_notification_per_update() -> TestResult {
    init_tracing();

    let sink = RecordingSink::new();
    let mut tracker = Tracker::new(Some(Box::new(sink.clone())), Duration::from_secs(5));
    tracker.seed(snapshot_of(&[("1", true), ("2", false), ("3", false)]));

    let events = with_timeout(tracker.update(snapshot_of(&[("2", true), ("3", true)]))).await;
    assert_eq!(events.len(), 3);

    let sent = sink.sent();
    assert_eq!(sent.len(), 1, "expected a single batched message: {sent:?}");
    assert_eq!(sent[0].icon, Icon::Neutral);
    assert!(sent[0].message.starts_with("2 jobs started:"));
    assert!(sent[0].message.contains("Job completed: 1 "));

    Ok(())
}

#[tokio::test]
async fn no_notification_without_events() -> TestResult {
    init_tracing();

    let sink = RecordingSink::new();
    let mut tracker = Tracker::new(Some(Box::new(sink.clone())), Duration::from_secs(5));
    tracker.seed(snapshot_of(&[("1", true)]));

    let events = with_timeout(tracker.update(snapshot_of(&[("1", true)]))).await;

    assert!(events.is_empty());
    assert!(sink.sent().is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_delivery_does_not_change_tracking() -> TestResult {
    init_tracing();

    let sink = FailingSink::new();
    let mut tracker = Tracker::new(Some(Box::new(sink.clone())), Duration::from_secs(5));

    let events = with_timeout(tracker.update(snapshot_of(&[("1", true)]))).await;
    assert_eq!(summarize(&events), vec![("1".to_string(), EventKind::Started)]);
    assert_eq!(sink.attempts(), 1);

    // The start stays credited; nothing is retried.
    let events = with_timeout(tracker.update(snapshot_of(&[("1", true)]))).await;
    assert!(events.is_empty());
    assert_eq!(sink.attempts(), 1);
    assert!(tracker.core().announced_starts().contains("1"));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn slow_sink_is_cut_off_by_timeout() -> TestResult {
    init_tracing();

    let sink = StalledSink::new(Duration::from_secs(3600));
    let mut tracker = Tracker::new(Some(Box::new(sink)), Duration::from_secs(2));

    let events = tracker.update(snapshot_of(&[("1", true)])).await;
    assert_eq!(events.len(), 1);

    let err = tracker
        .deliver(&shutdown_notification("alice"))
        .await
        .expect_err("stalled sink must time out");
    assert!(matches!(err, NotifyError::Timeout(d) if d == Duration::from_secs(2)));

    Ok(())
}

#[tokio::test]
async fn tracker_without_sink_still_reports_events() -> TestResult {
    init_tracing();

    let mut tracker = Tracker::without_sink();
    assert!(!tracker.has_sink());

    tracker.seed(snapshot_of(&[("1", true)]));
    let events = with_timeout(tracker.update(Snapshot::new())).await;

    assert_eq!(summarize(&events), vec![("1".to_string(), EventKind::Completed)]);
    with_timeout(tracker.deliver(&shutdown_notification("alice"))).await?;

    Ok(())
}
