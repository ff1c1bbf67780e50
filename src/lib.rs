// src/lib.rs

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod logging;
pub mod monitor;
pub mod notify;
pub mod slurm;
pub mod tracker;
pub mod types;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::{MonitorSettings, NotifySettings};
use crate::dashboard::{Presenter, TerminalPresenter};
use crate::monitor::{spawn_signal_listener, Monitor, MonitorEvent, MonitorOptions};
use crate::notify::{LogSink, NotificationSink, WebhookSink};
use crate::slurm::SlurmSource;
use crate::tracker::Tracker;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the SLURM snapshot source
/// - the job tracker and its notification sink
/// - the terminal presenter
/// - Ctrl-C / SIGTERM handling
pub async fn run(settings: MonitorSettings) -> Result<()> {
    let mut source = SlurmSource::new(settings.user_filter.clone(), settings.query_timeout);

    if settings.once {
        let view =
            monitor::snapshot_view(&mut source, &settings.user_label, settings.interval).await;
        let mut presenter = TerminalPresenter::inline(settings.mode, &view)?;
        presenter.present(&view)?;
        presenter.finish()?;
        return Ok(());
    }

    let sink = build_sink(settings.notify.as_ref())?;
    let tracker = match (sink, &settings.notify) {
        (Some(sink), Some(notify)) => Tracker::new(Some(sink), notify.timeout),
        _ => Tracker::without_sink(),
    };

    // Ctrl-C / SIGTERM → graceful shutdown between polls.
    let (event_tx, event_rx) = mpsc::channel::<MonitorEvent>(4);
    spawn_signal_listener(event_tx);

    let options = MonitorOptions {
        interval: settings.interval,
        on_query_failure: settings.on_query_failure,
        announce_existing: settings.announce_existing,
        user_label: settings.user_label.clone(),
    };

    let presenter = TerminalPresenter::live(settings.mode)?;
    let monitor = Monitor::new(source, tracker, presenter, event_rx, options);
    monitor.run().await?;
    Ok(())
}

/// Pick the notification sink for the configured settings.
fn build_sink(notify: Option<&NotifySettings>) -> Result<Option<Box<dyn NotificationSink>>> {
    let Some(notify) = notify else {
        debug!("notifications disabled");
        return Ok(None);
    };

    match &notify.webhook_url {
        Some(url) => {
            info!("sending notifications to webhook");
            let sink: Box<dyn NotificationSink> =
                Box::new(WebhookSink::new(url.clone(), notify.timeout)?);
            Ok(Some(sink))
        }
        None => {
            warn!("notifications enabled without a webhook url; writing them to the log");
            let sink: Box<dyn NotificationSink> = Box::new(LogSink);
            Ok(Some(sink))
        }
    }
}
