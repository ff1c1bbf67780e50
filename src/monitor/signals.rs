// src/monitor/signals.rs

use tokio::sync::mpsc;
use tracing::{info, warn};

use super::MonitorEvent;

/// Forward Ctrl-C (and SIGTERM on unix) to the poll loop as
/// `ShutdownRequested`.
pub fn spawn_signal_listener(tx: mpsc::Sender<MonitorEvent>) {
    tokio::spawn(async move {
        if let Err(e) = wait_for_signal().await {
            warn!(error = %e, "failed to listen for termination signals");
            // Keep the sender alive so the loop does not read a closed channel
            // as a shutdown request.
            std::future::pending::<()>().await;
        }
        info!("termination signal received");
        let _ = tx.send(MonitorEvent::ShutdownRequested).await;
    });
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
