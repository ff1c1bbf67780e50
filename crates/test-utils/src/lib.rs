//! Shared helpers for the `slurm-monitor` integration tests: record and
//! snapshot builders, scripted fakes for every IO seam, and tracing setup.

pub mod builders;
pub mod fake_presenter;
pub mod fake_sink;
pub mod fake_source;

use std::future::Future;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

/// Upper bound for a single async step in a test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Route `tracing` output of the crate under test into the test harness.
///
/// Output is captured per test and shown only when it fails (or with
/// `-- --nocapture`). `RUST_LOG` overrides the default of
/// `slurm_monitor=debug`. Calling this more than once is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("slurm_monitor=debug"));

    // A second call finds the global subscriber already set; that is fine.
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(true)
        .try_init();
}

/// Await `f`, failing the test if it takes longer than [`TEST_TIMEOUT`].
///
/// Works with paused Tokio time too: the deadline is virtual there.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(value) => value,
        Err(_) => panic!("step did not finish within {TEST_TIMEOUT:?}"),
    }
}
