// src/slurm/source.rs

//! Pluggable snapshot source abstraction.
//!
//! The poll loop talks to a `SnapshotSource` instead of spawning `squeue`
//! directly, so tests can script a sequence of snapshots (and failures)
//! without a scheduler.
//!
//! - `SlurmSource` is the production implementation. Every command runs with
//!   a fixed upper bound; a query that stalls past it is reported as
//!   [`SourceError::Timeout`] and the child is killed.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::errors::SourceError;
use crate::slurm::cluster::{ClusterInfo, SINFO_GPU_FORMAT, SINFO_PARTITION_FORMAT};
use crate::slurm::job::Snapshot;
use crate::slurm::squeue::{parse_squeue, SQUEUE_FORMAT};

pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Trait abstracting where job and cluster state comes from.
pub trait SnapshotSource: Send {
    /// Fetch the current job queue.
    ///
    /// A listing that parses to zero records is an empty snapshot, not an
    /// error.
    fn fetch_jobs(&mut self) -> SourceFuture<'_, Snapshot>;

    /// Fetch cluster-wide partition and GPU information.
    fn fetch_cluster(&mut self) -> SourceFuture<'_, ClusterInfo>;
}

/// Queries the local SLURM installation.
#[derive(Debug, Clone)]
pub struct SlurmSource {
    /// Restrict the job listing to this user; `None` lists everyone.
    user: Option<String>,
    query_timeout: Duration,
}

impl SlurmSource {
    pub fn new(user: Option<String>, query_timeout: Duration) -> Self {
        Self {
            user,
            query_timeout,
        }
    }

    fn squeue_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(user) = &self.user {
            args.push("-u".to_string());
            args.push(user.clone());
        }
        args.push("-o".to_string());
        args.push(SQUEUE_FORMAT.to_string());
        args.push("--noheader".to_string());
        args
    }
}

impl SnapshotSource for SlurmSource {
    fn fetch_jobs(&mut self) -> SourceFuture<'_, Snapshot> {
        let args = self.squeue_args();
        let limit = self.query_timeout;

        Box::pin(async move {
            let output = run_command("squeue", &args, limit).await?;
            let records = parse_squeue(&output);
            debug!(jobs = records.len(), "parsed squeue listing");
            Ok(records.into_iter().collect())
        })
    }

    fn fetch_cluster(&mut self) -> SourceFuture<'_, ClusterInfo> {
        let limit = self.query_timeout;

        Box::pin(async move {
            let partitions = run_command(
                "sinfo",
                &["-o", SINFO_PARTITION_FORMAT, "--noheader"],
                limit,
            )
            .await?;
            let gpu_nodes =
                run_command("sinfo", &["-o", SINFO_GPU_FORMAT, "--noheader"], limit).await?;

            // The GPUs-in-use figure is cluster wide, independent of the user filter.
            let job_gres = match run_command("squeue", &["-o", "%b", "--noheader"], limit).await {
                Ok(out) => out,
                Err(err) => {
                    warn!(error = %err, "could not list cluster gres requests");
                    String::new()
                }
            };

            Ok(ClusterInfo::from_listings(&partitions, &gpu_nodes, &job_gres))
        })
    }
}

/// Run `program args...`, returning trimmed stdout.
///
/// Bounded by `limit`; on timeout the child is dropped (and killed).
pub async fn run_command<S: AsRef<str>>(
    program: &str,
    args: &[S],
    limit: Duration,
) -> Result<String, SourceError> {
    let command = std::iter::once(program)
        .chain(args.iter().map(AsRef::as_ref))
        .collect::<Vec<_>>()
        .join(" ");

    let mut cmd = Command::new(program);
    cmd.args(args.iter().map(AsRef::as_ref))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(%command, "running scheduler query");

    let output = match timeout(limit, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => return Err(SourceError::Spawn { command, source }),
        Err(_) => {
            return Err(SourceError::Timeout {
                command,
                after: limit,
            })
        }
    };

    if !output.status.success() {
        return Err(SourceError::NonZeroExit {
            command,
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    String::from_utf8(output.stdout)
        .map(|s| s.trim().to_string())
        .map_err(|_| SourceError::InvalidUtf8 { command })
}
