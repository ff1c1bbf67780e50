// src/dashboard/mod.rs

//! Terminal dashboard.
//!
//! [`DashboardView`] is a plain view model computed from one snapshot; it is
//! rebuilt from scratch on every poll. [`render`] draws it with `ratatui` and
//! [`presenter`] owns the terminal.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::slurm::{accelerator_count, ClusterInfo, JobRecord, JobState, Snapshot};

pub mod presenter;
pub mod render;

pub use presenter::{Presenter, TerminalPresenter, ViewMode};

/// Rows shown per job table.
pub const MAX_TABLE_ROWS: usize = 15;
/// Job names are cut to this many characters.
pub const NAME_WIDTH: usize = 30;
/// Pending reasons are cut to this many characters.
pub const REASON_WIDTH: usize = 25;
/// Cells in a GPU usage bar.
pub const BAR_WIDTH: usize = 15;

/// One job as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRow {
    pub id: String,
    pub name: String,
    pub user: String,
    pub partition: String,
    pub state: JobState,
    pub gpus: String,
    pub elapsed: String,
    pub time_limit: String,
    pub reason: String,
}

impl JobRow {
    fn from_record(record: &JobRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: truncate(&record.name, NAME_WIDTH),
            user: record.user.clone(),
            partition: record.partition.clone(),
            state: record.state.clone(),
            gpus: gpu_display(&record.gres),
            elapsed: record.elapsed.clone(),
            time_limit: record.time_limit.clone(),
            reason: truncate(&record.reason, REASON_WIDTH),
        }
    }
}

/// Running jobs and requested GPUs of one partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionUsage {
    pub partition: String,
    pub jobs: usize,
    pub gpus: u32,
}

/// One line of the GPU availability table.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuRow {
    pub partition: String,
    pub idle: u32,
    pub total: u32,
    pub usage_percent: f64,
    /// Bar cells drawn as "in use"; the rest of `BAR_WIDTH` is free.
    pub used_cells: usize,
}

/// Per-render inputs that do not come from the scheduler.
#[derive(Debug, Clone)]
pub struct ViewContext {
    /// `"All Users"` or the user name being watched.
    pub user_label: String,
    pub refresh: Duration,
    /// Wall-clock time of the poll, already formatted.
    pub timestamp: String,
    /// The job query failed this cycle; the jobs shown are from the last good
    /// poll.
    pub stale: bool,
}

/// Everything one dashboard frame shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub user_label: String,
    pub timestamp: String,
    pub refresh_secs: u64,
    pub stale: bool,
    /// `None` when the cluster query failed.
    pub gpus_in_use: Option<u32>,
    pub running: Vec<JobRow>,
    pub running_total: usize,
    pub pending: Vec<JobRow>,
    pub pending_total: usize,
    /// Every job, uncapped, for the compact view.
    pub all_jobs: Vec<JobRow>,
    pub summary: Vec<PartitionUsage>,
    pub gpu_rows: Vec<GpuRow>,
}

impl DashboardView {
    pub fn build(snapshot: &Snapshot, cluster: Option<&ClusterInfo>, ctx: &ViewContext) -> Self {
        let running: Vec<&JobRecord> = snapshot.running().collect();
        let pending: Vec<&JobRecord> = snapshot.pending().collect();

        Self {
            user_label: ctx.user_label.clone(),
            timestamp: ctx.timestamp.clone(),
            refresh_secs: ctx.refresh.as_secs(),
            stale: ctx.stale,
            gpus_in_use: cluster.map(|c| c.gpus_in_use),
            running: capped_rows(&running),
            running_total: running.len(),
            pending: capped_rows(&pending),
            pending_total: pending.len(),
            all_jobs: snapshot.records().map(JobRow::from_record).collect(),
            summary: partition_summary(&running),
            gpu_rows: cluster.map(gpu_rows).unwrap_or_default(),
        }
    }

    /// Total running jobs and GPUs over all partitions.
    pub fn summary_totals(&self) -> (usize, u32) {
        self.summary
            .iter()
            .fold((0, 0), |(jobs, gpus), p| {
                (jobs + p.jobs, gpus.saturating_add(p.gpus))
            })
    }
}

/// `gres` without the `gpu:` prefix, or `-` when it requests no GPUs.
pub fn gpu_display(gres: &str) -> String {
    if gres.contains("gpu") {
        gres.replace("gpu:", "")
    } else {
        "-".to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

fn capped_rows(records: &[&JobRecord]) -> Vec<JobRow> {
    records
        .iter()
        .take(MAX_TABLE_ROWS)
        .map(|r| JobRow::from_record(r))
        .collect()
}

fn partition_summary(running: &[&JobRecord]) -> Vec<PartitionUsage> {
    let mut by_partition: BTreeMap<&str, PartitionUsage> = BTreeMap::new();
    for record in running {
        let usage = by_partition
            .entry(record.partition.as_str())
            .or_insert_with(|| PartitionUsage {
                partition: record.partition.clone(),
                jobs: 0,
                gpus: 0,
            });
        usage.jobs += 1;
        usage.gpus = usage.gpus.saturating_add(accelerator_count(&record.gres));
    }
    by_partition.into_values().collect()
}

fn gpu_rows(cluster: &ClusterInfo) -> Vec<GpuRow> {
    cluster
        .gpu_availability
        .iter()
        .filter(|p| p.total > 0)
        .map(|p| {
            let usage_percent = p.usage_percent();
            GpuRow {
                partition: p.name.clone(),
                idle: p.idle,
                total: p.total,
                usage_percent,
                used_cells: ((usage_percent / 100.0) * BAR_WIDTH as f64) as usize,
            }
        })
        .collect()
}
