// src/slurm/cluster.rs

//! Cluster-wide summaries built from `sinfo` listings.

use std::collections::BTreeMap;

use crate::slurm::gres::gpu_type_and_count;
use crate::slurm::squeue::sum_gpu_requests;

/// `sinfo` format for the partition / CPU summary.
pub const SINFO_PARTITION_FORMAT: &str = "%P|%a|%D|%C";

/// `sinfo` format for per-node-state GPU availability.
pub const SINFO_GPU_FORMAT: &str = "%P|%G|%D|%t|%C";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionInfo {
    pub name: String,
    /// `up` / `down` / `drain` / `inact`.
    pub availability: String,
    pub nodes: String,
    /// Raw `alloc/idle/other/total` CPU column.
    pub cpus: String,
}

/// Partition list plus cluster-wide node and CPU totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionSummary {
    pub partitions: Vec<PartitionInfo>,
    pub total_nodes: u32,
    pub cpus_alloc: u64,
    pub cpus_total: u64,
}

/// GPU availability of one partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpuAvailability {
    pub name: String,
    pub total: u32,
    /// Estimated idle GPUs. Mixed-allocation nodes count as half idle.
    pub idle: u32,
    pub gpu_type: String,
}

impl GpuAvailability {
    /// Share of GPUs in use, 0–100.
    pub fn usage_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let used = self.total.saturating_sub(self.idle);
        f64::from(used) / f64::from(self.total) * 100.0
    }
}

/// Everything the dashboard shows about the cluster as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterInfo {
    pub partitions: Vec<PartitionInfo>,
    pub total_nodes: u32,
    pub cpus_alloc: u64,
    pub cpus_total: u64,
    pub gpus_in_use: u32,
    pub gpu_availability: Vec<GpuAvailability>,
}

impl ClusterInfo {
    /// Assemble from the three raw listings.
    pub fn from_listings(partitions: &str, gpu_nodes: &str, job_gres: &str) -> Self {
        let summary = parse_partitions(partitions);
        Self {
            partitions: summary.partitions,
            total_nodes: summary.total_nodes,
            cpus_alloc: summary.cpus_alloc,
            cpus_total: summary.cpus_total,
            gpus_in_use: sum_gpu_requests(job_gres),
            gpu_availability: parse_gpu_availability(gpu_nodes),
        }
    }
}

/// Strip the `*` sinfo appends to the default partition.
fn partition_name(raw: &str) -> String {
    raw.trim().trim_end_matches('*').to_string()
}

fn parse_count(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Parse `sinfo -o SINFO_PARTITION_FORMAT --noheader`.
pub fn parse_partitions(output: &str) -> PartitionSummary {
    let mut summary = PartitionSummary::default();

    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        if parts.len() < 4 {
            continue;
        }

        let cpu_info: Vec<u64> = parts[3]
            .split('/')
            .map(|v| v.trim().parse::<u64>())
            .collect::<Result<_, _>>()
            .unwrap_or_default();
        if let [alloc, _idle, _other, total] = cpu_info[..] {
            summary.cpus_alloc = summary.cpus_alloc.saturating_add(alloc);
            summary.cpus_total = summary.cpus_total.saturating_add(total);
        }

        summary.total_nodes = summary.total_nodes.saturating_add(parse_count(parts[2]));
        summary.partitions.push(PartitionInfo {
            name: partition_name(parts[0]),
            availability: parts[1].to_string(),
            nodes: parts[2].to_string(),
            cpus: parts[3].to_string(),
        });
    }

    summary
}

/// Parse `sinfo -o SINFO_GPU_FORMAT --noheader` into per-partition GPU
/// availability, sorted by partition name.
///
/// sinfo prints one line per (partition, node state) pair. Idle nodes
/// contribute all their GPUs, `mix` nodes half of them.
pub fn parse_gpu_availability(output: &str) -> Vec<GpuAvailability> {
    let mut partitions: BTreeMap<String, GpuAvailability> = BTreeMap::new();

    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        if parts.len() < 5 {
            continue;
        }

        let name = partition_name(parts[0]);
        let (gpu_type, per_node) = gpu_type_and_count(parts[1]);
        let nodes = parse_count(parts[2]);
        let state = parts[3].trim_end_matches(['*', '~', '#', '!', '%', '$', '@', '^', '-', '+']);

        let entry = partitions
            .entry(name.clone())
            .or_insert_with(|| GpuAvailability {
                name,
                gpu_type: gpu_type.clone(),
                ..Default::default()
            });
        if entry.gpu_type.is_empty() {
            entry.gpu_type = gpu_type;
        }

        // Counts come straight from sinfo; never let absurd values overflow.
        let gpus = nodes.saturating_mul(per_node);
        entry.total = entry.total.saturating_add(gpus);
        match state {
            "idle" => entry.idle = entry.idle.saturating_add(gpus),
            "mix" => entry.idle = entry.idle.saturating_add(gpus / 2),
            _ => {}
        }
    }

    partitions.into_values().collect()
}
