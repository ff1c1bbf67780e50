// src/slurm/squeue.rs

//! Parsing of `squeue` output.

use tracing::debug;

use crate::slurm::gres::accelerator_count;
use crate::slurm::job::JobRecord;

/// Output format passed to `squeue -o`.
///
/// Columns: id, name, user, partition, state, elapsed, time limit, nodes,
/// reason / node list, gres.
pub const SQUEUE_FORMAT: &str = "%i|%j|%u|%P|%T|%M|%l|%D|%R|%b";

const SQUEUE_FIELDS: usize = 10;

/// Parse `squeue -o SQUEUE_FORMAT --noheader` output.
///
/// Lines that do not have all fields are dropped rather than failing the
/// whole listing.
pub fn parse_squeue(output: &str) -> Vec<JobRecord> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let record = parse_line(line);
            if record.is_none() {
                debug!(line, "dropping malformed squeue line");
            }
            record
        })
        .collect()
}

fn parse_line(line: &str) -> Option<JobRecord> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    if parts.len() < SQUEUE_FIELDS || parts[0].is_empty() {
        return None;
    }

    Some(JobRecord {
        id: parts[0].to_string(),
        name: parts[1].to_string(),
        user: parts[2].to_string(),
        partition: parts[3].to_string(),
        state: parts[4].parse().ok()?,
        elapsed: parts[5].to_string(),
        time_limit: parts[6].to_string(),
        nodes: parts[7].to_string(),
        reason: parts[8].to_string(),
        // The gres column is last; keep any stray separators it contains.
        gres: parts[9..].join("|"),
    })
}

/// Sum the accelerator requests of a `squeue -o %b --noheader` listing.
pub fn sum_gpu_requests(output: &str) -> u32 {
    output
        .lines()
        .map(str::trim)
        .filter(|line| line.contains("gpu"))
        .map(accelerator_count)
        .fold(0, u32::saturating_add)
}
