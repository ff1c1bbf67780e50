// src/slurm/mod.rs

//! Everything that talks to (or parses output from) the SLURM command line
//! tools.
//!
//! - [`job`] holds the job record and snapshot types shared by the whole crate.
//! - [`squeue`] parses `squeue` listings into job records.
//! - [`cluster`] parses `sinfo` listings into partition / GPU summaries.
//! - [`gres`] extracts coarse accelerator counts from resource requests.
//! - [`source`] provides the `SnapshotSource` trait and the production
//!   `SlurmSource` that shells out with a bounded timeout.
//!
//! Nothing here keeps state between polls.

pub mod cluster;
pub mod gres;
pub mod job;
pub mod source;
pub mod squeue;

pub use cluster::{
    parse_gpu_availability, parse_partitions, ClusterInfo, GpuAvailability, PartitionInfo,
};
pub use gres::accelerator_count;
pub use job::{JobId, JobRecord, JobState, Snapshot};
pub use source::{SlurmSource, SnapshotSource};
pub use squeue::{parse_squeue, sum_gpu_requests, SQUEUE_FORMAT};
