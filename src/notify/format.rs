// src/notify/format.rs

//! Batch notification formatting.

use crate::notify::{Icon, Notification};
use crate::slurm::{accelerator_count, JobRecord};
use crate::tracker::{EventKind, JobEvent};

/// Format one batch of events as a single message.
///
/// Started jobs come first, then completed ones, separated by a blank line.
/// Within a section jobs are sorted by id. A section with one job is a single
/// line; a larger one gets a count header and one line per job.
pub fn format_batch(events: &[JobEvent]) -> Notification {
    let started = sorted_records(events, EventKind::Started);
    let completed = sorted_records(events, EventKind::Completed);

    let sections: Vec<String> = [
        format_section(&started, EventKind::Started),
        format_section(&completed, EventKind::Completed),
    ]
    .into_iter()
    .flatten()
    .collect();

    let icon = match (started.is_empty(), completed.is_empty()) {
        (false, true) => Icon::Started,
        (true, false) => Icon::Completed,
        _ => Icon::Neutral,
    };

    Notification {
        message: sections.join("\n\n"),
        icon,
    }
}

/// Message sent once when the monitor is stopped.
pub fn shutdown_notification(user_label: &str) -> Notification {
    Notification {
        message: format!("SLURM monitor stopped (watching: {user_label})"),
        icon: Icon::Shutdown,
    }
}

fn sorted_records(events: &[JobEvent], kind: EventKind) -> Vec<&JobRecord> {
    let mut records: Vec<&JobRecord> = events
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| &e.record)
        .collect();
    records.sort_by(|a, b| a.id.cmp(&b.id));
    records
}

fn format_section(records: &[&JobRecord], kind: EventKind) -> Option<String> {
    match records {
        [] => None,
        [only] => Some(format!("Job {kind}: {}", describe(only))),
        many => {
            let mut lines = vec![format!("{} jobs {kind}:", many.len())];
            lines.extend(many.iter().map(|r| format!("  - {}", describe(r))));
            Some(lines.join("\n"))
        }
    }
}

fn describe(record: &JobRecord) -> String {
    format!(
        "{} ({}) on {}, GPUs: {}",
        record.id,
        record.name,
        record.partition,
        accelerator_count(&record.gres)
    )
}
