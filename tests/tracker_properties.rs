// tests/tracker_properties.rs

mod common;
use crate::common::builders::JobRecordBuilder;

use std::collections::HashSet;

use proptest::prelude::*;
use slurm_monitor::slurm::{JobState, Snapshot};
use slurm_monitor::tracker::{EventKind, JobTracker};

fn state_strategy() -> impl Strategy<Value = JobState> {
    prop_oneof![
        3 => Just(JobState::Running),
        3 => Just(JobState::Pending),
        1 => Just(JobState::Other("COMPLETING".to_string())),
        1 => Just(JobState::Other("CONFIGURING".to_string())),
    ]
}

// A snapshot drawn from a small id pool so jobs come and go between polls.
fn snapshot_strategy() -> impl Strategy<Value = Snapshot> {
    proptest::collection::btree_map(0..8u8, state_strategy(), 0..8).prop_map(|jobs| {
        jobs.into_iter()
            .map(|(id, state)| JobRecordBuilder::new(&format!("J{id}")).state(state).build())
            .collect::<Snapshot>()
    })
}

proptest! {
    #[test]
    fn events_follow_state_transitions(
        snapshots in proptest::collection::vec(snapshot_strategy(), 1..20)
    ) {
        let mut tracker = JobTracker::new();
        let mut previous = Snapshot::new();

        for current in snapshots {
            let events = tracker.diff(current.clone());

            let mut seen = HashSet::new();
            let mut saw_start = false;
            for event in &events {
                prop_assert!(seen.insert((event.record.id.clone(), event.kind)));
                match event.kind {
                    EventKind::Completed => {
                        // Completions are listed before any start.
                        prop_assert!(!saw_start);
                        prop_assert!(!current.contains(&event.record.id));
                        let prev = previous.get(&event.record.id);
                        prop_assert!(prev.is_some_and(|r| r.state.is_running()));
                    }
                    EventKind::Started => {
                        saw_start = true;
                        let now = current.get(&event.record.id);
                        prop_assert!(now.is_some_and(|r| r.state.is_running()));
                        let prev = previous.get(&event.record.id);
                        prop_assert!(prev.is_none_or(|r| r.state.is_pending()));
                    }
                }
            }

            // Every running job that left the queue is reported.
            for prev in previous.running() {
                if !current.contains(&prev.id) {
                    prop_assert!(seen.contains(&(prev.id.clone(), EventKind::Completed)));
                }
            }

            for id in tracker.announced_starts() {
                prop_assert!(current.contains(id));
            }
            prop_assert_eq!(tracker.previous(), &current);

            previous = current;
        }
    }

    #[test]
    fn repeating_a_snapshot_is_silent(
        first in snapshot_strategy(),
        second in snapshot_strategy(),
    ) {
        let mut tracker = JobTracker::new();
        tracker.diff(first);
        tracker.diff(second.clone());

        let events = tracker.diff(second);
        prop_assert!(events.is_empty(), "unexpected events: {:?}", events);
    }

    #[test]
    fn a_job_starts_at_most_once_while_it_stays_queued(
        states in proptest::collection::vec(state_strategy(), 1..30)
    ) {
        let mut tracker = JobTracker::new();
        let mut starts = 0;

        for state in states {
            let snapshot: Snapshot = [JobRecordBuilder::new("J1").state(state).build()]
                .into_iter()
                .collect();
            starts += tracker
                .diff(snapshot)
                .iter()
                .filter(|e| e.kind == EventKind::Started)
                .count();
        }

        prop_assert!(starts <= 1);
    }
}
