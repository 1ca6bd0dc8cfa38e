//! Common test utilities for integration tests
//!
//! - Level-signal generators for tank fill/drain shapes
//! - Pre-built plant scenarios with expected outcomes
//! - Assertion helpers for event invariants

#![allow(dead_code)]

pub mod generators;
pub mod scenarios;

use outflow_core::OutflowEvent;

/// Sample cadence of the AT-02 transmitter
pub const SAMPLE_INTERVAL_MS: u64 = 30_000;

/// Events are chronological, non-overlapping and each has positive length
pub fn assert_event_invariants(events: &[OutflowEvent]) {
    for event in events {
        assert!(
            event.start_time < event.end_time,
            "event must have positive length: {:?}",
            event
        );
        assert!(
            (event.level_drop - (event.start_level - event.end_level)).abs() < 1e-12,
            "level drop must match endpoints: {:?}",
            event
        );
    }
    for pair in events.windows(2) {
        assert!(
            pair[0].end_time < pair[1].start_time,
            "events must not overlap: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }
}
