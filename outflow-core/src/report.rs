//! Volume reporting over detected events
//!
//! The reporting layer sums drained volume per period. An event belongs to
//! the period its `start_time` falls in, so an event spanning a boundary is
//! counted once, in the period where it began.

use alloc::vec::Vec;

use crate::{
    constants::time::MAX_REPORT_BUCKETS,
    events::OutflowEvent,
    errors::{DetectionError, DetectionResult},
    time::{TimeRange, Timestamp},
};

/// Aggregate of the events starting inside a range
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumeSummary {
    /// Number of events counted
    pub event_count: usize,
    /// Sum of event volumes
    pub total_volume: f64,
    /// Sum of level drops
    pub total_level_drop: f64,
    /// Sum of event durations in minutes
    pub total_duration_minutes: f64,
    /// Volume of the single largest event, 0 when there are none
    pub largest_volume: f64,
}

impl VolumeSummary {
    /// Summarise every event in the slice
    pub fn from_events(events: &[OutflowEvent]) -> Self {
        events.iter().fold(Self::default(), |mut acc, event| {
            acc.add(event);
            acc
        })
    }

    /// Summarise the events whose start lies in `range`
    pub fn for_range(events: &[OutflowEvent], range: TimeRange) -> Self {
        events
            .iter()
            .filter(|e| range.contains(e.start_time))
            .fold(Self::default(), |mut acc, event| {
                acc.add(event);
                acc
            })
    }

    /// Mean volume per event, 0 when there are none
    pub fn mean_volume(&self) -> f64 {
        if self.event_count == 0 {
            0.0
        } else {
            self.total_volume / self.event_count as f64
        }
    }

    fn add(&mut self, event: &OutflowEvent) {
        self.event_count += 1;
        self.total_volume += event.volume;
        self.total_level_drop += event.level_drop;
        self.total_duration_minutes += event.duration_minutes;
        if event.volume > self.largest_volume {
            self.largest_volume = event.volume;
        }
    }
}

/// Sum event volume into tumbling buckets of `bucket_ms` across `range`
///
/// Returns one `(bucket_start, volume)` pair per bucket, including empty
/// ones, so the result lines up with a chart's time axis. The last bucket
/// may be shorter than `bucket_ms`. Ranges needing more than
/// [`MAX_REPORT_BUCKETS`] buckets are rejected.
pub fn bucketed_volume(
    events: &[OutflowEvent],
    range: TimeRange,
    bucket_ms: u64,
) -> DetectionResult<Vec<(Timestamp, f64)>> {
    if bucket_ms == 0 {
        return Err(DetectionError::InvalidConfig {
            field: "bucket_ms",
            reason: "must be positive",
        });
    }

    let count = range.duration_ms().div_ceil(bucket_ms);
    if count > MAX_REPORT_BUCKETS {
        log_warn!(
            "Volume report over {} ms in {} ms buckets needs {} buckets",
            range.duration_ms(), bucket_ms, count
        );
        return Err(DetectionError::InvalidConfig {
            field: "bucket_ms",
            reason: "too many buckets for the range",
        });
    }
    let count = count as usize;
    let mut buckets: Vec<(Timestamp, f64)> = (0..count)
        .map(|k| (range.start() + k as u64 * bucket_ms, 0.0))
        .collect();

    for event in events.iter().filter(|e| range.contains(e.start_time)) {
        let slot = ((event.start_time - range.start()) / bucket_ms) as usize;
        if let Some(bucket) = buckets.get_mut(slot) {
            bucket.1 += event.volume;
        }
    }

    Ok(buckets)
}
