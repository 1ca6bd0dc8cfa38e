//! Outflow event records
//!
//! An [`OutflowEvent`] is one confirmed drainage episode: where the trend
//! started falling, where it stopped, and how much volume left the tank in
//! between. Events are immutable once built; the fields are public for
//! reading and serialization, construction goes through
//! [`OutflowEvent::from_run`] so the derived fields always agree.

use crate::{
    readings::TrendPoint,
    time::{minutes_between, Timestamp},
};

/// Quantified drainage episode
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutflowEvent {
    /// Back-dated onset of the falling run
    pub start_time: Timestamp,
    /// Last trend point still part of the run, never before `start_time`
    pub end_time: Timestamp,
    /// Trend level at onset
    pub start_level: f64,
    /// Trend level at the end of the run
    pub end_level: f64,
    /// `start_level - end_level`
    pub level_drop: f64,
    /// `level_drop * volume_conversion_factor`
    pub volume: f64,
    /// `(end_time - start_time)` in minutes
    pub duration_minutes: f64,
}

impl OutflowEvent {
    /// Quantify a run between two trend points
    pub fn from_run(start: TrendPoint, end: TrendPoint, volume_conversion_factor: f64) -> Self {
        let level_drop = start.value - end.value;

        Self {
            start_time: start.timestamp,
            end_time: end.timestamp,
            start_level: start.value,
            end_level: end.value,
            level_drop,
            volume: level_drop * volume_conversion_factor,
            duration_minutes: minutes_between(start.timestamp, end.timestamp),
        }
    }

    /// Mean outflow over the event, volume per minute
    ///
    /// Zero for an event with no duration.
    pub fn mean_flow_rate(&self) -> f64 {
        if self.duration_minutes > 0.0 {
            self.volume / self.duration_minutes
        } else {
            0.0
        }
    }

    /// Check if the event starts before `other` ends and ends after it starts
    pub fn overlaps(&self, other: &OutflowEvent) -> bool {
        self.start_time <= other.end_time && other.start_time <= self.end_time
    }
}
