//! Outflow Event Detection
//!
//! ## Overview
//!
//! [`detect`] runs the whole pipeline over one bounded window of readings:
//!
//! ```text
//! readings → filter → cleaned → smooth → trend → slopes → state machine → events
//!                                          │
//!                                          └──────────────▶ report.trend
//! ```
//!
//! Every stage is a pure function of the previous stage's output. The call
//! takes an immutable slice and returns a fresh [`DetectionReport`]; nothing
//! is remembered between calls, so concurrent calls on different inputs need
//! no coordination.
//!
//! ## Index bookkeeping
//!
//! The slope series starts at trend index `slope_window_size`, so slope `k`
//! is fed to the state machine as trend index `k + slope_window_size`. A run
//! confirmed at index `i` starts at trend index `i - min_consecutive_points`,
//! which is never negative because the streak itself needs that many slopes.
//!
//! ## Degenerate inputs
//!
//! - Empty input gives an empty report.
//! - Input shorter than the windows still gets a trend; no slope run can
//!   reach `min_consecutive_points`, so there are no events.
//! - Values are assumed finite. Feeds must drop invalid samples first.
//! - Timestamps must be non-decreasing. Event boundaries are distinct trend
//!   indices, so with strictly increasing timestamps `start_time < end_time`;
//!   repeated timestamps only guarantee `start_time <= end_time`.

mod state;

pub use state::{DetectionState, EventStateMachine, RunPhase};

use alloc::vec::Vec;

use crate::{
    config::DetectionConfig,
    errors::DetectionResult,
    events::OutflowEvent,
    filter::filter_counted,
    readings::{Reading, SlopePoint, TrendPoint},
    slope::slopes,
    smoothing::smooth,
};

/// Output of one detection run
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DetectionReport {
    /// Detected events, chronological and non-overlapping
    ///
    /// `start_time <= end_time` always, strictly less when the input
    /// timestamps are strictly increasing.
    pub events: Vec<OutflowEvent>,
    /// Smoothed level, one point per input reading
    pub trend: Vec<TrendPoint>,
    /// Readings after spike rejection, one per input reading
    pub cleaned: Vec<Reading>,
    /// Slope series, starting at trend index `slope_window_size`
    pub slopes: Vec<SlopePoint>,
    /// Number of samples replaced by the outlier filter
    pub outliers_corrected: usize,
}

impl DetectionReport {
    /// Sum of event volumes
    pub fn total_volume(&self) -> f64 {
        self.events.iter().map(|e| e.volume).sum()
    }
}

/// Detect outflow events in an ordered window of readings
///
/// Fails only on an invalid configuration; see
/// [`DetectionConfig::validate`].
pub fn detect(readings: &[Reading], config: &DetectionConfig) -> DetectionResult<DetectionReport> {
    config.validate()?;

    let (cleaned, outliers_corrected) = filter_counted(readings, config.outlier_threshold);
    let trend = smooth(&cleaned, config.smoothing_window_size);
    let slope_points = slopes(&trend, config.slope_window_size);

    let mut machine = EventStateMachine::new(config);
    let mut events: Vec<OutflowEvent> = slope_points
        .iter()
        .enumerate()
        .filter_map(|(k, point)| machine.step(&trend, k + config.slope_window_size, point.slope))
        .collect();

    let (tail, _) = machine.finish(&trend);
    events.extend(tail);

    log_debug!(
        "Detection over {} readings: {} events, {} outliers corrected",
        readings.len(), events.len(), outliers_corrected
    );

    Ok(DetectionReport {
        events,
        trend,
        cleaned,
        slopes: slope_points,
        outliers_corrected,
    })
}
