//! Hysteresis state machine over the slope series
//!
//! ```text
//!              slope < down (x min_consecutive_points)
//!   ┌──────┐ ─────────────────────────────────────────▶ ┌───────┐
//!   │ Idle │                                             │ InRun │
//!   └──────┘ ◀───────────────────────────────────────── └───────┘
//!              slope >= recovery  (emit if volume >= min)
//! ```
//!
//! Entry needs a streak of slopes below `down_slope_threshold`; exit needs a
//! single slope at or above `recovery_slope_threshold`, which sits above the
//! entry threshold. Slopes wandering around the entry threshold therefore
//! neither open nor close runs once a run is under way.
//!
//! The run start is back-dated to the trend point where the qualifying
//! streak began, so the event boundary reflects the true onset rather than
//! the detection latency.
//!
//! All mutable detection state lives in [`DetectionState`]. The batch
//! detector starts from a fresh one on every call; a caller feeding
//! successive batches can carry it forward with
//! [`EventStateMachine::with_state`].

use crate::{
    config::DetectionConfig,
    events::OutflowEvent,
    readings::TrendPoint,
};

/// Where the machine is between slope points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunPhase {
    /// Watching for a falling streak
    #[default]
    Idle,
    /// Tracking a confirmed falling run
    InRun {
        /// Back-dated onset of the run
        start: TrendPoint,
    },
}

/// Explicit detection state carried between slope points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionState {
    /// Current phase
    pub phase: RunPhase,
    /// Length of the current falling streak while idle
    pub consecutive_down: usize,
}

impl DetectionState {
    /// Check if a run is open
    pub fn in_run(&self) -> bool {
        matches!(self.phase, RunPhase::InRun { .. })
    }
}

/// Drives [`DetectionState`] through a slope series
pub struct EventStateMachine<'a> {
    config: &'a DetectionConfig,
    state: DetectionState,
}

impl<'a> EventStateMachine<'a> {
    /// Start idle with an empty streak
    pub fn new(config: &'a DetectionConfig) -> Self {
        Self::with_state(config, DetectionState::default())
    }

    /// Resume from a state returned by an earlier [`finish`](Self::finish)
    pub fn with_state(config: &'a DetectionConfig, state: DetectionState) -> Self {
        Self { config, state }
    }

    /// Current state
    pub fn state(&self) -> &DetectionState {
        &self.state
    }

    /// Feed the slope that ends at trend index `index`
    ///
    /// `index` must be a valid index into `trend`. Returns an event when this
    /// slope closes a run whose volume clears `min_volume_change`.
    ///
    /// When resuming a carried state the streak may have started in an
    /// earlier batch. The onset is then clamped to the first point of
    /// `trend`, and a recovery at index 0 closes the run without an event
    /// because its last falling point is not in this batch.
    pub fn step(&mut self, trend: &[TrendPoint], index: usize, slope: f64) -> Option<OutflowEvent> {
        match self.state.phase {
            RunPhase::Idle => {
                if slope < self.config.down_slope_threshold {
                    self.state.consecutive_down += 1;
                    if self.state.consecutive_down >= self.config.min_consecutive_points {
                        let onset = index.saturating_sub(self.config.min_consecutive_points);
                        if let Some(&start) = trend.get(onset) {
                            log_debug!(
                                "Run opened at t={} (detected at index {}, onset index {})",
                                start.timestamp, index, onset
                            );
                            self.state.phase = RunPhase::InRun { start };
                        }
                    }
                } else {
                    self.state.consecutive_down = 0;
                }
                None
            }
            RunPhase::InRun { start } => {
                if slope < self.config.recovery_slope_threshold {
                    return None;
                }
                self.state = DetectionState::default();

                match index.checked_sub(1).and_then(|i| trend.get(i)) {
                    Some(&end) => self.close_run(start, end),
                    None => {
                        log_debug!(
                            "Run open since t={} recovered at batch start, end point unavailable",
                            start.timestamp
                        );
                        None
                    }
                }
            }
        }
    }

    /// End of input: apply the open-run policy and hand back the state
    ///
    /// With `flush_open_run_at_end` an open run is closed at the last trend
    /// point and reported if it clears the volume filter; the returned state
    /// is then idle. Otherwise the open run is not reported and the state is
    /// returned as-is for a caller that continues with the next batch.
    pub fn finish(self, trend: &[TrendPoint]) -> (Option<OutflowEvent>, DetectionState) {
        let RunPhase::InRun { start } = self.state.phase else {
            return (None, self.state);
        };

        if !self.config.flush_open_run_at_end {
            log_info!("Run open since t={} has not recovered by end of window", start.timestamp);
            return (None, self.state);
        }

        let event = trend.last().and_then(|&end| {
            log_debug!("Flushing run open since t={} at t={}", start.timestamp, end.timestamp);
            self.close_run(start, end)
        });
        (event, DetectionState::default())
    }

    fn close_run(&self, start: TrendPoint, end: TrendPoint) -> Option<OutflowEvent> {
        let event = OutflowEvent::from_run(start, end, self.config.volume_conversion_factor);

        if event.volume >= self.config.min_volume_change {
            log_info!(
                "Outflow event {}..{}: drop {:.4}, volume {:.1}",
                event.start_time, event.end_time, event.level_drop, event.volume
            );
            Some(event)
        } else {
            log_debug!(
                "Run {}..{} discarded: volume {:.1} below {:.1}",
                event.start_time, event.end_time, event.volume, self.config.min_volume_change
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const DOWN: f64 = -0.0005;
    const RECOVERY: f64 = -0.0002;

    fn config() -> DetectionConfig {
        DetectionConfig::default()
            .with_down_slope_threshold(DOWN)
            .with_recovery_slope_threshold(RECOVERY)
            .with_min_consecutive_points(3)
            .with_volume_conversion_factor(1000.0)
            .with_min_volume_change(10.0)
    }

    /// Trend falling by 0.01 per point, one point per minute
    fn falling_trend(len: usize) -> Vec<TrendPoint> {
        (0..len)
            .map(|i| TrendPoint { timestamp: i as u64 * 60_000, value: 1.0 - 0.01 * i as f64 })
            .collect()
    }

    /// Feed slopes starting at trend index 1, collecting emitted events
    fn run(
        machine: &mut EventStateMachine<'_>,
        trend: &[TrendPoint],
        slopes: &[f64],
    ) -> Vec<OutflowEvent> {
        run_from(machine, trend, 1, slopes)
    }

    fn run_from(
        machine: &mut EventStateMachine<'_>,
        trend: &[TrendPoint],
        first_index: usize,
        slopes: &[f64],
    ) -> Vec<OutflowEvent> {
        slopes
            .iter()
            .enumerate()
            .filter_map(|(k, &slope)| machine.step(trend, first_index + k, slope))
            .collect()
    }

    #[test]
    fn run_opens_after_streak_and_backdates_start() {
        let config = config();
        let trend = falling_trend(20);
        let mut machine = EventStateMachine::new(&config);

        run(&mut machine, &trend, &[-0.001, -0.001]);
        assert!(!machine.state().in_run());
        assert_eq!(machine.state().consecutive_down, 2);

        // Third falling slope lands on trend index 3; onset is index 0
        run_from(&mut machine, &trend, 3, &[-0.001]);
        assert_eq!(machine.state().phase, RunPhase::InRun { start: trend[0] });
    }

    #[test]
    fn broken_streak_resets() {
        let config = config();
        let trend = falling_trend(20);
        let mut machine = EventStateMachine::new(&config);

        run(&mut machine, &trend, &[-0.001, -0.001, 0.0, -0.001, -0.001]);
        assert!(!machine.state().in_run());
        assert_eq!(machine.state().consecutive_down, 2);
    }

    #[test]
    fn recovery_closes_run_at_previous_point() {
        let config = config();
        let trend = falling_trend(20);
        let mut machine = EventStateMachine::new(&config);

        // Opens at index 3 (onset 0), recovers at index 8, so the run ends at 7
        let events = run(&mut machine, &trend, &[-0.001, -0.001, -0.001, -0.001, -0.001, -0.001, -0.001, 0.0]);
        assert_eq!(events.len(), 1);
        let event = events[0];
        assert_eq!(event.start_time, trend[0].timestamp);
        assert_eq!(event.end_time, trend[7].timestamp);
        assert!((event.level_drop - 0.07).abs() < 1e-9);
        assert!((event.volume - 70.0).abs() < 1e-6);
        assert_eq!(event.duration_minutes, 7.0);
        assert_eq!(*machine.state(), DetectionState::default());
    }

    #[test]
    fn small_run_discarded_but_state_resets() {
        let config = config().with_min_volume_change(1000.0);
        let trend = falling_trend(20);
        let mut machine = EventStateMachine::new(&config);

        let events = run(&mut machine, &trend, &[-0.001, -0.001, -0.001, -0.001, 0.0]);
        assert!(events.is_empty());
        assert_eq!(*machine.state(), DetectionState::default());
    }

    #[test]
    fn hysteresis_keeps_run_open() {
        let config = config();
        let trend = falling_trend(40);
        let mut machine = EventStateMachine::new(&config);

        let mut slopes = alloc::vec![-0.001; 3];
        // Chatter either side of the entry threshold, never reaching recovery
        for k in 0..20 {
            slopes.push(if k % 2 == 0 { DOWN - 0.0001 } else { DOWN + 0.0001 });
        }
        let events = run(&mut machine, &trend, &slopes);
        assert!(events.is_empty());
        assert!(machine.state().in_run());

        // A single recovered slope closes exactly one event
        let events = run_from(&mut machine, &trend, slopes.len() + 1, &[RECOVERY]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_time, trend[0].timestamp);
        assert_eq!(events[0].end_time, trend[slopes.len()].timestamp);
    }

    #[test]
    fn open_run_dropped_by_default() {
        let config = config();
        let trend = falling_trend(10);
        let mut machine = EventStateMachine::new(&config);

        run(&mut machine, &trend, &[-0.001; 9]);
        let (event, state) = machine.finish(&trend);
        assert!(event.is_none());
        assert!(state.in_run());
    }

    #[test]
    fn open_run_flushed_when_configured() {
        let config = config().with_flush_open_run_at_end(true);
        let trend = falling_trend(10);
        let mut machine = EventStateMachine::new(&config);

        run(&mut machine, &trend, &[-0.001; 9]);
        let (event, state) = machine.finish(&trend);
        let event = event.expect("flushed event");
        assert_eq!(event.start_time, trend[0].timestamp);
        assert_eq!(event.end_time, trend[9].timestamp);
        assert!(!state.in_run());
    }

    #[test]
    fn state_carries_across_batches() {
        let config = config();
        let trend = falling_trend(20);

        let mut first = EventStateMachine::new(&config);
        run(&mut first, &trend, &[-0.001; 5]);
        let (_, carried) = first.finish(&trend);
        assert!(carried.in_run());

        let mut second = EventStateMachine::with_state(&config, carried);
        let events = run_from(&mut second, &trend, 6, &[-0.001, 0.0]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_time, trend[0].timestamp);
        assert_eq!(events[0].end_time, trend[6].timestamp);
    }

    #[test]
    fn carried_streak_opens_at_start_of_next_batch() {
        let config = config();
        let trend = falling_trend(20);

        let mut first = EventStateMachine::new(&config);
        run(&mut first, &trend, &[-0.001, -0.001]);
        let (_, carried) = first.finish(&trend);
        assert!(!carried.in_run());
        assert_eq!(carried.consecutive_down, 2);

        // Streak completes on the first slope of the new batch: onset clamps to index 0
        let mut second = EventStateMachine::with_state(&config, carried);
        assert!(run_from(&mut second, &trend, 0, &[-0.001]).is_empty());
        assert_eq!(second.state().phase, RunPhase::InRun { start: trend[0] });

        let events = run_from(&mut second, &trend, 1, &[-0.001, -0.001, -0.001, -0.001, 0.0]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_time, trend[0].timestamp);
        assert_eq!(events[0].end_time, trend[4].timestamp);
    }

    #[test]
    fn carried_streak_past_threshold_still_opens() {
        let config = config().with_min_consecutive_points(6);
        let trend = falling_trend(30);

        let mut first = EventStateMachine::new(&config);
        run(&mut first, &trend, &[-0.001; 4]);
        let (_, carried) = first.finish(&trend);

        let mut second = EventStateMachine::with_state(&config, carried);
        run_from(&mut second, &trend, 0, &[-0.001; 20]);
        assert_eq!(second.state().phase, RunPhase::InRun { start: trend[0] });
    }

    #[test]
    fn recovery_at_batch_start_closes_run() {
        let config = config();
        let carried = DetectionState {
            phase: RunPhase::InRun { start: TrendPoint { timestamp: 0, value: 1.0 } },
            consecutive_down: 3,
        };
        let trend = falling_trend(5);

        let mut machine = EventStateMachine::with_state(&config, carried);
        assert!(machine.step(&trend, 0, 0.0).is_none());
        assert_eq!(*machine.state(), DetectionState::default());

        // Later falling slopes start a fresh streak
        run_from(&mut machine, &trend, 1, &[-0.001]);
        assert_eq!(machine.state().consecutive_down, 1);
    }
}
