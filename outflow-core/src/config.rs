//! Detection configuration
//!
//! Every threshold and window the pipeline uses lives in [`DetectionConfig`].
//! Defaults come from [`constants::detection`](crate::constants::detection)
//! and were tuned for a 30 s sample cadence; other cadences should go through
//! [`DetectionConfig::for_sample_interval`] so windows keep their wall-clock
//! span.
//!
//! ```rust
//! use outflow_core::DetectionConfig;
//!
//! // Site with a slower drain: only the entry threshold changes
//! let config = DetectionConfig::default().with_down_slope_threshold(-0.0003);
//! assert!(config.validate().is_ok());
//!
//! // Inverted hysteresis is rejected up front
//! let bad = DetectionConfig::default()
//!     .with_down_slope_threshold(-0.0005)
//!     .with_recovery_slope_threshold(-0.0008);
//! assert!(bad.validate().is_err());
//! ```

use crate::{
    constants::{
        detection::*,
        time::{DEFAULT_SAMPLE_INTERVAL_MS, SLOPE_SPAN_MS, SMOOTHING_SPAN_MS},
    },
    errors::{DetectionError, DetectionResult},
};

/// Thresholds and windows for one detection run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct DetectionConfig {
    /// Spike rejection threshold in level units
    pub outlier_threshold: f64,

    /// Centered moving-average window in samples
    pub smoothing_window_size: usize,

    /// Slope lookback in trend points
    pub slope_window_size: usize,

    /// Consecutive falling slopes needed to open a run
    pub min_consecutive_points: usize,

    /// Entry threshold, level units per sample (negative)
    pub down_slope_threshold: f64,

    /// Exit threshold, level units per sample; above the entry threshold
    pub recovery_slope_threshold: f64,

    /// Smallest volume reported as an event
    pub min_volume_change: f64,

    /// Volume per level unit for the vessel geometry
    pub volume_conversion_factor: f64,

    /// Close and report a run still open when the input ends
    pub flush_open_run_at_end: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            outlier_threshold: DEFAULT_OUTLIER_THRESHOLD,
            smoothing_window_size: DEFAULT_SMOOTHING_WINDOW_SIZE,
            slope_window_size: DEFAULT_SLOPE_WINDOW_SIZE,
            min_consecutive_points: DEFAULT_MIN_CONSECUTIVE_POINTS,
            down_slope_threshold: DEFAULT_DOWN_SLOPE_THRESHOLD,
            recovery_slope_threshold: DEFAULT_RECOVERY_SLOPE_THRESHOLD,
            min_volume_change: DEFAULT_MIN_VOLUME_CHANGE,
            volume_conversion_factor: DEFAULT_VOLUME_CONVERSION_FACTOR,
            flush_open_run_at_end: DEFAULT_FLUSH_OPEN_RUN_AT_END,
        }
    }
}

impl DetectionConfig {
    /// Defaults rescaled for a different sampling cadence
    ///
    /// Window sizes keep their wall-clock span (one hour of smoothing, five
    /// minutes of slope lookback). Slope thresholds are per sample, so they
    /// scale with the interval to keep the same physical drain rate.
    pub fn for_sample_interval(interval_ms: u64) -> DetectionResult<Self> {
        if interval_ms == 0 {
            return Err(DetectionError::InvalidConfig {
                field: "sample_interval_ms",
                reason: "must be positive",
            });
        }
        Ok(Self::scaled(interval_ms))
    }

    /// Preset for transmitters sampling every 10 s
    pub fn high_frequency() -> Self {
        Self::scaled(10_000)
    }

    fn scaled(interval_ms: u64) -> Self {
        let windows = |span_ms: u64| ((span_ms + interval_ms / 2) / interval_ms).max(1) as usize;
        let ratio = interval_ms as f64 / DEFAULT_SAMPLE_INTERVAL_MS as f64;

        Self {
            smoothing_window_size: windows(SMOOTHING_SPAN_MS),
            slope_window_size: windows(SLOPE_SPAN_MS),
            down_slope_threshold: DEFAULT_DOWN_SLOPE_THRESHOLD * ratio,
            recovery_slope_threshold: DEFAULT_RECOVERY_SLOPE_THRESHOLD * ratio,
            ..Self::default()
        }
    }

    /// Set the spike rejection threshold
    pub fn with_outlier_threshold(mut self, threshold: f64) -> Self {
        self.outlier_threshold = threshold;
        self
    }

    /// Set the smoothing window
    pub fn with_smoothing_window_size(mut self, samples: usize) -> Self {
        self.smoothing_window_size = samples;
        self
    }

    /// Set the slope lookback
    pub fn with_slope_window_size(mut self, points: usize) -> Self {
        self.slope_window_size = points;
        self
    }

    /// Set the consecutive falling slopes needed to open a run
    pub fn with_min_consecutive_points(mut self, points: usize) -> Self {
        self.min_consecutive_points = points;
        self
    }

    /// Set the entry threshold (the user-tunable knob)
    pub fn with_down_slope_threshold(mut self, threshold: f64) -> Self {
        self.down_slope_threshold = threshold;
        self
    }

    /// Set the exit threshold
    pub fn with_recovery_slope_threshold(mut self, threshold: f64) -> Self {
        self.recovery_slope_threshold = threshold;
        self
    }

    /// Set the minimum reported volume
    pub fn with_min_volume_change(mut self, volume: f64) -> Self {
        self.min_volume_change = volume;
        self
    }

    /// Set the level-to-volume factor
    pub fn with_volume_conversion_factor(mut self, factor: f64) -> Self {
        self.volume_conversion_factor = factor;
        self
    }

    /// Choose whether a run open at the end of input is reported
    pub fn with_flush_open_run_at_end(mut self, flush: bool) -> Self {
        self.flush_open_run_at_end = flush;
        self
    }

    /// Check every field against its domain
    ///
    /// Runs before any reading is processed so that a bad threshold fails
    /// loudly instead of producing an empty or degenerate event list.
    pub fn validate(&self) -> DetectionResult<()> {
        let fail = |field: &'static str, reason: &'static str| {
            log_warn!("Rejected detection config: {} {}", field, reason);
            Err(DetectionError::InvalidConfig { field, reason })
        };

        if !self.outlier_threshold.is_finite() || self.outlier_threshold <= 0.0 {
            return fail("outlier_threshold", "must be a positive finite number");
        }
        if self.smoothing_window_size == 0 {
            return fail("smoothing_window_size", "must be at least 1");
        }
        if self.slope_window_size == 0 {
            return fail("slope_window_size", "must be at least 1");
        }
        if self.min_consecutive_points == 0 {
            return fail("min_consecutive_points", "must be at least 1");
        }
        if !self.down_slope_threshold.is_finite() || self.down_slope_threshold >= 0.0 {
            return fail("down_slope_threshold", "must be a negative finite number");
        }
        if !self.recovery_slope_threshold.is_finite() {
            return fail("recovery_slope_threshold", "must be finite");
        }
        if self.recovery_slope_threshold <= self.down_slope_threshold {
            return fail(
                "recovery_slope_threshold",
                "must be greater than down_slope_threshold",
            );
        }
        if !self.min_volume_change.is_finite() || self.min_volume_change < 0.0 {
            return fail("min_volume_change", "must be a non-negative finite number");
        }
        if !self.volume_conversion_factor.is_finite() || self.volume_conversion_factor <= 0.0 {
            return fail("volume_conversion_factor", "must be a positive finite number");
        }

        Ok(())
    }
}
