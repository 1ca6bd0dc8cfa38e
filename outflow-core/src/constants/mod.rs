//! Constants for Outflow Core
//!
//! Every tunable number the detector uses has a named default here. None of
//! them is embedded as a literal in the algorithms: they are plant and sensor
//! specific, and the engine only ever reads them through
//! [`DetectionConfig`](crate::config::DetectionConfig).
//!
//! ## Organization
//!
//! - **Detection**: thresholds and window sizes for the pipeline stages
//! - **Time**: unit conversions and the expected sampling cadence

/// Detection thresholds, windows and volume conversion defaults.
pub mod detection;

/// Time unit conversions and sampling cadence.
pub mod time;

pub use detection::{
    DEFAULT_DOWN_SLOPE_THRESHOLD, DEFAULT_MIN_CONSECUTIVE_POINTS, DEFAULT_MIN_VOLUME_CHANGE,
    DEFAULT_OUTLIER_THRESHOLD, DEFAULT_RECOVERY_SLOPE_THRESHOLD, DEFAULT_SLOPE_WINDOW_SIZE,
    DEFAULT_SMOOTHING_WINDOW_SIZE, DEFAULT_VOLUME_CONVERSION_FACTOR,
};

pub use time::{DEFAULT_REFRESH_WINDOW_MS, DEFAULT_SAMPLE_INTERVAL_MS, MS_PER_HOUR, MS_PER_MINUTE};
