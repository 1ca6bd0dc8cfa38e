//! Detection Defaults
//!
//! Values tuned on the AT-02 tank level transmitter. Level units are the
//! transmitter's native units (metres of water column); slopes are level
//! units per sample.

// ===== OUTLIER FILTER =====

/// Spike rejection threshold (level units).
///
/// A sample that differs from BOTH neighbours by more than this is treated
/// as a single-sample glitch and replaced with the neighbour mean.
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 0.15;

// ===== TREND SMOOTHER =====

/// Centered moving-average window (samples).
///
/// 120 samples at the 30 s cadence is about one hour.
pub const DEFAULT_SMOOTHING_WINDOW_SIZE: usize = 120;

// ===== SLOPE ESTIMATOR =====

/// Slope lookback (trend points).
///
/// 10 points at the 30 s cadence is about five minutes. Differencing across
/// a window instead of adjacent points rejects jitter that survives the
/// smoother.
pub const DEFAULT_SLOPE_WINDOW_SIZE: usize = 10;

// ===== EVENT STATE MACHINE =====

/// Consecutive falling slopes required to open a run.
pub const DEFAULT_MIN_CONSECUTIVE_POINTS: usize = 6;

/// Entry threshold (level units per sample).
///
/// A slope below this counts towards opening a run. This is the knob the
/// dashboard exposes, since drain rates differ between plants.
pub const DEFAULT_DOWN_SLOPE_THRESHOLD: f64 = -0.0005;

/// Exit threshold (level units per sample).
///
/// An open run closes on the first slope at or above this. Must be greater
/// (less negative) than the entry threshold so that noise around the entry
/// threshold cannot open and close runs repeatedly.
pub const DEFAULT_RECOVERY_SLOPE_THRESHOLD: f64 = -0.0002;

// ===== VOLUME QUANTIFIER =====

/// Smallest volume reported as an event (litres).
pub const DEFAULT_MIN_VOLUME_CHANGE: f64 = 100.0;

/// Litres per level unit for the AT-02 tank geometry.
pub const DEFAULT_VOLUME_CONVERSION_FACTOR: f64 = 3500.0;

/// Whether a run still open at the end of the window is closed and reported.
///
/// Off by default: a drain without confirmed recovery is not reported.
pub const DEFAULT_FLUSH_OPEN_RUN_AT_END: bool = false;
