//! Time-Related Constants
//!
//! Conversion factors and the sampling cadence the detection defaults were
//! tuned against.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u64 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: u64 = 24;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u64 = MS_PER_SECOND * SECONDS_PER_MINUTE;

/// Milliseconds per hour.
pub const MS_PER_HOUR: u64 = MS_PER_MINUTE * MINUTES_PER_HOUR;

/// Milliseconds per day.
pub const MS_PER_DAY: u64 = MS_PER_HOUR * HOURS_PER_DAY;

// ===== SAMPLING =====

/// Expected interval between level samples (milliseconds).
///
/// The level transmitter publishes every 30 s. The default smoothing and
/// slope windows are sized against this cadence; see
/// [`DetectionConfig::for_sample_interval`](crate::config::DetectionConfig::for_sample_interval)
/// for other densities.
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 30 * MS_PER_SECOND;

/// Wall-clock span the smoothing window should cover.
pub const SMOOTHING_SPAN_MS: u64 = MS_PER_HOUR;

/// Wall-clock span the slope lookback should cover.
pub const SLOPE_SPAN_MS: u64 = 5 * MS_PER_MINUTE;

// ===== REFRESH =====

/// History re-fetched and reprocessed on each monitor refresh.
///
/// The dashboard recomputes events over the trailing day every time it
/// refreshes, rather than updating them sample by sample.
pub const DEFAULT_REFRESH_WINDOW_MS: u64 = MS_PER_DAY;

// ===== REPORTING =====

/// Upper bound on the buckets one volume report may allocate.
///
/// A year of 5 minute buckets is about 105 000.
pub const MAX_REPORT_BUCKETS: u64 = 200_000;
