//! Time handling for detection windows
//!
//! Timestamps are plain milliseconds since the epoch. Range queries against
//! the reading feed are half-open `[start, end)`, matching what the
//! time-series store returns.

use crate::{
    constants::time::MS_PER_MINUTE,
    errors::{DetectionError, DetectionResult},
};

/// Timestamp in milliseconds since epoch
pub type Timestamp = u64;

/// Source of "now" for monitor refreshes
pub trait TimeSource {
    /// Current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

/// Wall clock time source (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Fixed time source for testing and replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Create a source frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to an absolute instant
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward by `ms`
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

/// Half-open time range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl TimeRange {
    /// Build a range, rejecting `start > end`. An empty range (`start == end`)
    /// is allowed and contains nothing.
    pub fn new(start: Timestamp, end: Timestamp) -> DetectionResult<Self> {
        if start > end {
            return Err(DetectionError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The `span_ms` milliseconds ending at `end`, clamped at the epoch
    pub fn ending_at(end: Timestamp, span_ms: u64) -> Self {
        Self {
            start: end.saturating_sub(span_ms),
            end,
        }
    }

    /// Inclusive start
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Exclusive end
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Length in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Whether `ts` falls inside `[start, end)`
    pub fn contains(&self, ts: Timestamp) -> bool {
        ts >= self.start && ts < self.end
    }

    /// Check if the range holds no instants
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Minutes between two timestamps, as a real number
///
/// Returns 0 when `later` precedes `earlier`.
pub fn minutes_between(earlier: Timestamp, later: Timestamp) -> f64 {
    later.saturating_sub(earlier) as f64 / MS_PER_MINUTE as f64
}
