//! Sample types flowing between pipeline stages
//!
//! All three are small `Copy` records ordered by timestamp. A cleaned reading
//! has the same shape as a raw one, so the outlier filter returns `Reading`s.

use crate::time::Timestamp;

/// Single level sample
///
/// Input precondition for the detector: readings are ascending by timestamp
/// and every value is finite. The feed is responsible for dropping nulls.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// Sample time in milliseconds
    pub timestamp: Timestamp,
    /// Level in transmitter units
    pub value: f64,
}

impl Reading {
    /// Create a reading
    pub const fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Smoothed level at one reading index
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrendPoint {
    /// Timestamp of the reading this point smooths
    pub timestamp: Timestamp,
    /// Moving-average level
    pub value: f64,
}

/// Windowed rate of change of the trend
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlopePoint {
    /// Timestamp of the trend point the slope ends at
    pub timestamp: Timestamp,
    /// Level change per sample
    pub slope: f64,
}
