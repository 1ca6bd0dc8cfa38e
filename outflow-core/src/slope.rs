//! Windowed slope over the trend
//!
//! `slope[i] = (trend[i] - trend[i - lookback]) / lookback`, defined only
//! for `i >= lookback`. The output therefore starts at trend index
//! `lookback`; slope `k` belongs to trend index `k + lookback`.

use alloc::vec::Vec;

use crate::readings::{SlopePoint, TrendPoint};

/// Rate of change per sample at each trend point from `lookback` onwards
pub fn slopes(trend: &[TrendPoint], lookback: usize) -> Vec<SlopePoint> {
    if lookback == 0 || trend.len() <= lookback {
        return Vec::new();
    }

    trend
        .iter()
        .zip(&trend[lookback..])
        .map(|(earlier, point)| SlopePoint {
            timestamp: point.timestamp,
            slope: (point.value - earlier.value) / lookback as f64,
        })
        .collect()
}
