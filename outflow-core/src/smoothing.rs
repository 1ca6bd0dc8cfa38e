//! Centered moving-average trend
//!
//! For index `i` the window is `[i - w/2, i + ceil(w/2))`, clipped to the
//! array. Near the edges the window shrinks instead of padding or wrapping,
//! so the first and last points average fewer samples.
//!
//! ```text
//! w = 4, n = 6
//! i=0: [0, 2)   i=1: [0, 3)   i=2: [0, 4)
//! i=3: [1, 5)   i=4: [2, 6)   i=5: [3, 6)
//! ```
//!
//! Sums come from a prefix-sum table so the pass is O(n) for any window.

use alloc::vec::Vec;

use crate::readings::{Reading, TrendPoint};

/// Smooth cleaned readings into a trend of the same length
///
/// `window_size` must be at least 1; [`DetectionConfig::validate`] enforces
/// this before the detector calls in here.
///
/// [`DetectionConfig::validate`]: crate::config::DetectionConfig::validate
pub fn smooth(cleaned: &[Reading], window_size: usize) -> Vec<TrendPoint> {
    let n = cleaned.len();
    let behind = window_size / 2;
    let ahead = window_size - behind;

    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0);
    let mut running = 0.0;
    for reading in cleaned {
        running += reading.value;
        prefix.push(running);
    }

    cleaned
        .iter()
        .enumerate()
        .map(|(i, reading)| {
            let lo = i.saturating_sub(behind);
            let hi = (i + ahead).min(n);
            TrendPoint {
                timestamp: reading.timestamp,
                value: (prefix[hi] - prefix[lo]) / (hi - lo) as f64,
            }
        })
        .collect()
}
