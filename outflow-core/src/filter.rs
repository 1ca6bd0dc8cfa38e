//! Single-sample spike rejection
//!
//! A level transmitter occasionally reports one wild sample (EMI on the
//! 4-20 mA loop, a splash on the ultrasonic head). Such a sample disagrees
//! with both of its neighbours; a real level change disagrees with at most
//! one of them.
//!
//! ```text
//!   prev   cur   next
//!    1.0   2.0   1.0     |cur-prev| > t and |cur-next| > t  -> cur = 1.0
//!    1.0   2.0   2.0     step, only one side disagrees      -> kept
//! ```
//!
//! One forward pass, compared against the RAW neighbours. Two adjacent bad
//! samples shield each other and are not both corrected; that is accepted.

use alloc::vec::Vec;

use crate::readings::Reading;

/// Replace isolated spikes with the mean of their neighbours
///
/// Output has the same length and order as the input. The first and last
/// samples are never modified.
pub fn filter(readings: &[Reading], outlier_threshold: f64) -> Vec<Reading> {
    filter_counted(readings, outlier_threshold).0
}

/// Like [`filter`], also returning how many samples were replaced
pub fn filter_counted(readings: &[Reading], outlier_threshold: f64) -> (Vec<Reading>, usize) {
    let mut cleaned = readings.to_vec();
    let mut corrected = 0;

    for (i, window) in readings.windows(3).enumerate() {
        let (prev, cur, next) = (window[0].value, window[1].value, window[2].value);

        if is_spike(prev, cur, next, outlier_threshold) {
            cleaned[i + 1].value = (prev + next) / 2.0;
            corrected += 1;
        }
    }

    if corrected > 0 {
        log_debug!("Outlier filter replaced {} of {} samples", corrected, readings.len());
    }

    (cleaned, corrected)
}

fn is_spike(prev: f64, cur: f64, next: f64, threshold: f64) -> bool {
    libm::fabs(cur - prev) > threshold && libm::fabs(cur - next) > threshold
}
