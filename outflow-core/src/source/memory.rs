//! Memory-backed reading source for testing and replay
//!
//! Holds raw samples the way the store hands them over, including gaps
//! (`value: None`) and the occasional NaN from a transmitter fault, and does
//! the filtering a real feed is required to do before the detector sees
//! them.
//!
//! ```rust
//! use outflow_core::{MemorySource, RawSample, ReadingSource, TimeRange};
//!
//! let source = MemorySource::new(vec![
//!     RawSample::new(1000, Some(1.20)),
//!     RawSample::new(2000, None),
//!     RawSample::new(3000, Some(1.19)),
//! ]);
//!
//! let readings = source.readings(TimeRange::new(0, 3000)?)?;
//! assert_eq!(readings.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use alloc::vec::Vec;

use super::ReadingSource;
use crate::{errors::SourceError, readings::Reading, time::{TimeRange, Timestamp}};

/// Sample as stored, value possibly missing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSample {
    /// Sample time in milliseconds
    pub timestamp: Timestamp,
    /// Level, `None` where the transmitter reported nothing
    pub value: Option<f64>,
}

impl RawSample {
    /// Create a sample
    pub const fn new(timestamp: Timestamp, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }

    fn usable(&self) -> Option<Reading> {
        self.value
            .filter(|v| v.is_finite())
            .map(|value| Reading::new(self.timestamp, value))
    }
}

/// In-memory [`ReadingSource`]
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    /// Samples kept sorted by timestamp
    samples: Vec<RawSample>,
}

impl MemorySource {
    /// Create a source; samples are sorted by timestamp (stable)
    pub fn new(mut samples: Vec<RawSample>) -> Self {
        samples.sort_by_key(|s| s.timestamp);
        Self { samples }
    }

    /// Create a source from already-valid readings
    pub fn from_readings(readings: &[Reading]) -> Self {
        Self::new(
            readings
                .iter()
                .map(|r| RawSample::new(r.timestamp, Some(r.value)))
                .collect(),
        )
    }

    /// Append a sample, keeping timestamp order
    pub fn push(&mut self, sample: RawSample) {
        let at = self.samples.partition_point(|s| s.timestamp <= sample.timestamp);
        self.samples.insert(at, sample);
    }

    /// Number of stored samples, including unusable ones
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if no samples are stored
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop samples older than `cutoff`
    pub fn retain_since(&mut self, cutoff: Timestamp) {
        self.samples.retain(|s| s.timestamp >= cutoff);
    }
}

impl ReadingSource for MemorySource {
    fn readings(&self, range: TimeRange) -> Result<Vec<Reading>, SourceError> {
        let lo = self.samples.partition_point(|s| s.timestamp < range.start());
        let hi = self.samples.partition_point(|s| s.timestamp < range.end());
        let window = &self.samples[lo..hi.max(lo)];

        let readings: Vec<Reading> = window.iter().filter_map(RawSample::usable).collect();

        let skipped = window.len() - readings.len();
        if skipped > 0 {
            log_debug!(
                "Skipped {} null or non-finite samples in [{}, {})",
                skipped, range.start(), range.end()
            );
        }

        Ok(readings)
    }
}
