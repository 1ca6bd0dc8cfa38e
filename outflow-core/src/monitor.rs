//! Refresh-driven monitoring
//!
//! The dashboard does not update events sample by sample. On every refresh
//! it re-fetches the trailing window (a day by default) and runs the full
//! detection again from scratch. [`OutflowMonitor`] packages that loop body:
//! a feed, a clock, a configuration and a window length.
//!
//! ```rust
//! use outflow_core::{MemorySource, MonitorConfig, OutflowMonitor, Reading};
//! use outflow_core::time::FixedTime;
//!
//! let readings: Vec<Reading> = (0..100).map(|i| Reading::new(i * 30_000, 1.0)).collect();
//! let monitor = OutflowMonitor::new(
//!     MemorySource::from_readings(&readings),
//!     FixedTime::new(100 * 30_000),
//!     MonitorConfig::default(),
//! )?;
//!
//! let report = monitor.refresh()?;
//! assert_eq!(report.trend.len(), 100);
//! # Ok::<(), outflow_core::DetectionError>(())
//! ```

use crate::{
    config::DetectionConfig,
    constants::time::DEFAULT_REFRESH_WINDOW_MS,
    detector::{detect, DetectionReport},
    errors::{DetectionError, DetectionResult},
    source::{check_ordered, ReadingSource},
    time::{TimeRange, TimeSource, Timestamp},
};

/// Monitor settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct MonitorConfig {
    /// Trailing history reprocessed on each refresh (milliseconds)
    pub window_ms: u64,
    /// Detection settings applied to every refresh
    pub detection: DetectionConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_REFRESH_WINDOW_MS,
            detection: DetectionConfig::default(),
        }
    }
}

/// Re-runs detection over the trailing window of a reading feed
pub struct OutflowMonitor<S, T> {
    source: S,
    clock: T,
    config: MonitorConfig,
}

impl<S: ReadingSource, T: TimeSource> OutflowMonitor<S, T> {
    /// Create a monitor; the configuration is validated here once
    pub fn new(source: S, clock: T, config: MonitorConfig) -> DetectionResult<Self> {
        if config.window_ms == 0 {
            return Err(DetectionError::InvalidConfig {
                field: "window_ms",
                reason: "must be positive",
            });
        }
        config.detection.validate()?;

        Ok(Self { source, clock, config })
    }

    /// Current settings
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Change the entry threshold, the one knob exposed to operators
    pub fn set_down_slope_threshold(&mut self, threshold: f64) -> DetectionResult<()> {
        let detection = self.config.detection.with_down_slope_threshold(threshold);
        detection.validate()?;
        self.config.detection = detection;
        Ok(())
    }

    /// Replace the detection settings
    pub fn set_detection_config(&mut self, detection: DetectionConfig) -> DetectionResult<()> {
        detection.validate()?;
        self.config.detection = detection;
        Ok(())
    }

    /// Underlying feed
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the feed, for sources that ingest in-process
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Detect over the window ending at the clock's current time
    pub fn refresh(&self) -> DetectionResult<DetectionReport> {
        self.refresh_at(self.clock.now())
    }

    /// Detect over the window `[now - window_ms, now)`
    pub fn refresh_at(&self, now: Timestamp) -> DetectionResult<DetectionReport> {
        let range = TimeRange::ending_at(now, self.config.window_ms);
        let readings = self.source.readings(range)?;
        check_ordered(&readings)?;

        log_debug!(
            "Refresh over [{}, {}): {} readings",
            range.start(), range.end(), readings.len()
        );

        detect(&readings, &self.config.detection)
    }
}
