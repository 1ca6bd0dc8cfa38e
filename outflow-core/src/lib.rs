//! Outflow event detection for tank level signals
//!
//! Turns a noisy, periodically sampled water-level series into discrete,
//! volume-quantified drainage events. The engine is a pure batch function:
//! it takes an ordered slice of readings plus a [`DetectionConfig`] and
//! returns the detected [`OutflowEvent`]s together with the smoothed trend.
//!
//! Pipeline stages, each consuming the previous stage's output:
//! - [`filter`]: single-sample spike rejection
//! - [`smoothing`]: centered moving-average trend
//! - [`slope`]: windowed rate of change over the trend
//! - [`detector`]: hysteresis state machine and volume quantification
//!
//! ```
//! use outflow_core::{detect, DetectionConfig, Reading};
//!
//! let readings: Vec<Reading> = (0..300)
//!     .map(|i| Reading::new(i as u64 * 30_000, 1.0))
//!     .collect();
//!
//! let report = detect(&readings, &DetectionConfig::default())?;
//! assert!(report.events.is_empty());
//! assert_eq!(report.trend.len(), readings.len());
//! # Ok::<(), outflow_core::DetectionError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod config;
pub mod constants;
pub mod detector;
pub mod errors;
pub mod events;
pub mod filter;
pub mod monitor;
pub mod readings;
pub mod report;
pub mod slope;
pub mod smoothing;
pub mod source;
pub mod time;

// Public API
pub use config::DetectionConfig;
pub use detector::{detect, DetectionReport, DetectionState, EventStateMachine, RunPhase};
pub use errors::{DetectionError, DetectionResult, SourceError};
pub use events::OutflowEvent;
pub use monitor::{MonitorConfig, OutflowMonitor};
pub use readings::{Reading, SlopePoint, TrendPoint};
pub use report::{bucketed_volume, VolumeSummary};
pub use source::{MemorySource, RawSample, ReadingSource};
pub use time::{TimeRange, TimeSource, Timestamp};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
