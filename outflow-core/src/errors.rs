//! Error Types for Detection Runs
//!
//! The detection engine is deterministic and side-effect free, so every error
//! here is a caller or input problem, never a transient fault. Nothing is
//! retried.
//!
//! Errors stay small and `Copy`: reasons are `&'static str`, never `String`,
//! so the same types work on bare targets built without `std`.
//!
//! ## Categories
//!
//! ### Configuration
//! - `InvalidConfig`: a threshold or window in [`DetectionConfig`] is out of
//!   its valid domain (zero window, inverted hysteresis, non-negative entry
//!   slope, ...). Raised before any reading is touched.
//!
//! ### Query
//! - `InvalidRange`: a half-open `[start, end)` range with `start > end`.
//! - `Source`: the reading feed failed to answer a range query.
//!
//! ```rust
//! use outflow_core::{detect, DetectionConfig, DetectionError};
//!
//! let config = DetectionConfig::default().with_down_slope_threshold(0.001);
//! match detect(&[], &config) {
//!     Err(DetectionError::InvalidConfig { field, .. }) => {
//!         assert_eq!(field, "down_slope_threshold");
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! [`DetectionConfig`]: crate::config::DetectionConfig

use thiserror_no_std::Error;

use crate::time::Timestamp;

/// Result type for detection operations
pub type DetectionResult<T> = Result<T, DetectionError>;

/// Errors raised by a detection run or a monitor refresh
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DetectionError {
    /// A configuration field is outside its valid domain
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig {
        /// Name of the offending `DetectionConfig` field
        field: &'static str,
        /// What constraint was violated
        reason: &'static str,
    },

    /// Query range with its start after its end
    #[error("Invalid time range [{start}, {end})")]
    InvalidRange {
        /// Inclusive start in milliseconds
        start: Timestamp,
        /// Exclusive end in milliseconds
        end: Timestamp,
    },

    /// The reading feed could not answer a query
    #[error("Reading source failed: {0}")]
    Source(#[from] SourceError),
}

/// Errors reported by a [`ReadingSource`](crate::source::ReadingSource)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    /// Backing store could not be reached or returned nothing usable
    #[error("Source unavailable: {reason}")]
    Unavailable {
        /// Short description from the source implementation
        reason: &'static str,
    },

    /// Samples came back out of timestamp order
    #[error("Samples out of order at index {index}")]
    Unordered {
        /// First index whose timestamp is earlier than its predecessor
        index: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for DetectionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidConfig { field, reason } =>
                defmt::write!(fmt, "Config {}: {}", field, reason),
            Self::InvalidRange { start, end } =>
                defmt::write!(fmt, "Range [{}, {})", start, end),
            Self::Source(e) =>
                defmt::write!(fmt, "Source: {}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SourceError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Unavailable { reason } =>
                defmt::write!(fmt, "Unavailable: {}", reason),
            Self::Unordered { index } =>
                defmt::write!(fmt, "Unordered at {}", index),
        }
    }
}
