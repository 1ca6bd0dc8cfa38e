//! Reading feeds
//!
//! The detector never talks to the time-series store itself. A feed
//! implements [`ReadingSource`]: answer a half-open `[start, end)` range with
//! ascending readings, nulls and non-finite samples already removed.
//!
//! ## Implementation Notes
//!
//! - Return readings sorted by timestamp; the detector does not re-sort
//! - Drop missing or non-finite samples before returning
//! - Report transport failures as [`SourceError::Unavailable`]
//!
//! [`MemorySource`] is the in-process implementation used for tests and for
//! replaying exported history.

mod memory;

pub use memory::{MemorySource, RawSample};

use alloc::vec::Vec;

use crate::{errors::SourceError, readings::Reading, time::TimeRange};

/// Range-queryable supply of level readings
pub trait ReadingSource {
    /// Readings with `range.start() <= timestamp < range.end()`, ascending
    fn readings(&self, range: TimeRange) -> Result<Vec<Reading>, SourceError>;
}

impl<S: ReadingSource + ?Sized> ReadingSource for &S {
    fn readings(&self, range: TimeRange) -> Result<Vec<Reading>, SourceError> {
        (**self).readings(range)
    }
}

/// Confirm a reading sequence is in non-decreasing timestamp order
pub fn check_ordered(readings: &[Reading]) -> Result<(), SourceError> {
    match readings.windows(2).position(|pair| pair[1].timestamp < pair[0].timestamp) {
        Some(i) => Err(SourceError::Unordered { index: i + 1 }),
        None => Ok(()),
    }
}
