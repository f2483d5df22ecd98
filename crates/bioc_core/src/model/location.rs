//! Location model: one contiguous `(offset, length)` span.
//!
//! # Invariants
//! - `offset >= 0` and `length >= 0`, enforced at construction and decode
//!   time. A `Location` value that exists is always valid.
//! - `offset + length <= i64::MAX`, so `end()` never overflows and every
//!   location converts back to a signed wire pair losslessly.
//! - Ordering and equality are by `(offset, length)`.
//!
//! Offsets count Unicode scalar values (`char`s) in document-absolute
//! coordinates.

use crate::error::{BiocError, BiocResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

// Offsets and ends stay within what a signed wire value can express.
const MAX_OFFSET: usize = i64::MAX as usize;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    offset: usize,
    length: usize,
}

impl Location {
    /// Creates a location, rejecting negative fields with `InvalidArgument`.
    pub fn new(offset: i64, length: i64) -> BiocResult<Self> {
        if offset < 0 {
            return Err(BiocError::invalid_argument(format!(
                "location offset must be >= 0, got {offset}"
            )));
        }
        if length < 0 {
            return Err(BiocError::invalid_argument(format!(
                "location length must be >= 0, got {length}"
            )));
        }
        let offset = usize::try_from(offset).map_err(|_| {
            BiocError::invalid_argument(format!("location offset out of range: {offset}"))
        })?;
        let length = usize::try_from(length).map_err(|_| {
            BiocError::invalid_argument(format!("location length out of range: {length}"))
        })?;
        Self::from_unsigned(offset, length)
    }

    /// Creates a location from unsigned values.
    ///
    /// # Errors
    /// - `InvalidArgument` when either field exceeds `i64::MAX`, or when
    ///   `offset + length` does not fit the offset range.
    pub fn from_unsigned(offset: usize, length: usize) -> BiocResult<Self> {
        match offset.checked_add(length) {
            Some(end) if end <= MAX_OFFSET => Ok(Self { offset, length }),
            _ => Err(BiocError::invalid_argument(format!(
                "location end out of range: offset {offset} + length {length}"
            ))),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    /// Smallest location covering both `self` and `other`.
    pub fn union(&self, other: &Location) -> Location {
        let offset = self.offset.min(other.offset);
        let end = self.end().max(other.end());
        Location {
            offset,
            length: end - offset,
        }
    }

    /// Returns whether `other` lies entirely within this span.
    pub fn contains(&self, other: &Location) -> bool {
        other.offset >= self.offset && other.end() <= self.end()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.offset, self.length)
    }
}

impl TryFrom<(i64, i64)> for Location {
    type Error = BiocError;

    fn try_from((offset, length): (i64, i64)) -> Result<Self, Self::Error> {
        Self::new(offset, length)
    }
}

#[derive(Deserialize)]
struct RawLocation {
    offset: i64,
    length: i64,
}

impl TryFrom<RawLocation> for Location {
    type Error = BiocError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Self::new(raw.offset, raw.length)
    }
}
