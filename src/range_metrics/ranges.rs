//! range_metrics::ranges — closed integer time ranges and their overlap.
//!
//! Purpose
//! -------
//! Represent one contiguous anomalous span as a closed interval of label
//! positions, and provide the overlap primitive that every range-based metric
//! is built on.
//!
//! Key behaviors
//! -------------
//! - Construct validated [`TimeRange`] values via [`TimeRange::new`], which
//!   rejects `start > end` and spans whose length overflows `usize`.
//! - Compute the intersection of two ranges with [`TimeRange::overlap`],
//!   returning `None` when the ranges are disjoint.
//! - Format ranges as `[start, end]` for diagnostic listings.
//!
//! Invariants & assumptions
//! ------------------------
//! - Positions are 0-based indices into the original label sequence.
//! - `start <= end` and `end - start < usize::MAX` for every constructed
//!   range, so `len()` never overflows; ranges are immutable.
//! - Range sets are plain ordered vectors. They may overlap internally and
//!   need not be sorted; the metrics treat each range independently.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction, length, and every overlap configuration
//!   (disjoint, touching, nested, partial).

use crate::range_metrics::errors::{RangeMetricError, RangeMetricResult};

/// Ordered sequence of ranges, either ground truth ("real") or detector output
/// ("predicted").
pub type RangeSet = Vec<TimeRange>;

/// TimeRange — closed interval `[start, end]` of label positions.
///
/// Fields
/// ------
/// - `start`: `usize`
///   First anomalous position (inclusive).
/// - `end`: `usize`
///   Last anomalous position (inclusive).
///
/// Invariants
/// ----------
/// - `start <= end`. Single-point ranges have `start == end` and length 1.
///
/// Notes
/// -----
/// - Fields are private so that the invariant cannot be broken after
///   construction; use [`start`](Self::start) and [`end`](Self::end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: usize,
    end: usize,
}

impl TimeRange {
    /// Build a range `[start, end]`.
    ///
    /// Errors
    /// ------
    /// - `RangeMetricError::InvalidRange` when `start > end`.
    /// - `RangeMetricError::RangeTooLong` for `[0, usize::MAX]`, whose length
    ///   is not representable.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_tsad::range_metrics::ranges::TimeRange;
    /// let r = TimeRange::new(3, 7).unwrap();
    /// assert_eq!(r.len(), 5);
    /// assert!(TimeRange::new(7, 3).is_err());
    /// ```
    pub fn new(start: usize, end: usize) -> RangeMetricResult<Self> {
        if start > end {
            return Err(RangeMetricError::InvalidRange { start, end });
        }
        if end - start == usize::MAX {
            return Err(RangeMetricError::RangeTooLong { start, end });
        }
        Ok(TimeRange { start, end })
    }

    /// Single-position range `[position, position]`.
    pub fn point(position: usize) -> Self {
        TimeRange { start: position, end: position }
    }

    /// Range over a run already known to satisfy `start <= end`.
    pub(crate) fn from_run(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "run [{start}, {end}] is reversed");
        debug_assert!(end - start < usize::MAX, "run [{start}, {end}] is too long");
        TimeRange { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of positions covered, `end - start + 1` (always ≥ 1).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Whether `position` lies inside the range (inclusive on both ends).
    #[inline]
    pub fn contains(&self, position: usize) -> bool {
        position >= self.start && position <= self.end
    }

    /// Intersection of two closed ranges.
    ///
    /// Returns `None` if `self.end < other.start` or `self.start > other.end`,
    /// otherwise `[max(starts), min(ends)]`. Ranges that share a single
    /// endpoint overlap in that one position.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_tsad::range_metrics::ranges::TimeRange;
    /// let a = TimeRange::new(0, 9).unwrap();
    /// let b = TimeRange::new(5, 12).unwrap();
    /// assert_eq!(a.overlap(&b), Some(TimeRange::new(5, 9).unwrap()));
    /// assert_eq!(a.overlap(&TimeRange::new(10, 12).unwrap()), None);
    /// ```
    #[inline]
    pub fn overlap(&self, other: &TimeRange) -> Option<TimeRange> {
        if self.end < other.start || self.start > other.end {
            return None;
        }
        Some(TimeRange { start: self.start.max(other.start), end: self.end.min(other.end) })
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Build a range set from `(start, end)` pairs, validating each pair.
///
/// Errors
/// ------
/// - `RangeMetricError::InvalidRange` for the first pair with `start > end`.
pub fn ranges_from_pairs<I>(pairs: I) -> RangeMetricResult<RangeSet>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    pairs.into_iter().map(|(start, end)| TimeRange::new(start, end)).collect()
}
