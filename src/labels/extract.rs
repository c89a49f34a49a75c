//! labels::extract — 0/1 label sequences to range sets.
//!
//! Purpose
//! -------
//! Convert a validated sequence of anomaly labels into the [`RangeSet`]
//! consumed by [`RangeEvaluator`](crate::range_metrics::RangeEvaluator).
//!
//! Key behaviors
//! -------------
//! - [`LabelSeries`] validates that every label is 0 or 1 and stores the
//!   sequence as an `Array1<u8>`.
//! - [`extract_ranges`] turns the series into ranges, either one per maximal
//!   run of anomalies ([`ExtractionMode::Interval`]) or one per anomalous
//!   position ([`ExtractionMode::UnitSize`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Produced ranges are sorted, non-overlapping and use 0-based positions.
//! - A run that reaches the end of the series is closed at the last index.
//! - Extraction never fails once a `LabelSeries` exists.

use ndarray::{Array1, ArrayView1};

use crate::{
    labels::errors::{LabelError, LabelResult},
    range_metrics::ranges::{RangeSet, TimeRange},
};

/// How anomalous labels are grouped into ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionMode {
    /// One range per maximal run of consecutive `1`s.
    Interval,
    /// One single-point range per `1`.
    UnitSize,
}

/// LabelSeries — validated 0/1 anomaly labels.
///
/// Fields
/// ------
/// - `labels`: `Array1<u8>`
///   One entry per time step; `1` marks an anomaly.
///
/// Invariants
/// ----------
/// - Every entry is 0 or 1. The series may be empty; emptiness is checked
///   where real and predicted series are paired.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSeries {
    labels: Array1<u8>,
}

impl LabelSeries {
    /// Build a series from raw integer labels.
    ///
    /// Errors
    /// ------
    /// - `LabelError::InvalidLabel` for the first value outside `{0, 1}`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_tsad::labels::extract::LabelSeries;
    /// let series = LabelSeries::new(&[0, 1, 1, 0]).unwrap();
    /// assert_eq!(series.anomaly_count(), 2);
    /// assert!(LabelSeries::new(&[0, 2]).is_err());
    /// ```
    pub fn new(values: &[i64]) -> LabelResult<Self> {
        let labels = values
            .iter()
            .enumerate()
            .map(|(index, &value)| match value {
                0 => Ok(0u8),
                1 => Ok(1u8),
                _ => Err(LabelError::InvalidLabel { index, value }),
            })
            .collect::<LabelResult<Vec<u8>>>()?;
        Ok(LabelSeries { labels: Array1::from(labels) })
    }

    /// Wrap an existing array, validating its entries.
    pub fn from_array(labels: Array1<u8>) -> LabelResult<Self> {
        if let Some((index, &value)) = labels.iter().enumerate().find(|(_, &v)| v > 1) {
            return Err(LabelError::InvalidLabel { index, value: i64::from(value) });
        }
        Ok(LabelSeries { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> ArrayView1<'_, u8> {
        self.labels.view()
    }

    /// Number of anomalous positions.
    pub fn anomaly_count(&self) -> usize {
        self.labels.iter().filter(|&&v| v == 1).count()
    }
}

/// Group the anomalous positions of `series` into ranges.
///
/// Parameters
/// ----------
/// - `series`: `&LabelSeries`
///   Validated labels.
/// - `mode`: `ExtractionMode`
///   `Interval` for maximal runs, `UnitSize` for one range per anomaly.
///
/// Returns
/// -------
/// `RangeSet`
///   Sorted, non-overlapping ranges; empty when no label is 1.
///
/// Examples
/// --------
/// ```rust
/// # use rust_tsad::labels::extract::{ExtractionMode, LabelSeries, extract_ranges};
/// let series = LabelSeries::new(&[0, 1, 1, 0, 1]).unwrap();
/// let intervals = extract_ranges(&series, ExtractionMode::Interval);
/// assert_eq!(intervals.len(), 2);
/// assert_eq!(extract_ranges(&series, ExtractionMode::UnitSize).len(), 3);
/// ```
pub fn extract_ranges(series: &LabelSeries, mode: ExtractionMode) -> RangeSet {
    match mode {
        ExtractionMode::UnitSize => series
            .labels
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 1)
            .map(|(i, _)| TimeRange::point(i))
            .collect(),
        ExtractionMode::Interval => {
            let mut ranges = RangeSet::new();
            let mut run_start: Option<usize> = None;
            for (i, &v) in series.labels.iter().enumerate() {
                match (v, run_start) {
                    (1, None) => run_start = Some(i),
                    (0, Some(start)) => {
                        ranges.push(TimeRange::from_run(start, i - 1));
                        run_start = None;
                    }
                    _ => {}
                }
            }
            if let Some(start) = run_start {
                ranges.push(TimeRange::from_run(start, series.len() - 1));
            }
            ranges
        }
    }
}
