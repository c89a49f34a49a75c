//! labels — anomaly label sequences and their conversion to range sets.
//!
//! Purpose
//! -------
//! Bridge raw 0/1 anomaly labels (text, files, arrays) and the range sets
//! scored by [`crate::range_metrics`].
//!
//! Key behaviors
//! -------------
//! - [`extract`]: validated [`LabelSeries`] and [`extract_ranges`] in
//!   interval or unit-size mode.
//! - [`reader`]: the one-integer-per-line text format, file reading,
//!   [`MetricMode`] and [`build_range_sets`] for pairing real and predicted
//!   labels.
//! - [`errors`]: [`LabelError`] / [`LabelResult`], mapped to `ValueError` at
//!   the Python boundary.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use rust_tsad::labels::prelude::*;
//! use rust_tsad::range_metrics::RangeEvaluator;
//!
//! let real = parse_labels("0\n1\n1\n0\n").unwrap();
//! let predicted = parse_labels("0\n0\n1\n0\n").unwrap();
//! let (r, p) = build_range_sets(&real, &predicted, MetricMode::TimeSeries).unwrap();
//! let mut eval = RangeEvaluator::new(r, p);
//! assert_eq!(eval.refresh_recall().unwrap(), 0.5);
//! ```

pub mod errors;
pub mod extract;
pub mod reader;

pub use self::errors::{LabelError, LabelResult};
pub use self::extract::{ExtractionMode, LabelSeries, extract_ranges};
pub use self::reader::{MetricMode, build_range_sets, parse_labels, read_label_file};

pub mod prelude {
    pub use super::errors::{LabelError, LabelResult};
    pub use super::extract::{ExtractionMode, LabelSeries, extract_ranges};
    pub use super::reader::{MetricMode, build_range_sets, parse_labels, read_label_file};
}
