//! range_metrics — range-based precision, recall and F-score.
//!
//! Purpose
//! -------
//! Score anomaly detectors whose outputs are contiguous time ranges rather
//! than isolated points. A detector that finds *part* of a real anomaly is
//! partially rewarded, fragmentation can be penalized, and positions inside a
//! range can be weighted toward its front, middle or back.
//!
//! Key behaviors
//! -------------
//! - Represent closed integer intervals with [`TimeRange`] and their overlap
//!   primitive in [`ranges`].
//! - Weight positions inside a range with the positional bias δ
//!   ([`PositionalBias`], [`bias`]) and penalize multiple overlaps with the
//!   overlap cardinality γ ([`OverlapCardinality`], [`cardinality`]). Both
//!   accept user-defined functions.
//! - Combine them into the normalized overlap reward ω in [`omega`].
//! - Aggregate per side and combine into an F-score in [`RangeEvaluator`],
//!   configured by [`EvaluatorOptions`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Ranges satisfy `start ≤ end` and use 0-based positions; range sets are
//!   not required to be sorted or non-overlapping.
//! - All scalars produced by this module lie in `[0, 1]` and are never NaN.
//! - `alpha_precision = 0` and γ is shared between precision and recall;
//!   neither restriction can be violated through the API.
//! - User-defined δ must return values `> 0` and γ values `≥ 1`; violations
//!   surface as [`RangeMetricError`] and abort the computation.
//!
//! Conventions
//! -----------
//! - Precision scores the predicted set against the real set; recall scores
//!   the real set against the predicted set. [`MetricSide`] tags which one a
//!   weighting function is evaluated for.
//! - Computation is pure and performs no I/O. The only logging is a
//!   `log::warn!` when a `UserDefined` selector has no injected function and
//!   `log::debug!` traces of refreshed scalars.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code:
//!
//!   ```rust
//!   use rust_tsad::range_metrics::prelude::*;
//!
//!   let real = ranges_from_pairs([(0, 9)]).unwrap();
//!   let predicted = ranges_from_pairs([(5, 9)]).unwrap();
//!   let mut eval = RangeEvaluator::new(real, predicted);
//!   let (precision, recall, fscore) = eval.refresh_all().unwrap();
//!   assert_eq!((precision, recall), (1.0, 0.5));
//!   assert!((fscore - 2.0 / 3.0).abs() < 1e-12);
//!   ```
//!
//! - Python bindings wrap [`RangeEvaluator`] and rely on
//!   `From<RangeMetricError> for PyErr` to raise `ValueError`.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own piece; [`evaluator`]
//!   covers the end-to-end scoring properties and `tests/` drives the
//!   labels → ranges → metrics pipeline.

pub mod bias;
pub mod cardinality;
pub mod errors;
pub mod evaluator;
pub mod omega;
pub mod options;
pub mod ranges;
pub mod side;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::bias::{PositionalBias, PositionalBiasFn};
pub use self::cardinality::{CardinalityFn, OverlapCardinality};
pub use self::errors::{RangeMetricError, RangeMetricResult};
pub use self::evaluator::RangeEvaluator;
pub use self::options::EvaluatorOptions;
pub use self::ranges::{RangeSet, TimeRange, ranges_from_pairs};
pub use self::side::MetricSide;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::bias::{PositionalBias, PositionalBiasFn};
    pub use super::cardinality::{CardinalityFn, OverlapCardinality};
    pub use super::errors::{RangeMetricError, RangeMetricResult};
    pub use super::evaluator::RangeEvaluator;
    pub use super::options::EvaluatorOptions;
    pub use super::ranges::{RangeSet, TimeRange, ranges_from_pairs};
    pub use super::side::MetricSide;
}
