//! range_metrics::errors — error type and Python bridge for range-based metrics.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by every routine in the
//! `range_metrics` subtree: configuration validation, range construction, and
//! the contract checks applied to user-defined weighting functions.
//!
//! Key behaviors
//! -------------
//! - Define [`RangeMetricResult`] and [`RangeMetricError`] as the canonical
//!   result and error types for range construction, evaluator configuration
//!   and precision/recall computation.
//! - Attach human-readable `Display` messages that embed the offending value
//!   (beta, alpha, selector name, udf output) so diagnostics are meaningful
//!   without extra context.
//! - Map all variants to `ValueError` at the PyO3 boundary when the
//!   `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Configuration errors are raised at the point where a value is set or
//!   parsed; a constructed [`EvaluatorOptions`](super::options::EvaluatorOptions)
//!   is always valid.
//! - Contract violations (`GammaContractViolated`, `DeltaContractViolated`)
//!   are only produced while evaluating user-injected functions and abort the
//!   whole computation.
//!
//! Conventions
//! -----------
//! - Variants are grouped into sections (configuration, ranges, udf
//!   contracts) in the same order as they appear in the `Display` impl.
//! - Messages are phrased in terms of domain constraints ("must lie in
//!   [0, 1]", "must be ≥ 1") rather than implementation details.
//!
//! Testing notes
//! -------------
//! - Unit tests check that each variant's message carries its payload.
//! - The PyO3 conversion is exercised by Python-level tests only.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::range_metrics::side::MetricSide;

pub type RangeMetricResult<T> = Result<T, RangeMetricError>;

/// RangeMetricError — failures of range-metric configuration and evaluation.
///
/// Variants
/// --------
/// - `InvalidBeta { value }`
///   F-score weight outside `(0, ∞)` or non-finite.
/// - `InvalidAlpha { value }`
///   Existence-reward weight outside `[0, 1]` or non-finite.
/// - `InvalidCardinality { name }` / `InvalidPositionalBias { name }`
///   Selector name that does not map to a known variant.
/// - `InvalidRange { start, end }`
///   Attempt to build a range with `start > end`.
/// - `RangeTooLong { start, end }`
///   Range whose length `end - start + 1` does not fit in `usize`.
/// - `GammaContractViolated { side, overlap_count, value }`
///   A user-defined cardinality function returned a value `< 1`, NaN or ∞.
/// - `DeltaContractViolated { side, position, range_length, value }`
///   A user-defined positional-bias function returned a value `≤ 0`, NaN or ∞.
/// - `UserFunctionFailed { side, function, message }`
///   A user-defined function could not produce a value at all (e.g. a
///   foreign callback raised); `message` carries the underlying error.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeMetricError {
    // ---- Configuration ----
    InvalidBeta {
        value: f64,
    },
    InvalidAlpha {
        value: f64,
    },
    InvalidCardinality {
        name: String,
    },
    InvalidPositionalBias {
        name: String,
    },

    // ---- Ranges ----
    InvalidRange {
        start: usize,
        end: usize,
    },
    RangeTooLong {
        start: usize,
        end: usize,
    },

    // ---- User-defined function contracts ----
    GammaContractViolated {
        side: MetricSide,
        overlap_count: usize,
        value: f64,
    },
    DeltaContractViolated {
        side: MetricSide,
        position: usize,
        range_length: usize,
        value: f64,
    },
    UserFunctionFailed {
        side: MetricSide,
        function: &'static str,
        message: String,
    },
}

impl std::error::Error for RangeMetricError {}

impl std::fmt::Display for RangeMetricError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            RangeMetricError::InvalidBeta { value } => {
                write!(f, "Invalid beta value: {value}. Must be a finite number > 0.")
            }
            RangeMetricError::InvalidAlpha { value } => {
                write!(f, "Invalid alpha value: {value}. Must lie in [0, 1].")
            }
            RangeMetricError::InvalidCardinality { name } => write!(
                f,
                "Invalid overlap cardinality '{name}'. Valid options are 'one', 'reciprocal' or 'udf_gamma'."
            ),
            RangeMetricError::InvalidPositionalBias { name } => write!(
                f,
                "Invalid positional bias '{name}'. Valid options are 'flat', 'front', 'middle', 'back' or 'udf_delta'."
            ),

            // ---- Ranges ----
            RangeMetricError::InvalidRange { start, end } => {
                write!(f, "Invalid time range [{start}, {end}]: start must not exceed end.")
            }
            RangeMetricError::RangeTooLong { start, end } => {
                write!(f, "Invalid time range [{start}, {end}]: its length does not fit in usize.")
            }

            // ---- User-defined function contracts ----
            RangeMetricError::GammaContractViolated { side, overlap_count, value } => write!(
                f,
                "User-defined gamma for {side} returned {value} at overlap count {overlap_count}; it must be finite and ≥ 1."
            ),
            RangeMetricError::DeltaContractViolated { side, position, range_length, value } => {
                write!(
                    f,
                    "User-defined delta for {side} returned {value} at position {position} of a \
                     range of length {range_length}; it must be finite and > 0."
                )
            }
            RangeMetricError::UserFunctionFailed { side, function, message } => {
                write!(f, "User-defined {function} for {side} failed: {message}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<RangeMetricError> for PyErr {
    fn from(err: RangeMetricError) -> PyErr {
        PyValueError::new_err(format!("RangeMetricError: {err}"))
    }
}
