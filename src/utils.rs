//! utils — PyO3 conversion helpers for the Python bindings.
//!
//! Turns Python inputs (numpy arrays, pandas Series, sequences, selector
//! strings and callables) into the Rust types used by `range_metrics` and
//! `labels`. Everything here is compiled only with `python-bindings`.

#[cfg(feature = "python-bindings")]
use std::str::FromStr;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use crate::{
    labels::extract::LabelSeries,
    range_metrics::{
        bias::{PositionalBias, PositionalBiasFn},
        cardinality::{CardinalityFn, OverlapCardinality},
        evaluator::RangeEvaluator,
        options::EvaluatorOptions,
        ranges::{RangeSet, ranges_from_pairs},
        side::MetricSide,
    },
};

/// Validated [`LabelSeries`] from a 1-D int64 numpy array, a pandas Series
/// or a sequence of ints.
///
/// Contiguous arrays are validated in place; other inputs are collected into
/// a `Vec<i64>` first. Values other than 0 and 1 raise `ValueError`.
#[cfg(feature = "python-bindings")]
pub fn extract_label_series(raw_labels: &Bound<'_, PyAny>) -> PyResult<LabelSeries> {
    if let Ok(arr_ro) = raw_labels.extract::<PyReadonlyArray1<i64>>() {
        if let Ok(labels) = arr_ro.as_slice() {
            return Ok(LabelSeries::new(labels)?);
        }
    }

    if let Ok(obj) = raw_labels.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<i64>>() {
            if let Ok(labels) = series_ro.as_slice() {
                return Ok(LabelSeries::new(labels)?);
            }
        }
    }

    let labels: Vec<i64> = raw_labels.extract().map_err(|_| {
        PyTypeError::new_err(
            "labels must be a 1-D numpy.ndarray, pandas.Series, or sequence of int64",
        )
    })?;
    Ok(LabelSeries::new(&labels)?)
}

/// Range set from a sequence of `(start, end)` tuples.
#[cfg(feature = "python-bindings")]
pub fn extract_range_set(raw_ranges: &Bound<'_, PyAny>) -> PyResult<RangeSet> {
    let pairs: Vec<(usize, usize)> = raw_ranges.extract().map_err(|_| {
        PyTypeError::new_err("ranges must be a sequence of (start, end) pairs of non-negative ints")
    })?;
    Ok(ranges_from_pairs(pairs)?)
}

/// Parse selector names and scalars into validated [`EvaluatorOptions`].
#[cfg(feature = "python-bindings")]
pub fn extract_evaluator_options(
    beta: f64, alpha_recall: f64, gamma: &str, delta_precision: &str, delta_recall: &str,
) -> PyResult<EvaluatorOptions> {
    let gamma = OverlapCardinality::from_str(gamma)?;
    let delta_precision = PositionalBias::from_str(delta_precision)?;
    let delta_recall = PositionalBias::from_str(delta_recall)?;
    Ok(EvaluatorOptions::new(beta, alpha_recall, gamma, delta_precision, delta_recall)?)
}

/// Attach optional Python callables as user-defined δ / γ.
#[cfg(feature = "python-bindings")]
pub fn attach_user_functions(
    evaluator: RangeEvaluator, udf_delta: Option<PyObject>, udf_gamma: Option<PyObject>,
) -> PyResult<RangeEvaluator> {
    let mut evaluator = evaluator;
    if let Some(func) = udf_delta {
        ensure_callable(&func, "udf_delta")?;
        evaluator = evaluator.with_udf_delta(PyPositionalBias(func));
    }
    if let Some(func) = udf_gamma {
        ensure_callable(&func, "udf_gamma")?;
        evaluator = evaluator.with_udf_gamma(PyCardinality(func));
    }
    Ok(evaluator)
}

#[cfg(feature = "python-bindings")]
fn ensure_callable(func: &PyObject, name: &str) -> PyResult<()> {
    Python::with_gil(|py| {
        if func.bind(py).is_callable() {
            Ok(())
        } else {
            Err(PyTypeError::new_err(format!("{name} must be callable")))
        }
    })
}

/// Python callable `f(position, range_length, side) -> float` used as δ.
///
/// A raised exception or non-float result is reported through `try_weight`,
/// so the caller's `ValueError` carries the original Python error text.
#[cfg(feature = "python-bindings")]
struct PyPositionalBias(PyObject);

#[cfg(feature = "python-bindings")]
impl PositionalBiasFn for PyPositionalBias {
    fn weight(&self, position: usize, range_length: usize, side: MetricSide) -> f64 {
        self.try_weight(position, range_length, side).unwrap_or(f64::NAN)
    }

    fn try_weight(
        &self, position: usize, range_length: usize, side: MetricSide,
    ) -> Result<f64, String> {
        Python::with_gil(|py| {
            self.0
                .call1(py, (position, range_length, side.name()))
                .and_then(|value| value.extract::<f64>(py))
                .map_err(|err| {
                    log::debug!("udf_delta raised for {side} at position {position}: {err}");
                    err.to_string()
                })
        })
    }
}

/// Python callable `f(overlap_count, side) -> float` used as γ.
#[cfg(feature = "python-bindings")]
struct PyCardinality(PyObject);

#[cfg(feature = "python-bindings")]
impl CardinalityFn for PyCardinality {
    fn gamma(&self, overlap_count: usize, side: MetricSide) -> f64 {
        self.try_gamma(overlap_count, side).unwrap_or(f64::NAN)
    }

    fn try_gamma(&self, overlap_count: usize, side: MetricSide) -> Result<f64, String> {
        Python::with_gil(|py| {
            self.0
                .call1(py, (overlap_count, side.name()))
                .and_then(|value| value.extract::<f64>(py))
                .map_err(|err| {
                    log::debug!(
                        "udf_gamma raised for {side} at overlap count {overlap_count}: {err}"
                    );
                    err.to_string()
                })
        })
    }
}
