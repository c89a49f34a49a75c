//! rust_tsad — range-based anomaly-detection metrics with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! range-based precision, recall and F-score to Python via the `_rust_tsad`
//! extension module. When the `python-bindings` feature is enabled, this module
//! defines the Python-facing class and submodule used by the `rust_tsad`
//! package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`range_metrics` and `labels`) as the
//!   public crate surface.
//! - Define the `#[pyclass]` wrapper around [`RangeEvaluator`] and the
//!   `#[pymodule]` initializer for the `_rust_tsad` Python extension.
//! - Register the `range_metrics` submodule under `rust_tsad` so that
//!   dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All scoring is implemented in the inner Rust modules; this file performs
//!   only FFI glue, argument conversion and error mapping.
//! - Python-visible defaults mirror [`EvaluatorOptions::default`]: β = 1,
//!   α_r = 0, γ = "one", δ = "flat" on both sides.
//!
//! Conventions
//! -----------
//! - Selector names are the same strings accepted by the Rust `FromStr` impls
//!   ("flat", "front", "middle", "back", "udf_delta"; "one", "reciprocal",
//!   "udf_gamma"; "classical", "time_series", "numenta").
//! - Errors from core Rust code are converted to `ValueError` at the PyO3
//!   boundary; malformed Python inputs raise `TypeError`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`range_metrics`] and [`labels`] and
//!   can ignore the items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_rust_tsad.range_metrics` and wraps
//!   `RangeEvaluator` in user-facing helpers.
//!
//! Testing notes
//! -------------
//! - Scoring behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_range_metrics.rs`; the PyO3 layer is exercised from
//!   Python.

pub mod labels;
pub mod range_metrics;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    labels::reader::{MetricMode, build_range_sets, read_label_file},
    range_metrics::{evaluator::RangeEvaluator, options::EvaluatorOptions, ranges::RangeSet},
    utils::{
        attach_user_functions, extract_evaluator_options, extract_label_series, extract_range_set,
    },
};

/// RangeEvaluator — Python-facing wrapper for range-based metrics.
///
/// Purpose
/// -------
/// Expose [`RangeEvaluator`] to Python callers while preserving the Rust
/// validation and error handling.
///
/// Key behaviors
/// -------------
/// - Build an evaluator from `(start, end)` pairs, from 0/1 label arrays, or
///   from label files, with selector strings for γ and δ.
/// - Accept optional Python callables as user-defined δ
///   (`f(position, range_length, side)`) and γ (`f(overlap_count, side)`).
/// - Provide `refresh_*` methods and cached getters mirroring the Rust API.
///
/// Parameters
/// ----------
/// Common keyword arguments:
/// - `beta`: `f64`, default 1.
/// - `alpha_recall`: `f64` in `[0, 1]`, default 0.
/// - `gamma`: `str`, default `"one"`.
/// - `delta_precision`, `delta_recall`: `str`, default `"flat"`.
/// - `udf_delta`, `udf_gamma`: optional callables.
///
/// Fields
/// ------
/// - `inner`: [`RangeEvaluator`]
///   Rust evaluator owning the range sets, options and cached scalars.
///
/// Notes
/// -----
/// - Native Rust callers should use [`RangeEvaluator`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "RangeEvaluator", module = "rust_tsad.range_metrics")]
pub struct PyRangeEvaluator {
    inner: RangeEvaluator,
}

#[cfg(feature = "python-bindings")]
fn finish_evaluator(
    real: RangeSet, predicted: RangeSet, options: EvaluatorOptions, udf_delta: Option<PyObject>,
    udf_gamma: Option<PyObject>,
) -> PyResult<PyRangeEvaluator> {
    let evaluator = RangeEvaluator::with_options(real, predicted, options);
    let inner = attach_user_functions(evaluator, udf_delta, udf_gamma)?;
    Ok(PyRangeEvaluator { inner })
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyRangeEvaluator {
    /// Build an evaluator from sequences of `(start, end)` pairs.
    #[new]
    #[pyo3(signature = (
        real, predicted, beta = 1.0, alpha_recall = 0.0, gamma = "one",
        delta_precision = "flat", delta_recall = "flat", udf_delta = None, udf_gamma = None
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        real: &Bound<'py, PyAny>, predicted: &Bound<'py, PyAny>, beta: f64, alpha_recall: f64,
        gamma: &str, delta_precision: &str, delta_recall: &str, udf_delta: Option<PyObject>,
        udf_gamma: Option<PyObject>,
    ) -> PyResult<Self> {
        let options =
            extract_evaluator_options(beta, alpha_recall, gamma, delta_precision, delta_recall)?;
        let real = extract_range_set(real)?;
        let predicted = extract_range_set(predicted)?;
        finish_evaluator(real, predicted, options, udf_delta, udf_gamma)
    }

    /// Build an evaluator from two 0/1 label arrays of equal length.
    #[staticmethod]
    #[pyo3(signature = (
        real_labels, predicted_labels, mode = "time_series", beta = 1.0, alpha_recall = 0.0,
        gamma = "one", delta_precision = "flat", delta_recall = "flat",
        udf_delta = None, udf_gamma = None
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn from_labels<'py>(
        real_labels: &Bound<'py, PyAny>, predicted_labels: &Bound<'py, PyAny>, mode: &str,
        beta: f64, alpha_recall: f64, gamma: &str, delta_precision: &str, delta_recall: &str,
        udf_delta: Option<PyObject>, udf_gamma: Option<PyObject>,
    ) -> PyResult<Self> {
        let options =
            extract_evaluator_options(beta, alpha_recall, gamma, delta_precision, delta_recall)?;
        let mode: MetricMode = mode.parse()?;
        let real = extract_label_series(real_labels)?;
        let predicted = extract_label_series(predicted_labels)?;
        let (real, predicted) = build_range_sets(&real, &predicted, mode)?;
        finish_evaluator(real, predicted, options, udf_delta, udf_gamma)
    }

    /// Build an evaluator from two label files (one integer label per line).
    #[staticmethod]
    #[pyo3(signature = (
        real_path, predicted_path, mode = "time_series", beta = 1.0, alpha_recall = 0.0,
        gamma = "one", delta_precision = "flat", delta_recall = "flat",
        udf_delta = None, udf_gamma = None
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn from_files(
        real_path: &str, predicted_path: &str, mode: &str, beta: f64, alpha_recall: f64,
        gamma: &str, delta_precision: &str, delta_recall: &str, udf_delta: Option<PyObject>,
        udf_gamma: Option<PyObject>,
    ) -> PyResult<Self> {
        let options =
            extract_evaluator_options(beta, alpha_recall, gamma, delta_precision, delta_recall)?;
        let mode: MetricMode = mode.parse()?;
        let real = read_label_file(real_path)?;
        let predicted = read_label_file(predicted_path)?;
        let (real, predicted) = build_range_sets(&real, &predicted, mode)?;
        finish_evaluator(real, predicted, options, udf_delta, udf_gamma)
    }

    /// Recompute and cache precision.
    pub fn refresh_precision(&mut self) -> PyResult<f64> {
        Ok(self.inner.refresh_precision()?)
    }

    /// Recompute and cache recall.
    pub fn refresh_recall(&mut self) -> PyResult<f64> {
        Ok(self.inner.refresh_recall()?)
    }

    /// Recompute and cache the F-score from the cached precision and recall.
    pub fn refresh_fscore(&mut self) -> f64 {
        self.inner.refresh_fscore()
    }

    /// Refresh all three scalars and return `(precision, recall, fscore)`.
    pub fn evaluate(&mut self) -> PyResult<(f64, f64, f64)> {
        Ok(self.inner.refresh_all()?)
    }

    #[getter]
    pub fn precision(&self) -> f64 {
        self.inner.precision()
    }

    #[getter]
    pub fn recall(&self) -> f64 {
        self.inner.recall()
    }

    #[getter]
    pub fn fscore(&self) -> f64 {
        self.inner.fscore()
    }

    #[getter]
    pub fn beta(&self) -> f64 {
        self.inner.options().beta()
    }

    #[getter]
    pub fn alpha_recall(&self) -> f64 {
        self.inner.options().alpha_recall()
    }

    #[getter]
    pub fn real_ranges(&self) -> Vec<(usize, usize)> {
        self.inner.real().iter().map(|r| (r.start(), r.end())).collect()
    }

    #[getter]
    pub fn predicted_ranges(&self) -> Vec<(usize, usize)> {
        self.inner.predicted().iter().map(|r| (r.start(), r.end())).collect()
    }

    pub fn real_listing(&self) -> String {
        self.inner.real_listing()
    }

    pub fn predicted_listing(&self) -> String {
        self.inner.predicted_listing()
    }

    pub fn __repr__(&self) -> String {
        let opts = self.inner.options();
        format!(
            "RangeEvaluator(real={}, predicted={}, beta={}, alpha_recall={}, gamma='{}', \
             delta_precision='{}', delta_recall='{}')",
            self.inner.real().len(),
            self.inner.predicted().len(),
            opts.beta(),
            opts.alpha_recall(),
            opts.gamma(),
            opts.delta_precision(),
            opts.delta_recall()
        )
    }
}

/// _rust_tsad — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_tsad` Python module and register the `range_metrics`
/// submodule used by the public `rust_tsad` package.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
///
/// Notes
/// -----
/// - Invoked automatically by Python when importing the compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_tsad<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let range_metrics_mod = PyModule::new(_py, "range_metrics")?;
    range_metrics_module(_py, m, &range_metrics_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_tsad.range_metrics", range_metrics_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn range_metrics_module<'py>(
    _py: Python, rust_tsad: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyRangeEvaluator>()?;
    rust_tsad.add_submodule(m)?;
    Ok(())
}
