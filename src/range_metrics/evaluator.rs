//! RangeEvaluator — range-based precision, recall and F-score.
//!
//! Purpose
//! -------
//! Score a set of predicted anomaly ranges against a set of real anomaly
//! ranges. Precision iterates predicted ranges against the real set; recall
//! iterates real ranges against the predicted set. Each scored range earns a
//! blend of an existence reward (did anything overlap it) and an overlap
//! reward (ω summed over overlapping pairs, scaled by the γ multiplier).
//!
//! Key behaviors
//! -------------
//! - Own the two [`RangeSet`]s, the [`EvaluatorOptions`] and any injected
//!   user-defined δ / γ.
//! - [`RangeEvaluator::compute_precision`] and
//!   [`RangeEvaluator::compute_recall`] are pure; the `refresh_*` methods
//!   store their result in the cached fields read by the getters.
//! - [`RangeEvaluator::compute_fscore`] combines the **cached** precision and
//!   recall, so callers refresh those first.
//!
//! Invariants & assumptions
//! ------------------------
//! - An empty own set yields 0 for that side, whatever the other set holds.
//! - `alpha_precision` is always 0 and γ is shared between both sides.
//! - When `P = R = 0` the F-score is 0, never NaN.
//! - A user-defined δ / γ that breaks its contract aborts the computation
//!   with a typed error; the cached value is left untouched.
//! - Range sets are fixed at construction.
//!
//! Conventions
//! -----------
//! - δ and γ are resolved once per computation. A `UserDefined` selector
//!   with no injected function therefore warns once per call.
//! - Cached scalars start at 0 and are only changed by `refresh_*`.
//!
//! Downstream usage
//! ----------------
//! - Build range sets with [`crate::labels`] (or by hand via
//!   [`ranges_from_pairs`](crate::range_metrics::ranges::ranges_from_pairs)),
//!   construct the evaluator, call `refresh_precision`, `refresh_recall` and
//!   `refresh_fscore`, then read the getters.
//! - The Python class in the crate root wraps this type one-to-one.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the canonical properties: perfect match, disjoint
//!   sets, partial overlap, existence weighting, fragmentation, empty sets,
//!   F-score consistency, determinism, positional bias and udf contracts.

use std::sync::Arc;

use crate::range_metrics::{
    bias::{DeltaFunction, PositionalBiasFn},
    cardinality::{CardinalityFn, GammaFunction},
    errors::RangeMetricResult,
    omega::overlap_reward,
    options::EvaluatorOptions,
    ranges::{RangeSet, TimeRange},
    side::MetricSide,
};

/// RangeEvaluator — owns the inputs and cached results of one evaluation.
///
/// Fields
/// ------
/// - `real`, `predicted`: [`RangeSet`]
///   Ground-truth and detected ranges. Not mutable after construction.
/// - `options`: [`EvaluatorOptions`]
///   Validated β, α_r, γ and δ selectors.
/// - `udf_delta`, `udf_gamma`: optional injected user functions, consulted
///   only when the matching selector is `UserDefined`.
/// - `precision`, `recall`, `fscore`: `f64`
///   Cached scalars, 0 until refreshed.
///
/// Notes
/// -----
/// - `Send + Sync`: user functions are held behind `Arc<dyn … + Send + Sync>`.
#[derive(Clone)]
pub struct RangeEvaluator {
    real: RangeSet,
    predicted: RangeSet,
    options: EvaluatorOptions,
    udf_delta: Option<Arc<dyn PositionalBiasFn>>,
    udf_gamma: Option<Arc<dyn CardinalityFn>>,
    precision: f64,
    recall: f64,
    fscore: f64,
}

impl RangeEvaluator {
    /// Evaluator with default options (β = 1, α_r = 0, γ = one, δ = flat).
    pub fn new(real: RangeSet, predicted: RangeSet) -> Self {
        Self::with_options(real, predicted, EvaluatorOptions::default())
    }

    /// Evaluator with explicit, already validated options.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_tsad::range_metrics::{evaluator::RangeEvaluator, options::EvaluatorOptions,
    /// #     ranges::ranges_from_pairs};
    /// let real = ranges_from_pairs([(0, 9)]).unwrap();
    /// let predicted = ranges_from_pairs([(5, 9)]).unwrap();
    /// let options = EvaluatorOptions::default().with_alpha_recall(1.0).unwrap();
    ///
    /// let mut eval = RangeEvaluator::with_options(real, predicted, options);
    /// eval.refresh_recall().unwrap();
    /// assert_eq!(eval.recall(), 1.0);
    /// ```
    pub fn with_options(real: RangeSet, predicted: RangeSet, options: EvaluatorOptions) -> Self {
        RangeEvaluator {
            real,
            predicted,
            options,
            udf_delta: None,
            udf_gamma: None,
            precision: 0.0,
            recall: 0.0,
            fscore: 0.0,
        }
    }

    /// Inject the positional bias used when a side selects `udf_delta`.
    pub fn with_udf_delta<F>(mut self, func: F) -> Self
    where
        F: PositionalBiasFn + 'static,
    {
        self.udf_delta = Some(Arc::new(func));
        self
    }

    /// Inject the cardinality used when γ is `udf_gamma`.
    pub fn with_udf_gamma<F>(mut self, func: F) -> Self
    where
        F: CardinalityFn + 'static,
    {
        self.udf_gamma = Some(Arc::new(func));
        self
    }

    /// Range-based precision of the predicted set against the real set.
    ///
    /// Returns
    /// -------
    /// `RangeMetricResult<f64>`
    ///   Value in `[0, 1]`; 0 when the predicted set is empty.
    ///
    /// Errors
    /// ------
    /// - `RangeMetricError::DeltaContractViolated` /
    ///   `RangeMetricError::GammaContractViolated` from user-defined functions.
    pub fn compute_precision(&self) -> RangeMetricResult<f64> {
        self.aggregate(&self.predicted, &self.real, MetricSide::Precision)
    }

    /// Range-based recall of the real set against the predicted set.
    ///
    /// Returns
    /// -------
    /// `RangeMetricResult<f64>`
    ///   Value in `[0, 1]`; 0 when the real set is empty.
    ///
    /// Errors
    /// ------
    /// - Same as [`RangeEvaluator::compute_precision`].
    pub fn compute_recall(&self) -> RangeMetricResult<f64> {
        self.aggregate(&self.real, &self.predicted, MetricSide::Recall)
    }

    /// `(1 + β²)·P·R / (β²·P + R)` on the cached precision and recall.
    ///
    /// Returns 0 when the denominator is 0.
    pub fn compute_fscore(&self) -> f64 {
        let beta_sq = self.options.beta() * self.options.beta();
        let denom = beta_sq * self.precision + self.recall;
        if denom > 0.0 {
            (1.0 + beta_sq) * self.precision * self.recall / denom
        } else {
            0.0
        }
    }

    /// Recompute and cache precision.
    ///
    /// Errors
    /// ------
    /// - Propagated from [`RangeEvaluator::compute_precision`]; the cache is
    ///   left unchanged.
    pub fn refresh_precision(&mut self) -> RangeMetricResult<f64> {
        self.precision = self.compute_precision()?;
        log::debug!("refreshed precision = {}", self.precision);
        Ok(self.precision)
    }

    /// Recompute and cache recall.
    pub fn refresh_recall(&mut self) -> RangeMetricResult<f64> {
        self.recall = self.compute_recall()?;
        log::debug!("refreshed recall = {}", self.recall);
        Ok(self.recall)
    }

    /// Recompute and cache the F-score from the cached precision and recall.
    pub fn refresh_fscore(&mut self) -> f64 {
        self.fscore = self.compute_fscore();
        log::debug!("refreshed fscore = {} (beta = {})", self.fscore, self.options.beta());
        self.fscore
    }

    /// Refresh precision, recall and F-score in order.
    pub fn refresh_all(&mut self) -> RangeMetricResult<(f64, f64, f64)> {
        self.refresh_precision()?;
        self.refresh_recall()?;
        Ok((self.precision, self.recall, self.refresh_fscore()))
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn recall(&self) -> f64 {
        self.recall
    }

    pub fn fscore(&self) -> f64 {
        self.fscore
    }

    pub fn real(&self) -> &[TimeRange] {
        &self.real
    }

    pub fn predicted(&self) -> &[TimeRange] {
        &self.predicted
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    /// `"Real Anomalies:"` followed by one `[start, end]` line per range.
    pub fn real_listing(&self) -> String {
        listing("Real Anomalies:", &self.real)
    }

    /// `"Predicted Anomalies:"` followed by one `[start, end]` line per range.
    pub fn predicted_listing(&self) -> String {
        listing("Predicted Anomalies:", &self.predicted)
    }

    fn aggregate(
        &self, own: &[TimeRange], other: &[TimeRange], side: MetricSide,
    ) -> RangeMetricResult<f64> {
        if own.is_empty() {
            return Ok(0.0);
        }

        let delta =
            DeltaFunction::resolve(self.options.delta(side), self.udf_delta.as_deref(), side);
        let gamma = GammaFunction::resolve(self.options.gamma(), self.udf_gamma.as_deref(), side);
        let alpha = self.options.alpha(side);

        let mut total = 0.0;
        for range in own {
            let mut overlap_count = 0usize;
            let mut omega_reward = 0.0;
            for candidate in other {
                if let Some(reward) = overlap_reward(range, candidate, &delta)? {
                    overlap_count += 1;
                    omega_reward += reward;
                }
            }

            let overlap_term = gamma.multiplier(overlap_count)? * omega_reward;
            let existence_term = if overlap_count > 0 { 1.0 } else { 0.0 };
            total += alpha * existence_term + (1.0 - alpha) * overlap_term;
        }

        Ok(total / own.len() as f64)
    }
}

fn listing(header: &str, ranges: &[TimeRange]) -> String {
    let mut out = String::from(header);
    for range in ranges {
        out.push('\n');
        out.push_str(&range.to_string());
    }
    out
}

impl std::fmt::Debug for RangeEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeEvaluator")
            .field("real", &self.real)
            .field("predicted", &self.predicted)
            .field("options", &self.options)
            .field("udf_delta", &self.udf_delta.is_some())
            .field("udf_gamma", &self.udf_gamma.is_some())
            .field("precision", &self.precision)
            .field("recall", &self.recall)
            .field("fscore", &self.fscore)
            .finish()
    }
}
