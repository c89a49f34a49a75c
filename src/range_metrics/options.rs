//! Evaluator options — the configuration bundle for one evaluation run.
//!
//! Purpose
//! -------
//! Collect the knobs that shape range-based precision, recall and F-score in
//! one validated value: the F-score weight β, the recall existence weight α_r,
//! the shared overlap cardinality γ, and the per-side positional biases δ.
//!
//! Key behaviors
//! -------------
//! - Construct validated options with [`EvaluatorOptions::new`] or start from
//!   [`EvaluatorOptions::default`] and adjust with the `with_*` builders.
//! - Keep the model restrictions structural: there is no field for the
//!   precision existence weight (always 0) and only one cardinality field
//!   (shared by both sides).
//!
//! Invariants & assumptions
//! ------------------------
//! - `beta` is finite and `> 0`; `alpha_recall` is finite and in `[0, 1]`.
//! - `alpha_precision() == 0` and `gamma_precision() == gamma_recall()` for
//!   every value of this type.
//! - Fields are private; every mutation path goes through
//!   [`validation`](crate::range_metrics::validation).
//!
//! Downstream usage
//! ----------------
//! - Pass an [`EvaluatorOptions`] to
//!   [`RangeEvaluator::with_options`](crate::range_metrics::evaluator::RangeEvaluator::with_options).
//! - Selector strings coming from a CLI or Python are parsed with the
//!   `FromStr` impls of [`OverlapCardinality`] and [`PositionalBias`]
//!   before reaching this type.
//!
//! Testing notes
//! -------------
//! - Unit tests check defaults, validation on construction and on every
//!   builder, and the structural restrictions.

use crate::range_metrics::{
    bias::PositionalBias,
    cardinality::OverlapCardinality,
    errors::RangeMetricResult,
    side::MetricSide,
    validation::{validate_alpha, validate_beta},
};

/// Existence-reward weight on the precision side. Fixed by the model.
pub const ALPHA_PRECISION: f64 = 0.0;

/// EvaluatorOptions — validated configuration for range-based metrics.
///
/// Fields
/// ------
/// - `beta`: `f64`
///   Relative importance of recall vs precision in the F-score (default 1).
/// - `alpha_recall`: `f64`
///   Weight of the existence reward for recall (default 0).
/// - `gamma`: [`OverlapCardinality`]
///   Fragmentation penalty shared by precision and recall (default `One`).
/// - `delta_precision`, `delta_recall`: [`PositionalBias`]
///   Positional bias per side (default `Flat`).
///
/// Invariants
/// ----------
/// - See module docs. Any value of this type satisfies them.
///
/// Performance
/// -----------
/// - `Copy`; cheap to pass by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluatorOptions {
    beta: f64,
    alpha_recall: f64,
    gamma: OverlapCardinality,
    delta_precision: PositionalBias,
    delta_recall: PositionalBias,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        EvaluatorOptions {
            beta: 1.0,
            alpha_recall: 0.0,
            gamma: OverlapCardinality::One,
            delta_precision: PositionalBias::Flat,
            delta_recall: PositionalBias::Flat,
        }
    }
}

impl EvaluatorOptions {
    /// Construct validated options.
    ///
    /// Parameters
    /// ----------
    /// - `beta`: `f64`
    ///   F-score weight; finite and `> 0`.
    /// - `alpha_recall`: `f64`
    ///   Recall existence weight; finite and in `[0, 1]`.
    /// - `gamma`: `OverlapCardinality`
    ///   Shared fragmentation penalty.
    /// - `delta_precision`, `delta_recall`: `PositionalBias`
    ///   Per-side positional bias.
    ///
    /// Errors
    /// ------
    /// - `RangeMetricError::InvalidBeta` / `RangeMetricError::InvalidAlpha`
    ///   when a scalar is outside its domain. Nothing is constructed.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_tsad::range_metrics::{options::EvaluatorOptions, bias::PositionalBias,
    /// #     cardinality::OverlapCardinality};
    /// let opts = EvaluatorOptions::new(
    ///     1.0, 0.0, OverlapCardinality::Reciprocal, PositionalBias::Flat, PositionalBias::Front,
    /// ).unwrap();
    /// assert_eq!(opts.gamma_recall(), OverlapCardinality::Reciprocal);
    ///
    /// assert!(EvaluatorOptions::new(
    ///     1.0, 1.5, OverlapCardinality::One, PositionalBias::Flat, PositionalBias::Flat,
    /// ).is_err());
    /// ```
    pub fn new(
        beta: f64, alpha_recall: f64, gamma: OverlapCardinality, delta_precision: PositionalBias,
        delta_recall: PositionalBias,
    ) -> RangeMetricResult<Self> {
        Ok(EvaluatorOptions {
            beta: validate_beta(beta)?,
            alpha_recall: validate_alpha(alpha_recall)?,
            gamma,
            delta_precision,
            delta_recall,
        })
    }

    /// Copy with a new β.
    pub fn with_beta(mut self, beta: f64) -> RangeMetricResult<Self> {
        self.beta = validate_beta(beta)?;
        Ok(self)
    }

    /// Copy with a new recall existence weight.
    pub fn with_alpha_recall(mut self, alpha: f64) -> RangeMetricResult<Self> {
        self.alpha_recall = validate_alpha(alpha)?;
        Ok(self)
    }

    /// Copy with a new shared cardinality. Sets both sides at once.
    pub fn with_gamma(mut self, gamma: OverlapCardinality) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_delta_precision(mut self, bias: PositionalBias) -> Self {
        self.delta_precision = bias;
        self
    }

    pub fn with_delta_recall(mut self, bias: PositionalBias) -> Self {
        self.delta_recall = bias;
        self
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn alpha_precision(&self) -> f64 {
        ALPHA_PRECISION
    }

    pub fn alpha_recall(&self) -> f64 {
        self.alpha_recall
    }

    pub fn gamma(&self) -> OverlapCardinality {
        self.gamma
    }

    pub fn gamma_precision(&self) -> OverlapCardinality {
        self.gamma
    }

    pub fn gamma_recall(&self) -> OverlapCardinality {
        self.gamma
    }

    pub fn delta_precision(&self) -> PositionalBias {
        self.delta_precision
    }

    pub fn delta_recall(&self) -> PositionalBias {
        self.delta_recall
    }

    /// Existence weight α for `side`.
    pub fn alpha(&self, side: MetricSide) -> f64 {
        match side {
            MetricSide::Precision => ALPHA_PRECISION,
            MetricSide::Recall => self.alpha_recall,
        }
    }

    /// Positional bias δ selected for `side`.
    pub fn delta(&self, side: MetricSide) -> PositionalBias {
        match side {
            MetricSide::Precision => self.delta_precision,
            MetricSide::Recall => self.delta_recall,
        }
    }
}
