//! range_metrics::cardinality — overlap cardinality (γ) penalty.
//!
//! Purpose
//! -------
//! Penalize a range that overlaps more than one range on the opposite side,
//! so that fragmented predictions (or fragmented labels) cannot collect full
//! credit by splitting one anomaly into many pieces.
//!
//! Key behaviors
//! -------------
//! - Enumerate the selectors with [`OverlapCardinality`] (`One`,
//!   `Reciprocal`, `UserDefined`) and parse their names via `FromStr`.
//! - Accept user-defined penalties through [`CardinalityFn`], implemented for
//!   any `Fn(usize, MetricSide) -> f64 + Send + Sync`.
//! - Resolve a selector into a [`GammaFunction`] that returns the multiplier
//!   in `(0, 1]` and validates user-defined outputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - Counts `≤ 1` always give multiplier 1; the penalty applies only to
//!   genuine fragmentation.
//! - A user-defined γ must return a value `≥ 1`; the multiplier is its
//!   reciprocal. Anything else (including NaN and +∞) is
//!   `RangeMetricError::GammaContractViolated`; a failure reported through
//!   [`CardinalityFn::try_gamma`] is `RangeMetricError::UserFunctionFailed`.
//! - The same selector is used for precision and recall.

use std::str::FromStr;

use crate::range_metrics::{
    errors::{RangeMetricError, RangeMetricResult},
    side::MetricSide,
};

/// Overlap cardinality selector γ.
///
/// - `One`: no penalty for fragmentation.
/// - `Reciprocal`: multiplier `1 / overlap_count` for counts above one.
/// - `UserDefined`: multiplier `1 / udf(overlap_count)` for counts above one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverlapCardinality {
    #[default]
    One,
    Reciprocal,
    UserDefined,
}

impl OverlapCardinality {
    /// Canonical selector name.
    pub fn name(&self) -> &'static str {
        match self {
            OverlapCardinality::One => "one",
            OverlapCardinality::Reciprocal => "reciprocal",
            OverlapCardinality::UserDefined => "udf_gamma",
        }
    }
}

impl FromStr for OverlapCardinality {
    type Err = RangeMetricError;

    /// Parse a cardinality selector (case-insensitive). `"x"` maps to the
    /// default `One`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "one" | "x" => Ok(OverlapCardinality::One),
            "reciprocal" => Ok(OverlapCardinality::Reciprocal),
            "udf_gamma" => Ok(OverlapCardinality::UserDefined),
            _ => Err(RangeMetricError::InvalidCardinality { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for OverlapCardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// User-supplied overlap cardinality.
///
/// Contract: return a value `≥ 1` for any `overlap_count ≥ 2`. The evaluator
/// never calls it for counts of zero or one.
pub trait CardinalityFn: Send + Sync {
    fn gamma(&self, overlap_count: usize, side: MetricSide) -> f64;

    /// Fallible form called by the evaluator. The default never fails.
    fn try_gamma(&self, overlap_count: usize, side: MetricSide) -> Result<f64, String> {
        Ok(self.gamma(overlap_count, side))
    }
}

impl<F> CardinalityFn for F
where
    F: Fn(usize, MetricSide) -> f64 + Send + Sync,
{
    fn gamma(&self, overlap_count: usize, side: MetricSide) -> f64 {
        self(overlap_count, side)
    }
}

/// GammaFunction — γ resolved for one metric side.
#[derive(Clone, Copy)]
pub struct GammaFunction<'a> {
    side: MetricSide,
    kind: GammaKind<'a>,
}

#[derive(Clone, Copy)]
enum GammaKind<'a> {
    One,
    Reciprocal,
    UserDefined(&'a dyn CardinalityFn),
}

impl<'a> GammaFunction<'a> {
    /// Resolve `selector` for `side`. `UserDefined` without an injected
    /// function logs a warning and behaves as `One`.
    pub fn resolve(
        selector: OverlapCardinality, udf: Option<&'a dyn CardinalityFn>, side: MetricSide,
    ) -> Self {
        let kind = match (selector, udf) {
            (OverlapCardinality::One, _) => GammaKind::One,
            (OverlapCardinality::Reciprocal, _) => GammaKind::Reciprocal,
            (OverlapCardinality::UserDefined, Some(func)) => GammaKind::UserDefined(func),
            (OverlapCardinality::UserDefined, None) => {
                log::warn!(
                    "overlap cardinality for {side} is 'udf_gamma' but no user-defined gamma was \
                     provided; using default 'one' instead"
                );
                GammaKind::One
            }
        };
        GammaFunction { side, kind }
    }

    pub fn side(&self) -> MetricSide {
        self.side
    }

    /// Selector that is effectively applied after resolution.
    pub fn effective(&self) -> OverlapCardinality {
        match self.kind {
            GammaKind::One => OverlapCardinality::One,
            GammaKind::Reciprocal => OverlapCardinality::Reciprocal,
            GammaKind::UserDefined(_) => OverlapCardinality::UserDefined,
        }
    }

    /// Cardinality multiplier for a range with `overlap_count` overlaps.
    ///
    /// Returns
    /// -------
    /// A value in `(0, 1]`; exactly 1 whenever `overlap_count ≤ 1`.
    ///
    /// Errors
    /// ------
    /// - `RangeMetricError::GammaContractViolated` when a user-defined γ
    ///   returns a value below 1, NaN or +∞.
    /// - `RangeMetricError::UserFunctionFailed` when it reports a failure.
    pub fn multiplier(&self, overlap_count: usize) -> RangeMetricResult<f64> {
        if overlap_count <= 1 {
            return Ok(1.0);
        }
        match self.kind {
            GammaKind::One => Ok(1.0),
            GammaKind::Reciprocal => Ok(1.0 / overlap_count as f64),
            GammaKind::UserDefined(func) => {
                let value = func.try_gamma(overlap_count, self.side).map_err(|message| {
                    RangeMetricError::UserFunctionFailed {
                        side: self.side,
                        function: "gamma",
                        message,
                    }
                })?;
                if !value.is_finite() || value < 1.0 {
                    return Err(RangeMetricError::GammaContractViolated {
                        side: self.side,
                        overlap_count,
                        value,
                    });
                }
                Ok(1.0 / value)
            }
        }
    }
}

impl std::fmt::Debug for GammaFunction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GammaFunction")
            .field("side", &self.side)
            .field("cardinality", &self.effective())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Multipliers for `One` and `Reciprocal` around the count-1 boundary.
    // - User-defined γ: delegation, the count ≤ 1 short-circuit, and the
    //   finite `≥ 1` contract.
    // - Name parsing and the warning fallback when no udf is injected.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the built-in multipliers.
    //
    // Given
    // -----
    // - Counts 0, 1, 2 and 4.
    //
    // Expect
    // ------
    // - `One` is always 1; `Reciprocal` is 1, 1, 0.5, 0.25.
    fn builtin_multipliers() {
        // Arrange
        let one = GammaFunction::resolve(OverlapCardinality::One, None, MetricSide::Recall);
        let recip =
            GammaFunction::resolve(OverlapCardinality::Reciprocal, None, MetricSide::Recall);

        // Assert
        for count in [0, 1, 2, 4] {
            assert_eq!(one.multiplier(count), Ok(1.0));
        }
        assert_eq!(recip.multiplier(0), Ok(1.0));
        assert_eq!(recip.multiplier(1), Ok(1.0));
        assert_relative_eq!(recip.multiplier(2).unwrap(), 0.5);
        assert_relative_eq!(recip.multiplier(4).unwrap(), 0.25);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a user-defined γ is inverted and only consulted above one.
    //
    // Given
    // -----
    // - udf(n) = n², asserting that it is never called with n ≤ 1.
    //
    // Expect
    // ------
    // - multiplier(3) = 1/9; multiplier(1) = 1 without calling the udf.
    fn user_defined_gamma_is_inverted_above_one() {
        // Arrange
        let square = |n: usize, _s: MetricSide| {
            assert!(n > 1, "udf must not be called for counts ≤ 1");
            (n * n) as f64
        };
        let gamma = GammaFunction::resolve(
            OverlapCardinality::UserDefined,
            Some(&square as &dyn CardinalityFn),
            MetricSide::Precision,
        );

        // Assert
        assert_relative_eq!(gamma.multiplier(3).unwrap(), 1.0 / 9.0);
        assert_eq!(gamma.multiplier(1), Ok(1.0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a user-defined γ below 1 violates the contract.
    //
    // Given
    // -----
    // - udf(n) = 0.5 for every n, on the recall side.
    //
    // Expect
    // ------
    // - `GammaContractViolated { side: Recall, overlap_count: 2, value: 0.5 }`.
    fn user_defined_gamma_below_one_violates_contract() {
        // Arrange
        let half = |_n: usize, _s: MetricSide| 0.5;
        let gamma = GammaFunction::resolve(
            OverlapCardinality::UserDefined,
            Some(&half as &dyn CardinalityFn),
            MetricSide::Recall,
        );

        // Act
        let result = gamma.multiplier(2);

        // Assert
        assert_eq!(
            result,
            Err(RangeMetricError::GammaContractViolated {
                side: MetricSide::Recall,
                overlap_count: 2,
                value: 0.5,
            })
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify name parsing and the fallback for a missing udf.
    //
    // Given
    // -----
    // - Names "Reciprocal", "x", "udf_gamma", "square"; `UserDefined`
    //   resolved without a function.
    //
    // Expect
    // ------
    // - Parsed selectors as documented; unknown name rejected; the unbound
    //   `UserDefined` behaves as `One`.
    fn from_str_and_missing_udf_fallback() {
        assert_eq!("Reciprocal".parse::<OverlapCardinality>(), Ok(OverlapCardinality::Reciprocal));
        assert_eq!("x".parse::<OverlapCardinality>(), Ok(OverlapCardinality::One));
        assert_eq!("udf_gamma".parse::<OverlapCardinality>(), Ok(OverlapCardinality::UserDefined));
        assert!(matches!(
            "square".parse::<OverlapCardinality>(),
            Err(RangeMetricError::InvalidCardinality { .. })
        ));

        let unbound =
            GammaFunction::resolve(OverlapCardinality::UserDefined, None, MetricSide::Precision);
        assert_eq!(unbound.effective(), OverlapCardinality::One);
        assert_eq!(unbound.multiplier(5), Ok(1.0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure that an infinite user γ violates the contract instead of giving
    // a zero multiplier.
    //
    // Given
    // -----
    // - udf(n) = +∞ for every n, on the recall side.
    //
    // Expect
    // ------
    // - `GammaContractViolated { side: Recall, overlap_count: 2, value: +∞ }`.
    fn user_defined_infinite_gamma_violates_contract() {
        // Arrange
        let unbounded = |_n: usize, _s: MetricSide| f64::INFINITY;
        let gamma = GammaFunction::resolve(
            OverlapCardinality::UserDefined,
            Some(&unbounded as &dyn CardinalityFn),
            MetricSide::Recall,
        );

        // Act
        let result = gamma.multiplier(2);

        // Assert
        assert_eq!(
            result,
            Err(RangeMetricError::GammaContractViolated {
                side: MetricSide::Recall,
                overlap_count: 2,
                value: f64::INFINITY,
            })
        );
    }
}
