//! range_metrics::bias — positional bias (δ) weighting within a range.
//!
//! Purpose
//! -------
//! Assign a weight to every position inside a range so that the overlap reward
//! can emphasize the start, middle or end of an anomaly, or treat all
//! positions alike.
//!
//! Key behaviors
//! -------------
//! - Enumerate the built-in biases with [`PositionalBias`] (`Flat`, `Front`,
//!   `Middle`, `Back`) plus the `UserDefined` extension point.
//! - Parse selector names (`"flat"`, `"front"`, `"middle"`, `"back"`,
//!   `"udf_delta"`, and the don't-care token `"x"`) via `FromStr`.
//! - Accept user-defined biases through the [`PositionalBiasFn`] trait, which
//!   is implemented for any `Fn(usize, usize, MetricSide) -> f64 + Send + Sync`.
//! - Resolve a selector and an optional injected function into a
//!   [`DeltaFunction`] that validates every user-defined weight.
//!
//! Invariants & assumptions
//! ------------------------
//! - Positions are 1-indexed offsets into the range: `1 ≤ position ≤ L`.
//! - Built-in weights are strictly positive for every valid position.
//! - User-defined weights must be finite and `> 0`; any other value
//!   (including NaN and ±∞) yields `RangeMetricError::DeltaContractViolated`.
//! - A user-defined bias that reports a failure through
//!   [`PositionalBiasFn::try_weight`] yields
//!   `RangeMetricError::UserFunctionFailed` carrying its message.
//!
//! Conventions
//! -----------
//! - `Middle` uses integer halving of the range length: positions
//!   `p ≤ L / 2` get weight `p`, the rest get `L − p + 1`.
//! - Selecting `UserDefined` without injecting a function is not an error:
//!   [`DeltaFunction::resolve`] logs a warning and falls back to `Flat`.

use std::str::FromStr;

use crate::range_metrics::{
    errors::{RangeMetricError, RangeMetricResult},
    side::MetricSide,
};

/// Positional bias selector δ.
///
/// - `Flat`: weight 1 everywhere.
/// - `Front`: `L − p + 1`, decreasing from the start.
/// - `Middle`: peaks at the midpoint and decreases toward both ends.
/// - `Back`: `p`, increasing toward the end.
/// - `UserDefined`: delegates to an injected [`PositionalBiasFn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PositionalBias {
    #[default]
    Flat,
    Front,
    Middle,
    Back,
    UserDefined,
}

impl PositionalBias {
    /// Weight of a built-in bias at 1-indexed `position` within a range of
    /// `range_length` positions. Returns `None` for `UserDefined`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_tsad::range_metrics::bias::PositionalBias;
    /// assert_eq!(PositionalBias::Front.builtin_weight(1, 4), Some(4.0));
    /// assert_eq!(PositionalBias::Middle.builtin_weight(3, 4), Some(2.0));
    /// assert_eq!(PositionalBias::UserDefined.builtin_weight(1, 4), None);
    /// ```
    #[inline]
    pub fn builtin_weight(&self, position: usize, range_length: usize) -> Option<f64> {
        let weight = match self {
            PositionalBias::Flat => 1.0,
            PositionalBias::Front => (range_length - position + 1) as f64,
            PositionalBias::Middle => {
                if position <= range_length / 2 {
                    position as f64
                } else {
                    (range_length - position + 1) as f64
                }
            }
            PositionalBias::Back => position as f64,
            PositionalBias::UserDefined => return None,
        };
        Some(weight)
    }

    /// Canonical selector name.
    pub fn name(&self) -> &'static str {
        match self {
            PositionalBias::Flat => "flat",
            PositionalBias::Front => "front",
            PositionalBias::Middle => "middle",
            PositionalBias::Back => "back",
            PositionalBias::UserDefined => "udf_delta",
        }
    }
}

impl FromStr for PositionalBias {
    type Err = RangeMetricError;

    /// Parse a bias selector (case-insensitive). `"x"` means "don't care" and
    /// maps to the default `Flat`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" | "x" => Ok(PositionalBias::Flat),
            "front" => Ok(PositionalBias::Front),
            "middle" => Ok(PositionalBias::Middle),
            "back" => Ok(PositionalBias::Back),
            "udf_delta" => Ok(PositionalBias::UserDefined),
            _ => Err(RangeMetricError::InvalidPositionalBias { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for PositionalBias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// User-supplied positional bias.
///
/// Contract: for every `1 ≤ position ≤ range_length`, return a strictly
/// positive weight. Typical implementations grow or shrink monotonically with
/// the distance of `position` from a reference point of the range. The side
/// argument allows different shapes for precision and recall.
pub trait PositionalBiasFn: Send + Sync {
    fn weight(&self, position: usize, range_length: usize, side: MetricSide) -> f64;

    /// Fallible form called by the evaluator. The default never fails;
    /// callbacks into a foreign runtime override it to surface their error.
    fn try_weight(
        &self, position: usize, range_length: usize, side: MetricSide,
    ) -> Result<f64, String> {
        Ok(self.weight(position, range_length, side))
    }
}

impl<F> PositionalBiasFn for F
where
    F: Fn(usize, usize, MetricSide) -> f64 + Send + Sync,
{
    fn weight(&self, position: usize, range_length: usize, side: MetricSide) -> f64 {
        self(position, range_length, side)
    }
}

/// DeltaFunction — δ resolved for one metric side.
///
/// Purpose
/// -------
/// Bind a selector to the concrete weighting it stands for on one side.
/// Resolution happens once per precision/recall computation; [`eval`](Self::eval)
/// is then called for every position of every scored range.
///
/// Invariants
/// ----------
/// - `UserDefined` never appears as a `Builtin` payload; it is either bound to
///   an injected function or replaced by `Flat` at resolution time.
#[derive(Clone, Copy)]
pub struct DeltaFunction<'a> {
    side: MetricSide,
    kind: DeltaKind<'a>,
}

#[derive(Clone, Copy)]
enum DeltaKind<'a> {
    Builtin(PositionalBias),
    UserDefined(&'a dyn PositionalBiasFn),
}

impl<'a> DeltaFunction<'a> {
    /// Resolve `selector` for `side`, binding `udf` when `selector` is
    /// `UserDefined`.
    ///
    /// When `UserDefined` is selected but no function was injected, a warning
    /// is logged and `Flat` is used instead.
    pub fn resolve(
        selector: PositionalBias, udf: Option<&'a dyn PositionalBiasFn>, side: MetricSide,
    ) -> Self {
        let kind = match (selector, udf) {
            (PositionalBias::UserDefined, Some(func)) => DeltaKind::UserDefined(func),
            (PositionalBias::UserDefined, None) => {
                log::warn!(
                    "positional bias for {side} is 'udf_delta' but no user-defined delta was \
                     provided; using default 'flat' instead"
                );
                DeltaKind::Builtin(PositionalBias::Flat)
            }
            (builtin, _) => DeltaKind::Builtin(builtin),
        };
        DeltaFunction { side, kind }
    }

    pub fn side(&self) -> MetricSide {
        self.side
    }

    /// Selector that is effectively applied after resolution.
    pub fn effective(&self) -> PositionalBias {
        match self.kind {
            DeltaKind::Builtin(bias) => bias,
            DeltaKind::UserDefined(_) => PositionalBias::UserDefined,
        }
    }

    /// δ(position, range_length) for the bound side.
    ///
    /// Errors
    /// ------
    /// - `RangeMetricError::DeltaContractViolated` when a user-defined bias
    ///   returns a value that is not finite and strictly positive.
    /// - `RangeMetricError::UserFunctionFailed` when it reports a failure.
    #[inline]
    pub fn eval(&self, position: usize, range_length: usize) -> RangeMetricResult<f64> {
        match self.kind {
            DeltaKind::Builtin(bias) => {
                Ok(bias.builtin_weight(position, range_length).unwrap_or(1.0))
            }
            DeltaKind::UserDefined(func) => {
                let value =
                    func.try_weight(position, range_length, self.side).map_err(|message| {
                        RangeMetricError::UserFunctionFailed {
                            side: self.side,
                            function: "delta",
                            message,
                        }
                    })?;
                if !value.is_finite() || value <= 0.0 {
                    return Err(RangeMetricError::DeltaContractViolated {
                        side: self.side,
                        position,
                        range_length,
                        value,
                    });
                }
                Ok(value)
            }
        }
    }
}

impl std::fmt::Debug for DeltaFunction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeltaFunction")
            .field("side", &self.side)
            .field("bias", &self.effective())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Built-in weights for every bias, including the odd/even `Middle` split.
    // - Selector parsing, the "x" token, and rejection of unknown names.
    // - Resolution of `UserDefined` with and without an injected function.
    // - Contract checking of user-defined weights, including infinities and
    //   failures reported through `try_weight`.
    // -------------------------------------------------------------------------

    fn weights(bias: PositionalBias, range_length: usize) -> Vec<f64> {
        (1..=range_length).map(|p| bias.builtin_weight(p, range_length).unwrap()).collect()
    }

    #[test]
    // Purpose
    // -------
    // Verify the per-position weights of all built-in biases.
    //
    // Given
    // -----
    // - A range of length 5.
    //
    // Expect
    // ------
    // - flat = [1,1,1,1,1], front = [5,4,3,2,1], back = [1,2,3,4,5],
    //   middle = [1,2,3,2,1] (positions ≤ 5/2 = 2 rise, the rest fall).
    fn builtin_weights_length_five() {
        assert_eq!(weights(PositionalBias::Flat, 5), vec![1.0; 5]);
        assert_eq!(weights(PositionalBias::Front, 5), vec![5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(weights(PositionalBias::Back, 5), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(weights(PositionalBias::Middle, 5), vec![1.0, 2.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify the `Middle` split for an even length and the single-point case.
    //
    // Given
    // -----
    // - Lengths 4 and 1.
    //
    // Expect
    // ------
    // - middle(4) = [1,2,2,1]; every bias gives weight 1 on a length-1 range.
    fn middle_even_length_and_single_point() {
        assert_eq!(weights(PositionalBias::Middle, 4), vec![1.0, 2.0, 2.0, 1.0]);
        for bias in [
            PositionalBias::Flat,
            PositionalBias::Front,
            PositionalBias::Middle,
            PositionalBias::Back,
        ] {
            assert_eq!(weights(bias, 1), vec![1.0], "bias {bias} on a single point");
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure selector parsing accepts canonical names case-insensitively,
    // maps "x" to the default, and rejects unknown names.
    //
    // Given
    // -----
    // - "FRONT", "udf_delta", "x" and "sideways".
    //
    // Expect
    // ------
    // - Front, UserDefined, Flat, and `InvalidPositionalBias { "sideways" }`.
    fn from_str_parses_names_and_rejects_unknown() {
        assert_eq!("FRONT".parse::<PositionalBias>(), Ok(PositionalBias::Front));
        assert_eq!("udf_delta".parse::<PositionalBias>(), Ok(PositionalBias::UserDefined));
        assert_eq!("x".parse::<PositionalBias>(), Ok(PositionalBias::Flat));
        assert_eq!(
            "sideways".parse::<PositionalBias>(),
            Err(RangeMetricError::InvalidPositionalBias { name: "sideways".to_string() })
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that `UserDefined` without an injected function falls back to
    // `Flat`, and with one delegates to it.
    //
    // Given
    // -----
    // - A udf returning `2 * position`.
    //
    // Expect
    // ------
    // - Without udf: effective = Flat, eval = 1.
    // - With udf: effective = UserDefined, eval(3, 5) = 6.
    fn resolve_user_defined_with_and_without_function() {
        // Arrange
        let udf = |p: usize, _l: usize, _s: MetricSide| 2.0 * p as f64;

        // Act
        let fallback =
            DeltaFunction::resolve(PositionalBias::UserDefined, None, MetricSide::Recall);
        let bound = DeltaFunction::resolve(
            PositionalBias::UserDefined,
            Some(&udf as &dyn PositionalBiasFn),
            MetricSide::Recall,
        );

        // Assert
        assert_eq!(fallback.effective(), PositionalBias::Flat);
        assert_eq!(fallback.eval(3, 5), Ok(1.0));
        assert_eq!(bound.effective(), PositionalBias::UserDefined);
        assert_eq!(bound.eval(3, 5), Ok(6.0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure that non-positive and NaN user weights violate the contract.
    //
    // Given
    // -----
    // - A udf returning 0 and a udf returning NaN, on the precision side.
    //
    // Expect
    // ------
    // - `DeltaContractViolated` carrying side, position, length and value.
    fn user_defined_non_positive_weight_violates_contract() {
        // Arrange
        let zero = |_p: usize, _l: usize, _s: MetricSide| 0.0;
        let nan = |_p: usize, _l: usize, _s: MetricSide| f64::NAN;
        let zero_delta = DeltaFunction::resolve(
            PositionalBias::UserDefined,
            Some(&zero as &dyn PositionalBiasFn),
            MetricSide::Precision,
        );
        let nan_delta = DeltaFunction::resolve(
            PositionalBias::UserDefined,
            Some(&nan as &dyn PositionalBiasFn),
            MetricSide::Precision,
        );

        // Act
        let zero_result = zero_delta.eval(2, 4);
        let nan_result = nan_delta.eval(1, 4);

        // Assert
        assert_eq!(
            zero_result,
            Err(RangeMetricError::DeltaContractViolated {
                side: MetricSide::Precision,
                position: 2,
                range_length: 4,
                value: 0.0,
            })
        );
        match nan_result {
            Err(RangeMetricError::DeltaContractViolated { value, .. }) => assert!(value.is_nan()),
            other => panic!("expected DeltaContractViolated, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure that an infinite user weight violates the contract instead of
    // turning ω into ∞/∞.
    //
    // Given
    // -----
    // - A recall udf returning +∞ at position 1 and 1 elsewhere.
    //
    // Expect
    // ------
    // - eval(1, 4) is `DeltaContractViolated` with value +∞; eval(2, 4) = 1.
    fn user_defined_infinite_weight_violates_contract() {
        // Arrange
        let spike =
            |p: usize, _l: usize, _s: MetricSide| if p == 1 { f64::INFINITY } else { 1.0 };
        let delta = DeltaFunction::resolve(
            PositionalBias::UserDefined,
            Some(&spike as &dyn PositionalBiasFn),
            MetricSide::Recall,
        );

        // Act
        let spiked = delta.eval(1, 4);
        let regular = delta.eval(2, 4);

        // Assert
        assert_eq!(
            spiked,
            Err(RangeMetricError::DeltaContractViolated {
                side: MetricSide::Recall,
                position: 1,
                range_length: 4,
                value: f64::INFINITY,
            })
        );
        assert_eq!(regular, Ok(1.0));
    }

    struct FailingBias;

    impl PositionalBiasFn for FailingBias {
        fn weight(&self, _position: usize, _range_length: usize, _side: MetricSide) -> f64 {
            f64::NAN
        }

        fn try_weight(
            &self, position: usize, _range_length: usize, _side: MetricSide,
        ) -> Result<f64, String> {
            Err(format!("callback raised at position {position}"))
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a failure reported by `try_weight` keeps its message
    // rather than collapsing into a NaN contract violation.
    //
    // Given
    // -----
    // - A bias whose `try_weight` always fails, on the precision side.
    //
    // Expect
    // ------
    // - `UserFunctionFailed { Precision, "delta", "callback raised at position 2" }`.
    fn user_defined_failure_carries_message() {
        // Arrange
        let delta = DeltaFunction::resolve(
            PositionalBias::UserDefined,
            Some(&FailingBias as &dyn PositionalBiasFn),
            MetricSide::Precision,
        );

        // Act
        let result = delta.eval(2, 3);

        // Assert
        assert_eq!(
            result,
            Err(RangeMetricError::UserFunctionFailed {
                side: MetricSide::Precision,
                function: "delta",
                message: "callback raised at position 2".to_string(),
            })
        );
    }
}
