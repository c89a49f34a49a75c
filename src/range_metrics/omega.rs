//! range_metrics::omega — positionally weighted overlap reward (ω).
//!
//! Purpose
//! -------
//! Turn "how much of a range was hit, weighted by where it was hit" into a
//! normalized reward in `[0, 1]`. This is the partial-credit mechanism shared
//! by precision and recall.
//!
//! Key behaviors
//! -------------
//! - [`omega`] walks every position of a range once, accumulating the full
//!   positional-bias mass and the mass that falls inside the overlap.
//! - [`overlap_reward`] applies the overlap primitive to a pair of ranges and
//!   returns `None` when they are disjoint, so callers can count overlaps.
//!
//! Invariants & assumptions
//! ------------------------
//! - The overlap passed to [`omega`] is a sub-range of the scored range (as
//!   produced by [`TimeRange::overlap`]); positions outside the scored range
//!   are never visited.
//! - With strictly positive δ the denominator is positive; the `0` branch is
//!   kept for completeness.
//!
//! Performance
//! -----------
//! - O(L) in the length of the scored range, with no allocation.

use crate::range_metrics::{bias::DeltaFunction, errors::RangeMetricResult, ranges::TimeRange};

/// ω(range, overlap) for the side bound in `delta`.
///
/// Parameters
/// ----------
/// - `range`: `&TimeRange`
///   Range being scored (a predicted range for precision, a real range for
///   recall). Its length `L` defines the positional-bias domain `1..=L`.
/// - `overlap`: `&TimeRange`
///   Intersection of `range` with one range from the opposite set.
/// - `delta`: `&DeltaFunction`
///   Positional bias resolved for the metric side.
///
/// Returns
/// -------
/// `RangeMetricResult<f64>`
///   `captured_bias / max_bias` in `[0, 1]`, or `0` when `max_bias` is not
///   positive.
///
/// Errors
/// ------
/// - `RangeMetricError::DeltaContractViolated` propagated from a
///   user-defined δ.
///
/// Examples
/// --------
/// ```rust
/// # use rust_tsad::range_metrics::{bias::{DeltaFunction, PositionalBias}, omega::omega,
/// #     ranges::TimeRange, side::MetricSide};
/// let flat = DeltaFunction::resolve(PositionalBias::Flat, None, MetricSide::Recall);
/// let range = TimeRange::new(0, 9).unwrap();
/// let overlap = TimeRange::new(5, 9).unwrap();
/// assert_eq!(omega(&range, &overlap, &flat).unwrap(), 0.5);
/// ```
pub fn omega(
    range: &TimeRange, overlap: &TimeRange, delta: &DeltaFunction<'_>,
) -> RangeMetricResult<f64> {
    let range_length = range.len();
    let mut max_bias = 0.0;
    let mut captured_bias = 0.0;

    for position in 1..=range_length {
        let weight = delta.eval(position, range_length)?;
        max_bias += weight;
        if overlap.contains(range.start() + position - 1) {
            captured_bias += weight;
        }
    }

    if max_bias > 0.0 { Ok(captured_bias / max_bias) } else { Ok(0.0) }
}

/// ω of `range` against `other`, or `None` when the two do not overlap.
#[inline]
pub fn overlap_reward(
    range: &TimeRange, other: &TimeRange, delta: &DeltaFunction<'_>,
) -> RangeMetricResult<Option<f64>> {
    match range.overlap(other) {
        Some(overlap) => omega(range, &overlap, delta).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range_metrics::{
        bias::{PositionalBias, PositionalBiasFn},
        errors::RangeMetricError,
        side::MetricSide,
    };
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - ω under each built-in bias on a hand-computable range.
    // - Full and empty capture, and `overlap_reward` on disjoint ranges.
    // - Propagation of a user-defined δ contract violation.
    // -------------------------------------------------------------------------

    fn delta(bias: PositionalBias) -> DeltaFunction<'static> {
        DeltaFunction::resolve(bias, None, MetricSide::Recall)
    }

    #[test]
    // Purpose
    // -------
    // Verify ω for a range of length 4 whose first half is captured.
    //
    // Given
    // -----
    // - range [0, 3], overlap [0, 1].
    //
    // Expect
    // ------
    // - flat 2/4, front (4+3)/10, back (1+2)/10, middle (1+2)/6.
    fn omega_first_half_under_each_bias() {
        // Arrange
        let range = TimeRange::new(0, 3).unwrap();
        let overlap = TimeRange::new(0, 1).unwrap();

        // Assert
        assert_relative_eq!(omega(&range, &overlap, &delta(PositionalBias::Flat)).unwrap(), 0.5);
        assert_relative_eq!(omega(&range, &overlap, &delta(PositionalBias::Front)).unwrap(), 0.7);
        assert_relative_eq!(omega(&range, &overlap, &delta(PositionalBias::Back)).unwrap(), 0.3);
        assert_relative_eq!(omega(&range, &overlap, &delta(PositionalBias::Middle)).unwrap(), 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Verify ω is 1 when the whole range is captured, and that ranges
    // away from position 0 use offsets relative to their own start.
    //
    // Given
    // -----
    // - range [20, 24] fully covered; range [20, 24] with overlap [24, 24].
    //
    // Expect
    // ------
    // - Full capture gives 1 for every bias.
    // - Last-position capture under `Front` gives 1/15.
    fn omega_full_capture_and_offset_range() {
        // Arrange
        let range = TimeRange::new(20, 24).unwrap();
        let last = TimeRange::point(24);

        // Assert
        for bias in [
            PositionalBias::Flat,
            PositionalBias::Front,
            PositionalBias::Middle,
            PositionalBias::Back,
        ] {
            assert_relative_eq!(omega(&range, &range, &delta(bias)).unwrap(), 1.0);
        }
        assert_relative_eq!(
            omega(&range, &last, &delta(PositionalBias::Front)).unwrap(),
            1.0 / 15.0
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure `overlap_reward` separates "no overlap" from a zero reward.
    //
    // Given
    // -----
    // - [0, 2] against [10, 12] and against [2, 5].
    //
    // Expect
    // ------
    // - `None` for the disjoint pair; `Some(1/3)` for the touching pair.
    fn overlap_reward_disjoint_is_none() {
        // Arrange
        let range = TimeRange::new(0, 2).unwrap();
        let far = TimeRange::new(10, 12).unwrap();
        let touching = TimeRange::new(2, 5).unwrap();
        let flat = delta(PositionalBias::Flat);

        // Act
        let none = overlap_reward(&range, &far, &flat).unwrap();
        let some = overlap_reward(&range, &touching, &flat).unwrap();

        // Assert
        assert_eq!(none, None);
        assert_relative_eq!(some.unwrap(), 1.0 / 3.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a user-defined δ that goes non-positive aborts ω.
    //
    // Given
    // -----
    // - udf δ(p, L) = L − 2p (becomes ≤ 0 from p = L/2).
    //
    // Expect
    // ------
    // - `DeltaContractViolated` at position 2 of a length-4 range.
    fn omega_propagates_delta_contract_violation() {
        // Arrange
        let shrinking = |p: usize, l: usize, _s: MetricSide| l as f64 - 2.0 * p as f64;
        let udf = DeltaFunction::resolve(
            PositionalBias::UserDefined,
            Some(&shrinking as &dyn PositionalBiasFn),
            MetricSide::Precision,
        );
        let range = TimeRange::new(0, 3).unwrap();

        // Act
        let result = omega(&range, &range, &udf);

        // Assert
        assert_eq!(
            result,
            Err(RangeMetricError::DeltaContractViolated {
                side: MetricSide::Precision,
                position: 2,
                range_length: 4,
                value: 0.0,
            })
        );
    }
}
