//! range_metrics::validation — shared guards for evaluator parameters.
//!
//! Purpose
//! -------
//! Centralize the scalar checks applied to the F-score weight β and the
//! existence-reward weight α, so that constructors, setters and the Python
//! layer reject the same values with the same errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - β must be finite and strictly positive. `β = 0` is rejected: it would
//!   reduce the F-score to precision and divide by recall alone.
//! - α must be finite and lie in `[0, 1]`.
//!
//! Conventions
//! -----------
//! - Guards return the validated value so call sites can write
//!   `self.beta = validate_beta(beta)?;`.
//! - This module performs no allocation and never panics.

use crate::range_metrics::errors::{RangeMetricError, RangeMetricResult};

/// Validate the F-score weight β.
///
/// Errors
/// ------
/// - `RangeMetricError::InvalidBeta` when `beta` is NaN, infinite or `≤ 0`.
///
/// Examples
/// --------
/// ```rust
/// # use rust_tsad::range_metrics::validation::validate_beta;
/// assert_eq!(validate_beta(2.0), Ok(2.0));
/// assert!(validate_beta(-1.0).is_err());
/// assert!(validate_beta(0.0).is_err());
/// ```
pub fn validate_beta(beta: f64) -> RangeMetricResult<f64> {
    if !beta.is_finite() || beta <= 0.0 {
        return Err(RangeMetricError::InvalidBeta { value: beta });
    }
    Ok(beta)
}

/// Validate an existence-reward weight α.
///
/// Errors
/// ------
/// - `RangeMetricError::InvalidAlpha` when `alpha` is NaN or outside `[0, 1]`.
pub fn validate_alpha(alpha: f64) -> RangeMetricResult<f64> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(RangeMetricError::InvalidAlpha { value: alpha });
    }
    Ok(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Accepted and rejected β values, including the 0 boundary and NaN.
    // - Accepted and rejected α values, including both closed bounds.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the β domain `(0, ∞)`.
    //
    // Given
    // -----
    // - β ∈ {1, 0.5, 1e6} valid; β ∈ {0, -1, NaN, ∞} invalid.
    //
    // Expect
    // ------
    // - Valid values are returned unchanged; invalid ones yield `InvalidBeta`.
    fn validate_beta_accepts_positive_finite_only() {
        for beta in [1.0, 0.5, 1e6] {
            assert_eq!(validate_beta(beta), Ok(beta));
        }
        for beta in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            match validate_beta(beta) {
                Err(RangeMetricError::InvalidBeta { .. }) => (),
                other => panic!("expected InvalidBeta for {beta}, got {other:?}"),
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the α domain `[0, 1]`.
    //
    // Given
    // -----
    // - α ∈ {0, 0.3, 1} valid; α ∈ {-0.1, 1.5, NaN} invalid.
    //
    // Expect
    // ------
    // - Valid values are returned unchanged; invalid ones yield `InvalidAlpha`.
    fn validate_alpha_accepts_unit_interval_only() {
        for alpha in [0.0, 0.3, 1.0] {
            assert_eq!(validate_alpha(alpha), Ok(alpha));
        }
        for alpha in [-0.1, 1.5, f64::NAN] {
            match validate_alpha(alpha) {
                Err(RangeMetricError::InvalidAlpha { .. }) => (),
                other => panic!("expected InvalidAlpha for {alpha}, got {other:?}"),
            }
        }
    }
}
