//! Trapezoidal integration of sampled data on a non-uniform grid.

use crate::error::{KineticsError, KineticsResult};

/// `∫ y dx` over the sample points `x`, each interval weighted by its own width.
///
/// Fewer than two samples integrate to zero.
pub fn trapz(y: &[f64], x: &[f64]) -> KineticsResult<f64> {
    if y.len() != x.len() {
        return Err(KineticsError::DimensionMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    Ok(x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]))
        .sum())
}
