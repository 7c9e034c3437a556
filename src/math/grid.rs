//! Log-spaced grid generation.
//!
//! Both the momentum mesh and the temperature history are geometric grids, so a
//! single generator serves both.

use crate::error::{KineticsError, KineticsResult};

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, steps: usize) -> KineticsResult<Vec<f64>> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0 && max > min) {
        return Err(KineticsError::InvalidInput(format!(
            "Invalid grid range: min={min}, max={max} (must be finite, >0, and max>min)."
        )));
    }
    if steps < 2 {
        return Err(KineticsError::InvalidInput(format!(
            "Grid steps must be >= 2, got {steps}."
        )));
    }
    Ok(geomspace(min, max, steps))
}

/// Unchecked geometric spacing; endpoints are pinned to `min` and `max` exactly.
///
/// Callers guarantee `0 < min < max` and `steps >= 2`.
pub(crate) fn geomspace(min: f64, max: f64, steps: usize) -> Vec<f64> {
    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push((ln_min + step * i as f64).exp());
    }
    out[0] = min;
    out[steps - 1] = max;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_space_includes_endpoints() {
        let v = log_space(0.1, 10.0, 5).unwrap();
        assert_eq!(v[0], 0.1);
        assert_eq!(v[v.len() - 1], 10.0);
        assert!((v[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn log_space_constant_ratio() {
        let v = log_space(1e-4, 1e3, 50).unwrap();
        let r0 = v[1] / v[0];
        for w in v.windows(2) {
            assert!((w[1] / w[0] - r0).abs() < 1e-9);
        }
    }

    #[test]
    fn log_space_rejects_bad_inputs() {
        assert!(log_space(0.0, 1.0, 10).is_err());
        assert!(log_space(2.0, 1.0, 10).is_err());
        assert!(log_space(1.0, f64::INFINITY, 10).is_err());
        assert!(log_space(1.0, 2.0, 1).is_err());
    }
}
