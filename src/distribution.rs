//! Occupation-number model for the ALP phase space.
//!
//! Thermal baselines (Bose-Einstein, Fermi-Dirac) plus a phenomenological
//! non-thermal closure:
//!
//! ```text
//! distortion(x, T) = x² · offset / (1 + (T / T_ref)²)
//! f(x, T)          = 1 / (exp(x + distortion) + 1)
//! ```
//!
//! with `offset = ln(rank) / sqrt(2π)`, derived once at construction. With the
//! distortion disabled `f` is exactly Fermi-Dirac.

use std::f64::consts::PI;

use crate::domain::DistortionConfig;
use crate::error::{KineticsError, KineticsResult};

/// Reference temperature of the distortion roll-off (GeV).
pub const T_REF_DISTORTION: f64 = 1e3;

/// Immutable distribution model; safe to share across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionModel {
    enabled: bool,
    rank: u32,
    offset: f64,
}

impl DistributionModel {
    pub fn new(config: DistortionConfig) -> KineticsResult<Self> {
        if config.rank == 0 {
            return Err(KineticsError::InvalidInput("rank must be >= 1".to_string()));
        }
        Ok(Self {
            enabled: config.enabled,
            rank: config.rank,
            offset: distortion_offset(config.rank),
        })
    }

    /// Pure Fermi-Dirac model (distortion disabled).
    pub fn thermal() -> Self {
        Self {
            enabled: false,
            rank: 1,
            offset: 0.0,
        }
    }

    pub fn is_distorted(&self) -> bool {
        self.enabled
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Momentum shift applied inside the exponent; zero when disabled.
    pub fn distortion(&self, x: f64, t: f64) -> f64 {
        if !self.enabled {
            return 0.0;
        }
        let ratio = t / T_REF_DISTORTION;
        x * x * self.offset / (1.0 + ratio * ratio)
    }

    /// Occupation number `f(x, T)`. Inputs are assumed positive.
    ///
    /// Exactly `0.0` once `x + distortion(x, T)` overflows `exp` (above ~709.8); never NaN.
    pub fn occupation(&self, x: f64, t: f64) -> f64 {
        if !self.enabled {
            return fermi_dirac(x);
        }
        1.0 / ((x + self.distortion(x, t)).exp() + 1.0)
    }

    /// [`occupation`](Self::occupation) with input validation.
    pub fn checked_occupation(&self, x: f64, t: f64) -> KineticsResult<f64> {
        require_positive("momentum x", x)?;
        require_positive("temperature T", t)?;
        Ok(self.occupation(x, t))
    }
}

/// `ln(rank) / sqrt(2π)`.
pub fn distortion_offset(rank: u32) -> f64 {
    f64::from(rank).ln() / (2.0 * PI).sqrt()
}

/// Bose-Einstein occupation `1/(e^x - 1)`; diverges as `x → 0`.
pub fn bose_einstein(x: f64) -> f64 {
    1.0 / x.exp_m1()
}

/// Fermi-Dirac occupation `1/(e^x + 1)`.
pub fn fermi_dirac(x: f64) -> f64 {
    1.0 / (x.exp() + 1.0)
}

pub(crate) fn require_positive(name: &str, value: f64) -> KineticsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KineticsError::InvalidInput(format!(
            "{name} must be finite and > 0, got {value}"
        )))
    }
}
