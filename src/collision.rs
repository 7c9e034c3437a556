//! Momentum-dependent collision integrals.
//!
//! Every rate density factors into a temperature-only prefactor and an
//! `(x, T)` kernel:
//!
//! - Primakoff (`γ q → a q`): `ρ(T) = g_aγ² α ζ(3) T⁴ / (12π)`, kernel `x³ f(x, T)`
//! - leptonic (`l⁺l⁻ → aγ`, `lγ → la`): `ρ_l(T) = m_l² (1/f_a)² T³ / (8π ζ(3))`,
//!   kernel `x f(x, T)`
//!
//! The sweep evaluates the prefactor once per temperature and integrates only the
//! kernel over momentum.

use std::f64::consts::PI;

use crate::constants::PhysicalConstants;
use crate::distribution::{DistributionModel, require_positive};
use crate::domain::{Lepton, RateChannel};
use crate::error::KineticsResult;
use crate::math::riemann_zeta;

/// Stateless view over the constant table and distribution model.
#[derive(Debug, Clone, Copy)]
pub struct CollisionIntegrals<'a> {
    constants: &'a PhysicalConstants,
    model: &'a DistributionModel,
    zeta3: f64,
}

impl<'a> CollisionIntegrals<'a> {
    pub fn new(constants: &'a PhysicalConstants, model: &'a DistributionModel) -> KineticsResult<Self> {
        constants.validate()?;
        Ok(Self {
            constants,
            model,
            zeta3: riemann_zeta(3.0)?,
        })
    }

    pub fn constants(&self) -> &PhysicalConstants {
        self.constants
    }

    pub fn model(&self) -> &DistributionModel {
        self.model
    }

    pub fn primakoff_prefactor(&self, t: f64) -> f64 {
        let g = self.constants.g_a_gamma;
        g * g * self.constants.alpha_em * self.zeta3 * t.powi(4) / (12.0 * PI)
    }

    pub fn primakoff_kernel(&self, x: f64, t: f64) -> f64 {
        x.powi(3) * self.model.occupation(x, t)
    }

    /// Primakoff production-rate density at `(x, T)`.
    pub fn rate_primakoff(&self, x: f64, t: f64) -> KineticsResult<f64> {
        require_positive("momentum x", x)?;
        require_positive("temperature T", t)?;
        Ok(self.primakoff_prefactor(t) * self.primakoff_kernel(x, t))
    }

    pub fn leptonic_prefactor(&self, lepton: Lepton, t: f64) -> f64 {
        let m = self.constants.lepton_mass(lepton);
        let fa_inv = self.constants.inverse_fa(lepton);
        m * m * fa_inv * fa_inv * t.powi(3) / (8.0 * PI * self.zeta3)
    }

    pub fn leptonic_kernel(&self, x: f64, t: f64) -> f64 {
        x * self.model.occupation(x, t)
    }

    /// Leptonic scattering/decay rate density at `(x, T)`.
    pub fn rate_leptonic(&self, x: f64, t: f64, lepton: Lepton) -> KineticsResult<f64> {
        require_positive("momentum x", x)?;
        require_positive("temperature T", t)?;
        Ok(self.leptonic_prefactor(lepton, t) * self.leptonic_kernel(x, t))
    }

    /// As [`rate_leptonic`](Self::rate_leptonic), selecting the lepton by name.
    ///
    /// Anything other than `electron`, `muon` or `tau` is an `UnknownChannel`.
    pub fn rate_leptonic_by_name(&self, x: f64, t: f64, lepton: &str) -> KineticsResult<f64> {
        let lepton: Lepton = lepton.parse()?;
        self.rate_leptonic(x, t, lepton)
    }

    /// Temperature-only prefactor of the selected channel.
    pub fn prefactor(&self, channel: RateChannel, t: f64) -> f64 {
        match channel {
            RateChannel::Primakoff => self.primakoff_prefactor(t),
            RateChannel::Leptonic(lepton) => self.leptonic_prefactor(lepton, t),
        }
    }

    /// Momentum kernel of the selected channel.
    pub fn kernel(&self, channel: RateChannel, x: f64, t: f64) -> f64 {
        match channel {
            RateChannel::Primakoff => self.primakoff_kernel(x, t),
            RateChannel::Leptonic(_) => self.leptonic_kernel(x, t),
        }
    }

    /// Magnitude of the UV-dominated Primakoff distortion at `t_initial`:
    /// `sqrt(g_aγ² M_Pl T / rank · offset)`.
    pub fn uv_distortion_magnitude(&self, t_initial: f64) -> KineticsResult<f64> {
        require_positive("initial temperature", t_initial)?;
        let g = self.constants.g_a_gamma;
        let evolution = g * g * self.constants.m_pl * t_initial / f64::from(self.model.rank());
        Ok((evolution * self.model.offset()).sqrt())
    }
}
