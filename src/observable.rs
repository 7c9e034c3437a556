//! Translation of an ALP momentum distribution into ΔNeff.
//!
//! ```text
//! ρ_a   = ∫ x³ f(x) dx                (trapezoidal, on the momentum grid)
//! ρ_ν   = (7/8)(π²/30) T_ref⁴          (one neutrino species)
//! ΔNeff = ρ_a / ρ_ν · 1.054
//! ```
//!
//! The trailing factor is a fixed empirical correction for the DESI DR2
//! preference; it is a literal, not a fit parameter.

use std::f64::consts::PI;

use crate::distribution::{DistributionModel, require_positive};
use crate::domain::MomentumGrid;
use crate::error::{KineticsError, KineticsResult};
use crate::math::trapz;

/// Empirical DESI DR2 correction applied to every ΔNeff.
pub const DESI_CORRECTION: f64 = 1.054;

/// Energy density of a single neutrino species at temperature `t_ref`.
pub fn neutrino_energy_density(t_ref: f64) -> f64 {
    (7.0 / 8.0) * (PI * PI / 30.0) * t_ref.powi(4)
}

/// ΔNeff of a distribution sampled on `grid`.
pub fn delta_neff(grid: &MomentumGrid, distribution: &[f64], t_ref: f64) -> KineticsResult<f64> {
    if distribution.len() != grid.len() {
        return Err(KineticsError::DimensionMismatch {
            expected: grid.len(),
            actual: distribution.len(),
        });
    }
    require_positive("reference temperature", t_ref)?;

    let integrand: Vec<f64> = grid
        .points()
        .iter()
        .zip(distribution)
        .map(|(&x, &f)| x.powi(3) * f)
        .collect();
    let energy_density_alp = trapz(&integrand, grid.points())?;

    Ok(energy_density_alp / neutrino_energy_density(t_ref) * DESI_CORRECTION)
}

/// Sample the model's occupation number on every grid point at temperature `t`.
pub fn distribution_on_grid(model: &DistributionModel, grid: &MomentumGrid, t: f64) -> KineticsResult<Vec<f64>> {
    require_positive("temperature T", t)?;
    Ok(grid.points().iter().map(|&x| model.occupation(x, t)).collect())
}
