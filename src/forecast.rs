//! ΔNeff sensitivity forecast.
//!
//! Posterior sampling for a single parameter `p = ΔNeff` with:
//!
//! - prior: uniform on `[prior_min, prior_max]`
//! - likelihood: Gaussian `exp(-½ ((p - center)/width)²)` (the forecast survey's
//!   expected measurement)
//!
//! Two samplers are available: plain accept/reject against the prior, and a
//! random-walk Metropolis chain. Both are seeded, so a forecast is reproducible.
//! The 95% interval is read off the 2.5/97.5 percentiles of the accepted draws.

use clap::ValueEnum;
use log::{debug, info};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which posterior sampler to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMethod {
    Rejection,
    Metropolis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub survey: String,
    pub center: f64,
    pub width: f64,
    pub prior_min: f64,
    pub prior_max: f64,
    pub samples: usize,
    pub seed: u64,
    pub method: ForecastMethod,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            survey: "LiteBIRD+CMB-HD".to_string(),
            center: 0.03,
            width: 0.01,
            prior_min: 0.0,
            prior_max: 0.5,
            samples: 10_000,
            seed: 42,
            method: ForecastMethod::Rejection,
        }
    }
}

/// Central 95% credible interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibleInterval {
    pub survey: String,
    pub method: ForecastMethod,
    pub lower: f64,
    pub upper: f64,
    pub accepted: usize,
    pub proposed: usize,
}

pub fn run_forecast(config: &ForecastConfig) -> Result<CredibleInterval, AppError> {
    validate(config)?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let (mut chain, proposed) = match config.method {
        ForecastMethod::Rejection => rejection_chain(config, &mut rng),
        ForecastMethod::Metropolis => metropolis_chain(config, &mut rng)?,
    };
    if chain.is_empty() {
        return Err(AppError::new(
            4,
            format!("Forecast accepted no samples out of {proposed} proposals."),
        ));
    }
    debug!("{:?} sampler accepted {}/{proposed}", config.method, chain.len());

    chain.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let lower = percentile_sorted(&chain, 2.5);
    let upper = percentile_sorted(&chain, 97.5);
    info!(
        "forecast 95% CL for {}: dNeff < {upper:.4} ({} accepted)",
        config.survey,
        chain.len()
    );

    Ok(CredibleInterval {
        survey: config.survey.clone(),
        method: config.method,
        lower,
        upper,
        accepted: chain.len(),
        proposed,
    })
}

fn validate(config: &ForecastConfig) -> Result<(), AppError> {
    if !(config.width.is_finite() && config.width > 0.0) {
        return Err(AppError::new(2, format!("Forecast width must be > 0, got {}.", config.width)));
    }
    if !(config.center.is_finite() && config.prior_min.is_finite() && config.prior_max.is_finite()) {
        return Err(AppError::new(2, "Forecast center and prior bounds must be finite."));
    }
    if config.prior_max <= config.prior_min {
        return Err(AppError::new(
            2,
            format!(
                "Invalid forecast prior: [{}, {}] (need max > min).",
                config.prior_min, config.prior_max
            ),
        ));
    }
    if config.samples == 0 {
        return Err(AppError::new(2, "Forecast sample count must be > 0."));
    }
    Ok(())
}

fn likelihood(p: f64, config: &ForecastConfig) -> f64 {
    let z = (p - config.center) / config.width;
    (-0.5 * z * z).exp()
}

/// Accept a uniform prior draw with probability `L(p) / L_max`.
fn rejection_chain(config: &ForecastConfig, rng: &mut StdRng) -> (Vec<f64>, usize) {
    // L peaks at the center, or at the nearest prior edge if the center lies outside.
    let peak = config.center.clamp(config.prior_min, config.prior_max);
    let l_max = likelihood(peak, config);

    let mut chain = Vec::new();
    for _ in 0..config.samples {
        let p = rng.gen_range(config.prior_min..config.prior_max);
        let u: f64 = rng.r#gen();
        if u * l_max < likelihood(p, config) {
            chain.push(p);
        }
    }
    (chain, config.samples)
}

/// Random-walk Metropolis with a Normal(0, width) proposal; the first tenth is burn-in.
fn metropolis_chain(config: &ForecastConfig, rng: &mut StdRng) -> Result<(Vec<f64>, usize), AppError> {
    let step = Normal::new(0.0, config.width)
        .map_err(|e| AppError::new(4, format!("Proposal distribution error: {e}")))?;

    let burn_in = config.samples / 10;
    let total = config.samples + burn_in;
    let mut current = config.center.clamp(config.prior_min, config.prior_max);
    let mut current_l = likelihood(current, config);
    let mut chain = Vec::with_capacity(config.samples);

    for i in 0..total {
        let proposal = current + step.sample(rng);
        if proposal >= config.prior_min && proposal <= config.prior_max {
            let proposal_l = likelihood(proposal, config);
            let u: f64 = rng.r#gen();
            if u * current_l < proposal_l {
                current = proposal;
                current_l = proposal_l;
            }
        }
        if i >= burn_in {
            chain.push(current);
        }
    }
    Ok((chain, total))
}

/// Linear-interpolated percentile of an ascending slice; `q` in `[0, 100]`.
fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = (sorted.len() - 1) as f64 * (q / 100.0).clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_forecast_brackets_center() {
        let ci = run_forecast(&ForecastConfig::default()).unwrap();
        // Acceptance is about σ·sqrt(2π)/0.5 ≈ 5%.
        assert!(ci.accepted > 200 && ci.accepted < 1000, "accepted {}", ci.accepted);
        assert!(ci.lower < 0.03 && ci.upper > 0.03);
        assert!((ci.upper - 0.0496).abs() < 0.01, "upper {}", ci.upper);
        assert!(ci.lower >= 0.0);
    }

    #[test]
    fn forecast_is_reproducible_for_a_seed() {
        let config = ForecastConfig::default();
        assert_eq!(run_forecast(&config).unwrap(), run_forecast(&config).unwrap());
    }

    #[test]
    fn metropolis_forecast_agrees_with_rejection() {
        let config = ForecastConfig {
            method: ForecastMethod::Metropolis,
            samples: 40_000,
            ..ForecastConfig::default()
        };
        let ci = run_forecast(&config).unwrap();
        assert_eq!(ci.accepted, 40_000);
        assert!((ci.upper - 0.0496).abs() < 0.005, "upper {}", ci.upper);
        assert!((ci.lower - 0.0104).abs() < 0.005, "lower {}", ci.lower);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let base = ForecastConfig::default();
        for bad in [
            ForecastConfig { width: 0.0, ..base.clone() },
            ForecastConfig { prior_max: -1.0, ..base.clone() },
            ForecastConfig { samples: 0, ..base.clone() },
            ForecastConfig { center: f64::NAN, ..base.clone() },
        ] {
            assert_eq!(run_forecast(&bad).unwrap_err().exit_code(), 2);
        }
    }

    #[test]
    fn percentile_interpolates() {
        let v = [0.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile_sorted(&v, 50.0), 2.0);
        assert!((percentile_sorted(&v, 2.5) - 0.1).abs() < 1e-12);
        assert_eq!(percentile_sorted(&[7.0], 97.5), 7.0);
    }
}
