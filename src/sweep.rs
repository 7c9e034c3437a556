//! Boltzmann sweep over the temperature history.
//!
//! For each temperature on a descending log grid we integrate a collision
//! integral over `x ∈ [0.1, 20]`:
//!
//! ```text
//! Γ(T) = ρ(T) · ∫ kernel(x, T) dx
//! ```
//!
//! Temperatures are independent, so the grid is evaluated in parallel (rayon)
//! and collected back in grid order. A temperature whose integral fails is
//! recorded as [`RateSample::Failed`]; the rest of the sweep carries on.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::collision::CollisionIntegrals;
use crate::domain::{FlowResult, RateChannel, RateSample, TemperatureGrid};
use crate::error::{KineticsError, KineticsResult};
use crate::math::{QuadratureOptions, integrate};

/// Lower edge of the momentum integration window.
pub const X_INTEGRATION_MIN: f64 = 0.1;
/// Upper edge of the momentum integration window.
pub const X_INTEGRATION_MAX: f64 = 20.0;

/// Reason recorded for temperatures skipped after cancellation.
pub const CANCELLED_REASON: &str = "cancelled";

/// Momentum window and quadrature settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOptions {
    pub x_min: f64,
    pub x_max: f64,
    pub quadrature: QuadratureOptions,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            x_min: X_INTEGRATION_MIN,
            x_max: X_INTEGRATION_MAX,
            quadrature: QuadratureOptions::default(),
        }
    }
}

/// Coarse-grained cancellation flag shared with a running sweep.
///
/// Temperatures not yet started when the flag is raised are recorded as failed
/// with reason [`CANCELLED_REASON`]; finished ones are kept.
#[derive(Debug, Default)]
pub struct SweepControl {
    cancelled: AtomicBool,
}

impl SweepControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Primakoff sweep with default options.
pub fn sweep(
    integrals: &CollisionIntegrals<'_>,
    t_start: f64,
    t_end: f64,
    n_steps: usize,
) -> KineticsResult<FlowResult> {
    sweep_channel(
        integrals,
        RateChannel::Primakoff,
        t_start,
        t_end,
        n_steps,
        &SweepOptions::default(),
        None,
    )
}

/// Sweep any collision channel over `n_steps` temperatures from `t_start` down to `t_end`.
pub fn sweep_channel(
    integrals: &CollisionIntegrals<'_>,
    channel: RateChannel,
    t_start: f64,
    t_end: f64,
    n_steps: usize,
    opts: &SweepOptions,
    control: Option<&SweepControl>,
) -> KineticsResult<FlowResult> {
    let temperatures = TemperatureGrid::descending(t_start, t_end, n_steps)?;
    if !(opts.x_min.is_finite() && opts.x_max.is_finite() && opts.x_min > 0.0 && opts.x_max > opts.x_min) {
        return Err(KineticsError::InvalidInput(format!(
            "momentum window must satisfy 0 < x_min < x_max, got [{}, {}]",
            opts.x_min, opts.x_max
        )));
    }

    debug!(
        "sweeping {channel} over {} temperatures [{t_start:e} -> {t_end:e}] GeV, x in [{}, {}]",
        temperatures.len(),
        opts.x_min,
        opts.x_max
    );

    let samples = evaluate_grid(&temperatures, control, |t| {
        integrate_at(integrals, channel, t, opts).map(|(value, error_estimate)| RateSample::Converged {
            value,
            error_estimate,
        })
    });

    let flow = FlowResult {
        channel,
        temperatures,
        samples,
    };
    let failed = flow.failed_indices();
    if failed.is_empty() {
        info!("{channel} sweep converged at all {} temperatures", flow.len());
    } else {
        warn!(
            "{channel} sweep: {} of {} temperatures failed",
            failed.len(),
            flow.len()
        );
    }
    Ok(flow)
}

/// Momentum-integrated rate at a single temperature: `(value, error_estimate)`.
pub fn integrate_at(
    integrals: &CollisionIntegrals<'_>,
    channel: RateChannel,
    t: f64,
    opts: &SweepOptions,
) -> KineticsResult<(f64, f64)> {
    let failure = |reason: String| KineticsError::IntegrationFailure { temperature: t, reason };

    let prefactor = integrals.prefactor(channel, t);
    if !prefactor.is_finite() {
        return Err(failure(format!("non-finite prefactor {prefactor}")));
    }

    let estimate = integrate(
        |x| integrals.kernel(channel, x, t),
        opts.x_min,
        opts.x_max,
        &opts.quadrature,
    )
    .map_err(|e| failure(e.to_string()))?;

    let value = prefactor * estimate.value;
    let error_estimate = prefactor * estimate.error_estimate;
    if !value.is_finite() {
        return Err(failure(format!("non-finite integral {value}")));
    }
    Ok((value, error_estimate))
}

/// Evaluate every grid temperature independently, keeping grid order.
fn evaluate_grid<F>(temperatures: &TemperatureGrid, control: Option<&SweepControl>, eval: F) -> Vec<RateSample>
where
    F: Fn(f64) -> KineticsResult<RateSample> + Sync,
{
    temperatures
        .points()
        .par_iter()
        .enumerate()
        .map(|(idx, &t)| {
            if control.is_some_and(SweepControl::is_cancelled) {
                return RateSample::Failed {
                    reason: CANCELLED_REASON.to_string(),
                };
            }
            match eval(t) {
                Ok(sample) => sample,
                Err(err) => {
                    warn!("temperature #{idx} (T={t:e} GeV): {err}");
                    RateSample::Failed {
                        reason: err.to_string(),
                    }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PhysicalConstants;
    use crate::distribution::DistributionModel;
    use crate::domain::{DistortionConfig, Lepton};

    fn engine_parts() -> (PhysicalConstants, DistributionModel) {
        (
            PhysicalConstants::default(),
            DistributionModel::new(DistortionConfig::default()).unwrap(),
        )
    }

    #[test]
    fn sweep_returns_one_sample_per_temperature() {
        let (consts, model) = engine_parts();
        let ci = CollisionIntegrals::new(&consts, &model).unwrap();
        let flow = sweep(&ci, 10.0, 1.0, 5).unwrap();

        assert_eq!(flow.len(), 5);
        assert_eq!(flow.temperatures.len(), 5);
        assert!(flow.temperatures.points().windows(2).all(|w| w[1] < w[0]));
        assert!(flow.failed_indices().is_empty());
        for v in flow.values() {
            assert!(v.is_finite() && v > 0.0);
        }
    }

    #[test]
    fn sweep_rejects_inverted_range() {
        let (consts, model) = engine_parts();
        let ci = CollisionIntegrals::new(&consts, &model).unwrap();
        assert_eq!(
            sweep(&ci, 1.0, 10.0, 5).unwrap_err(),
            KineticsError::InvalidRange { start: 1.0, end: 10.0 }
        );
        assert!(matches!(sweep(&ci, 1.0, 1.0, 5), Err(KineticsError::InvalidRange { .. })));
        assert!(matches!(sweep(&ci, 1.0, -1.0, 5), Err(KineticsError::InvalidRange { .. })));
    }

    #[test]
    fn rate_scales_as_t4_below_distortion_scale() {
        // Well below T_ref the distortion is saturated, so only T^4 is left.
        let (consts, model) = engine_parts();
        let ci = CollisionIntegrals::new(&consts, &model).unwrap();
        let opts = SweepOptions::default();
        let (r1, _) = integrate_at(&ci, RateChannel::Primakoff, 1.0, &opts).unwrap();
        let (r10, _) = integrate_at(&ci, RateChannel::Primakoff, 10.0, &opts).unwrap();
        let ratio = r10 / r1;
        assert!((ratio / 1e4 - 1.0).abs() < 1e-3, "ratio = {ratio}");
    }

    #[test]
    fn thermal_rate_scales_exactly_as_t4() {
        let consts = PhysicalConstants::default();
        let model = DistributionModel::thermal();
        let ci = CollisionIntegrals::new(&consts, &model).unwrap();
        let opts = SweepOptions::default();
        let (r1, _) = integrate_at(&ci, RateChannel::Primakoff, 2.0, &opts).unwrap();
        let (r2, _) = integrate_at(&ci, RateChannel::Primakoff, 4.0, &opts).unwrap();
        assert!((r2 / r1 / 16.0 - 1.0).abs() < 1e-10);
    }

    #[test]
    fn leptonic_channel_sweeps() {
        let (consts, model) = engine_parts();
        let ci = CollisionIntegrals::new(&consts, &model).unwrap();
        let flow = sweep_channel(
            &ci,
            RateChannel::Leptonic(Lepton::Muon),
            100.0,
            0.1,
            4,
            &SweepOptions::default(),
            None,
        )
        .unwrap();
        assert_eq!(flow.channel, RateChannel::Leptonic(Lepton::Muon));
        assert!(flow.values().iter().all(|v| v.is_finite() && *v > 0.0));
    }

    #[test]
    fn single_failure_does_not_abort_grid() {
        let grid = TemperatureGrid::descending(100.0, 1.0, 3).unwrap();
        let samples = evaluate_grid(&grid, None, |t| {
            if t < 50.0 && t > 5.0 {
                Err(KineticsError::IntegrationFailure {
                    temperature: t,
                    reason: "forced".to_string(),
                })
            } else {
                Ok(RateSample::Converged {
                    value: t,
                    error_estimate: 0.0,
                })
            }
        });
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].value(), Some(100.0));
        assert!(samples[1].is_failed());
        assert_eq!(samples[2].value(), Some(1.0));
    }

    #[test]
    fn overflowing_prefactor_fails_only_its_temperatures() {
        let (consts, model) = engine_parts();
        let ci = CollisionIntegrals::new(&consts, &model).unwrap();
        // T⁴ overflows at 1e300 and 1e150; T = 1 is ordinary.
        let flow = sweep(&ci, 1e300, 1.0, 3).unwrap();

        assert_eq!(flow.len(), 3);
        assert_eq!(flow.failed_indices(), vec![0, 1]);
        match &flow.samples[0] {
            RateSample::Failed { reason } => assert!(reason.contains("non-finite prefactor")),
            other => panic!("expected failure, got {other:?}"),
        }
        let last = flow.samples[2].value().unwrap();
        assert!(last.is_finite() && last > 0.0);
        assert_eq!(flow.converged().count(), 1);
    }

    #[test]
    fn subdivision_limit_is_recorded_per_temperature() {
        let (consts, model) = engine_parts();
        let ci = CollisionIntegrals::new(&consts, &model).unwrap();
        let strict = SweepOptions {
            quadrature: QuadratureOptions {
                rel_tol: 1e-15,
                max_subdivisions: 1,
                ..QuadratureOptions::default()
            },
            ..SweepOptions::default()
        };

        let flow = sweep_channel(&ci, RateChannel::Primakoff, 10.0, 1.0, 3, &strict, None).unwrap();
        assert_eq!(flow.failed_indices(), vec![0, 1, 2]);
        for sample in &flow.samples {
            match sample {
                RateSample::Failed { reason } => {
                    assert!(reason.contains("Integration failed"));
                    assert!(reason.contains("subdivisions"));
                }
                other => panic!("expected failure, got {other:?}"),
            }
        }

        let err = integrate_at(&ci, RateChannel::Primakoff, 1.0, &strict).unwrap_err();
        assert!(matches!(err, KineticsError::IntegrationFailure { temperature, .. } if temperature == 1.0));
    }

    #[test]
    fn cancelled_sweep_keeps_shape() {
        let (consts, model) = engine_parts();
        let ci = CollisionIntegrals::new(&consts, &model).unwrap();
        let control = SweepControl::new();
        control.cancel();
        let flow = sweep_channel(
            &ci,
            RateChannel::Primakoff,
            10.0,
            1.0,
            6,
            &SweepOptions::default(),
            Some(&control),
        )
        .unwrap();
        assert_eq!(flow.len(), 6);
        assert_eq!(flow.failed_indices(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn bad_momentum_window_is_rejected() {
        let (consts, model) = engine_parts();
        let ci = CollisionIntegrals::new(&consts, &model).unwrap();
        let opts = SweepOptions {
            x_min: 0.0,
            ..SweepOptions::default()
        };
        let err = sweep_channel(&ci, RateChannel::Primakoff, 10.0, 1.0, 3, &opts, None).unwrap_err();
        assert!(matches!(err, KineticsError::InvalidInput(_)));
    }
}
