//! Shared pipeline logic used by every CLI subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! constants + distribution -> collision integrals -> sweep -> ΔNeff -> forecast
//!
//! The subcommands can then focus on presentation (what to print / export).

use log::info;

use crate::collision::CollisionIntegrals;
use crate::constants::PhysicalConstants;
use crate::distribution::DistributionModel;
use crate::domain::{Channel, FlowResult, KineticConfig, MomentumGrid, RateChannel};
use crate::error::AppError;
use crate::forecast::{CredibleInterval, ForecastConfig, run_forecast};
use crate::observable::{delta_neff, distribution_on_grid};
use crate::sweep::{SweepOptions, sweep_channel};

/// Default reference temperature for the neutrino energy density (GeV).
pub const DEFAULT_T_REF: f64 = 1.0;

/// Everything a full run needs, as understood by the pipeline.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub kinetic: KineticConfig,
    pub channel: Channel,
    pub t_ref: f64,
    /// `None` skips the forecast stage.
    pub forecast: Option<ForecastConfig>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            kinetic: KineticConfig::default(),
            channel: Channel::Photon,
            t_ref: DEFAULT_T_REF,
            forecast: Some(ForecastConfig::default()),
        }
    }
}

/// ΔNeff of the model distribution evaluated at the end of the sweep.
#[derive(Debug, Clone)]
pub struct NeffOutput {
    /// Temperature at which the occupation numbers were sampled.
    pub distribution_t: f64,
    pub t_ref: f64,
    pub value: f64,
}

/// All computed outputs of a single `alp run`.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub settings: RunSettings,
    pub constants: PhysicalConstants,
    pub flow: FlowResult,
    pub neff: NeffOutput,
    pub uv_distortion: f64,
    pub forecast: Option<CredibleInterval>,
}

/// Build the distribution model for a config (validates the whole config first).
pub fn build_model(config: &KineticConfig) -> Result<DistributionModel, AppError> {
    config.validate()?;
    Ok(DistributionModel::new(config.distortion())?)
}

/// Run the temperature sweep for one channel.
pub fn run_flow(
    config: &KineticConfig,
    constants: &PhysicalConstants,
    channel: Channel,
) -> Result<FlowResult, AppError> {
    let model = build_model(config)?;
    let integrals = CollisionIntegrals::new(constants, &model)?;
    let flow = sweep_channel(
        &integrals,
        RateChannel::from(channel),
        config.t_start,
        config.t_end,
        config.temperature_steps,
        &SweepOptions::default(),
        None,
    )?;
    Ok(flow)
}

/// ΔNeff of the configured model, sampled at temperature `t` on the standard grid.
pub fn run_neff(config: &KineticConfig, t: f64, t_ref: f64) -> Result<NeffOutput, AppError> {
    let model = build_model(config)?;
    let grid = MomentumGrid::standard();
    let distribution = distribution_on_grid(&model, &grid, t)?;
    let value = delta_neff(&grid, &distribution, t_ref)?;
    Ok(NeffOutput {
        distribution_t: t,
        t_ref,
        value,
    })
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_all(settings: &RunSettings) -> Result<RunOutput, AppError> {
    let constants = PhysicalConstants::default();
    let config = &settings.kinetic;

    info!(
        "starting {} flow: T {:e} -> {:e} GeV, {} steps, distortion={} (rank {})",
        settings.channel,
        config.t_start,
        config.t_end,
        config.temperature_steps,
        config.distortion_enabled,
        config.rank
    );

    // 1) Sweep.
    let flow = run_flow(config, &constants, settings.channel)?;

    // 2) ΔNeff from the distribution at the end of the temperature history.
    let neff = run_neff(config, config.t_end, settings.t_ref)?;

    // 3) UV-dominated Primakoff distortion estimate at the start temperature.
    let model = build_model(config)?;
    let integrals = CollisionIntegrals::new(&constants, &model)?;
    let uv_distortion = integrals.uv_distortion_magnitude(config.t_start)?;

    // 4) Forecast (optional).
    let forecast = match &settings.forecast {
        Some(fc) => Some(run_forecast(fc)?),
        None => None,
    };

    Ok(RunOutput {
        settings: settings.clone(),
        constants,
        flow,
        neff,
        uv_distortion,
        forecast,
    })
}
