//! Command-line parsing for the ALP kinetic engine.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the physics/numerics code.
//!
//! Every engine knob can also be set through the environment (or a `.env` file),
//! e.g. `ALP_RANK=39` or `ALP_T_START=1000`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Channel;
use crate::forecast::ForecastMethod;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "alp", version, about = "ALP cosmological production: Boltzmann flow, dNeff and forecasts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full pipeline: sweep, dNeff, forecast, optional exports (default).
    Run(RunArgs),
    /// Sweep only; print the per-temperature production rates.
    Flow(FlowArgs),
    /// dNeff of the model distribution at a given temperature.
    Neff(NeffArgs),
    /// Credible-interval forecast only.
    Forecast(ForecastArgs),
    /// Print the coupling bounds per channel.
    Couplings,
    /// Print a previously exported flow JSON.
    Show(ShowArgs),
}

/// Engine configuration shared by the kinetic subcommands.
#[derive(Debug, Args, Clone)]
pub struct KineticArgs {
    /// Use the plain Fermi-Dirac distribution instead of the distorted one.
    #[arg(long, env = "ALP_NO_DISTORTION")]
    pub no_distortion: bool,

    /// Rank used to derive the distortion offset ln(rank)/sqrt(2π).
    #[arg(long, env = "ALP_RANK", default_value_t = 39)]
    pub rank: u32,

    /// Start (highest) temperature of the sweep, GeV.
    #[arg(long, env = "ALP_T_START", default_value_t = 1e3)]
    pub t_start: f64,

    /// End (lowest) temperature of the sweep, GeV.
    #[arg(long, env = "ALP_T_END", default_value_t = 1e-4)]
    pub t_end: f64,

    /// Number of log-spaced temperature steps.
    #[arg(long, env = "ALP_STEPS", default_value_t = 500)]
    pub steps: usize,
}

#[derive(Debug, Args, Clone)]
pub struct FlowArgs {
    #[command(flatten)]
    pub kinetic: KineticArgs,

    /// Collision channel to integrate (photon = Primakoff).
    #[arg(long, value_enum, default_value_t = Channel::Photon)]
    pub channel: Channel,

    /// Maximum table rows to print (0 prints every temperature).
    #[arg(long, default_value_t = 25)]
    pub rows: usize,

    /// Export the flow to JSON.
    #[arg(long = "export-flow", value_name = "JSON")]
    pub export_flow: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct NeffArgs {
    #[command(flatten)]
    pub kinetic: KineticArgs,

    /// Temperature at which the distribution is sampled, GeV.
    #[arg(long, default_value_t = 1e-4)]
    pub temperature: f64,

    /// Reference temperature of the neutrino energy density, GeV.
    #[arg(long, env = "ALP_T_REF", default_value_t = 1.0)]
    pub t_ref: f64,
}

#[derive(Debug, Args, Clone)]
pub struct ForecastArgs {
    /// Survey label used in the report.
    #[arg(long, default_value = "LiteBIRD+CMB-HD")]
    pub survey: String,

    /// Likelihood center (expected dNeff).
    #[arg(long, default_value_t = 0.03)]
    pub center: f64,

    /// Likelihood width (1σ).
    #[arg(long, default_value_t = 0.01)]
    pub width: f64,

    /// Uniform prior lower bound.
    #[arg(long, default_value_t = 0.0)]
    pub prior_min: f64,

    /// Uniform prior upper bound.
    #[arg(long, default_value_t = 0.5)]
    pub prior_max: f64,

    /// Number of prior draws (rejection) or chain length (metropolis).
    #[arg(long, default_value_t = 10_000)]
    pub samples: usize,

    /// RNG seed.
    #[arg(long, env = "ALP_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Posterior sampler.
    #[arg(long, value_enum, default_value_t = ForecastMethod::Rejection)]
    pub method: ForecastMethod,
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub flow: FlowArgs,

    #[command(flatten)]
    pub forecast: ForecastArgs,

    /// Reference temperature of the neutrino energy density, GeV.
    #[arg(long, env = "ALP_T_REF", default_value_t = 1.0)]
    pub t_ref: f64,

    /// Skip the forecast stage.
    #[arg(long)]
    pub no_forecast: bool,

    /// Write a plain-text research log.
    #[arg(long = "export-log", value_name = "TXT")]
    pub export_log: Option<PathBuf>,
}

/// Options for printing a saved flow.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Flow JSON file produced by `alp flow --export-flow`.
    #[arg(long, value_name = "JSON")]
    pub flow: PathBuf,

    /// Maximum table rows to print (0 prints every temperature).
    #[arg(long, default_value_t = 25)]
    pub rows: usize,
}
