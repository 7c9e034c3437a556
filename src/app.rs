//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - runs the sweep / ΔNeff / forecast pipeline
//! - prints reports
//! - writes optional exports

use clap::Parser;
use log::debug;

use crate::cli::{Command, FlowArgs, ForecastArgs, KineticArgs, NeffArgs, RunArgs, ShowArgs};
use crate::constants::PhysicalConstants;
use crate::domain::KineticConfig;
use crate::error::AppError;
use crate::forecast::ForecastConfig;

pub mod pipeline;

/// Entry point for the `alp` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is fine; flags and defaults still apply.
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // `alp` with no subcommand (or only flags) behaves like `alp run ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    debug!("parsed command: {:?}", cli.command);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Flow(args) => handle_flow(args),
        Command::Neff(args) => handle_neff(args),
        Command::Forecast(args) => handle_forecast(args),
        Command::Couplings => {
            println!("{}", crate::report::format_couplings(&PhysicalConstants::default()));
            Ok(())
        }
        Command::Show(args) => handle_show(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let settings = pipeline::RunSettings {
        kinetic: kinetic_config_from_args(&args.flow.kinetic),
        channel: args.flow.channel,
        t_ref: args.t_ref,
        forecast: (!args.no_forecast).then(|| forecast_config_from_args(&args.forecast)),
    };
    let run = pipeline::run_all(&settings)?;

    let summary = crate::report::format_run_summary(&run);
    println!("{summary}");
    println!("{}", crate::report::format_flow_table(&run.flow, args.flow.rows));

    // Optional exports.
    if let Some(path) = &args.flow.export_flow {
        crate::io::write_flow_json(path, &run.flow, &settings.kinetic)?;
        eprintln!("Flow exported: {}", path.display());
    }
    if let Some(path) = &args.export_log {
        crate::io::write_research_log(path, &run, &summary)?;
        eprintln!("Research log exported: {}", path.display());
    }

    Ok(())
}

fn handle_flow(args: FlowArgs) -> Result<(), AppError> {
    let config = kinetic_config_from_args(&args.kinetic);
    let flow = pipeline::run_flow(&config, &PhysicalConstants::default(), args.channel)?;

    println!("{}", crate::report::format_flow_table(&flow, args.rows));
    let failed = flow.failed_indices();
    if !failed.is_empty() {
        eprintln!("{} temperatures failed to converge: {failed:?}", failed.len());
    }

    if let Some(path) = &args.export_flow {
        crate::io::write_flow_json(path, &flow, &config)?;
        eprintln!("Flow exported: {}", path.display());
    }
    Ok(())
}

fn handle_neff(args: NeffArgs) -> Result<(), AppError> {
    let config = kinetic_config_from_args(&args.kinetic);
    let neff = pipeline::run_neff(&config, args.temperature, args.t_ref)?;
    print!("{}", crate::report::format_neff(&neff));
    Ok(())
}

fn handle_forecast(args: ForecastArgs) -> Result<(), AppError> {
    let ci = crate::forecast::run_forecast(&forecast_config_from_args(&args))?;
    print!("{}", crate::report::format_forecast(&ci));
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let doc = crate::io::read_flow_json(&args.flow)?;
    println!(
        "{} flow ({} steps, T {:e} -> {:e} GeV)",
        doc.flow.channel, doc.config.temperature_steps, doc.config.t_start, doc.config.t_end
    );
    println!("{}", crate::report::format_flow_table(&doc.flow, args.rows));
    Ok(())
}

pub fn kinetic_config_from_args(args: &KineticArgs) -> KineticConfig {
    KineticConfig {
        distortion_enabled: !args.no_distortion,
        rank: args.rank,
        t_start: args.t_start,
        t_end: args.t_end,
        temperature_steps: args.steps,
    }
}

pub fn forecast_config_from_args(args: &ForecastArgs) -> ForecastConfig {
    ForecastConfig {
        survey: args.survey.clone(),
        center: args.center,
        width: args.width,
        prior_min: args.prior_min,
        prior_max: args.prior_max,
        samples: args.samples,
        seed: args.seed,
        method: args.method,
    }
}

/// Rewrite argv so `alp` defaults to `alp run`.
///
/// Rules:
/// - `alp`                       -> `alp run`
/// - `alp --rank 12 ...`         -> `alp run --rank 12 ...`
/// - `alp --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "run" | "flow" | "neff" | "forecast" | "couplings" | "show"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    argv
}
