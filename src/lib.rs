//! `alp-kinetics` library crate.
//!
//! The binary (`alp`) is a thin wrapper around this library so that:
//!
//! - the numerics are testable without spawning processes
//! - the engine (distribution, collision integrals, sweep) is reusable on its own
//! - reporting and exports stay out of the physics modules

pub mod app;
pub mod cli;
pub mod collision;
pub mod constants;
pub mod distribution;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod io;
pub mod math;
pub mod observable;
pub mod report;
pub mod sweep;
