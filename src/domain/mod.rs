//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - channel enums (`Channel`, `Lepton`, `RateChannel`)
//! - engine configuration (`KineticConfig`, `DistortionConfig`)
//! - grids (`MomentumGrid`, `TemperatureGrid`)
//! - sweep outputs (`RateSample`, `FlowResult`)

pub mod types;

pub use types::*;
