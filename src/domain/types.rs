//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - passed by reference into the (stateless) kinetic functions
//! - exported to JSON for downstream tooling
//! - built from CLI flags without touching the physics code

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{KineticsError, KineticsResult};
use crate::math::grid::{geomspace, log_space};

/// Lower edge of the standard momentum grid (`x = p/T`).
pub const X_MIN: f64 = 0.01;
/// Upper edge of the standard momentum grid.
pub const X_MAX: f64 = 100.0;
/// Number of points on the standard momentum grid.
pub const X_POINTS: usize = 1000;

/// Coupling channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Electron,
    Muon,
    Tau,
    Photon,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Electron, Channel::Muon, Channel::Tau, Channel::Photon];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Electron => "electron",
            Channel::Muon => "muon",
            Channel::Tau => "tau",
            Channel::Photon => "photon",
        }
    }

    /// The charged lepton behind this channel, if any.
    pub fn lepton(self) -> Option<Lepton> {
        match self {
            Channel::Electron => Some(Lepton::Electron),
            Channel::Muon => Some(Lepton::Muon),
            Channel::Tau => Some(Lepton::Tau),
            Channel::Photon => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = KineticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "electron" | "e" => Ok(Channel::Electron),
            "muon" | "mu" => Ok(Channel::Muon),
            "tau" => Ok(Channel::Tau),
            "photon" | "gamma" => Ok(Channel::Photon),
            _ => Err(KineticsError::UnknownChannel(s.to_string())),
        }
    }
}

/// Charged lepton entering the leptonic collision integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lepton {
    Electron,
    Muon,
    Tau,
}

impl Lepton {
    pub fn channel(self) -> Channel {
        match self {
            Lepton::Electron => Channel::Electron,
            Lepton::Muon => Channel::Muon,
            Lepton::Tau => Channel::Tau,
        }
    }
}

impl FromStr for Lepton {
    type Err = KineticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "photon" parses as a channel but is not a lepton.
        s.parse::<Channel>()
            .ok()
            .and_then(Channel::lepton)
            .ok_or_else(|| KineticsError::UnknownChannel(s.to_string()))
    }
}

/// Which collision integral a sweep integrates over momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateChannel {
    Primakoff,
    Leptonic(Lepton),
}

impl From<Channel> for RateChannel {
    fn from(channel: Channel) -> Self {
        match channel.lepton() {
            Some(lepton) => RateChannel::Leptonic(lepton),
            None => RateChannel::Primakoff,
        }
    }
}

impl fmt::Display for RateChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateChannel::Primakoff => f.write_str("primakoff"),
            RateChannel::Leptonic(l) => write!(f, "leptonic/{}", l.channel()),
        }
    }
}

/// Non-thermal distortion switch plus the rank it derives its offset from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistortionConfig {
    pub enabled: bool,
    pub rank: u32,
}

impl Default for DistortionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rank: 39,
        }
    }
}

/// Engine configuration bundle.
///
/// Built from CLI flags (plus environment/`.env` fallbacks); `Default` holds the
/// canonical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KineticConfig {
    pub distortion_enabled: bool,
    pub rank: u32,
    pub t_start: f64,
    pub t_end: f64,
    pub temperature_steps: usize,
}

impl Default for KineticConfig {
    fn default() -> Self {
        Self {
            distortion_enabled: true,
            rank: 39,
            t_start: 1e3,
            t_end: 1e-4,
            temperature_steps: 500,
        }
    }
}

impl KineticConfig {
    pub fn distortion(&self) -> DistortionConfig {
        DistortionConfig {
            enabled: self.distortion_enabled,
            rank: self.rank,
        }
    }

    /// Eager validation of everything the sweep will rely on.
    pub fn validate(&self) -> KineticsResult<()> {
        if self.rank == 0 {
            return Err(KineticsError::InvalidInput("rank must be >= 1".to_string()));
        }
        validate_range(self.t_start, self.t_end)?;
        if self.temperature_steps < 2 {
            return Err(KineticsError::InvalidInput(format!(
                "temperature_steps must be >= 2, got {}",
                self.temperature_steps
            )));
        }
        Ok(())
    }
}

/// Check `t_start > t_end > 0` (both finite).
pub fn validate_range(t_start: f64, t_end: f64) -> KineticsResult<()> {
    if !(t_start.is_finite() && t_end.is_finite() && t_end > 0.0 && t_start > t_end) {
        return Err(KineticsError::InvalidRange {
            start: t_start,
            end: t_end,
        });
    }
    Ok(())
}

/// Strictly increasing, log-spaced dimensionless momenta `x = p/T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumGrid {
    points: Vec<f64>,
}

impl MomentumGrid {
    pub fn new(x_min: f64, x_max: f64, n: usize) -> KineticsResult<Self> {
        let points = log_space(x_min, x_max, n)?;
        Ok(Self { points })
    }

    /// `[0.01, 100]` with 1000 points.
    pub fn standard() -> Self {
        Self {
            points: geomspace(X_MIN, X_MAX, X_POINTS),
        }
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Strictly decreasing, log-spaced temperatures (GeV).
///
/// Deserialization goes through [`TemperatureGrid::from_points`], so a loaded
/// grid holds the same invariant as a generated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTemperatureGrid")]
pub struct TemperatureGrid {
    points: Vec<f64>,
}

#[derive(Deserialize)]
struct RawTemperatureGrid {
    points: Vec<f64>,
}

impl TryFrom<RawTemperatureGrid> for TemperatureGrid {
    type Error = KineticsError;

    fn try_from(raw: RawTemperatureGrid) -> Result<Self, Self::Error> {
        Self::from_points(raw.points)
    }
}

impl TemperatureGrid {
    /// `n_steps` points from `t_start` down to `t_end`, endpoints included.
    pub fn descending(t_start: f64, t_end: f64, n_steps: usize) -> KineticsResult<Self> {
        validate_range(t_start, t_end)?;
        let mut points = log_space(t_end, t_start, n_steps)?;
        points.reverse();
        Ok(Self { points })
    }

    /// Wrap existing points; they must be finite, positive and strictly decreasing.
    pub fn from_points(points: Vec<f64>) -> KineticsResult<Self> {
        if points.len() < 2 {
            return Err(KineticsError::InvalidInput(format!(
                "temperature grid needs at least 2 points, got {}",
                points.len()
            )));
        }
        if let Some(&t) = points.iter().find(|t| !(t.is_finite() && **t > 0.0)) {
            return Err(KineticsError::InvalidInput(format!(
                "temperature grid values must be finite and > 0, got {t}"
            )));
        }
        if let Some(idx) = points.windows(2).position(|w| w[1] >= w[0]) {
            return Err(KineticsError::InvalidInput(format!(
                "temperature grid must strictly decrease, got {} then {} at index {idx}",
                points[idx],
                points[idx + 1]
            )));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Momentum-integrated production rate at one temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RateSample {
    Converged { value: f64, error_estimate: f64 },
    Failed { reason: String },
}

impl RateSample {
    pub fn value(&self) -> Option<f64> {
        match self {
            RateSample::Converged { value, .. } => Some(*value),
            RateSample::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RateSample::Failed { .. })
    }
}

/// Output of a Boltzmann sweep: one sample per temperature, in grid order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowResult {
    pub channel: RateChannel,
    pub temperatures: TemperatureGrid,
    pub samples: Vec<RateSample>,
}

impl FlowResult {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Grid indices whose integration did not converge.
    pub fn failed_indices(&self) -> Vec<usize> {
        self.samples
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_failed().then_some(i))
            .collect()
    }

    /// Converged rates paired with their temperatures.
    pub fn converged(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.temperatures
            .points()
            .iter()
            .zip(self.samples.iter())
            .filter_map(|(&t, s)| s.value().map(|v| (t, v)))
    }

    /// Plain rate values; failed entries become `NaN`.
    pub fn values(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| s.value().unwrap_or(f64::NAN))
            .collect()
    }
}
