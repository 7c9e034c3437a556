//! Physical constants and ALP coupling bounds.
//!
//! Natural units throughout: energies, masses and temperatures in GeV.

use serde::{Deserialize, Serialize};

use crate::domain::{Channel, Lepton};
use crate::error::{KineticsError, KineticsResult};

/// Planck mass (GeV).
pub const M_PL: f64 = 1.2209e19;

/// Fermi constant (GeV^-2).
pub const G_F: f64 = 1.16637e-5;

/// Fine-structure constant.
pub const ALPHA_EM: f64 = 1.0 / 137.036;

/// Reduced Planck constant (GeV s).
pub const HBAR: f64 = 6.5821e-25;

/// Electron coupling bound `f_a` (GeV).
pub const FA_ELECTRON: f64 = 1.63e6;

/// Muon coupling bound `f_a` (GeV).
pub const FA_MUON: f64 = 9.41e6;

/// Tau coupling bound `f_a` (GeV).
pub const FA_TAU: f64 = 8.06e4;

/// Photon coupling bound `g_aγ` (GeV^-1).
pub const G_A_GAMMA: f64 = 1.98e-8;

/// Electron mass (GeV).
pub const M_ELECTRON: f64 = 0.511e-3;

/// Muon mass (GeV).
pub const M_MUON: f64 = 0.105;

/// Tau mass (GeV).
pub const M_TAU: f64 = 1.777;

/// Constant table shared read-only by every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    pub m_pl: f64,
    pub g_f: f64,
    pub alpha_em: f64,
    pub hbar: f64,
    pub fa_electron: f64,
    pub fa_muon: f64,
    pub fa_tau: f64,
    pub g_a_gamma: f64,
    pub m_electron: f64,
    pub m_muon: f64,
    pub m_tau: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            m_pl: M_PL,
            g_f: G_F,
            alpha_em: ALPHA_EM,
            hbar: HBAR,
            fa_electron: FA_ELECTRON,
            fa_muon: FA_MUON,
            fa_tau: FA_TAU,
            g_a_gamma: G_A_GAMMA,
            m_electron: M_ELECTRON,
            m_muon: M_MUON,
            m_tau: M_TAU,
        }
    }
}

impl PhysicalConstants {
    /// Reject tables containing non-finite or non-positive entries.
    pub fn validate(&self) -> KineticsResult<()> {
        let entries = [
            ("m_pl", self.m_pl),
            ("g_f", self.g_f),
            ("alpha_em", self.alpha_em),
            ("hbar", self.hbar),
            ("fa_electron", self.fa_electron),
            ("fa_muon", self.fa_muon),
            ("fa_tau", self.fa_tau),
            ("g_a_gamma", self.g_a_gamma),
            ("m_electron", self.m_electron),
            ("m_muon", self.m_muon),
            ("m_tau", self.m_tau),
        ];
        for (name, value) in entries {
            if !(value.is_finite() && value > 0.0) {
                return Err(KineticsError::InvalidInput(format!(
                    "constant {name} must be finite and > 0, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Effective coupling for a channel: `1/f_a` for leptons, `g_aγ` for photons.
    pub fn coupling(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Electron => 1.0 / self.fa_electron,
            Channel::Muon => 1.0 / self.fa_muon,
            Channel::Tau => 1.0 / self.fa_tau,
            Channel::Photon => self.g_a_gamma,
        }
    }

    /// Raw coupling bound as quoted (GeV for `f_a`, GeV^-1 for `g_aγ`).
    pub fn coupling_bound(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Electron => self.fa_electron,
            Channel::Muon => self.fa_muon,
            Channel::Tau => self.fa_tau,
            Channel::Photon => self.g_a_gamma,
        }
    }

    pub fn lepton_mass(&self, lepton: Lepton) -> f64 {
        match lepton {
            Lepton::Electron => self.m_electron,
            Lepton::Muon => self.m_muon,
            Lepton::Tau => self.m_tau,
        }
    }

    /// Inverse coupling `1/f_a` for a charged lepton.
    pub fn inverse_fa(&self, lepton: Lepton) -> f64 {
        self.coupling(lepton.channel())
    }
}
