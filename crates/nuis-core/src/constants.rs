//! Physical constants used by the reconstruction formulas.
//!
//! The table is loaded once at start-up and passed by reference into every
//! reconstruction that needs it; nothing reads constants from global state.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, NuisError};

fn default_mass_proton() -> f64 {
    0.93827203
}

fn default_mass_neutron() -> f64 {
    0.93956536
}

fn default_mass_delta() -> f64 {
    1.232
}

fn default_mass_muon() -> f64 {
    0.105658367
}

fn default_mass_pion_charged() -> f64 {
    0.13957018
}

fn default_mass_pion_neutral() -> f64 {
    0.1349766
}

fn default_binding_pion() -> f64 {
    25.0
}

fn default_binding_minerva_numu() -> f64 {
    34.0
}

fn default_binding_minerva_numubar() -> f64 {
    30.0
}

/// Masses in GeV and binding energies in MeV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConstants {
    /// Proton mass.
    #[serde(default = "default_mass_proton")]
    pub mass_proton: f64,
    /// Neutron mass.
    #[serde(default = "default_mass_neutron")]
    pub mass_neutron: f64,
    /// Delta(1232) resonance mass.
    #[serde(default = "default_mass_delta")]
    pub mass_delta: f64,
    /// Muon mass.
    #[serde(default = "default_mass_muon")]
    pub mass_muon: f64,
    /// Charged pion mass.
    #[serde(default = "default_mass_pion_charged")]
    pub mass_pion_charged: f64,
    /// Neutral pion mass.
    #[serde(default = "default_mass_pion_neutral")]
    pub mass_pion_neutral: f64,
    /// Nucleon binding energy assumed by single-pion reconstructions.
    #[serde(default = "default_binding_pion")]
    pub binding_pion_mev: f64,
    /// Binding energy of the MINERvA neutrino CCQE reconstruction.
    #[serde(default = "default_binding_minerva_numu")]
    pub binding_minerva_numu_mev: f64,
    /// Binding energy of the MINERvA antineutrino CCQE reconstruction.
    #[serde(default = "default_binding_minerva_numubar")]
    pub binding_minerva_numubar_mev: f64,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            mass_proton: default_mass_proton(),
            mass_neutron: default_mass_neutron(),
            mass_delta: default_mass_delta(),
            mass_muon: default_mass_muon(),
            mass_pion_charged: default_mass_pion_charged(),
            mass_pion_neutral: default_mass_pion_neutral(),
            binding_pion_mev: default_binding_pion(),
            binding_minerva_numu_mev: default_binding_minerva_numu(),
            binding_minerva_numubar_mev: default_binding_minerva_numubar(),
        }
    }
}

impl PhysicsConstants {
    /// Rejects non-positive masses and negative binding energies.
    pub fn validate(&self) -> Result<(), NuisError> {
        let masses = [
            ("mass_proton", self.mass_proton),
            ("mass_neutron", self.mass_neutron),
            ("mass_delta", self.mass_delta),
            ("mass_muon", self.mass_muon),
            ("mass_pion_charged", self.mass_pion_charged),
            ("mass_pion_neutral", self.mass_pion_neutral),
        ];
        for (name, value) in masses {
            if !value.is_finite() || value <= 0.0 {
                return Err(NuisError::Config(
                    ErrorInfo::new("invalid-mass", "masses must be positive and finite")
                        .with_context("constant", name)
                        .with_context("value", value.to_string()),
                ));
            }
        }
        let bindings = [
            ("binding_pion_mev", self.binding_pion_mev),
            ("binding_minerva_numu_mev", self.binding_minerva_numu_mev),
            ("binding_minerva_numubar_mev", self.binding_minerva_numubar_mev),
        ];
        for (name, value) in bindings {
            if !value.is_finite() || value < 0.0 {
                return Err(NuisError::Config(
                    ErrorInfo::new("invalid-binding", "binding energies must be non-negative")
                        .with_context("constant", name)
                        .with_context("value", value.to_string()),
                ));
            }
        }
        Ok(())
    }
}
