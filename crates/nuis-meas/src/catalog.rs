//! Built-in sample definitions. Reference values are not bundled; each
//! definition is paired with a [`crate::data::DataSource`] at run time.

use nuis_core::{ErrorInfo, NuisError, Pdg};
use nuis_kin::EnuFlavour;
use nuis_sig::{EnuRange, MuonPhaseSpace};

use crate::observable::{MassWindow, ObservableSpec, PairMassWindow};
use crate::sample::{MonitorSpec, SampleDefinition, SampleKind};
use crate::selector::SignalSelector;

/// MINERvA data are scaled up to account for the flux update after
/// publication.
pub const MINERVA_FLUX_CORRECTION: f64 = 1.11;
/// Nucleons per CH2 unit in the MiniBooNE cross-section convention.
pub const MINIBOONE_TARGET_SCALE: f64 = 14.08;

/// Names of the built-in samples in catalog order.
pub fn sample_names() -> Vec<&'static str> {
    vec![
        "MINERvA_CC1pip_XSec_1DTpi_nu",
        "MiniBooNE_CC1pip_XSec_1DTpi_nu",
        "MiniBooNE_CC1pi0_XSec_1Dcospi0_nu",
        "BEBC_CC1npim_XSec_1DQ2_antinu",
        "ANL_CC2pi_1pip1pi0_Evt_1Dppi0_nu",
        "ANL_NC1ppim_XSec_1DEnu_nu",
    ]
}

/// Every built-in sample.
pub fn builtin_catalog() -> Vec<SampleDefinition> {
    vec![
        minerva_cc1pip_tpi(),
        miniboone_cc1pip_tpi(),
        miniboone_cc1pi0_cospi0(),
        bebc_cc1npim_q2(),
        anl_cc2pi_ppi0(),
        anl_nc1ppim_enu(),
    ]
}

/// Looks up a built-in sample by exact name.
pub fn find_sample(name: &str) -> Result<SampleDefinition, NuisError> {
    builtin_catalog()
        .into_iter()
        .find(|sample| sample.name == name)
        .ok_or_else(|| {
            NuisError::Sample(
                ErrorInfo::new("unknown-sample", "no built-in sample with this name")
                    .with_context("sample", name)
                    .with_hint(format!("known samples: {}", sample_names().join(", "))),
            )
        })
}

fn minerva_cc1pip_tpi() -> SampleDefinition {
    SampleDefinition {
        name: "MINERvA_CC1pip_XSec_1DTpi_nu".to_string(),
        title: "; T_{#pi} (MeV); d#sigma/dT_{#pi} (cm^{2}/MeV/nucleon)".to_string(),
        enu_range: EnuRange::new(1.5, 10.0),
        kind: SampleKind::DifferentialXSec,
        target_scale: 1.0,
        data_scale: MINERVA_FLUX_CORRECTION,
        norm_error: 0.0,
        diagonal_only: false,
        selector: SignalSelector::MinervaCc1pip {
            phase_space: MuonPhaseSpace::Full,
        },
        observable: ObservableSpec::PionKineticEnergy {
            pion: Pdg::PI_PLUS,
            lepton: Pdg::MUON,
            w_window: Some(MassWindow {
                low: 100.0,
                high: 1400.0,
            }),
        },
        monitor: None,
    }
}

fn miniboone_cc1pip_tpi() -> SampleDefinition {
    SampleDefinition {
        name: "MiniBooNE_CC1pip_XSec_1DTpi_nu".to_string(),
        title: "; T_{#pi} (MeV); d#sigma/dT_{#pi^{+}} (cm^{2}/MeV/CH_{2})".to_string(),
        enu_range: EnuRange::new(0.5, 2.0),
        kind: SampleKind::DifferentialXSec,
        target_scale: MINIBOONE_TARGET_SCALE,
        data_scale: 1.0,
        norm_error: 0.107,
        diagonal_only: true,
        selector: SignalSelector::Cc1pi {
            beam: Pdg::NU_MU,
            pion: Pdg::PI_PLUS,
        },
        observable: ObservableSpec::PionKineticEnergy {
            pion: Pdg::PI_PLUS,
            lepton: Pdg::MUON,
            w_window: None,
        },
        monitor: None,
    }
}

fn miniboone_cc1pi0_cospi0() -> SampleDefinition {
    SampleDefinition {
        name: "MiniBooNE_CC1pi0_XSec_1Dcospi0_nu".to_string(),
        title: "; cos#theta_{#pi^{0}}; d#sigma/dcos#theta_{#pi^{0}} (cm^{2}/CH_{2})".to_string(),
        enu_range: EnuRange::new(0.5, 2.0),
        kind: SampleKind::DifferentialXSec,
        target_scale: MINIBOONE_TARGET_SCALE,
        data_scale: 1.0,
        norm_error: 0.107,
        diagonal_only: false,
        selector: SignalSelector::Cc1pi {
            beam: Pdg::NU_MU,
            pion: Pdg::PI_ZERO,
        },
        observable: ObservableSpec::PionBeamCosine {
            pion: Pdg::PI_ZERO,
            lepton: Pdg::MUON,
        },
        monitor: None,
    }
}

fn bebc_cc1npim_q2() -> SampleDefinition {
    SampleDefinition {
        name: "BEBC_CC1npim_XSec_1DQ2_antinu".to_string(),
        title: "; Q^{2} (GeV^{2}); d#sigma/dQ^{2} (cm^{2}/GeV^{2}/neutron)".to_string(),
        enu_range: EnuRange::new(5.0, 200.0),
        kind: SampleKind::DifferentialXSec,
        target_scale: 16.0 / 8.0,
        data_scale: 1.0,
        norm_error: 0.20,
        diagonal_only: true,
        selector: SignalSelector::Cc1pi3Prong {
            beam: Pdg::NU_MU_BAR,
            pion: Pdg::PI_MINUS,
            third: Pdg::NEUTRON,
        },
        observable: ObservableSpec::Q2Cc1piRec {
            lepton: Pdg::ANTI_MUON,
            pion: Pdg::PI_MINUS,
            flavour: EnuFlavour::Default,
            pion_info: true,
            mass_window: Some(PairMassWindow {
                nucleon: Pdg::NEUTRON,
                pion: Pdg::PI_MINUS,
                window: MassWindow {
                    low: 1100.0,
                    high: 1400.0,
                },
            }),
        },
        monitor: Some(MonitorSpec {
            name: "Wrec".to_string(),
            observable: ObservableSpec::PairMass {
                nucleon: Pdg::NEUTRON,
                pion: Pdg::PI_MINUS,
            },
            bins: 100,
            low: 1000.0,
            high: 2000.0,
        }),
    }
}

fn anl_cc2pi_ppi0() -> SampleDefinition {
    SampleDefinition {
        name: "ANL_CC2pi_1pip1pi0_Evt_1Dppi0_nu".to_string(),
        title: "; p_{#pi^{0}} (GeV/c); Number of events".to_string(),
        enu_range: EnuRange::new(0.0, 1.5),
        kind: SampleKind::EventRate,
        target_scale: 1.0,
        data_scale: 1.0,
        norm_error: 0.0,
        diagonal_only: true,
        selector: SignalSelector::CcMultiPion {
            beam: Pdg::NU_MU,
            pions: vec![Pdg::PI_PLUS, Pdg::PI_ZERO],
        },
        observable: ObservableSpec::ParticleMomentum {
            particle: Pdg::PI_ZERO,
        },
        monitor: None,
    }
}

fn anl_nc1ppim_enu() -> SampleDefinition {
    SampleDefinition {
        name: "ANL_NC1ppim_XSec_1DEnu_nu".to_string(),
        title: "; E_{#nu} (GeV); #sigma (cm^{2}/nucleon)".to_string(),
        enu_range: EnuRange::new(0.3, 1.5),
        kind: SampleKind::EnuXSec,
        target_scale: 1.0,
        data_scale: 1.0,
        norm_error: 0.20,
        diagonal_only: true,
        selector: SignalSelector::Nc1pi3Prong {
            beam: Pdg::NU_MU,
            pion: Pdg::PI_MINUS,
            third: Pdg::PROTON,
        },
        observable: ObservableSpec::BeamEnergy {
            mass_window: Some(PairMassWindow {
                nucleon: Pdg::PROTON,
                pion: Pdg::PI_MINUS,
                window: MassWindow {
                    low: 0.0,
                    high: 1400.0,
                },
            }),
        },
        monitor: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_definitions() {
        let names: Vec<String> = builtin_catalog().into_iter().map(|s| s.name).collect();
        assert_eq!(names, sample_names());
    }

    #[test]
    fn every_definition_validates() {
        for sample in builtin_catalog() {
            sample.validate().unwrap();
        }
    }

    #[test]
    fn unknown_names_carry_a_hint() {
        let err = find_sample("T2K_nothing").unwrap_err();
        assert_eq!(err.info().code, "unknown-sample");
        assert!(err.info().hint.as_deref().unwrap_or("").contains("BEBC"));
    }
}
