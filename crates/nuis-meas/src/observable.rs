use nuis_core::{FourVector, InteractionRecord, Pdg, PhysicsConstants, MEV_PER_GEV};
use nuis_kin::{
    enu_qe_rec, erecoil_charged, erecoil_minerva_low_recoil, erecoil_true, is_unphysical,
    kinetic_energy, momentum, mppi, q2_cc1pip_rec, q2_qe_rec, wrec, EnuFlavour,
};
use serde::{Deserialize, Serialize};

/// Open invariant-mass window in MeV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassWindow {
    /// Exclusive lower bound.
    pub low: f64,
    /// Exclusive upper bound.
    pub high: f64,
}

impl MassWindow {
    /// Whether `mass` lies strictly inside the window.
    pub fn contains(&self, mass: f64) -> bool {
        mass > self.low && mass < self.high
    }
}

/// Window on the invariant mass of the leading nucleon and pion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairMassWindow {
    /// Nucleon species.
    pub nucleon: Pdg,
    /// Pion species.
    pub pion: Pdg,
    /// Accepted mass range in MeV.
    #[serde(flatten)]
    pub window: MassWindow,
}

impl PairMassWindow {
    fn accepts(&self, record: &InteractionRecord) -> bool {
        match (
            record.hm_fs_particle(self.nucleon),
            record.hm_fs_particle(self.pion),
        ) {
            (Some(nucleon), Some(pion)) => self.window.contains(mppi(&nucleon.p, &pion.p)),
            _ => false,
        }
    }
}

/// Hadronic recoil definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoilKind {
    /// Every final-state hadron.
    True,
    /// Charged hadrons only.
    Charged,
    /// Calorimetric definition of the low-recoil sample.
    MinervaLowRecoil,
}

fn default_pion_info() -> bool {
    true
}

/// Quantity histogrammed by a sample. Evaluates to `None` when the record
/// lacks the particles it needs, fails a window, or reconstructs to the
/// unphysical sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ObservableSpec {
    /// Kinetic energy of the leading pion in MeV.
    PionKineticEnergy {
        /// Pion species.
        pion: Pdg,
        /// Lepton that must accompany it.
        lepton: Pdg,
        /// Optional window on the reconstructed hadronic mass.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        w_window: Option<MassWindow>,
    },
    /// Cosine between the beam and the leading pion.
    PionBeamCosine {
        /// Pion species.
        pion: Pdg,
        /// Lepton that must accompany it.
        lepton: Pdg,
    },
    /// Single-pion Q2 in GeV^2.
    Q2Cc1piRec {
        /// Outgoing charged lepton.
        lepton: Pdg,
        /// Outgoing pion.
        pion: Pdg,
        /// Neutrino-energy hypothesis.
        #[serde(default)]
        flavour: EnuFlavour,
        /// Whether the pion direction is available.
        #[serde(default = "default_pion_info")]
        pion_info: bool,
        /// Optional resonance-region gate.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mass_window: Option<PairMassWindow>,
    },
    /// Momentum of the leading particle in GeV.
    ParticleMomentum {
        /// Particle species.
        particle: Pdg,
    },
    /// True beam energy in GeV.
    BeamEnergy {
        /// Optional resonance-region gate.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mass_window: Option<PairMassWindow>,
    },
    /// Quasi-elastic Q2 in GeV^2.
    QeQ2 {
        /// Outgoing charged lepton; its sign selects the target nucleon.
        lepton: Pdg,
        /// Binding energy in MeV.
        binding_mev: f64,
    },
    /// Quasi-elastic neutrino energy in GeV.
    QeEnu {
        /// Outgoing charged lepton; its sign selects the target nucleon.
        lepton: Pdg,
        /// Binding energy in MeV.
        binding_mev: f64,
    },
    /// Invariant mass of the leading nucleon and pion in MeV.
    PairMass {
        /// Nucleon species.
        nucleon: Pdg,
        /// Pion species.
        pion: Pdg,
    },
    /// Reconstructed hadronic mass in MeV.
    HadronicMass {
        /// Outgoing charged lepton.
        lepton: Pdg,
    },
    /// Hadronic recoil energy in GeV.
    Recoil {
        /// Recoil definition.
        kind: RecoilKind,
    },
}

fn leading(record: &InteractionRecord, pdg: Pdg) -> Option<FourVector> {
    record.hm_fs_particle(pdg).map(|part| part.p)
}

fn physical(value: f64) -> Option<f64> {
    if is_unphysical(value) || !value.is_finite() {
        None
    } else {
        Some(value)
    }
}

impl ObservableSpec {
    /// Evaluates the observable on one record.
    pub fn evaluate(&self, record: &InteractionRecord, consts: &PhysicsConstants) -> Option<f64> {
        let pnu = record.beam().p;
        match self {
            ObservableSpec::PionKineticEnergy {
                pion,
                lepton,
                w_window,
            } => {
                let ppi = leading(record, *pion)?;
                let plep = leading(record, *lepton)?;
                if let Some(window) = w_window {
                    if !window.contains(wrec(consts, &pnu, &plep)) {
                        return None;
                    }
                }
                physical(kinetic_energy(&ppi) * MEV_PER_GEV)
            }
            ObservableSpec::PionBeamCosine { pion, lepton } => {
                let ppi = leading(record, *pion)?;
                leading(record, *lepton)?;
                physical(pnu.angle(&ppi).cos())
            }
            ObservableSpec::Q2Cc1piRec {
                lepton,
                pion,
                flavour,
                pion_info,
                mass_window,
            } => {
                let plep = leading(record, *lepton)?;
                let ppi = leading(record, *pion)?;
                if let Some(window) = mass_window {
                    if !window.accepts(record) {
                        return None;
                    }
                }
                physical(q2_cc1pip_rec(consts, &pnu, &plep, &ppi, *flavour, *pion_info))
            }
            ObservableSpec::ParticleMomentum { particle } => {
                physical(momentum(&leading(record, *particle)?))
            }
            ObservableSpec::BeamEnergy { mass_window } => {
                if let Some(window) = mass_window {
                    if !window.accepts(record) {
                        return None;
                    }
                }
                physical(pnu.e / MEV_PER_GEV)
            }
            ObservableSpec::QeQ2 {
                lepton,
                binding_mev,
            } => {
                let plep = leading(record, *lepton)?;
                let costh = pnu.angle(&plep).cos();
                let neutrino = lepton.as_raw() > 0;
                physical(q2_qe_rec(consts, &plep, costh, *binding_mev, neutrino))
            }
            ObservableSpec::QeEnu {
                lepton,
                binding_mev,
            } => {
                let plep = leading(record, *lepton)?;
                let costh = pnu.angle(&plep).cos();
                let neutrino = lepton.as_raw() > 0;
                physical(enu_qe_rec(consts, &plep, costh, *binding_mev, neutrino))
            }
            ObservableSpec::PairMass { nucleon, pion } => {
                let pn = leading(record, *nucleon)?;
                let ppi = leading(record, *pion)?;
                physical(mppi(&pn, &ppi))
            }
            ObservableSpec::HadronicMass { lepton } => {
                let plep = leading(record, *lepton)?;
                physical(wrec(consts, &pnu, &plep))
            }
            ObservableSpec::Recoil { kind } => physical(match kind {
                RecoilKind::True => erecoil_true(record),
                RecoilKind::Charged => erecoil_charged(record),
                RecoilKind::MinervaLowRecoil => erecoil_minerva_low_recoil(record),
            }),
        }
    }
}
