use nuis_core::{InteractionRecord, Pdg, PhysicsConstants};
use nuis_sig::{minerva, miniboone, t2k, EnuRange, MuonPhaseSpace, PionTagging};
use serde::{Deserialize, Serialize};

/// Signal definition of a sample, one variant per classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SignalSelector {
    /// Charged-current inclusive.
    CcInclusive {
        /// Beam species.
        beam: Pdg,
    },
    /// Neutral-current inclusive.
    NcInclusive {
        /// Beam species.
        beam: Pdg,
    },
    /// Charged-current without mesons.
    Cc0pi {
        /// Beam species.
        beam: Pdg,
    },
    /// True CCQE by generator mode.
    Ccqe {
        /// Beam species.
        beam: Pdg,
    },
    /// CCQE or 2p2h by generator mode.
    CcqeLike {
        /// Beam species.
        beam: Pdg,
    },
    /// Charged-current single pion.
    Cc1pi {
        /// Beam species.
        beam: Pdg,
        /// The only allowed meson.
        pion: Pdg,
    },
    /// Charged-current single pion with a required hadron.
    Cc1pi3Prong {
        /// Beam species.
        beam: Pdg,
        /// The only allowed meson.
        pion: Pdg,
        /// Required third particle.
        third: Pdg,
    },
    /// Neutral-current single pion.
    Nc1pi {
        /// Beam species.
        beam: Pdg,
        /// The only allowed meson.
        pion: Pdg,
    },
    /// Neutral-current single pion with a required hadron.
    Nc1pi3Prong {
        /// Beam species.
        beam: Pdg,
        /// The only allowed meson.
        pion: Pdg,
        /// Required third particle.
        third: Pdg,
    },
    /// Coherent single pion.
    CcCoherent {
        /// Beam species.
        beam: Pdg,
        /// Produced pion.
        pion: Pdg,
    },
    /// Charged-current with an exact set of pions.
    CcMultiPion {
        /// Beam species.
        beam: Pdg,
        /// Required pions, with multiplicity.
        pions: Vec<Pdg>,
    },
    /// MiniBooNE CC1pi+.
    #[serde(rename = "miniboone-cc1pip")]
    MiniBooneCc1pip,
    /// MiniBooNE CC1pi0.
    #[serde(rename = "miniboone-cc1pi0")]
    MiniBooneCc1pi0,
    /// MiniBooNE NC1pi0, neutrino mode.
    #[serde(rename = "miniboone-nc1pi0")]
    MiniBooneNc1pi0,
    /// MiniBooNE NC1pi0, antineutrino mode.
    #[serde(rename = "miniboone-nc1pi0-bar")]
    MiniBooneNc1pi0Bar,
    /// MINERvA CC1pi+/-.
    #[serde(rename = "minerva-cc1pip")]
    MinervaCc1pip {
        /// Muon acceptance.
        #[serde(default)]
        phase_space: MuonPhaseSpace,
    },
    /// MINERvA CCNpi+/-.
    #[serde(rename = "minerva-ccnpip")]
    MinervaCcnpip {
        /// Muon acceptance.
        #[serde(default)]
        phase_space: MuonPhaseSpace,
    },
    /// MINERvA antineutrino CC1pi0.
    #[serde(rename = "minerva-cc1pi0-bar")]
    MinervaCc1pi0Bar,
    /// MINERvA CCQE-like numu.
    #[serde(rename = "minerva-ccqe-numu")]
    MinervaCcqeNumu {
        /// Muon acceptance.
        #[serde(default)]
        phase_space: MuonPhaseSpace,
    },
    /// MINERvA CCQE-like numubar.
    #[serde(rename = "minerva-ccqe-numubar")]
    MinervaCcqeNumubar {
        /// Muon acceptance.
        #[serde(default)]
        phase_space: MuonPhaseSpace,
    },
    /// MINERvA inclusive low recoil.
    #[serde(rename = "minerva-cc-inc-low-recoil")]
    MinervaCcIncLowRecoil,
    /// MINERvA CC0pi with a proton.
    #[serde(rename = "minerva-cc0pi-1p")]
    MinervaCc0pi1p,
    /// T2K CC1pi+ on water.
    #[serde(rename = "t2k-cc1pip-h2o")]
    T2kCc1pipH2o,
    /// T2K CC1pi+ on hydrocarbon.
    #[serde(rename = "t2k-cc1pip-ch")]
    T2kCc1pipCh {
        /// Pion identification strategy.
        #[serde(default)]
        tagging: PionTagging,
    },
    /// T2K CC0pi.
    #[serde(rename = "t2k-cc0pi")]
    T2kCc0pi {
        /// Reject backward muons.
        #[serde(default)]
        forward_going: bool,
    },
    /// T2K CC0pi in single transverse variable phase space.
    #[serde(rename = "t2k-cc0pi-stv")]
    T2kCc0piStv,
}

impl SignalSelector {
    /// Whether `record` belongs to the signal region.
    pub fn select(
        &self,
        record: &InteractionRecord,
        range: EnuRange,
        consts: &PhysicsConstants,
    ) -> bool {
        use SignalSelector::*;
        match self {
            CcInclusive { beam } => nuis_sig::is_cc_inclusive(record, *beam, range),
            NcInclusive { beam } => nuis_sig::is_nc_inclusive(record, *beam, range),
            Cc0pi { beam } => nuis_sig::is_cc0pi(record, *beam, range),
            Ccqe { beam } => nuis_sig::is_ccqe(record, *beam, range),
            CcqeLike { beam } => nuis_sig::is_ccqe_like(record, *beam, range),
            Cc1pi { beam, pion } => nuis_sig::is_cc1pi(record, *beam, *pion, range),
            Cc1pi3Prong { beam, pion, third } => {
                nuis_sig::is_cc1pi_3prong(record, *beam, *pion, *third, range)
            }
            Nc1pi { beam, pion } => nuis_sig::is_nc1pi(record, *beam, *pion, range),
            Nc1pi3Prong { beam, pion, third } => {
                nuis_sig::is_nc1pi_3prong(record, *beam, *pion, *third, range)
            }
            CcCoherent { beam, pion } => nuis_sig::is_cc_coherent(record, *beam, *pion, range),
            CcMultiPion { beam, pions } => {
                nuis_sig::is_cc_multi_pion(record, *beam, pions, range)
            }
            MiniBooneCc1pip => miniboone::is_cc1pip(record, range),
            MiniBooneCc1pi0 => miniboone::is_cc1pi0(record, range),
            MiniBooneNc1pi0 => miniboone::is_nc1pi0(record, range),
            MiniBooneNc1pi0Bar => miniboone::is_nc1pi0_bar(record, range),
            MinervaCc1pip { phase_space } => minerva::is_cc1pip(record, range, *phase_space),
            MinervaCcnpip { phase_space } => {
                minerva::is_ccnpip(record, range, *phase_space).is_some()
            }
            MinervaCc1pi0Bar => minerva::is_cc1pi0_bar(record, range),
            MinervaCcqeNumu { phase_space } => {
                minerva::is_ccqe_numu(consts, record, range, *phase_space)
            }
            MinervaCcqeNumubar { phase_space } => {
                minerva::is_ccqe_numubar(consts, record, range, *phase_space)
            }
            MinervaCcIncLowRecoil => minerva::is_cc_inc_low_recoil(record, range),
            MinervaCc0pi1p => minerva::is_cc0pi_1p(record, range),
            T2kCc1pipH2o => t2k::is_cc1pip_h2o(record, range),
            T2kCc1pipCh { tagging } => t2k::is_cc1pip_ch(record, range, *tagging),
            T2kCc0pi { forward_going } => t2k::is_cc0pi(record, range, *forward_going),
            T2kCc0piStv => t2k::is_cc0pi_stv(record, range),
        }
    }
}
