#![deny(missing_docs)]
#![doc = "Signal definitions: pure predicates deciding whether an interaction record belongs to an experiment's signal region."]

/// Inclusive charged- and neutral-current selections.
pub mod inclusive;
/// MINERvA signal definitions.
pub mod minerva;
/// MiniBooNE signal definitions.
pub mod miniboone;
/// Angle and threshold cuts shared by the experiment selections.
pub mod phase_space;
/// Beam energy range.
pub mod range;
/// T2K signal definitions.
pub mod t2k;
/// Particle-multiplicity topologies built on the inclusive selections.
pub mod topology;

pub use inclusive::{is_cc_inclusive, is_nc_inclusive};
pub use phase_space::{
    beam_cosine, has_proton_ke_above_threshold, is_restricted_angle, is_within_angle,
};
pub use range::{is_enu_in_range, passes_enu_cut, EnuRange};
pub use topology::{
    is_cc0pi, is_cc1pi, is_cc1pi_3prong, is_cc_coherent, is_cc_multi_pion, is_ccqe,
    is_ccqe_like, is_nc1pi, is_nc1pi_3prong,
};

use serde::{Deserialize, Serialize};

/// Muon phase space a measurement was unfolded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MuonPhaseSpace {
    /// No restriction on the muon direction.
    #[default]
    Full,
    /// Muon within the forward acceptance of the downstream spectrometer.
    Restricted,
}

/// How the pion candidate was identified. Michel-tagged samples carry no
/// pion direction, so the pion kinematic cuts are skipped for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PionTagging {
    /// Pion inferred from a decay electron.
    MichelElectron,
    /// Pion reconstructed as a track with direction.
    #[default]
    PionTrack,
}
