//! T2K ND280 selections.

use nuis_core::{FourVector, InteractionRecord, Pdg};

use crate::phase_space::{beam_cosine, is_restricted_angle};
use crate::range::{passes_enu_cut, EnuRange};
use crate::topology;
use crate::PionTagging;

/// Momentum threshold of the CC1pi+ samples, in MeV.
pub const CC1PIP_MIN_MOMENTUM_MEV: f64 = 200.0;
/// Cosine threshold of the CC1pi+ sample on water.
pub const CC1PIP_H2O_MIN_COSINE: f64 = 0.3;
/// Cosine threshold of the CC1pi+ sample on hydrocarbon.
pub const CC1PIP_CH_MIN_COSINE: f64 = 0.2;
/// Opening angle bounding forward-going muons, in degrees.
pub const FORWARD_MUON_MAX_DEG: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeptonCount {
    AnyFlavour,
    MuMinusOnly,
}

struct Cc1pipCandidate {
    muon: FourVector,
    pion: FourVector,
}

fn is_foreign_meson(pdg: Pdg) -> bool {
    let code = pdg.abs();
    (111..=210).contains(&code) || (212..=557).contains(&code) || pdg == Pdg::PI_MINUS
}

// Exactly one counted lepton and one pi+, no other meson.
fn cc1pip_candidate(
    record: &InteractionRecord,
    range: EnuRange,
    leptons: LeptonCount,
) -> Option<Cc1pipCandidate> {
    if !record.has_is_particle(Pdg::NU_MU) || !passes_enu_cut(record, range) {
        return None;
    }
    if !record.primary_slots().contains(&Some(Pdg::MUON)) {
        return None;
    }

    let mut n_lep = 0usize;
    let mut n_pip = 0usize;
    let mut muon = None;
    let mut pion = None;
    for part in record.fs_particles() {
        let pdg = part.pdg;
        if is_foreign_meson(pdg) {
            return None;
        }
        let counted = match leptons {
            LeptonCount::AnyFlavour => matches!(pdg.abs(), 11 | 13 | 15 | 17),
            LeptonCount::MuMinusOnly => pdg == Pdg::MUON,
        };
        if counted {
            n_lep += 1;
            muon = Some(part.p);
        } else if pdg == Pdg::PI_PLUS {
            n_pip += 1;
            pion = Some(part.p);
        }
    }
    if n_lep != 1 || n_pip != 1 {
        return None;
    }
    Some(Cc1pipCandidate {
        muon: muon?,
        pion: pion?,
    })
}

fn passes_track_cuts(record: &InteractionRecord, p: &FourVector, min_cosine: f64) -> bool {
    p.p() > CC1PIP_MIN_MOMENTUM_MEV && beam_cosine(record, p) > min_cosine
}

/// CC1pi+ on water: any single charged lepton and one pi+, both above
/// 200 MeV and with cosine above 0.3.
pub fn is_cc1pip_h2o(record: &InteractionRecord, range: EnuRange) -> bool {
    match cc1pip_candidate(record, range, LeptonCount::AnyFlavour) {
        Some(cand) => {
            passes_track_cuts(record, &cand.muon, CC1PIP_H2O_MIN_COSINE)
                && passes_track_cuts(record, &cand.pion, CC1PIP_H2O_MIN_COSINE)
        }
        None => false,
    }
}

/// CC1pi+ on hydrocarbon. Michel-tagged samples cut on the muon only.
pub fn is_cc1pip_ch(record: &InteractionRecord, range: EnuRange, tagging: PionTagging) -> bool {
    let Some(cand) = cc1pip_candidate(record, range, LeptonCount::MuMinusOnly) else {
        return false;
    };
    if !passes_track_cuts(record, &cand.muon, CC1PIP_CH_MIN_COSINE) {
        return false;
    }
    match tagging {
        PionTagging::MichelElectron => true,
        PionTagging::PionTrack => passes_track_cuts(record, &cand.pion, CC1PIP_CH_MIN_COSINE),
    }
}

/// CC0pi; with `forward_going` set, the muon must lie strictly inside the
/// forward hemisphere.
pub fn is_cc0pi(record: &InteractionRecord, range: EnuRange, forward_going: bool) -> bool {
    if !topology::is_cc0pi(record, Pdg::NU_MU, range) {
        return false;
    }
    !forward_going || is_restricted_angle(record, Pdg::NU_MU, Pdg::MUON, FORWARD_MUON_MAX_DEG)
}

/// CC0pi with a leading proton, in the phase space of the single
/// transverse variable analysis.
pub fn is_cc0pi_stv(record: &InteractionRecord, range: EnuRange) -> bool {
    if !topology::is_cc0pi(record, Pdg::NU_MU, range) {
        return false;
    }
    let (Some(muon), Some(proton)) = (
        record.hm_fs_particle(Pdg::MUON),
        record.hm_fs_particle(Pdg::PROTON),
    ) else {
        return false;
    };

    if muon.p.p() < 250.0 || beam_cosine(record, &muon.p) < -0.6 {
        return false;
    }
    let p_proton = proton.p.p();
    (250.0..=1000.0).contains(&p_proton) && beam_cosine(record, &proton.p) >= 0.4
}
