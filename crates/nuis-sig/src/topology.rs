use nuis_core::{InteractionRecord, Pdg};

use crate::inclusive::{is_cc_inclusive, is_nc_inclusive};
use crate::range::EnuRange;

/// Charged-current with no final-state mesons and exactly one charged
/// lepton.
pub fn is_cc0pi(record: &InteractionRecord, beam: Pdg, range: EnuRange) -> bool {
    if !is_cc_inclusive(record, beam, range) {
        return false;
    }
    record.num_fs_mesons() == 0 && record.num_fs_leptons() == 1
}

/// True charged-current quasi-elastic, decided by the generator mode.
pub fn is_ccqe(record: &InteractionRecord, beam: Pdg, range: EnuRange) -> bool {
    is_cc_inclusive(record, beam, range) && record.mode.is_ccqe()
}

/// Quasi-elastic-like: charged-current in a CCQE or 2p2h generator mode.
pub fn is_ccqe_like(record: &InteractionRecord, beam: Pdg, range: EnuRange) -> bool {
    is_cc_inclusive(record, beam, range) && record.mode.is_ccqe_like()
}

/// Charged-current single pion: exactly one meson, which is the requested
/// `pion`, and exactly one charged lepton.
pub fn is_cc1pi(record: &InteractionRecord, beam: Pdg, pion: Pdg, range: EnuRange) -> bool {
    if !is_cc_inclusive(record, beam, range) {
        return false;
    }
    single_pion(record, pion) && record.num_fs_leptons() == 1
}

/// [`is_cc1pi`] with a required third final-state hadron.
pub fn is_cc1pi_3prong(
    record: &InteractionRecord,
    beam: Pdg,
    pion: Pdg,
    third: Pdg,
    range: EnuRange,
) -> bool {
    is_cc1pi(record, beam, pion, range) && record.has_fs_particle(third)
}

/// Neutral-current single pion: exactly one meson, which is the requested
/// `pion`, and no charged lepton.
pub fn is_nc1pi(record: &InteractionRecord, beam: Pdg, pion: Pdg, range: EnuRange) -> bool {
    if !is_nc_inclusive(record, beam, range) {
        return false;
    }
    single_pion(record, pion) && record.num_fs_leptons() == 0
}

/// [`is_nc1pi`] with a required third final-state hadron.
pub fn is_nc1pi_3prong(
    record: &InteractionRecord,
    beam: Pdg,
    pion: Pdg,
    third: Pdg,
    range: EnuRange,
) -> bool {
    is_nc1pi(record, beam, pion, range) && record.has_fs_particle(third)
}

/// Charged-current coherent pion production: the final state is exactly
/// the charged lepton and one pion, with the nucleus left intact.
pub fn is_cc_coherent(record: &InteractionRecord, beam: Pdg, pion: Pdg, range: EnuRange) -> bool {
    if !is_cc_inclusive(record, beam, range) {
        return false;
    }
    record.num_fs_particle(beam.charged_lepton_partner()) == 1
        && record.num_fs_particle(pion) == 1
        && record.num_fs() == 2
}

/// Charged-current multi-pion: the mesons in the final state are exactly the
/// listed pions, with multiplicity. `[PI_PLUS, PI_ZERO]` selects one of each.
pub fn is_cc_multi_pion(
    record: &InteractionRecord,
    beam: Pdg,
    pions: &[Pdg],
    range: EnuRange,
) -> bool {
    if pions.is_empty() || !is_cc_inclusive(record, beam, range) {
        return false;
    }
    if record.num_fs_leptons() != 1 || record.num_fs_mesons() != pions.len() {
        return false;
    }
    pions.iter().all(|pion| {
        let wanted = pions.iter().filter(|other| *other == pion).count();
        record.num_fs_particle(*pion) == wanted
    })
}

// A record with two mesons of which one is the requested pion fails, as
// does one where the only meson is a different species.
fn single_pion(record: &InteractionRecord, pion: Pdg) -> bool {
    record.num_fs_particle(pion) == 1 && record.num_fs_mesons() == 1
}
