use nuis_core::{InteractionRecord, Pdg};

use crate::range::{passes_enu_cut, EnuRange};

/// Charged-current inclusive: the beam matches `beam`, the beam energy
/// passes the range cut and the conjugate charged lepton is in the final
/// state.
pub fn is_cc_inclusive(record: &InteractionRecord, beam: Pdg, range: EnuRange) -> bool {
    if !record.has_is_particle(beam) {
        return false;
    }
    if !passes_enu_cut(record, range) {
        return false;
    }
    record.has_fs_particle(beam.charged_lepton_partner())
}

/// Neutral-current inclusive: the beam neutrino appears both incoming and
/// outgoing, and the beam energy passes the range cut.
pub fn is_nc_inclusive(record: &InteractionRecord, beam: Pdg, range: EnuRange) -> bool {
    if !record.has_is_particle(beam) || !record.has_fs_particle(beam) {
        return false;
    }
    passes_enu_cut(record, range)
}
