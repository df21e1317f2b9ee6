//! MINERvA selections.

use nuis_core::{InteractionRecord, Pdg, PhysicsConstants};
use nuis_kin::{enu_qe_rec, is_unphysical};

use crate::inclusive::is_cc_inclusive;
use crate::phase_space::{has_proton_ke_above_threshold, is_restricted_angle};
use crate::range::{passes_enu_cut, EnuRange};
use crate::topology::{is_cc0pi, is_ccqe_like};
use crate::MuonPhaseSpace;

/// Muon acceptance of the downstream spectrometer, in degrees.
pub const MUON_ACCEPTANCE_DEG: f64 = 20.0;
/// Minimum muon energy of the low-recoil sample, in MeV.
pub const LOW_RECOIL_MIN_MUON_ENERGY_MEV: f64 = 1500.0;
/// Proton kinetic-energy threshold of the CC0pi 1p sample, in MeV.
pub const CC0PI_1P_PROTON_THRESHOLD_MEV: f64 = 110.0;

struct PionScan {
    muons: usize,
    charged_pions: usize,
}

// The charged-pion samples require a muon in one of the generator's primary
// slots and then count mu- and pi+/- across the final state.
fn scan_charged_pions(record: &InteractionRecord, range: EnuRange) -> Option<PionScan> {
    if !record.has_is_particle(Pdg::NU_MU) || !passes_enu_cut(record, range) {
        return None;
    }
    if !record.primary_slots().contains(&Some(Pdg::MUON)) {
        return None;
    }

    let mut scan = PionScan {
        muons: 0,
        charged_pions: 0,
    };
    for part in record.fs_particles() {
        if part.pdg == Pdg::MUON {
            scan.muons += 1;
        } else if part.pdg.abs() == Pdg::PI_PLUS.abs() {
            scan.charged_pions += 1;
        }
    }
    Some(scan)
}

fn muon_accepted(
    record: &InteractionRecord,
    beam: Pdg,
    lepton: Pdg,
    phase_space: MuonPhaseSpace,
) -> bool {
    match phase_space {
        MuonPhaseSpace::Full => true,
        MuonPhaseSpace::Restricted => {
            is_restricted_angle(record, beam, lepton, MUON_ACCEPTANCE_DEG)
        }
    }
}

/// CC1pi+/- on CH: one mu- and exactly one charged pion of either sign.
/// Neutral pions and heavier mesons are not vetoed.
pub fn is_cc1pip(record: &InteractionRecord, range: EnuRange, phase_space: MuonPhaseSpace) -> bool {
    match scan_charged_pions(record, range) {
        Some(scan) if scan.muons == 1 && scan.charged_pions == 1 => {
            muon_accepted(record, Pdg::NU_MU, Pdg::MUON, phase_space)
        }
        _ => false,
    }
}

/// CCNpi+/-: one mu- and at least one charged pion. Returns the charged
/// pion multiplicity on acceptance.
pub fn is_ccnpip(
    record: &InteractionRecord,
    range: EnuRange,
    phase_space: MuonPhaseSpace,
) -> Option<usize> {
    let scan = scan_charged_pions(record, range)?;
    if scan.muons != 1 || scan.charged_pions == 0 {
        return None;
    }
    if !muon_accepted(record, Pdg::NU_MU, Pdg::MUON, phase_space) {
        return None;
    }
    Some(scan.charged_pions)
}

/// Antineutrino CC1pi0: one mu+, one pi0, no heavier meson.
pub fn is_cc1pi0_bar(record: &InteractionRecord, range: EnuRange) -> bool {
    if !is_cc_inclusive(record, Pdg::NU_MU_BAR, range) {
        return false;
    }

    let mut leptons = 0usize;
    let mut pi0 = 0usize;
    for part in record.fs_particles() {
        let pdg = part.pdg;
        if (113..=557).contains(&pdg.abs()) {
            return false;
        }
        if pdg == Pdg::ANTI_MUON {
            leptons += 1;
        } else if pdg == Pdg::PI_ZERO {
            pi0 += 1;
        }
    }
    leptons == 1 && pi0 == 1
}

fn ccqe_selection(
    consts: &PhysicsConstants,
    record: &InteractionRecord,
    range: EnuRange,
    phase_space: MuonPhaseSpace,
    neutrino: bool,
) -> bool {
    let (beam, lepton, binding) = if neutrino {
        (Pdg::NU_MU, Pdg::MUON, consts.binding_minerva_numu_mev)
    } else {
        (Pdg::NU_MU_BAR, Pdg::ANTI_MUON, consts.binding_minerva_numubar_mev)
    };
    if !is_ccqe_like(record, beam, range) {
        return false;
    }
    let Some(muon) = record.hm_fs_particle(lepton) else {
        return false;
    };
    if !muon_accepted(record, beam, lepton, phase_space) {
        return false;
    }

    let costh = record.beam().p.angle(&muon.p).cos();
    let enu_rec = enu_qe_rec(consts, &muon.p, costh, binding, neutrino);
    if is_unphysical(enu_rec) {
        return false;
    }
    range.is_unbounded() || (enu_rec >= range.min && enu_rec <= range.max)
}

/// CCQE-like numu: the quasi-elastic energy reconstructed from the muon,
/// rather than the true beam energy, must lie inside the closed range.
pub fn is_ccqe_numu(
    consts: &PhysicsConstants,
    record: &InteractionRecord,
    range: EnuRange,
    phase_space: MuonPhaseSpace,
) -> bool {
    ccqe_selection(consts, record, range, phase_space, true)
}

/// CCQE-like numubar, reconstructed on a proton target.
pub fn is_ccqe_numubar(
    consts: &PhysicsConstants,
    record: &InteractionRecord,
    range: EnuRange,
    phase_space: MuonPhaseSpace,
) -> bool {
    ccqe_selection(consts, record, range, phase_space, false)
}

/// Inclusive low-recoil sample: forward muon above 1.5 GeV.
pub fn is_cc_inc_low_recoil(record: &InteractionRecord, range: EnuRange) -> bool {
    if !is_cc_inclusive(record, Pdg::NU_MU, range) {
        return false;
    }
    if !is_restricted_angle(record, Pdg::NU_MU, Pdg::MUON, MUON_ACCEPTANCE_DEG) {
        return false;
    }
    record
        .hm_fs_particle(Pdg::MUON)
        .map(|muon| muon.p.e >= LOW_RECOIL_MIN_MUON_ENERGY_MEV)
        .unwrap_or(false)
}

/// CC0pi with a leading proton above 110 MeV kinetic energy.
pub fn is_cc0pi_1p(record: &InteractionRecord, range: EnuRange) -> bool {
    is_cc0pi(record, Pdg::NU_MU, range)
        && has_proton_ke_above_threshold(record, CC0PI_1P_PROTON_THRESHOLD_MEV)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuis_core::{FourVector, Particle};

    const MUON_MASS: f64 = 105.658;

    fn numu(energy: f64) -> Particle {
        Particle::new(Pdg::NU_MU, FourVector::new(energy, 0.0, 0.0, energy))
    }

    fn with_mass(pdg: Pdg, mass: f64, px: f64, pz: f64) -> Particle {
        Particle::new(pdg, FourVector::from_mass(mass, px, 0.0, pz))
    }

    fn cc1pip(muon_px: f64) -> InteractionRecord {
        InteractionRecord::new(11, numu(4000.0))
            .with_particle(with_mass(Pdg::MUON, MUON_MASS, muon_px, 2000.0))
            .with_particle(with_mass(Pdg::PI_PLUS, 139.57, 100.0, 400.0))
            .with_particle(with_mass(Pdg::PROTON, 938.27, -50.0, 300.0))
    }

    #[test]
    fn cc1pip_honours_restricted_phase_space() {
        let range = EnuRange::new(1.5, 10.0);
        let forward = cc1pip(100.0);
        let wide = cc1pip(2000.0);
        assert!(is_cc1pip(&forward, range, MuonPhaseSpace::Restricted));
        assert!(is_cc1pip(&wide, range, MuonPhaseSpace::Full));
        assert!(!is_cc1pip(&wide, range, MuonPhaseSpace::Restricted));
    }

    #[test]
    fn cc1pip_counts_both_pion_charges() {
        let range = EnuRange::new(1.5, 10.0);
        let record = cc1pip(100.0).with_particle(with_mass(Pdg::PI_MINUS, 139.57, 0.0, 200.0));
        assert!(!is_cc1pip(&record, range, MuonPhaseSpace::Full));
        assert_eq!(is_ccnpip(&record, range, MuonPhaseSpace::Full), Some(2));
    }

    #[test]
    fn ccnpip_needs_a_pion() {
        let record = InteractionRecord::new(1, numu(4000.0))
            .with_particle(with_mass(Pdg::MUON, MUON_MASS, 0.0, 2000.0))
            .with_particle(with_mass(Pdg::PROTON, 938.27, 0.0, 500.0));
        assert_eq!(is_ccnpip(&record, EnuRange::unbounded(), MuonPhaseSpace::Full), None);
    }

    #[test]
    fn muon_must_occupy_a_primary_slot() {
        let record = InteractionRecord::new(11, numu(4000.0))
            .with_particle(with_mass(Pdg::PROTON, 938.27, 0.0, 300.0))
            .with_particle(with_mass(Pdg::PI_PLUS, 139.57, 0.0, 400.0))
            .with_particle(with_mass(Pdg::MUON, MUON_MASS, 0.0, 2000.0));
        assert!(!is_cc1pip(&record, EnuRange::unbounded(), MuonPhaseSpace::Full));
    }

    #[test]
    fn low_recoil_rejects_wide_or_soft_muons() {
        let record = |px: f64, pz: f64| {
            InteractionRecord::new(1, numu(5000.0))
                .with_particle(with_mass(Pdg::MUON, MUON_MASS, px, pz))
        };
        assert!(is_cc_inc_low_recoil(&record(100.0, 3000.0), EnuRange::unbounded()));
        assert!(!is_cc_inc_low_recoil(&record(1500.0, 3000.0), EnuRange::unbounded()));
        assert!(!is_cc_inc_low_recoil(&record(10.0, 1000.0), EnuRange::unbounded()));
    }

    #[test]
    fn ccqe_uses_reconstructed_energy() {
        let consts = PhysicsConstants::default();
        // True energy 2.1 GeV; the muon reconstructs to about 1.91 GeV.
        let record = InteractionRecord::new(1, numu(2100.0))
            .with_particle(with_mass(Pdg::MUON, MUON_MASS, 300.0, 1800.0))
            .with_particle(with_mass(Pdg::PROTON, 938.27, -300.0, 200.0));
        let full = MuonPhaseSpace::Full;
        assert!(is_ccqe_numu(&consts, &record, EnuRange::new(1.5, 10.0), full));
        assert!(!is_ccqe_numu(&consts, &record, EnuRange::new(2.0, 10.0), full));
        assert!(!is_ccqe_numubar(&consts, &record, EnuRange::new(1.5, 10.0), full));
    }

    fn muon_at_degrees(degrees: f64, mode: i32) -> InteractionRecord {
        let (sin, cos) = degrees.to_radians().sin_cos();
        InteractionRecord::new(mode, numu(4000.0))
            .with_particle(with_mass(Pdg::MUON, MUON_MASS, 2000.0 * sin, 2000.0 * cos))
            .with_particle(with_mass(Pdg::PI_PLUS, 139.57, 100.0, 400.0))
    }

    #[test]
    fn acceptance_edge_is_shared_by_all_restricted_cuts() {
        let consts = PhysicsConstants::default();
        let range = EnuRange::unbounded();
        let restricted = MuonPhaseSpace::Restricted;
        let inside = muon_at_degrees(MUON_ACCEPTANCE_DEG - 0.01, 11);
        let outside = muon_at_degrees(MUON_ACCEPTANCE_DEG + 0.01, 11);
        assert!(is_cc1pip(&inside, range, restricted));
        assert!(!is_cc1pip(&outside, range, restricted));

        let qe_inside = muon_at_degrees(MUON_ACCEPTANCE_DEG - 0.01, 1);
        let qe_outside = muon_at_degrees(MUON_ACCEPTANCE_DEG + 0.01, 1);
        assert!(is_ccqe_numu(&consts, &qe_inside, range, restricted));
        assert!(!is_ccqe_numu(&consts, &qe_outside, range, restricted));
        assert!(is_cc_inc_low_recoil(&qe_inside, range));
        assert!(!is_cc_inc_low_recoil(&qe_outside, range));
    }

    #[test]
    fn ccqe_rejects_unreconstructable_energy_without_range() {
        // With a 1 GeV effective target mass, a backward muon with E = 0.6 GeV
        // and p = 0.4 GeV zeroes the denominator of the QE energy.
        let consts = PhysicsConstants {
            mass_neutron: 1.0,
            binding_minerva_numu_mev: 0.0,
            ..PhysicsConstants::default()
        };
        let record = InteractionRecord::new(1, numu(2000.0))
            .with_particle(Particle::new(Pdg::MUON, FourVector::new(600.0, 0.0, 0.0, -400.0)));
        assert!(is_unphysical(enu_qe_rec(
            &consts,
            &record.particles[0].p,
            -1.0,
            0.0,
            true
        )));
        assert!(!is_ccqe_numu(&consts, &record, EnuRange::unbounded(), MuonPhaseSpace::Full));
    }
}
