//! MiniBooNE selections. These predate the shared meson band and veto
//! resonances starting at the rho, so a stray photon or nucleon does not
//! reject the event but any heavier meson does.

use nuis_core::{InteractionRecord, Pdg};

use crate::inclusive::{is_cc_inclusive, is_nc_inclusive};
use crate::range::EnuRange;
use crate::topology::is_cc1pi;

fn is_heavy_meson(pdg: Pdg) -> bool {
    (113..=557).contains(&pdg.abs())
}

/// CC1pi+ on mineral oil.
pub fn is_cc1pip(record: &InteractionRecord, range: EnuRange) -> bool {
    is_cc1pi(record, Pdg::NU_MU, Pdg::PI_PLUS, range)
}

/// CC1pi0: one mu-, one pi0, no heavier meson and no other charged lepton.
pub fn is_cc1pi0(record: &InteractionRecord, range: EnuRange) -> bool {
    if !is_cc_inclusive(record, Pdg::NU_MU, range) {
        return false;
    }

    let mut leptons = 0usize;
    let mut pi0 = 0usize;
    for part in record.fs_particles() {
        let pdg = part.pdg;
        if is_heavy_meson(pdg) {
            return false;
        }
        if pdg.abs() == 11 || pdg == Pdg::ANTI_MUON || pdg.abs() == 15 {
            return false;
        }
        if pdg == Pdg::MUON {
            leptons += 1;
        } else if pdg == Pdg::PI_ZERO {
            pi0 += 1;
        }
    }
    leptons == 1 && pi0 == 1
}

/// NC1pi0 in neutrino mode.
pub fn is_nc1pi0(record: &InteractionRecord, range: EnuRange) -> bool {
    is_nc_inclusive(record, Pdg::NU_MU, range) && single_neutral_pion(record)
}

/// NC1pi0 in antineutrino mode.
pub fn is_nc1pi0_bar(record: &InteractionRecord, range: EnuRange) -> bool {
    is_nc_inclusive(record, Pdg::NU_MU_BAR, range) && single_neutral_pion(record)
}

fn single_neutral_pion(record: &InteractionRecord) -> bool {
    let mut pi0 = 0usize;
    for part in record.fs_particles() {
        let pdg = part.pdg;
        if is_heavy_meson(pdg) || matches!(pdg.abs(), 11 | 13 | 15 | 17) {
            return false;
        }
        if pdg == Pdg::PI_ZERO {
            pi0 += 1;
        }
    }
    pi0 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuis_core::{FourVector, Particle};

    fn beam(pdg: Pdg, energy: f64) -> Particle {
        Particle::new(pdg, FourVector::new(energy, 0.0, 0.0, energy))
    }

    fn at(pdg: Pdg, mass: f64, pz: f64) -> Particle {
        Particle::new(pdg, FourVector::from_mass(mass, 0.0, 50.0, pz))
    }

    fn cc1pi0_record() -> InteractionRecord {
        InteractionRecord::new(12, beam(Pdg::NU_MU, 1200.0))
            .with_particle(at(Pdg::MUON, 105.66, 600.0))
            .with_particle(at(Pdg::PI_ZERO, 134.98, 250.0))
            .with_particle(at(Pdg::PROTON, 938.27, 300.0))
    }

    #[test]
    fn cc1pi0_accepts_photons_but_not_rho() {
        let range = EnuRange::new(0.5, 2.0);
        let base = cc1pi0_record();
        assert!(is_cc1pi0(&base, range));

        let with_photon = base.clone().with_particle(at(Pdg::PHOTON, 0.0, 20.0));
        assert!(is_cc1pi0(&with_photon, range));

        let with_rho = base.with_particle(at(Pdg::from_raw(113), 775.0, 40.0));
        assert!(!is_cc1pi0(&with_rho, range));
    }

    #[test]
    fn cc1pi0_rejects_out_of_range_beam() {
        assert!(!is_cc1pi0(&cc1pi0_record(), EnuRange::new(1.5, 2.0)));
    }

    #[test]
    fn nc1pi0_requires_outgoing_neutrino_and_single_pi0() {
        let record = InteractionRecord::new(32, beam(Pdg::NU_MU, 1000.0))
            .with_particle(at(Pdg::NU_MU, 0.0, 600.0))
            .with_particle(at(Pdg::PI_ZERO, 134.98, 250.0))
            .with_particle(at(Pdg::NEUTRON, 939.57, 100.0));
        assert!(is_nc1pi0(&record, EnuRange::unbounded()));
        assert!(!is_nc1pi0_bar(&record, EnuRange::unbounded()));

        let two_pi0 = record.with_particle(at(Pdg::PI_ZERO, 134.98, 90.0));
        assert!(!is_nc1pi0(&two_pi0, EnuRange::unbounded()));
    }
}
