use nuis_core::{InteractionRecord, Particle, Pdg, MEV_PER_GEV};

use crate::basic::kinetic_energy;

fn is_primary_lepton(record: &InteractionRecord, part: &Particle) -> bool {
    part.pdg.is_neutrino() || part.pdg == record.beam.pdg.charged_lepton_partner()
}

fn total_energy(part: &Particle) -> f64 {
    part.p.e / MEV_PER_GEV
}

/// True hadronic recoil in GeV: nucleon kinetic energies plus the total
/// energy of every other final-state particle, excluding the primary lepton
/// and neutrinos.
pub fn erecoil_true(record: &InteractionRecord) -> f64 {
    record
        .fs_particles()
        .filter(|part| !is_primary_lepton(record, part))
        .map(|part| {
            if part.pdg.is_nucleon() {
                kinetic_energy(&part.p)
            } else {
                total_energy(part)
            }
        })
        .sum()
}

/// Recoil in GeV visible to a tracker: charged hadrons only, protons counted
/// by kinetic energy and other charged hadrons by total energy.
pub fn erecoil_charged(record: &InteractionRecord) -> f64 {
    record
        .fs_particles()
        .filter(|part| !is_primary_lepton(record, part))
        .filter(|part| part.pdg.is_charged() && !part.pdg.is_lepton())
        .map(|part| {
            if part.pdg == Pdg::PROTON {
                kinetic_energy(&part.p)
            } else {
                total_energy(part)
            }
        })
        .sum()
}

/// MINERvA low-recoil estimator in GeV: proton and charged-pion kinetic
/// energy plus the total energy of neutral pions, photons and electrons.
/// Neutrons and all other species are invisible.
pub fn erecoil_minerva_low_recoil(record: &InteractionRecord) -> f64 {
    record
        .fs_particles()
        .filter(|part| !is_primary_lepton(record, part))
        .map(|part| match part.pdg.abs() {
            2212 | 211 => kinetic_energy(&part.p),
            111 | 22 | 11 => total_energy(part),
            _ => 0.0,
        })
        .sum()
}
