use nuis_core::{FourVector, InteractionRecord, Pdg, MEV_PER_GEV};
use nuis_kin::kinetic_energy;

/// Cosine of the angle between a particle and the beam direction.
pub fn beam_cosine(record: &InteractionRecord, p: &FourVector) -> f64 {
    record.beam().p.angle(p).cos()
}

/// Whether `p` lies strictly within `max_degrees` of `reference`.
pub fn is_within_angle(reference: &FourVector, p: &FourVector, max_degrees: f64) -> bool {
    reference.angle(p).to_degrees() < max_degrees
}

/// Whether the highest-momentum final-state `other` lies within
/// `max_degrees` of the incoming `beam`. False when either is missing.
pub fn is_restricted_angle(
    record: &InteractionRecord,
    beam: Pdg,
    other: Pdg,
    max_degrees: f64,
) -> bool {
    if !record.has_is_particle(beam) {
        return false;
    }
    match record.hm_fs_particle(other) {
        Some(part) => is_within_angle(&record.beam().p, &part.p, max_degrees),
        None => false,
    }
}

/// Whether the leading final-state proton has kinetic energy above
/// `threshold_mev`. False when no proton escapes.
pub fn has_proton_ke_above_threshold(record: &InteractionRecord, threshold_mev: f64) -> bool {
    record
        .hm_fs_proton()
        .map(|proton| kinetic_energy(&proton.p) > threshold_mev / MEV_PER_GEV)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuis_core::Particle;

    const MASS_PROTON_MEV: f64 = 938.272;

    fn record_with_muon(px: f64, pz: f64) -> InteractionRecord {
        let beam = Particle::new(Pdg::NU_MU, FourVector::new(3000.0, 0.0, 0.0, 3000.0));
        InteractionRecord::new(1, beam).with_particle(Particle::new(
            Pdg::MUON,
            FourVector::from_mass(105.66, px, 0.0, pz),
        ))
    }

    #[test]
    fn forward_muon_passes_twenty_degrees() {
        let record = record_with_muon(100.0, 1000.0);
        assert!(is_restricted_angle(&record, Pdg::NU_MU, Pdg::MUON, 20.0));
        assert!(!is_restricted_angle(&record, Pdg::NU_MU, Pdg::MUON, 5.0));
    }

    #[test]
    fn missing_particles_fail_the_angle_cut() {
        let record = record_with_muon(0.0, 1000.0);
        assert!(!is_restricted_angle(&record, Pdg::NU_MU_BAR, Pdg::MUON, 90.0));
        assert!(!is_restricted_angle(&record, Pdg::NU_MU, Pdg::PI_PLUS, 90.0));
    }

    #[test]
    fn proton_threshold_compares_in_mev() {
        // p = 500 MeV gives T of roughly 124 MeV
        let record = record_with_muon(0.0, 1000.0).with_particle(Particle::new(
            Pdg::PROTON,
            FourVector::from_mass(MASS_PROTON_MEV, 0.0, 500.0, 0.0),
        ));
        assert!(has_proton_ke_above_threshold(&record, 110.0));
        assert!(!has_proton_ke_above_threshold(&record, 130.0));
        assert!(!has_proton_ke_above_threshold(&record_with_muon(0.0, 1.0), 0.0));
    }

    #[test]
    fn beam_cosine_of_backward_particle_is_negative() {
        let back = FourVector::from_mass(105.66, 0.0, 0.0, -400.0);
        let record = record_with_muon(0.0, 1000.0);
        assert!((beam_cosine(&record, &back) + 1.0).abs() < 1e-12);
    }
}
