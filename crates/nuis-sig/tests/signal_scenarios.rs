use nuis_core::{FourVector, InteractionMode, InteractionRecord, Particle, Pdg, PhysicsConstants};
use nuis_sig::{
    is_cc0pi, is_cc1pi, is_cc1pi_3prong, is_cc_coherent, is_cc_inclusive, is_cc_multi_pion,
    is_ccqe, is_ccqe_like, is_nc1pi_3prong, minerva, miniboone, t2k, EnuRange, MuonPhaseSpace,
    PionTagging,
};
use proptest::prelude::*;

fn with_mass(pdg: Pdg, mass: f64, px: f64, py: f64, pz: f64) -> Particle {
    Particle::new(pdg, FourVector::from_mass(mass, px, py, pz))
}

fn beam(pdg: Pdg, energy: f64) -> Particle {
    Particle::new(pdg, FourVector::new(energy, 0.0, 0.0, energy))
}

/// numu at 2 GeV producing mu-, pi+ and two protons.
fn scenario_a() -> InteractionRecord {
    InteractionRecord::new(11, beam(Pdg::NU_MU, 2000.0))
        .with_particle(with_mass(Pdg::MUON, 105.66, 80.0, 0.0, 1200.0))
        .with_particle(with_mass(Pdg::PI_PLUS, 139.57, -60.0, 30.0, 350.0))
        .with_particle(with_mass(Pdg::PROTON, 938.27, 0.0, -120.0, 300.0))
        .with_particle(with_mass(Pdg::PROTON, 938.27, 40.0, 90.0, 150.0))
}

fn scenario_b() -> InteractionRecord {
    scenario_a().with_particle(with_mass(Pdg::PI_ZERO, 134.98, 10.0, 10.0, 200.0))
}

#[test]
fn scenario_a_is_cc1pip() {
    let range = EnuRange::new(0.0, 10.0);
    assert!(is_cc1pi(&scenario_a(), Pdg::NU_MU, Pdg::PI_PLUS, range));
    assert!(is_cc1pi_3prong(&scenario_a(), Pdg::NU_MU, Pdg::PI_PLUS, Pdg::PROTON, range));
    assert!(!is_cc1pi_3prong(&scenario_a(), Pdg::NU_MU, Pdg::PI_PLUS, Pdg::NEUTRON, range));
}

#[test]
fn scenario_b_extra_pi0_rejects() {
    let range = EnuRange::new(0.0, 10.0);
    assert!(!is_cc1pi(&scenario_b(), Pdg::NU_MU, Pdg::PI_PLUS, range));
    assert!(is_cc_multi_pion(&scenario_b(), Pdg::NU_MU, &[Pdg::PI_PLUS, Pdg::PI_ZERO], range));
    assert!(!is_cc_multi_pion(&scenario_a(), Pdg::NU_MU, &[Pdg::PI_PLUS, Pdg::PI_ZERO], range));
}

#[test]
fn requested_pion_species_must_match() {
    let range = EnuRange::unbounded();
    assert!(!is_cc1pi(&scenario_a(), Pdg::NU_MU, Pdg::PI_MINUS, range));
    assert!(!is_cc1pi(&scenario_a(), Pdg::NU_MU, Pdg::PI_ZERO, range));
}

#[test]
fn missing_lepton_fails_every_cc_selection() {
    let record = InteractionRecord::new(11, beam(Pdg::NU_MU, 2000.0))
        .with_particle(with_mass(Pdg::PI_PLUS, 139.57, 0.0, 0.0, 350.0))
        .with_particle(with_mass(Pdg::PROTON, 938.27, 0.0, 0.0, 300.0));
    let range = EnuRange::unbounded();
    assert!(!is_cc_inclusive(&record, Pdg::NU_MU, range));
    assert!(!is_cc1pi(&record, Pdg::NU_MU, Pdg::PI_PLUS, range));
    assert!(!miniboone::is_cc1pip(&record, range));
    assert!(!minerva::is_cc1pip(&record, range, MuonPhaseSpace::Full));
    assert!(!t2k::is_cc1pip_ch(&record, range, PionTagging::MichelElectron));
}

#[test]
fn equal_range_edges_disable_the_energy_cut() {
    let record = scenario_a();
    assert!(is_cc_inclusive(&record, Pdg::NU_MU, EnuRange::new(7.0, 7.0)));
    assert!(!is_cc_inclusive(&record, Pdg::NU_MU, EnuRange::new(3.0, 7.0)));
    assert!(!is_cc_inclusive(&record, Pdg::NU_MU, EnuRange::new(0.5, 2.0)));
}

#[test]
fn wrong_beam_flavour_fails() {
    let range = EnuRange::unbounded();
    assert!(!is_cc1pi(&scenario_a(), Pdg::NU_MU_BAR, Pdg::PI_PLUS, range));
    assert!(!is_cc1pi(&scenario_a(), Pdg::NU_E, Pdg::PI_PLUS, range));
}

#[test]
fn mode_based_selections() {
    let qe = InteractionRecord::new(1, beam(Pdg::NU_MU, 900.0))
        .with_particle(with_mass(Pdg::MUON, 105.66, 100.0, 0.0, 500.0))
        .with_particle(with_mass(Pdg::PROTON, 938.27, -100.0, 0.0, 400.0));
    let mec = InteractionRecord {
        mode: InteractionMode::from_raw(2),
        ..qe.clone()
    };
    let range = EnuRange::unbounded();
    assert!(is_ccqe(&qe, Pdg::NU_MU, range));
    assert!(!is_ccqe(&mec, Pdg::NU_MU, range));
    assert!(is_ccqe_like(&mec, Pdg::NU_MU, range));
    assert!(is_cc0pi(&mec, Pdg::NU_MU, range));
}

#[test]
fn coherent_requires_bare_final_state() {
    let range = EnuRange::unbounded();
    let coh = InteractionRecord::new(16, beam(Pdg::NU_MU, 3000.0))
        .with_particle(with_mass(Pdg::MUON, 105.66, 50.0, 0.0, 2000.0))
        .with_particle(with_mass(Pdg::PI_PLUS, 139.57, -50.0, 0.0, 700.0));
    assert!(is_cc_coherent(&coh, Pdg::NU_MU, Pdg::PI_PLUS, range));
    let with_proton = coh.with_particle(with_mass(Pdg::PROTON, 938.27, 0.0, 0.0, 200.0));
    assert!(!is_cc_coherent(&with_proton, Pdg::NU_MU, Pdg::PI_PLUS, range));
}

#[test]
fn nc_three_prong_needs_outgoing_neutrino() {
    let range = EnuRange::unbounded();
    let record = InteractionRecord::new(33, beam(Pdg::NU_MU, 1500.0))
        .with_particle(with_mass(Pdg::NU_MU, 0.0, 100.0, 0.0, 900.0))
        .with_particle(with_mass(Pdg::PROTON, 938.27, 0.0, 50.0, 300.0))
        .with_particle(with_mass(Pdg::PI_MINUS, 139.57, -80.0, 0.0, 200.0));
    assert!(is_nc1pi_3prong(&record, Pdg::NU_MU, Pdg::PI_MINUS, Pdg::PROTON, range));
    assert!(!is_nc1pi_3prong(&record, Pdg::NU_MU, Pdg::PI_MINUS, Pdg::NEUTRON, range));
}

#[test]
fn classifiers_are_idempotent() {
    let consts = PhysicsConstants::default();
    let range = EnuRange::new(1.5, 10.0);
    for record in [scenario_a(), scenario_b()] {
        let first = (
            minerva::is_cc1pip(&record, range, MuonPhaseSpace::Restricted),
            minerva::is_ccnpip(&record, range, MuonPhaseSpace::Full),
            minerva::is_ccqe_numu(&consts, &record, range, MuonPhaseSpace::Full),
            t2k::is_cc1pip_h2o(&record, range),
        );
        let second = (
            minerva::is_cc1pip(&record, range, MuonPhaseSpace::Restricted),
            minerva::is_ccnpip(&record, range, MuonPhaseSpace::Full),
            minerva::is_ccqe_numu(&consts, &record, range, MuonPhaseSpace::Full),
            t2k::is_cc1pip_h2o(&record, range),
        );
        assert_eq!(first, second);
    }
}

proptest! {
    #[test]
    fn dead_abnormal_particles_never_change_selection(
        px in -500.0f64..500.0,
        pz in -500.0f64..500.0,
        status in 1i32..20,
    ) {
        let range = EnuRange::new(0.0, 10.0);
        let base = scenario_a();
        let extra = with_mass(Pdg::PI_ZERO, 134.98, px, 0.0, pz).with_flags(false, status);
        let decorated = base.clone().with_particle(extra);
        prop_assert_eq!(
            is_cc1pi(&base, Pdg::NU_MU, Pdg::PI_PLUS, range),
            is_cc1pi(&decorated, Pdg::NU_MU, Pdg::PI_PLUS, range)
        );
        prop_assert_eq!(
            miniboone::is_cc1pi0(&base, range),
            miniboone::is_cc1pi0(&decorated, range)
        );
    }

    #[test]
    fn energy_cut_matches_window(energy in 1.0f64..20_000.0) {
        let range = EnuRange::new(0.5, 10.0);
        let record = InteractionRecord::new(1, beam(Pdg::NU_MU, energy))
            .with_particle(with_mass(Pdg::MUON, 105.66, 0.0, 0.0, energy * 0.5));
        let inside = (500.0..10_000.0).contains(&energy);
        prop_assert_eq!(is_cc_inclusive(&record, Pdg::NU_MU, range), inside);
    }
}
