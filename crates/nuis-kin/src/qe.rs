use nuis_core::{FourVector, PhysicsConstants, MEV_PER_GEV};

use crate::basic::shell_mass;
use crate::{DENOMINATOR_EPSILON, UNPHYSICAL};

/// Reconstructed neutrino energy in GeV under the two-body quasi-elastic
/// hypothesis.
///
/// `costh` is the lepton scattering cosine relative to the beam and
/// `binding_mev` the binding energy removed from the struck nucleon. For
/// neutrinos the struck nucleon is a neutron and a proton emerges; for
/// antineutrinos the roles swap.
pub fn enu_qe_rec(
    consts: &PhysicsConstants,
    pmu: &FourVector,
    costh: f64,
    binding_mev: f64,
    neutrino: bool,
) -> f64 {
    let v = binding_mev / MEV_PER_GEV;
    let (m_eff, m_oth) = if neutrino {
        (consts.mass_neutron - v, consts.mass_proton)
    } else {
        (consts.mass_proton - v, consts.mass_neutron)
    };

    let el = pmu.e / MEV_PER_GEV;
    let pl = pmu.p() / MEV_PER_GEV;
    let ml = shell_mass(el, pl);

    let denominator = 2.0 * (m_eff - el + pl * costh);
    if denominator.abs() < DENOMINATOR_EPSILON {
        return UNPHYSICAL;
    }
    (2.0 * m_eff * el - ml * ml + m_oth * m_oth - m_eff * m_eff) / denominator
}

/// Reconstructed squared four-momentum transfer in GeV^2 under the
/// quasi-elastic hypothesis, using [`enu_qe_rec`] for the beam energy.
pub fn q2_qe_rec(
    consts: &PhysicsConstants,
    pmu: &FourVector,
    costh: f64,
    binding_mev: f64,
    neutrino: bool,
) -> f64 {
    let el = pmu.e / MEV_PER_GEV;
    let pl = pmu.p() / MEV_PER_GEV;
    let ml = shell_mass(el, pl);

    let e_rec = enu_qe_rec(consts, pmu, costh, binding_mev, neutrino);
    if e_rec == UNPHYSICAL {
        return UNPHYSICAL;
    }
    -ml * ml + 2.0 * e_rec * (el - pl * costh)
}

/// Quasi-elastic Q2 in GeV^2 reconstructed from the leading proton's total
/// energy (MeV) alone.
pub fn proton_q2_qe_rec(consts: &PhysicsConstants, proton_energy_mev: f64, binding_mev: f64) -> f64 {
    let v = binding_mev / MEV_PER_GEV;
    let m_n_eff = consts.mass_neutron - v;
    let m_p = consts.mass_proton;
    let kinetic = proton_energy_mev / MEV_PER_GEV - m_p;
    m_n_eff * m_n_eff - m_p * m_p + 2.0 * m_n_eff * (kinetic + m_p - m_n_eff)
}
