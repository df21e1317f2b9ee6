use nuis_core::{FourVector, PhysicsConstants, MEV_PER_GEV};

use crate::basic::shell_mass;
use crate::pion::enu_cc1pip_rec;
use crate::UNPHYSICAL;

/// Hadronic invariant mass in MeV from the true beam energy and the muon,
/// assuming a free proton target at rest.
pub fn wrec(consts: &PhysicsConstants, pnu: &FourVector, pmu: &FourVector) -> f64 {
    let e_mu = pmu.e;
    let p_mu = pmu.p();
    let m_mu = shell_mass(e_mu, p_mu);
    let th_nu_mu = pnu.angle(pmu);

    let m_p = consts.mass_proton * MEV_PER_GEV;
    let e_nu = pnu.e;
    let q2 = -m_mu * m_mu + 2.0 * e_nu * (e_mu - p_mu * th_nu_mu.cos());
    let w2 = m_p * m_p - q2 + 2.0 * m_p * (e_nu - e_mu);
    if w2 < 0.0 {
        return UNPHYSICAL;
    }
    w2.sqrt()
}

/// True hadronic invariant mass in MeV, `|p_nu - p_mu + p_nuc|`, for records
/// that keep the struck nucleon but not the full hadronic final state.
pub fn wtrue(pnu: &FourVector, pmu: &FourVector, pnuc: &FourVector) -> f64 {
    let hadronic = *pnu - *pmu + *pnuc;
    let w2 = hadronic.mag2();
    if w2 < 0.0 {
        return UNPHYSICAL;
    }
    w2.sqrt()
}

/// Nucleon-pion invariant mass in MeV. Used as a resonance-region gate
/// before Q2 or Enu reconstructions.
pub fn mppi(pp: &FourVector, ppi: &FourVector) -> f64 {
    let e_p = pp.e;
    let p_p = pp.p();
    let m_p = shell_mass(e_p, p_p);

    let e_pi = ppi.e;
    let p_pi = ppi.p();
    let m_pi = shell_mass(e_pi, p_pi);

    let th_p_pi = pp.angle(ppi);
    let m2 = m_p * m_p + m_pi * m_pi + 2.0 * e_p * e_pi - 2.0 * p_pi * p_p * th_p_pi.cos();
    if m2 < 0.0 {
        return UNPHYSICAL;
    }
    m2.sqrt()
}

/// Hadronic invariant mass in GeV for T2K CC1pi+ using the MiniBooNE Delta
/// neutrino-energy hypothesis and a neutron target at rest.
pub fn wrec_cc1pip_t2k_mb(
    consts: &PhysicsConstants,
    pnu: &FourVector,
    pmu: &FourVector,
    ppip: &FourVector,
) -> f64 {
    let e_nu = enu_cc1pip_rec(consts, pnu, pmu, ppip, false);
    if e_nu == UNPHYSICAL {
        return UNPHYSICAL;
    }
    let e_mu = pmu.e / MEV_PER_GEV;
    let p_mu = pmu.p() / MEV_PER_GEV;
    let cos_mu = pnu.angle(pmu).cos();

    let energy = e_nu + consts.mass_neutron - e_mu;
    let q3_squared = e_nu * e_nu + p_mu * p_mu - 2.0 * e_nu * p_mu * cos_mu;
    let w2 = energy * energy - q3_squared;
    if w2 < 0.0 || !w2.is_finite() {
        return UNPHYSICAL;
    }
    w2.sqrt()
}
