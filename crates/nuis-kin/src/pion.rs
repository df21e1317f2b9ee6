use nuis_core::{FourVector, PhysicsConstants, MEV_PER_GEV};
use serde::{Deserialize, Serialize};

use crate::basic::shell_mass;
use crate::{DENOMINATOR_EPSILON, UNPHYSICAL};

/// Neutrino-energy hypothesis feeding [`q2_cc1pip_rec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnuFlavour {
    /// Full muon + pion expression ([`enu_cc1pip_rec`]).
    #[default]
    Default,
    /// MiniBooNE Delta-resonance hypothesis from the muon alone.
    Delta,
    /// T2K extended MiniBooNE expression with proton binding.
    T2kExtendedMiniBooNE,
    /// True beam energy.
    True,
}

struct Lepton {
    e: f64,
    p: f64,
    m: f64,
}

fn in_gev(part: &FourVector) -> Lepton {
    let e = part.e / MEV_PER_GEV;
    let p = part.p() / MEV_PER_GEV;
    Lepton {
        e,
        p,
        m: shell_mass(e, p),
    }
}

fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < DENOMINATOR_EPSILON || !numerator.is_finite() {
        return UNPHYSICAL;
    }
    numerator / denominator
}

/// Three-body energy reconstruction shared by the CC1pi0 and CC1pi+
/// hypotheses: a nucleon of mass `m_initial` at rest absorbs the neutrino
/// and emits the muon, the pion and a nucleon of mass `m_final`.
fn three_body_enu(
    pnu: &FourVector,
    pmu: &FourVector,
    ppi: &FourVector,
    m_initial: f64,
    m_final: f64,
) -> f64 {
    let mu = in_gev(pmu);
    let pi = in_gev(ppi);
    let th_nu_mu = pnu.angle(pmu);
    let th_nu_pi = pnu.angle(ppi);
    let th_pi_mu = ppi.angle(pmu);

    let numerator = mu.m * mu.m + pi.m * pi.m + m_initial * m_initial - m_final * m_final
        - 2.0 * m_initial * (pi.e + mu.e)
        + 2.0 * pi.e * mu.e
        - 2.0 * pi.p * mu.p * th_pi_mu.cos();
    let denominator =
        2.0 * (pi.e + mu.e - pi.p * th_nu_pi.cos() - mu.p * th_nu_mu.cos() - m_initial);
    guarded_ratio(numerator, denominator)
}

fn q2_from_enu(pnu: &FourVector, pmu: &FourVector, e_nu: f64) -> f64 {
    if e_nu == UNPHYSICAL {
        return UNPHYSICAL;
    }
    let mu = in_gev(pmu);
    let th_nu_mu = pnu.angle(pmu);
    -mu.m * mu.m + 2.0 * e_nu * (mu.e - mu.p * th_nu_mu.cos())
}

/// Neutrino energy in GeV for MiniBooNE CC1pi0 (neutron target at rest, no
/// binding, proton in the final state).
pub fn enu_cc1pi0_rec(
    consts: &PhysicsConstants,
    pnu: &FourVector,
    pmu: &FourVector,
    ppi0: &FourVector,
) -> f64 {
    three_body_enu(pnu, pmu, ppi0, consts.mass_neutron, consts.mass_proton)
}

/// Q2 in GeV^2 for MiniBooNE CC1pi0 using [`enu_cc1pi0_rec`].
pub fn q2_cc1pi0_rec(
    consts: &PhysicsConstants,
    pnu: &FourVector,
    pmu: &FourVector,
    ppi0: &FourVector,
) -> f64 {
    let e_nu = enu_cc1pi0_rec(consts, pnu, pmu, ppi0);
    q2_from_enu(pnu, pmu, e_nu)
}

/// Neutrino energy in GeV for MiniBooNE CC1pi+.
///
/// With pion information the full muon + pion expression is used on a
/// bound neutron. Without it (Michel-tag samples) the Delta hypothesis of
/// [`enu_cc1pip_rec_delta`] applies and `ppip` is ignored.
pub fn enu_cc1pip_rec(
    consts: &PhysicsConstants,
    pnu: &FourVector,
    pmu: &FourVector,
    ppip: &FourVector,
    pion_info: bool,
) -> f64 {
    if !pion_info {
        return enu_cc1pip_rec_delta(consts, pnu, pmu);
    }
    let m_bound = consts.mass_neutron - consts.binding_pion_mev / MEV_PER_GEV;
    three_body_enu(pnu, pmu, ppip, m_bound, consts.mass_proton)
}

/// Neutrino energy in GeV assuming the hadronic system is an on-shell
/// Delta(1232) produced on a bound neutron at rest.
pub fn enu_cc1pip_rec_delta(consts: &PhysicsConstants, pnu: &FourVector, pmu: &FourVector) -> f64 {
    let m_delta = consts.mass_delta;
    let m_n = consts.mass_neutron - consts.binding_pion_mev / MEV_PER_GEV;
    let mu = in_gev(pmu);
    let th_nu_mu = pnu.angle(pmu);

    let numerator = m_delta * m_delta - m_n * m_n - mu.m * mu.m + 2.0 * m_n * mu.e;
    let denominator = 2.0 * (m_n - mu.e + mu.p * th_nu_mu.cos());
    guarded_ratio(numerator, denominator)
}

/// Neutrino energy in GeV for T2K CC1pi+ ("extended MiniBooNE"): a proton
/// bound by the configured binding energy absorbs the neutrino and a free
/// proton recoils against the muon + pion system.
pub fn enu_cc1pip_rec_t2k_emb(
    consts: &PhysicsConstants,
    pnu: &FourVector,
    pmu: &FourVector,
    ppi: &FourVector,
) -> f64 {
    let mu = in_gev(pmu);
    let pi = in_gev(ppi);
    let e_bind = consts.binding_pion_mev / MEV_PER_GEV;
    let m_p = consts.mass_proton;

    let system = *pmu + *ppi;
    let a1 = m_p - e_bind - mu.e - pi.e;
    let a2 = system.p2() / (MEV_PER_GEV * MEV_PER_GEV);
    let direction = pnu.unit3();
    let a3 = (direction[0] * system.px + direction[1] * system.py + direction[2] * system.pz)
        / MEV_PER_GEV;

    guarded_ratio(m_p * m_p + a2 - a1 * a1, 2.0 * (a1 + a3))
}

/// Q2 in GeV^2 for CC1pi+ under the chosen neutrino-energy flavour.
/// `pion_info` only affects [`EnuFlavour::Default`].
pub fn q2_cc1pip_rec(
    consts: &PhysicsConstants,
    pnu: &FourVector,
    pmu: &FourVector,
    ppip: &FourVector,
    flavour: EnuFlavour,
    pion_info: bool,
) -> f64 {
    let e_nu = match flavour {
        EnuFlavour::Default => enu_cc1pip_rec(consts, pnu, pmu, ppip, pion_info),
        EnuFlavour::Delta => enu_cc1pip_rec_delta(consts, pnu, pmu),
        EnuFlavour::T2kExtendedMiniBooNE => enu_cc1pip_rec_t2k_emb(consts, pnu, pmu, ppip),
        EnuFlavour::True => pnu.e / MEV_PER_GEV,
    };
    q2_from_enu(pnu, pmu, e_nu)
}

/// Angle in radians between the three-momentum transfer `p_nu - p_mu` and
/// the pion.
pub fn thq3pi_cc1pip_t2k(pnu: &FourVector, pmu: &FourVector, ppi: &FourVector) -> f64 {
    let q3 = *pnu - *pmu;
    q3.angle(ppi)
}

/// Magnitude of the three-momentum transfer in GeV, with the neutrino
/// energy taken from [`enu_cc1pip_rec_t2k_emb`] along the beam direction.
pub fn q3_cc1pip_t2k(
    consts: &PhysicsConstants,
    pnu: &FourVector,
    pmu: &FourVector,
    ppi: &FourVector,
) -> f64 {
    let e_nu = enu_cc1pip_rec_t2k_emb(consts, pnu, pmu, ppi);
    if e_nu == UNPHYSICAL {
        return UNPHYSICAL;
    }
    let direction = pnu.unit3();
    let q = [
        direction[0] * e_nu - pmu.px / MEV_PER_GEV,
        direction[1] * e_nu - pmu.py / MEV_PER_GEV,
        direction[2] * e_nu - pmu.pz / MEV_PER_GEV,
    ];
    (q[0] * q[0] + q[1] * q[1] + q[2] * q[2]).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beam() -> FourVector {
        FourVector::new(1000.0, 0.0, 0.0, 1000.0)
    }

    #[test]
    fn missing_pion_info_falls_back_to_delta() {
        let consts = PhysicsConstants::default();
        let pmu = FourVector::from_mass(105.658, 50.0, 0.0, 450.0);
        let ppi = FourVector::from_mass(139.57, -100.0, 20.0, 200.0);
        let fallback = enu_cc1pip_rec(&consts, &beam(), &pmu, &ppi, false);
        let delta = enu_cc1pip_rec_delta(&consts, &beam(), &pmu);
        assert_eq!(fallback, delta);
    }

    #[test]
    fn true_flavour_uses_beam_energy() {
        let consts = PhysicsConstants::default();
        let pmu = FourVector::from_mass(105.658, 0.0, 0.0, 500.0);
        let ppi = FourVector::from_mass(139.57, 0.0, 100.0, 100.0);
        let q2 = q2_cc1pip_rec(&consts, &beam(), &pmu, &ppi, EnuFlavour::True, true);
        let e_mu = pmu.e / 1000.0;
        let p_mu = pmu.p() / 1000.0;
        let m_mu = (e_mu * e_mu - p_mu * p_mu).sqrt();
        let expected = -m_mu * m_mu + 2.0 * 1.0 * (e_mu - p_mu);
        assert!((q2 - expected).abs() < 1e-9);
    }

    #[test]
    fn three_body_energy_recovers_generated_beam() {
        // nu(E) + n(at rest) -> mu + pi0 + p with the proton taking the
        // remaining momentum, built so that energy is conserved exactly.
        let consts = PhysicsConstants::default();
        let e_nu = 1.2;
        let pmu = FourVector::from_mass(105.658, 150.0, 0.0, 600.0);
        let ppi = FourVector::from_mass(134.977, -100.0, 60.0, 200.0);
        let proton_p = [
            -(pmu.px + ppi.px) / 1000.0,
            -(pmu.py + ppi.py) / 1000.0,
            e_nu - (pmu.pz + ppi.pz) / 1000.0,
        ];
        let e_p = (consts.mass_proton.powi(2)
            + proton_p.iter().map(|c| c * c).sum::<f64>())
        .sqrt();
        let m_initial = pmu.e / 1000.0 + ppi.e / 1000.0 + e_p - e_nu;
        let rec = three_body_enu(&beam(), &pmu, &ppi, m_initial, consts.mass_proton);
        assert!((rec - e_nu).abs() < 1e-9);
    }

    #[test]
    fn emb_energy_recovers_generated_beam() {
        let consts = PhysicsConstants::default();
        let e_nu = 0.9;
        let pmu = FourVector::from_mass(105.658, 120.0, 30.0, 420.0);
        let ppi = FourVector::from_mass(139.57, -60.0, -30.0, 150.0);
        // Choose the binding so that the event conserves energy exactly.
        let recoil = [
            -(pmu.px + ppi.px) / 1000.0,
            -(pmu.py + ppi.py) / 1000.0,
            e_nu - (pmu.pz + ppi.pz) / 1000.0,
        ];
        let e_p = (consts.mass_proton.powi(2) + recoil.iter().map(|c| c * c).sum::<f64>()).sqrt();
        let binding_gev = e_nu + consts.mass_proton - pmu.e / 1000.0 - ppi.e / 1000.0 - e_p;
        let tuned = PhysicsConstants {
            binding_pion_mev: binding_gev * 1000.0,
            ..consts
        };
        let rec = enu_cc1pip_rec_t2k_emb(&tuned, &beam(), &pmu, &ppi);
        assert!((rec - e_nu).abs() < 1e-9);
    }
}
