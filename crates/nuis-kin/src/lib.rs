#![deny(missing_docs)]
#![doc = "Pure kinematic reconstructions mapping record four-vectors (MeV) to the observables histogrammed by measurements. Each function documents its output unit."]

/// Kinetic energy, momentum and opening angles.
pub mod basic;
/// Hadronic invariant-mass reconstructions.
pub mod hadronic;
/// Single-pion production reconstructions.
pub mod pion;
/// Two-body quasi-elastic reconstructions.
pub mod qe;
/// Hadronic recoil energy sums over a record.
pub mod recoil;

pub use basic::{kinetic_energy, momentum, opening_angle};
pub use hadronic::{mppi, wrec, wrec_cc1pip_t2k_mb, wtrue};
pub use pion::{
    enu_cc1pi0_rec, enu_cc1pip_rec, enu_cc1pip_rec_delta, enu_cc1pip_rec_t2k_emb, q2_cc1pi0_rec,
    q2_cc1pip_rec, q3_cc1pip_t2k, thq3pi_cc1pip_t2k, EnuFlavour,
};
pub use qe::{enu_qe_rec, proton_q2_qe_rec, q2_qe_rec};
pub use recoil::{erecoil_charged, erecoil_minerva_low_recoil, erecoil_true};

/// Sentinel returned when a reconstruction is undefined for its input
/// (vanishing denominator, negative square-root argument, missing particle).
/// Lies outside every physical range the observables can take.
pub const UNPHYSICAL: f64 = -999.0;

/// True when `value` is the [`UNPHYSICAL`] sentinel.
pub fn is_unphysical(value: f64) -> bool {
    value == UNPHYSICAL
}

pub(crate) const DENOMINATOR_EPSILON: f64 = 1e-12;
