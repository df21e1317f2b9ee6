use nuis_core::{FourVector, MEV_PER_GEV};

/// Rest mass (same unit as the input) inferred from the mass shell.
/// Numerically negative mass squared is clamped to zero.
pub(crate) fn shell_mass(e: f64, p: f64) -> f64 {
    (e * e - p * p).max(0.0).sqrt()
}

/// Kinetic energy in GeV.
///
/// A vector with zero spatial momentum returns exactly 0. A space-like
/// vector is treated as massless, so the result equals the total energy.
pub fn kinetic_energy(part: &FourVector) -> f64 {
    if part.p2() == 0.0 {
        return 0.0;
    }
    let e = part.e / MEV_PER_GEV;
    let p = part.p() / MEV_PER_GEV;
    e - shell_mass(e, p)
}

/// Magnitude of the spatial momentum in GeV.
pub fn momentum(part: &FourVector) -> f64 {
    part.p() / MEV_PER_GEV
}

/// Angle between two spatial momenta in radians, in `[0, pi]`. Not the
/// cosine. Returns 0 when either vector has zero magnitude.
pub fn opening_angle(part: &FourVector, other: &FourVector) -> f64 {
    part.angle(other)
}
