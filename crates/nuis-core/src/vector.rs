//! Minimal Lorentz four-vector used by records and reconstructions.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Conversion factor between the record unit (MeV) and GeV.
pub const MEV_PER_GEV: f64 = 1000.0;

/// Energy-momentum four-vector. Records store all components in MeV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FourVector {
    /// Energy component.
    pub e: f64,
    /// Momentum along x.
    pub px: f64,
    /// Momentum along y.
    pub py: f64,
    /// Momentum along z (beam axis by convention).
    pub pz: f64,
}

impl FourVector {
    /// Builds a vector from its components.
    pub const fn new(e: f64, px: f64, py: f64, pz: f64) -> Self {
        Self { e, px, py, pz }
    }

    /// Vector of a particle with the given mass moving with momentum
    /// `(px, py, pz)`.
    pub fn from_mass(mass: f64, px: f64, py: f64, pz: f64) -> Self {
        let e = (mass * mass + px * px + py * py + pz * pz).sqrt();
        Self { e, px, py, pz }
    }

    /// Squared magnitude of the spatial part.
    pub fn p2(&self) -> f64 {
        self.px * self.px + self.py * self.py + self.pz * self.pz
    }

    /// Magnitude of the spatial part.
    pub fn p(&self) -> f64 {
        self.p2().sqrt()
    }

    /// Minkowski square `E^2 - |p|^2`.
    pub fn mag2(&self) -> f64 {
        self.e * self.e - self.p2()
    }

    /// Invariant mass, signed like ROOT's `TLorentzVector::Mag` so that
    /// space-like vectors return `-sqrt(-m^2)`.
    pub fn mag(&self) -> f64 {
        let m2 = self.mag2();
        if m2 < 0.0 {
            -(-m2).sqrt()
        } else {
            m2.sqrt()
        }
    }

    /// Spatial dot product.
    pub fn dot3(&self, other: &FourVector) -> f64 {
        self.px * other.px + self.py * other.py + self.pz * other.pz
    }

    /// Angle between the spatial parts in radians, in `[0, pi]`.
    ///
    /// Returns 0 when either spatial part has zero magnitude.
    pub fn angle(&self, other: &FourVector) -> f64 {
        let norm = (self.p2() * other.p2()).sqrt();
        if norm <= 0.0 {
            return 0.0;
        }
        (self.dot3(other) / norm).clamp(-1.0, 1.0).acos()
    }

    /// Unit spatial direction, or the zero vector when at rest.
    pub fn unit3(&self) -> [f64; 3] {
        let p = self.p();
        if p <= 0.0 {
            return [0.0; 3];
        }
        [self.px / p, self.py / p, self.pz / p]
    }

    /// Spatial components as an array.
    pub fn vect(&self) -> [f64; 3] {
        [self.px, self.py, self.pz]
    }
}

impl Add for FourVector {
    type Output = FourVector;

    fn add(self, rhs: FourVector) -> FourVector {
        FourVector::new(
            self.e + rhs.e,
            self.px + rhs.px,
            self.py + rhs.py,
            self.pz + rhs.pz,
        )
    }
}

impl Sub for FourVector {
    type Output = FourVector;

    fn sub(self, rhs: FourVector) -> FourVector {
        FourVector::new(
            self.e - rhs.e,
            self.px - rhs.px,
            self.py - rhs.py,
            self.pz - rhs.pz,
        )
    }
}

impl Neg for FourVector {
    type Output = FourVector;

    fn neg(self) -> FourVector {
        FourVector::new(-self.e, -self.px, -self.py, -self.pz)
    }
}

impl Mul<f64> for FourVector {
    type Output = FourVector;

    fn mul(self, rhs: f64) -> FourVector {
        FourVector::new(self.e * rhs, self.px * rhs, self.py * rhs, self.pz * rhs)
    }
}
