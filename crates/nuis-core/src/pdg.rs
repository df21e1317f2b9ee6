//! Signed particle identity codes following the PDG numbering scheme.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower edge of the meson numbering band (inclusive).
pub const MESON_BAND_LOW: i32 = 111;
/// Upper edge of the meson numbering band (inclusive).
pub const MESON_BAND_HIGH: i32 = 557;

/// Signed particle identity code. The sign distinguishes particle from
/// antiparticle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Pdg(i32);

impl Pdg {
    /// Electron.
    pub const ELECTRON: Pdg = Pdg(11);
    /// Electron neutrino.
    pub const NU_E: Pdg = Pdg(12);
    /// Negative muon.
    pub const MUON: Pdg = Pdg(13);
    /// Muon neutrino.
    pub const NU_MU: Pdg = Pdg(14);
    /// Negative tau.
    pub const TAU: Pdg = Pdg(15);
    /// Tau neutrino.
    pub const NU_TAU: Pdg = Pdg(16);
    /// Positive muon.
    pub const ANTI_MUON: Pdg = Pdg(-13);
    /// Muon antineutrino.
    pub const NU_MU_BAR: Pdg = Pdg(-14);
    /// Photon.
    pub const PHOTON: Pdg = Pdg(22);
    /// Neutral pion.
    pub const PI_ZERO: Pdg = Pdg(111);
    /// Positive pion.
    pub const PI_PLUS: Pdg = Pdg(211);
    /// Negative pion.
    pub const PI_MINUS: Pdg = Pdg(-211);
    /// Neutron.
    pub const NEUTRON: Pdg = Pdg(2112);
    /// Proton.
    pub const PROTON: Pdg = Pdg(2212);

    /// Creates a code from its raw integer representation.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw signed integer.
    pub const fn as_raw(&self) -> i32 {
        self.0
    }

    /// Returns the unsigned (particle/antiparticle symmetric) code.
    pub const fn abs(&self) -> i32 {
        self.0.abs()
    }

    /// True when the code lies in the meson band, irrespective of sign.
    pub fn is_meson(&self) -> bool {
        (MESON_BAND_LOW..=MESON_BAND_HIGH).contains(&self.abs())
    }

    /// True for e, mu and tau of either charge.
    pub fn is_charged_lepton(&self) -> bool {
        matches!(self.abs(), 11 | 13 | 15)
    }

    /// True for any lepton code, including the fourth-generation slot 17/18.
    pub fn is_lepton(&self) -> bool {
        (11..=18).contains(&self.abs())
    }

    /// True for neutrinos and antineutrinos.
    pub fn is_neutrino(&self) -> bool {
        matches!(self.abs(), 12 | 14 | 16 | 18)
    }

    /// Charged lepton produced in a charged-current interaction of this
    /// neutrino: `nu -> code - 1`, `nubar -> code + 1`.
    pub fn charged_lepton_partner(&self) -> Pdg {
        if self.0 > 0 {
            Pdg(self.0 - 1)
        } else {
            Pdg(self.0 + 1)
        }
    }

    /// True for protons and neutrons.
    pub fn is_nucleon(&self) -> bool {
        matches!(self.abs(), 2112 | 2212)
    }

    /// Whether the particle carries electric charge. Only the species that
    /// appear in neutrino final states are classified; unknown codes are
    /// treated as neutral.
    pub fn is_charged(&self) -> bool {
        matches!(
            self.abs(),
            11 | 13 | 15 | 211 | 321 | 411 | 431 | 2212 | 3112 | 3222 | 3312 | 2224
        )
    }
}

impl From<i32> for Pdg {
    fn from(raw: i32) -> Self {
        Pdg(raw)
    }
}

impl fmt::Display for Pdg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
