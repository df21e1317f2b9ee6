//! Read-only view over one simulated neutrino interaction.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, NuisError};
use crate::pdg::Pdg;
use crate::vector::FourVector;

/// Generator status code marking a normal final-state particle.
pub const NORMAL_STATUS: i32 = 0;

fn default_alive() -> bool {
    true
}

/// One entry of the interaction record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Signed particle identity.
    pub pdg: Pdg,
    /// Four-momentum in MeV.
    pub p: FourVector,
    /// Whether the particle escaped the target nucleus.
    #[serde(default = "default_alive")]
    pub alive: bool,
    /// Generator status code.
    #[serde(default)]
    pub status: i32,
}

impl Particle {
    /// Creates an alive particle with normal status.
    pub fn new(pdg: impl Into<Pdg>, p: FourVector) -> Self {
        Self {
            pdg: pdg.into(),
            p,
            alive: true,
            status: NORMAL_STATUS,
        }
    }

    /// Overrides the alive flag and status code.
    pub fn with_flags(mut self, alive: bool, status: i32) -> Self {
        self.alive = alive;
        self.status = status;
        self
    }

    /// A particle counts as final state when it is alive, or when its status
    /// marks it as normal regardless of the alive flag.
    pub fn is_final_state(&self) -> bool {
        self.alive || self.status == NORMAL_STATUS
    }
}

/// Interaction channel code. The sign encodes neutrino (positive) versus
/// antineutrino (negative) in the NEUT convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct InteractionMode(i32);

impl InteractionMode {
    /// Creates a mode from its raw code.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw signed code.
    pub const fn as_raw(&self) -> i32 {
        self.0
    }

    /// Charged-current quasi-elastic.
    pub fn is_ccqe(&self) -> bool {
        self.0.abs() == 1
    }

    /// Charged-current quasi-elastic or multi-nucleon (2p2h).
    pub fn is_ccqe_like(&self) -> bool {
        matches!(self.0.abs(), 1 | 2)
    }

    /// Charged-current channels occupy codes below 30.
    pub fn is_charged_current(&self) -> bool {
        self.0 != 0 && self.0.abs() < 30
    }

    /// Whether the mode belongs to a neutrino rather than antineutrino beam.
    pub fn is_neutrino(&self) -> bool {
        self.0 > 0
    }
}

/// A generated interaction: one incoming beam particle, optional target
/// bookkeeping and the ordered outgoing particle list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Interaction channel.
    #[serde(default)]
    pub mode: InteractionMode,
    /// Incoming beam particle.
    pub beam: Particle,
    /// Struck target (nucleon or nucleus) when the generator stores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Particle>,
    /// Outgoing particles in generator order.
    #[serde(default)]
    pub particles: Vec<Particle>,
}

impl InteractionRecord {
    /// Starts a record with the given channel and beam particle.
    pub fn new(mode: i32, beam: Particle) -> Self {
        Self {
            mode: InteractionMode::from_raw(mode),
            beam,
            target: None,
            particles: Vec::new(),
        }
    }

    /// Sets the target entry.
    pub fn with_target(mut self, target: Particle) -> Self {
        self.target = Some(target);
        self
    }

    /// Appends an outgoing particle.
    pub fn with_particle(mut self, particle: Particle) -> Self {
        self.particles.push(particle);
        self
    }

    /// Checks that every stored four-vector is finite.
    pub fn validate(&self) -> Result<(), NuisError> {
        let entries = std::iter::once(&self.beam)
            .chain(self.target.iter())
            .chain(self.particles.iter());
        for (index, particle) in entries.enumerate() {
            let p = particle.p;
            if ![p.e, p.px, p.py, p.pz].iter().all(|value| value.is_finite()) {
                return Err(NuisError::Record(
                    ErrorInfo::new("non-finite-momentum", "particle four-vector is not finite")
                        .with_context("index", index.to_string())
                        .with_context("pdg", particle.pdg.to_string()),
                ));
            }
        }
        Ok(())
    }

    /// The incoming beam particle.
    pub fn beam(&self) -> &Particle {
        &self.beam
    }

    /// Beam energy in MeV.
    pub fn beam_energy(&self) -> f64 {
        self.beam.p.e
    }

    /// True when the incoming beam has the given identity.
    pub fn has_is_particle(&self, pdg: Pdg) -> bool {
        self.beam.pdg == pdg
    }

    /// Iterates over final-state particles in generator order.
    pub fn fs_particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter().filter(|part| part.is_final_state())
    }

    /// Total number of final-state particles.
    pub fn num_fs(&self) -> usize {
        self.fs_particles().count()
    }

    /// Number of final-state particles with exactly this signed code.
    pub fn num_fs_particle(&self, pdg: Pdg) -> usize {
        self.fs_particles().filter(|part| part.pdg == pdg).count()
    }

    /// Whether any final-state particle has exactly this signed code.
    pub fn has_fs_particle(&self, pdg: Pdg) -> bool {
        self.fs_particles().any(|part| part.pdg == pdg)
    }

    /// Highest-momentum final-state particle with this signed code. The
    /// first entry wins ties.
    pub fn hm_fs_particle(&self, pdg: Pdg) -> Option<&Particle> {
        self.fs_particles()
            .filter(|part| part.pdg == pdg)
            .fold(None, |best: Option<&Particle>, part| match best {
                Some(current) if current.p.p2() >= part.p.p2() => Some(current),
                _ => Some(part),
            })
    }

    /// Number of final-state charged leptons of either sign.
    pub fn num_fs_leptons(&self) -> usize {
        self.fs_particles()
            .filter(|part| part.pdg.is_charged_lepton())
            .count()
    }

    /// Number of final-state particles in the meson band.
    pub fn num_fs_mesons(&self) -> usize {
        self.fs_particles().filter(|part| part.pdg.is_meson()).count()
    }

    /// Whether a final-state proton is present.
    pub fn has_fs_proton(&self) -> bool {
        self.has_fs_particle(Pdg::PROTON)
    }

    /// Highest-momentum final-state proton.
    pub fn hm_fs_proton(&self) -> Option<&Particle> {
        self.hm_fs_particle(Pdg::PROTON)
    }

    /// Codes of the first two outgoing entries, where generators place the
    /// primary lepton. Missing slots are `None`.
    pub fn primary_slots(&self) -> [Option<Pdg>; 2] {
        [
            self.particles.first().map(|part| part.pdg),
            self.particles.get(1).map(|part| part.pdg),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numu_beam(energy: f64) -> Particle {
        Particle::new(14, FourVector::new(energy, 0.0, 0.0, energy))
    }

    #[test]
    fn final_state_respects_alive_and_status() {
        let alive = Particle::new(211, FourVector::new(300.0, 0.0, 0.0, 260.0));
        let absorbed = alive.with_flags(false, 3);
        let normal_dead = alive.with_flags(false, NORMAL_STATUS);
        assert!(alive.is_final_state());
        assert!(!absorbed.is_final_state());
        assert!(normal_dead.is_final_state());
    }

    #[test]
    fn highest_momentum_selection() {
        let record = InteractionRecord::new(1, numu_beam(1000.0))
            .with_particle(Particle::new(2212, FourVector::from_mass(938.272, 0.0, 0.0, 200.0)))
            .with_particle(Particle::new(2212, FourVector::from_mass(938.272, 0.0, 450.0, 0.0)))
            .with_particle(
                Particle::new(2212, FourVector::from_mass(938.272, 900.0, 0.0, 0.0))
                    .with_flags(false, 2),
            );
        let best = record.hm_fs_proton().expect("proton");
        assert!((best.p.p() - 450.0).abs() < 1e-9);
        assert_eq!(record.num_fs_particle(Pdg::PROTON), 2);
    }

    #[test]
    fn validate_rejects_nan() {
        let record = InteractionRecord::new(1, numu_beam(f64::NAN));
        let err = record.validate().expect_err("nan beam");
        assert_eq!(err.info().code, "non-finite-momentum");
    }
}
