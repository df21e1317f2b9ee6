#![deny(missing_docs)]
#![doc = "Interaction records, particle codes, four-vectors and physical constants shared by the NUISANCE measurement crates."]

pub mod constants;
pub mod errors;
pub mod pdg;
pub mod provenance;
pub mod record;
pub mod vector;

pub use constants::PhysicsConstants;
pub use errors::{ErrorInfo, NuisError};
pub use pdg::Pdg;
pub use provenance::{RunProvenance, SchemaVersion};
pub use record::{InteractionMode, InteractionRecord, Particle, NORMAL_STATUS};
pub use vector::{FourVector, MEV_PER_GEV};
