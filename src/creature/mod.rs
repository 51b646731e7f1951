pub mod creature;
pub mod roster;
pub mod species;

pub use creature::{AttackPhase, Creature, CreatureState, HitOutcome};
pub use roster::{Respawn, Roster};
pub use species::{Species, SpeciesStats};
