//! # Wildwood - First-Person Wilderness Survival Core
//!
//! The complete simulation of a first-person survival game: procedural
//! landscape generation, player movement and resource meters, wildlife
//! state machines, projectile combat, and a gold economy with stat
//! upgrades. A host (renderer / windowing layer) feeds [`input::InputState`]
//! snapshots into [`simulation::Simulation::tick`] and reads back state
//! and events; nothing in this crate touches a screen.

pub mod config;
pub mod creature;
pub mod economy;
pub mod entity;
pub mod input;
pub mod simulation;
pub mod world;

pub use simulation::Simulation;

/// Common imports for internal use
pub mod prelude {
    pub use crate::config::GameConfig;
    pub use crate::creature::{Creature, CreatureState, Species};
    pub use crate::entity::{Meter, Player, PlayerFlags};
    pub use crate::input::InputState;
    pub use crate::simulation::{GameEvent, Simulation};
    pub use crate::world::WorldLayout;
    pub use glam::{Vec2, Vec3};
}
