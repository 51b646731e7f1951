//! Game event queue
//!
//! Systems emit events during the tick; the host drains them afterward
//! to drive audio, HUD flashes and scene updates without coupling the
//! simulation to any presentation layer.

use glam::Vec3;

use crate::creature::Species;
use crate::economy::UpgradeKind;
use crate::entity::EntityId;
use crate::world::ChestKind;

/// What hurt the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Creature(Species),
    Starvation,
}

#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A projectile left the muzzle
    ShotFired { projectile: EntityId },
    /// A projectile connected without killing
    CreatureHit {
        creature: EntityId,
        species: Species,
        position: Vec3,
    },
    /// A creature died; food was eaten and gold awarded
    CreatureKilled {
        creature: EntityId,
        species: Species,
        position: Vec3,
        food: f32,
        gold: u32,
    },
    /// A dead slot came back after its respawn delay
    CreatureRespawned { species: Species, position: Vec3 },
    PlayerDamaged { amount: f32, source: DamageSource },
    PlayerDied {
        source: DamageSource,
        /// Seconds survived since spawn or last respawn
        survival_time: f64,
    },
    PlayerRespawned,
    ReloadStarted,
    ReloadFinished,
    ChestCollected { kind: ChestKind, value: u32 },
    HealthPackCollected { position: Vec3 },
    PowerUpEnded,
    /// The gold meter filled; an upgrade choice is pending
    GoldMeterFilled { level: u32 },
    UpgradeApplied { kind: UpgradeKind, level: u32 },
}

/// Events are pushed during the tick and drained by the host afterward
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
