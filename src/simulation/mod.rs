//! Simulation driver
//!
//! Owns the whole game state and advances it one tick at a time in a
//! fixed order: player input, creature AI, projectiles, player meters,
//! pickups, chests, economy sync, effects, respawns. The player's dead
//! state is sticky; ticks are no-ops until [`Simulation::respawn_player`]
//! is called.

pub mod effects;
pub mod events;
pub mod projectile;

pub use effects::{Effect, EffectKind, Effects};
pub use events::{DamageSource, EventQueue, GameEvent};
pub use projectile::Projectile;

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::config::GameConfig;
use crate::creature::HitOutcome;
use crate::creature::Roster;
use crate::economy::{Economy, UpgradeKind};
use crate::entity::{DamageResult, EntityId, Player};
use crate::input::InputState;
use crate::world::{WorldGenerator, WorldLayout};

/// Pickup and chest collection distance
const COLLECT_RADIUS: f32 = 2.0;
const HEALTH_PACK_RESPAWN_INTERVAL: f64 = 30.0;
const HEALTH_PACK_HEIGHT: f32 = 1.0;

const DEATH_BURST_DURATION: f64 = 1.0;
const RESPAWN_FLASH_DURATION: f64 = 0.6;
const GOLD_SPARKLE_DURATION: f64 = 0.3;
const PICKUP_GLOW_DURATION: f64 = 0.5;

/// A floating health pack pickup
#[derive(Debug, Clone)]
pub struct HealthPack {
    pub id: EntityId,
    pub position: Vec3,
}

pub struct Simulation {
    pub layout: WorldLayout,
    pub player: Player,
    pub roster: Roster,
    pub projectiles: Vec<Projectile>,
    pub health_packs: Vec<HealthPack>,
    pub economy: Economy,
    pub events: EventQueue,
    pub effects: Effects,
    time: f64,
    /// When the current life started, for the survival timer
    spawned_at: f64,
    rng: Xoshiro256PlusPlus,
    world_half_extent: f32,
    health_pack_target: usize,
    last_health_pack_spawn: f64,
}

impl Simulation {
    /// Build a fresh world from the configuration
    pub fn new(config: &GameConfig) -> Self {
        let layout = WorldGenerator::new(config.world.clone()).generate();
        // Separate stream from world generation so layout and wildlife
        // rolls stay independent
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.world.seed.wrapping_add(1));
        let roster = Roster::populate(
            &config.spawn,
            &layout,
            config.world.world_half_extent,
            &mut rng,
            0.0,
        );

        let mut simulation = Simulation {
            layout,
            player: Player::new(),
            roster,
            projectiles: Vec::new(),
            health_packs: Vec::new(),
            economy: Economy::new(),
            events: EventQueue::new(),
            effects: Effects::new(),
            time: 0.0,
            spawned_at: 0.0,
            rng,
            world_half_extent: config.world.world_half_extent,
            health_pack_target: config.spawn.health_pack_count,
            last_health_pack_spawn: 0.0,
        };
        for _ in 0..simulation.health_pack_target {
            simulation.spawn_health_pack();
        }
        simulation
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Seconds the current life has lasted
    pub fn survival_time(&self) -> f64 {
        self.time - self.spawned_at
    }

    /// Advance the simulation by `dt` seconds. No-op while the player
    /// is dead.
    pub fn tick(&mut self, input: &InputState, dt: f32) {
        self.time += dt as f64;
        let now = self.time;

        if self.player.is_dead() {
            return;
        }

        self.player.apply_input(input, &self.layout, now, dt);
        if input.reload && !self.player.is_reloading() {
            self.player.start_reload(now);
            self.events.push(GameEvent::ReloadStarted);
        }

        self.update_creatures(now, dt);
        self.update_projectiles(input.fire, now, dt);
        self.update_player_meters(now, dt);
        self.update_health_packs(now);
        self.update_chests(now);
        // Damage upgrades flow into the projectile damage each tick
        self.player.bullet_damage = self.economy.multipliers().damage;
        self.effects.update(now);
        self.update_respawns(now);
    }

    fn update_creatures(&mut self, now: f64, dt: f32) {
        let player_position = self.player.position;
        let mut attacks = Vec::new();
        for (_, creature) in self.roster.iter_alive_mut() {
            if let Some(damage) = creature.update(player_position, &mut self.rng, now, dt) {
                attacks.push((creature.species, damage));
            }
        }
        for (species, damage) in attacks {
            let source = DamageSource::Creature(species);
            // Attacks inside the invulnerability window never land, so
            // they never reach the host's damage feed either
            match self.player.take_damage(damage, now) {
                DamageResult::Ignored => {}
                DamageResult::Applied => {
                    self.events.push(GameEvent::PlayerDamaged {
                        amount: damage,
                        source,
                    });
                }
                DamageResult::Fatal => {
                    self.events.push(GameEvent::PlayerDamaged {
                        amount: damage,
                        source,
                    });
                    self.events.push(GameEvent::PlayerDied {
                        source,
                        survival_time: self.survival_time(),
                    });
                    return;
                }
            }
        }
    }

    fn update_projectiles(&mut self, fire: bool, now: f64, dt: f32) {
        if fire {
            if let Some(projectile) = Projectile::try_fire(&mut self.player, now) {
                self.events.push(GameEvent::ShotFired {
                    projectile: projectile.id,
                });
                self.projectiles.push(projectile);
            }
        }

        let damage = self.player.bullet_damage;
        let bullets = std::mem::take(&mut self.projectiles);
        let mut survivors = Vec::with_capacity(bullets.len());
        'bullets: for mut projectile in bullets {
            projectile.advance(dt);
            if projectile.is_expired(now) {
                continue;
            }

            // Slot order scans dangerous game first
            let hit = self
                .roster
                .iter_alive()
                .find(|(_, c)| {
                    !c.is_hurt(now)
                        && c.position.distance(projectile.position) < c.species.stats().hit_radius
                })
                .map(|(index, _)| index);

            if let Some(index) = hit {
                let Some(creature) = self.roster.get_mut(index) else {
                    survivors.push(projectile);
                    continue;
                };
                let id = creature.id;
                let species = creature.species;
                let position = creature.position;
                match creature.hit(damage, now) {
                    HitOutcome::Ignored => {}
                    HitOutcome::Hurt => {
                        self.events.push(GameEvent::CreatureHit {
                            creature: id,
                            species,
                            position,
                        });
                        continue 'bullets;
                    }
                    HitOutcome::Killed => {
                        self.kill_creature(index, now);
                        continue 'bullets;
                    }
                }
            }
            survivors.push(projectile);
        }
        self.projectiles = survivors;
    }

    fn kill_creature(&mut self, index: usize, now: f64) {
        let Some(creature) = self.roster.get_mut(index) else {
            return;
        };
        let id = creature.id;
        let species = creature.species;
        let position = creature.position;
        let stats = species.stats();

        self.roster.kill(index, now);
        self.player.eat(stats.food_value);
        if stats.pauses_hunger {
            self.player.pause_hunger(now);
        }
        if self.economy.collect(stats.gold_value) {
            self.events.push(GameEvent::GoldMeterFilled {
                level: self.economy.level(),
            });
        }

        log::debug!("{species} killed at {position}");
        self.events.push(GameEvent::CreatureKilled {
            creature: id,
            species,
            position,
            food: stats.food_value,
            gold: stats.gold_value,
        });
        self.effects
            .spawn(EffectKind::DeathBurst, position, now, DEATH_BURST_DURATION);
    }

    fn update_player_meters(&mut self, now: f64, dt: f32) {
        let multipliers = *self.economy.multipliers();
        let outcome = self.player.update(&multipliers, now, dt);
        if let Some(amount) = outcome.starvation_damage {
            self.events.push(GameEvent::PlayerDamaged {
                amount,
                source: DamageSource::Starvation,
            });
        }
        if outcome.died {
            self.events.push(GameEvent::PlayerDied {
                source: DamageSource::Starvation,
                survival_time: self.survival_time(),
            });
        }
        if outcome.reload_finished {
            self.events.push(GameEvent::ReloadFinished);
        }
        if outcome.power_up_ended {
            self.events.push(GameEvent::PowerUpEnded);
        }
    }

    fn spawn_health_pack(&mut self) {
        let extent = self.world_half_extent;
        let position = Vec3::new(
            self.rng.random_range(-extent..extent),
            HEALTH_PACK_HEIGHT,
            self.rng.random_range(-extent..extent),
        );
        self.health_packs.push(HealthPack {
            id: EntityId::new(),
            position,
        });
    }

    fn update_health_packs(&mut self, now: f64) {
        // Top up the pool on a timer after packs are consumed
        if self.health_packs.len() < self.health_pack_target
            && now - self.last_health_pack_spawn > HEALTH_PACK_RESPAWN_INTERVAL
        {
            self.spawn_health_pack();
            self.last_health_pack_spawn = now;
        }

        let player_position = self.player.position;
        let mut collected = None;
        self.health_packs.retain(|pack| {
            if collected.is_none() && pack.position.distance(player_position) < COLLECT_RADIUS {
                collected = Some(pack.position);
                false
            } else {
                true
            }
        });
        if let Some(position) = collected {
            self.player.power_up(now);
            self.events.push(GameEvent::HealthPackCollected { position });
            self.effects
                .spawn(EffectKind::PickupGlow, position, now, PICKUP_GLOW_DURATION);
        }
    }

    fn update_chests(&mut self, now: f64) {
        let player_position = self.player.position;
        let mut opened = Vec::new();
        for chest in &mut self.layout.chests {
            if !chest.collected && chest.position.distance(player_position) < COLLECT_RADIUS {
                chest.collected = true;
                opened.push((chest.kind, chest.value, chest.position));
            }
        }
        for (kind, value, position) in opened {
            if self.economy.collect(value) {
                self.events.push(GameEvent::GoldMeterFilled {
                    level: self.economy.level(),
                });
            }
            self.events.push(GameEvent::ChestCollected { kind, value });
            self.effects
                .spawn(EffectKind::GoldSparkle, position, now, GOLD_SPARKLE_DURATION);
        }
    }

    fn update_respawns(&mut self, now: f64) {
        let respawns = self
            .roster
            .update_respawns(&self.layout, &mut self.rng, now);
        for respawn in respawns {
            self.events.push(GameEvent::CreatureRespawned {
                species: respawn.species,
                position: respawn.position,
            });
            self.effects.spawn(
                EffectKind::RespawnFlash,
                respawn.position,
                now,
                RESPAWN_FLASH_DURATION,
            );
        }
    }

    /// Spend the filled gold meter on an upgrade. Returns false if the
    /// meter is not full or the chosen upgrade is capped.
    pub fn apply_upgrade(&mut self, kind: UpgradeKind) -> bool {
        if !self.economy.upgrade_pending() {
            return false;
        }
        if self.economy.apply_upgrade(kind) {
            self.player.bullet_damage = self.economy.multipliers().damage;
            self.events.push(GameEvent::UpgradeApplied {
                kind,
                level: self.economy.level(),
            });
            true
        } else {
            false
        }
    }

    /// Bring a dead player back: full meters at spawn, economy and
    /// projectiles reset
    pub fn respawn_player(&mut self) {
        self.player.respawn(self.time);
        self.economy.reset();
        self.projectiles.clear();
        self.spawned_at = self.time;
        self.events.push(GameEvent::PlayerRespawned);
    }
}
