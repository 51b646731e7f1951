//! Wildlife roster
//!
//! Fixed arena of creature slots. A slot is either alive or holds the
//! death position and timestamp until its respawn timer elapses. Slots
//! are allocated in species order (bears, wolves, foxes, birds), so an
//! in-order scan resolves projectile hits against dangerous game first.

use glam::Vec3;
use rand::Rng;

use crate::config::SpawnConfig;
use crate::creature::creature::Creature;
use crate::creature::species::{Species, BIRD_MAX_ALTITUDE, BIRD_MIN_ALTITUDE};
use crate::world::WorldLayout;

/// Bears spawn on a ring this far from their home cabin
const BEAR_SPAWN_RING: std::ops::Range<f32> = 30.0..50.0;
const BEAR_SPACING: f32 = 20.0;
const BEARS_PER_CABIN: usize = 2;

/// Wolves spawn on a ring around their home campsite
const WOLF_SPAWN_RING: std::ops::Range<f32> = 15.0..25.0;
const WOLF_SPACING: f32 = 10.0;
const MIN_WOLVES_PER_CAMPSITE: usize = 2;
const MAX_WOLVES_PER_CAMPSITE: usize = 3;

/// Respawned small game reappears within this offset of the death spot
const RESPAWN_SCATTER: f32 = 20.0;

#[derive(Debug, Clone)]
enum SlotState {
    Alive(Creature),
    Dead { position: Vec3, died_at: f64 },
}

#[derive(Debug, Clone)]
struct Slot {
    species: Species,
    state: SlotState,
}

/// A creature that came back after its respawn delay
#[derive(Debug, Clone, Copy)]
pub struct Respawn {
    pub species: Species,
    pub position: Vec3,
}

#[derive(Debug, Clone)]
pub struct Roster {
    slots: Vec<Slot>,
    world_half_extent: f32,
}

impl Roster {
    /// Populate the initial wildlife. Bears den near cabins, wolves
    /// around campsites with the remainder loose in the forest, foxes
    /// and birds anywhere in the world square.
    pub fn populate<R: Rng>(
        spawn: &SpawnConfig,
        layout: &WorldLayout,
        world_half_extent: f32,
        rng: &mut R,
        now: f64,
    ) -> Self {
        let mut roster = Roster {
            slots: Vec::new(),
            world_half_extent,
        };

        let mut bears_left = spawn.bear_count;
        'cabins: for cabin in &layout.cabins {
            let count = 1 + rng.random_range(0..BEARS_PER_CABIN);
            for _ in 0..count {
                if bears_left == 0 {
                    break 'cabins;
                }
                let position = ring_point(cabin.position, BEAR_SPAWN_RING, rng);
                if roster.is_spaced(Species::Bear, position, BEAR_SPACING) {
                    roster.add(Species::Bear, position, Some(cabin.position), rng, now);
                    bears_left -= 1;
                }
            }
        }

        let mut wolves_left = spawn.wolf_count;
        'campsites: for campsite in &layout.campsites {
            let count = rng.random_range(MIN_WOLVES_PER_CAMPSITE..=MAX_WOLVES_PER_CAMPSITE);
            for _ in 0..count {
                if wolves_left == 0 {
                    break 'campsites;
                }
                let position = ring_point(campsite.position, WOLF_SPAWN_RING, rng);
                if roster.is_spaced(Species::Wolf, position, WOLF_SPACING) {
                    roster.add(Species::Wolf, position, Some(campsite.position), rng, now);
                    wolves_left -= 1;
                }
            }
        }
        for _ in 0..wolves_left {
            let position = roster.random_ground_point(rng);
            roster.add(Species::Wolf, position, None, rng, now);
        }

        for _ in 0..spawn.fox_count {
            let position = roster.random_ground_point(rng);
            roster.add(Species::Fox, position, None, rng, now);
        }

        for _ in 0..spawn.bird_count {
            let mut position = roster.random_ground_point(rng);
            position.y = rng.random_range(BIRD_MIN_ALTITUDE..BIRD_MAX_ALTITUDE);
            roster.add(Species::Bird, position, None, rng, now);
        }

        log::info!(
            "Populated roster: {} slots ({} bears, {} wolves, {} foxes, {} birds)",
            roster.slots.len(),
            roster.alive_count(Species::Bear),
            roster.alive_count(Species::Wolf),
            roster.alive_count(Species::Fox),
            roster.alive_count(Species::Bird),
        );
        roster
    }

    fn add<R: Rng>(
        &mut self,
        species: Species,
        position: Vec3,
        home: Option<Vec3>,
        rng: &mut R,
        now: f64,
    ) {
        let creature = Creature::spawn(species, position, home, rng, now);
        self.slots.push(Slot {
            species,
            state: SlotState::Alive(creature),
        });
    }

    fn is_spaced(&self, species: Species, position: Vec3, spacing: f32) -> bool {
        self.iter_alive()
            .filter(|(_, c)| c.species == species)
            .all(|(_, c)| c.position.distance(position) >= spacing)
    }

    fn random_ground_point<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let extent = self.world_half_extent;
        Vec3::new(
            rng.random_range(-extent..extent),
            0.0,
            rng.random_range(-extent..extent),
        )
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn alive_count(&self, species: Species) -> usize {
        self.iter_alive().filter(|(_, c)| c.species == species).count()
    }

    /// Alive creatures in slot order (bears first, then wolves, foxes,
    /// birds)
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, &Creature)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            if let SlotState::Alive(creature) = &slot.state {
                Some((i, creature))
            } else {
                None
            }
        })
    }

    pub fn iter_alive_mut(&mut self) -> impl Iterator<Item = (usize, &mut Creature)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| {
            if let SlotState::Alive(creature) = &mut slot.state {
                Some((i, creature))
            } else {
                None
            }
        })
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Creature> {
        match self.slots.get_mut(index) {
            Some(Slot {
                state: SlotState::Alive(creature),
                ..
            }) => Some(creature),
            _ => None,
        }
    }

    /// Mark a slot dead, recording where and when for the respawn
    pub fn kill(&mut self, index: usize, now: f64) -> Option<Species> {
        let slot = self.slots.get_mut(index)?;
        if let SlotState::Alive(creature) = &slot.state {
            slot.state = SlotState::Dead {
                position: creature.position,
                died_at: now,
            };
            Some(slot.species)
        } else {
            None
        }
    }

    /// Respawn every dead slot whose species delay has elapsed.
    /// Bears, foxes and birds come back scattered around where they
    /// died; wolves re-den at a random campsite or loose in the forest.
    pub fn update_respawns<R: Rng>(
        &mut self,
        layout: &WorldLayout,
        rng: &mut R,
        now: f64,
    ) -> Vec<Respawn> {
        let mut respawns = Vec::new();
        let extent = self.world_half_extent;
        for slot in &mut self.slots {
            let SlotState::Dead { position, died_at } = slot.state else {
                continue;
            };
            if now - died_at < slot.species.stats().respawn_delay {
                continue;
            }
            let (spawn_at, home) = match slot.species {
                Species::Wolf => {
                    if !layout.campsites.is_empty() && rng.random::<bool>() {
                        let campsite =
                            layout.campsites[rng.random_range(0..layout.campsites.len())].position;
                        (ring_point(campsite, WOLF_SPAWN_RING, rng), Some(campsite))
                    } else {
                        let forest = Vec3::new(
                            rng.random_range(-extent..extent),
                            0.0,
                            rng.random_range(-extent..extent),
                        );
                        (forest, None)
                    }
                }
                Species::Bird => {
                    let mut at = scatter(position, rng);
                    at.y = rng.random_range(BIRD_MIN_ALTITUDE..BIRD_MAX_ALTITUDE);
                    (at, None)
                }
                _ => (scatter(position, rng), None),
            };
            let creature = Creature::spawn(slot.species, spawn_at, home, rng, now);
            respawns.push(Respawn {
                species: slot.species,
                position: creature.position,
            });
            slot.state = SlotState::Alive(creature);
        }
        respawns
    }
}

fn ring_point<R: Rng>(center: Vec3, ring: std::ops::Range<f32>, rng: &mut R) -> Vec3 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let distance = rng.random_range(ring);
    Vec3::new(
        center.x + angle.cos() * distance,
        0.0,
        center.z + angle.sin() * distance,
    )
}

fn scatter<R: Rng>(position: Vec3, rng: &mut R) -> Vec3 {
    let half = RESPAWN_SCATTER / 2.0;
    position
        + Vec3::new(
            rng.random_range(-half..half),
            0.0,
            rng.random_range(-half..half),
        )
}
