//! Species definitions and tuning tables
//!
//! One static stats record per species. Predators (bears, wolves) carry
//! the full attack parameter set; for passive species (foxes, birds)
//! those fields are unused and the creature never leaves Wandering.

use serde::{Deserialize, Serialize};

/// The four wildlife species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Bear,
    Wolf,
    Fox,
    Bird,
}

impl Species {
    pub fn stats(self) -> &'static SpeciesStats {
        match self {
            Species::Bear => &BEAR,
            Species::Wolf => &WOLF,
            Species::Fox => &FOX,
            Species::Bird => &BIRD,
        }
    }

    pub fn is_predator(self) -> bool {
        self.stats().damage > 0.0
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Species::Bear => "bear",
            Species::Wolf => "wolf",
            Species::Fox => "fox",
            Species::Bird => "bird",
        };
        f.write_str(name)
    }
}

/// Per-species tuning. Speeds are units per second, times in seconds.
#[derive(Debug, Clone)]
pub struct SpeciesStats {
    /// Base movement speed; individuals add a random variance on top
    pub base_speed: f32,
    pub speed_variance: f32,
    /// Exponential smoothing rate for steering toward the target
    pub steering_rate: f32,
    /// Height above ground the body travels at
    pub ride_height: f32,

    /// Player proximity that flips a predator into Attacking (0 = passive)
    pub detection_range: f32,
    /// Max distance at which a landed attack deals damage
    pub attack_range: f32,
    /// Approach closes to this distance before the attack lunge
    pub attack_distance: f32,
    pub damage: f32,
    pub attack_cooldown: f64,
    pub retreat_duration: f64,
    pub retreat_distance: f32,

    /// Projectile hits to kill
    pub max_health: f32,
    /// Hunger restored to the player on kill
    pub food_value: f32,
    /// Gold awarded on kill
    pub gold_value: u32,
    /// Eating this species also pauses hunger drain for a few seconds
    pub pauses_hunger: bool,
    pub respawn_delay: f64,
    /// Projectile collision radius
    pub hit_radius: f32,

    /// How often a wandering creature re-picks its target
    pub retarget_interval: f64,
    /// Span of the random wander offset (relative species) or of the
    /// whole roaming square (absolute species)
    pub wander_span: f32,
    /// Speed factor while wandering
    pub wander_speed_factor: f32,
}

pub static BEAR: SpeciesStats = SpeciesStats {
    base_speed: 9.0,
    speed_variance: 3.0,
    steering_rate: 3.0,
    ride_height: 1.2,
    detection_range: 30.0,
    attack_range: 4.0,
    attack_distance: 3.0,
    damage: 20.0,
    attack_cooldown: 1.0,
    retreat_duration: 1.5,
    retreat_distance: 8.0,
    max_health: 3.0,
    food_value: 50.0,
    gold_value: 15,
    pauses_hunger: true,
    respawn_delay: 8.0,
    hit_radius: 2.0,
    retarget_interval: 10.0,
    wander_span: 100.0,
    wander_speed_factor: 0.5,
};

pub static WOLF: SpeciesStats = SpeciesStats {
    base_speed: 15.0,
    speed_variance: 3.0,
    steering_rate: 3.0,
    ride_height: 1.2,
    detection_range: 30.0,
    attack_range: 3.5,
    attack_distance: 2.5,
    damage: 15.0,
    attack_cooldown: 0.8,
    retreat_duration: 0.8,
    retreat_distance: 6.0,
    max_health: 2.0,
    food_value: 30.0,
    gold_value: 10,
    pauses_hunger: true,
    respawn_delay: 7.0,
    hit_radius: 1.0,
    retarget_interval: 3.0,
    wander_span: 40.0,
    wander_speed_factor: 1.0,
};

pub static FOX: SpeciesStats = SpeciesStats {
    base_speed: 3.0,
    speed_variance: 3.0,
    steering_rate: 1.2,
    ride_height: 0.3,
    detection_range: 0.0,
    attack_range: 0.0,
    attack_distance: 0.0,
    damage: 0.0,
    attack_cooldown: 0.0,
    retreat_duration: 0.0,
    retreat_distance: 0.0,
    max_health: 1.0,
    food_value: 20.0,
    gold_value: 5,
    pauses_hunger: false,
    respawn_delay: 6.0,
    hit_radius: 1.0,
    retarget_interval: 5.0,
    wander_span: 800.0,
    wander_speed_factor: 1.0,
};

pub static BIRD: SpeciesStats = SpeciesStats {
    base_speed: 12.0,
    speed_variance: 6.0,
    steering_rate: 1.2,
    ride_height: 0.0,
    detection_range: 0.0,
    attack_range: 0.0,
    attack_distance: 0.0,
    damage: 0.0,
    attack_cooldown: 0.0,
    retreat_duration: 0.0,
    retreat_distance: 0.0,
    max_health: 1.0,
    food_value: 15.0,
    gold_value: 5,
    pauses_hunger: false,
    respawn_delay: 5.0,
    hit_radius: 1.0,
    retarget_interval: 5.0,
    wander_span: 800.0,
    wander_speed_factor: 1.0,
};

/// Birds cruise at a random altitude in this band
pub const BIRD_MIN_ALTITUDE: f32 = 20.0;
pub const BIRD_MAX_ALTITUDE: f32 = 50.0;

/// Stage speed factors inside the Attacking state
pub const APPROACH_SPEED_FACTOR: f32 = 1.5;
pub const ATTACK_SPEED_FACTOR: f32 = 0.1;
pub const RETREAT_SPEED_FACTOR: f32 = 2.0;
