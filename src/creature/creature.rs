//! Creature state machine
//!
//! Every creature wanders toward a periodically re-picked target.
//! Predators flip into the Attacking cycle (approach, lunge, retreat)
//! while the player is inside their detection range. Velocity is
//! smoothed toward the desired heading instead of snapping, which gives
//! a drifting, organic movement.

use glam::Vec3;
use rand::Rng;

use crate::creature::species::{
    Species, APPROACH_SPEED_FACTOR, ATTACK_SPEED_FACTOR, RETREAT_SPEED_FACTOR,
};
use crate::entity::EntityId;

/// Sub-stage of the Attacking state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPhase {
    Approach,
    Attack,
    Retreat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatureState {
    Wandering,
    Attacking(AttackPhase),
}

/// Result of a projectile hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Still inside the hit-flash window, no damage dealt
    Ignored,
    Hurt,
    Killed,
}

/// Repeated hits are ignored for this long after a hit lands
const HIT_FLASH_DURATION: f64 = 0.1;

/// Bears drift back toward their home cabin past this distance
const BEAR_LEASH_RANGE: f32 = 70.0;
const BEAR_HOME_RING: std::ops::Range<f32> = 30.0..50.0;
const WOLF_HOME_RING: std::ops::Range<f32> = 15.0..25.0;

/// Bears also re-pick their wander target when this close to it
const BEAR_ARRIVAL_THRESHOLD: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct Creature {
    pub id: EntityId,
    pub species: Species,
    pub position: Vec3,
    pub velocity: Vec3,
    pub target: Vec3,
    pub state: CreatureState,
    pub health: f32,
    /// Individual speed, rolled once at spawn
    pub speed: f32,
    /// Cabin (bears) or campsite (wolves) this creature is tethered to
    pub home: Option<Vec3>,
    /// Cruise altitude for birds, ride height for everyone else
    ride_height: f32,
    last_attack_time: f64,
    last_state_change: f64,
    last_retarget_time: f64,
    hurt_until: f64,
}

impl Creature {
    /// Spawn a creature at a position, rolling its individual speed.
    /// For birds the y of `position` is kept as the cruise altitude.
    pub fn spawn<R: Rng>(
        species: Species,
        position: Vec3,
        home: Option<Vec3>,
        rng: &mut R,
        now: f64,
    ) -> Self {
        let stats = species.stats();
        let ride_height = match species {
            Species::Bird => position.y,
            _ => stats.ride_height,
        };
        let mut creature = Creature {
            id: EntityId::new(),
            species,
            position: Vec3::new(position.x, ride_height, position.z),
            velocity: Vec3::ZERO,
            target: position,
            state: CreatureState::Wandering,
            health: stats.max_health,
            speed: stats.base_speed + rng.random_range(0.0..stats.speed_variance),
            home,
            ride_height,
            last_attack_time: 0.0,
            last_state_change: now,
            last_retarget_time: f64::NEG_INFINITY,
            hurt_until: 0.0,
        };
        creature.pick_wander_target(rng, now);
        creature
    }

    pub fn is_hurt(&self, now: f64) -> bool {
        now < self.hurt_until
    }

    /// Advance one tick. Returns the damage dealt to the player if an
    /// attack landed.
    pub fn update<R: Rng>(
        &mut self,
        player_position: Vec3,
        rng: &mut R,
        now: f64,
        dt: f32,
    ) -> Option<f32> {
        let stats = self.species.stats();
        let mut damage_dealt = None;

        if self.species.is_predator() {
            let distance = self.position.distance(player_position);

            // Detection-range hysteresis between the two top-level states
            if distance <= stats.detection_range {
                if !matches!(self.state, CreatureState::Attacking(_)) {
                    self.state = CreatureState::Attacking(AttackPhase::Approach);
                    self.last_state_change = now;
                }
            } else if self.state != CreatureState::Wandering {
                self.state = CreatureState::Wandering;
                self.last_state_change = now;
                self.pick_wander_target(rng, now);
            }

            if let CreatureState::Attacking(phase) = self.state {
                match phase {
                    AttackPhase::Approach => {
                        if distance <= stats.attack_distance {
                            self.state = CreatureState::Attacking(AttackPhase::Attack);
                            self.last_state_change = now;
                        } else {
                            self.target = player_position;
                        }
                    }
                    AttackPhase::Attack => {
                        if distance <= stats.attack_range
                            && now - self.last_attack_time >= stats.attack_cooldown
                        {
                            damage_dealt = Some(stats.damage);
                            self.last_attack_time = now;
                            self.state = CreatureState::Attacking(AttackPhase::Retreat);
                            self.last_state_change = now;
                            let away = (self.position - player_position).normalize_or_zero();
                            self.target = self.position + away * stats.retreat_distance;
                        }
                    }
                    AttackPhase::Retreat => {
                        if now - self.last_state_change >= stats.retreat_duration {
                            self.state = CreatureState::Attacking(AttackPhase::Approach);
                            self.last_state_change = now;
                        }
                    }
                }
            }
        }

        if self.state == CreatureState::Wandering {
            self.wander(rng, now);
        }

        self.integrate(now, dt);
        damage_dealt
    }

    fn wander<R: Rng>(&mut self, rng: &mut R, now: f64) {
        let stats = self.species.stats();

        // Bears drift home when they stray too far from their cabin
        if self.species == Species::Bear {
            if let Some(home) = self.home {
                if self.position.distance(home) > BEAR_LEASH_RANGE {
                    self.target = ring_point(home, BEAR_HOME_RING, self.ride_height, rng);
                    self.last_retarget_time = now;
                    return;
                }
            }
        }

        let arrived = self.species == Species::Bear
            && self.position.distance(self.target) < BEAR_ARRIVAL_THRESHOLD;
        if arrived || now - self.last_retarget_time > stats.retarget_interval {
            self.pick_wander_target(rng, now);
        }
    }

    fn pick_wander_target<R: Rng>(&mut self, rng: &mut R, now: f64) {
        let stats = self.species.stats();
        let half = stats.wander_span / 2.0;
        self.target = match self.species {
            // Bears and homeless wolves roam relative to where they stand
            Species::Bear => Vec3::new(
                self.position.x + rng.random_range(-half..half),
                self.ride_height,
                self.position.z + rng.random_range(-half..half),
            ),
            Species::Wolf => match self.home {
                Some(home) => ring_point(home, WOLF_HOME_RING, self.ride_height, rng),
                None => Vec3::new(
                    self.position.x + rng.random_range(-half..half),
                    self.ride_height,
                    self.position.z + rng.random_range(-half..half),
                ),
            },
            // Small game picks points anywhere in the world square
            Species::Fox | Species::Bird => Vec3::new(
                rng.random_range(-half..half),
                self.ride_height,
                rng.random_range(-half..half),
            ),
        };
        self.last_retarget_time = now;
    }

    /// Smooth velocity toward the target heading and step the position
    fn integrate(&mut self, _now: f64, dt: f32) {
        let stats = self.species.stats();
        let stage_factor = match self.state {
            CreatureState::Wandering => stats.wander_speed_factor,
            CreatureState::Attacking(AttackPhase::Approach) => APPROACH_SPEED_FACTOR,
            CreatureState::Attacking(AttackPhase::Attack) => ATTACK_SPEED_FACTOR,
            CreatureState::Attacking(AttackPhase::Retreat) => RETREAT_SPEED_FACTOR,
        };
        let desired = (self.target - self.position).normalize_or_zero() * self.speed * stage_factor;
        let alpha = 1.0 - (-stats.steering_rate * dt).exp();
        self.velocity = self.velocity.lerp(desired, alpha);
        self.position += self.velocity * dt;

        // Ground species stay on the ground; birds hold their altitude
        // through the target's y instead
        if self.species != Species::Bird {
            self.position.y = self.ride_height;
        }
    }

    /// Apply a projectile hit. Hits inside the flash window are ignored.
    pub fn hit(&mut self, damage: f32, now: f64) -> HitOutcome {
        if self.is_hurt(now) {
            return HitOutcome::Ignored;
        }
        self.health -= damage;
        self.hurt_until = now + HIT_FLASH_DURATION;
        if self.health <= 0.0 {
            HitOutcome::Killed
        } else {
            HitOutcome::Hurt
        }
    }
}

fn ring_point<R: Rng>(
    center: Vec3,
    ring: std::ops::Range<f32>,
    height: f32,
    rng: &mut R,
) -> Vec3 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let distance = rng.random_range(ring);
    Vec3::new(
        center.x + angle.cos() * distance,
        height,
        center.z + angle.sin() * distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(99)
    }

    fn bear_at(position: Vec3) -> Creature {
        Creature::spawn(Species::Bear, position, None, &mut rng(), 0.0)
    }

    #[test]
    fn test_bear_ignores_distant_player() {
        let mut bear = bear_at(Vec3::new(35.0, 1.2, 0.0));
        let mut r = rng();
        bear.update(Vec3::ZERO, &mut r, 0.1, 1.0 / 60.0);
        assert_eq!(bear.state, CreatureState::Wandering);
    }

    #[test]
    fn test_bear_engagement_cycle() {
        let mut bear = bear_at(Vec3::new(25.0, 1.2, 0.0));
        let mut r = rng();
        let player = Vec3::ZERO;
        let dt = 1.0 / 60.0;

        // Inside detection range: approach
        bear.update(player, &mut r, 0.1, dt);
        assert_eq!(bear.state, CreatureState::Attacking(AttackPhase::Approach));

        // Close the gap: lunge, then the first cooldown-gated attack lands
        bear.position = Vec3::new(2.5, 1.2, 0.0);
        assert_eq!(bear.update(player, &mut r, 0.2, dt), None);
        assert_eq!(bear.state, CreatureState::Attacking(AttackPhase::Attack));
        let damage = bear.update(player, &mut r, 1.3, dt);
        assert_eq!(damage, Some(20.0));
        assert_eq!(bear.state, CreatureState::Attacking(AttackPhase::Retreat));

        // Retreat target points away from the player
        assert!(bear.target.x > bear.position.x);

        // After the retreat duration it comes back around
        bear.update(player, &mut r, 3.0, dt);
        assert_eq!(bear.state, CreatureState::Attacking(AttackPhase::Approach));
    }

    #[test]
    fn test_disengages_when_player_leaves_range() {
        let mut bear = bear_at(Vec3::new(25.0, 1.2, 0.0));
        let mut r = rng();
        bear.update(Vec3::ZERO, &mut r, 0.1, 1.0 / 60.0);
        assert!(matches!(bear.state, CreatureState::Attacking(_)));

        bear.update(Vec3::new(200.0, 2.0, 0.0), &mut r, 0.2, 1.0 / 60.0);
        assert_eq!(bear.state, CreatureState::Wandering);
    }

    #[test]
    fn test_fox_never_attacks() {
        let mut fox = Creature::spawn(Species::Fox, Vec3::new(1.0, 0.3, 0.0), None, &mut rng(), 0.0);
        let mut r = rng();
        for i in 0..300 {
            let damage = fox.update(Vec3::ZERO, &mut r, i as f64 / 60.0, 1.0 / 60.0);
            assert_eq!(damage, None);
            assert_eq!(fox.state, CreatureState::Wandering);
        }
    }

    #[test]
    fn test_hit_flash_window_absorbs_rapid_hits() {
        let mut bear = bear_at(Vec3::ZERO);
        assert_eq!(bear.hit(1.0, 1.0), HitOutcome::Hurt);
        assert_eq!(bear.hit(1.0, 1.05), HitOutcome::Ignored);
        assert_eq!(bear.health, 2.0);

        assert_eq!(bear.hit(1.0, 1.2), HitOutcome::Hurt);
        assert_eq!(bear.hit(1.0, 1.4), HitOutcome::Killed);
    }

    #[test]
    fn test_bear_leashes_back_to_home_cabin() {
        let home = Vec3::ZERO;
        let mut bear = Creature::spawn(
            Species::Bear,
            Vec3::new(100.0, 1.2, 0.0),
            Some(home),
            &mut rng(),
            0.0,
        );
        let mut r = rng();
        bear.update(Vec3::new(500.0, 2.0, 500.0), &mut r, 0.1, 1.0 / 60.0);
        let target_distance = bear.target.distance(home);
        assert!(target_distance >= BEAR_HOME_RING.start && target_distance <= BEAR_HOME_RING.end);
    }

    #[test]
    fn test_wandering_moves_slower_than_approach() {
        let player = Vec3::ZERO;
        let mut r = rng();
        let dt = 1.0 / 60.0;

        let mut wandering = bear_at(Vec3::new(200.0, 1.2, 0.0));
        let mut approaching = bear_at(Vec3::new(25.0, 1.2, 0.0));
        approaching.speed = wandering.speed;

        // Half a second, short enough that the approach does not close
        // to the lunge and slow down
        for i in 0..30 {
            let now = i as f64 * dt as f64;
            wandering.update(player, &mut r, now, dt);
            approaching.update(player, &mut r, now, dt);
        }
        assert!(approaching.velocity.length() > wandering.velocity.length());
    }
}
