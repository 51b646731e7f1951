//! The player entity
//!
//! First-person movement (walk/sprint/jump), the four resource meters,
//! damage/death/respawn handling and the health-pack power-up. All
//! tuning constants live here; rates are per second of simulated time.

use glam::Vec3;

use crate::economy::Multipliers;
use crate::entity::Meter;
use crate::input::InputState;
use crate::world::WorldLayout;

bitflags::bitflags! {
    /// Boolean player state, readable by the host for HUD/overlay display
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PlayerFlags: u16 {
        const RUNNING    = 1 << 0;
        const AIMING     = 1 << 1;
        const JUMPING    = 1 << 2;
        const RELOADING  = 1 << 3;
        const POWERED_UP = 1 << 4;
        /// Recently damaged (invulnerability window active)
        const HURT       = 1 << 5;
        const DEAD       = 1 << 6;
    }
}

pub const PLAYER_RADIUS: f32 = 0.5;
pub const SHOT_COOLDOWN: f64 = 0.5;

const WALK_SPEED: f32 = 6.0;
const SPRINT_SPEED: f32 = 24.0;
const POWERED_SPRINT_SPEED: f32 = 48.0;
const JUMP_IMPULSE: f32 = 9.0;
const GRAVITY: f32 = 21.6;
const EYE_HEIGHT: f32 = 2.0;
const MOUSE_SENSITIVITY: f32 = 0.002;
const PITCH_LIMIT: f32 = 1.55;

const MAX_HEALTH: f32 = 100.0;
const MAX_STAMINA: f32 = 200.0;
const MAX_HUNGER: f32 = 100.0;
const MAX_AMMO: f32 = 20.0;

const STAMINA_DRAIN_RATE: f32 = 20.0;
const STAMINA_REGEN_RATE: f32 = 35.0;
const STAMINA_REGEN_DELAY: f64 = 0.5;
const HEALTH_REGEN_RATE: f32 = 5.0;
const HEALTH_REGEN_DELAY: f64 = 5.0;
const HUNGER_DRAIN_RATE: f32 = 2.0;
const SPRINT_HUNGER_FACTOR: f32 = 1.5;
const STARVATION_DAMAGE: f32 = 5.0;
const STARVATION_INTERVAL: f64 = 2.0;
const HUNGER_PAUSE_DURATION: f64 = 5.0;
const INVULNERABILITY_WINDOW: f64 = 1.0;
const RELOAD_TIME: f64 = 2.0;
const POWER_UP_DURATION: f64 = 15.0;
const HEALTH_PACK_VALUE: f32 = 30.0;

const SPAWN_POSITION: Vec3 = Vec3::new(0.0, EYE_HEIGHT, 5.0);

/// How an incoming hit landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    /// Shrugged off: dead, powered up, or inside the invulnerability window
    Ignored,
    Applied,
    Fatal,
}

/// What happened to the player during one meter update
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerTickOutcome {
    /// Health actually lost to a starvation tick this update
    pub starvation_damage: Option<f32>,
    /// The player died this tick
    pub died: bool,
    /// A reload completed (ammo refilled)
    pub reload_finished: bool,
    /// The power-up buff expired
    pub power_up_ended: bool,
}

/// The player entity
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub vertical_velocity: f32,
    /// Normalized horizontal movement direction this frame (zero when idle)
    pub move_dir: Vec3,

    pub health: Meter,
    pub stamina: Meter,
    pub hunger: Meter,
    pub ammo: Meter,
    pub flags: PlayerFlags,

    /// Projectile damage per hit, scaled by the damage upgrade multiplier
    pub bullet_damage: f32,

    pub last_damage_time: f64,
    pub last_stamina_use: f64,
    pub last_shot_time: f64,
    last_hunger_damage: f64,
    hunger_pause_until: f64,
    power_up_until: f64,
    invulnerable_until: f64,
    reload_done_at: f64,
}

impl Player {
    /// Create a player at the spawn point with full meters
    pub fn new() -> Self {
        Player {
            position: SPAWN_POSITION,
            yaw: 0.0,
            pitch: 0.0,
            vertical_velocity: 0.0,
            move_dir: Vec3::ZERO,
            health: Meter::full(MAX_HEALTH),
            stamina: Meter::full(MAX_STAMINA),
            hunger: Meter::full(MAX_HUNGER),
            ammo: Meter::full(MAX_AMMO),
            flags: PlayerFlags::empty(),
            bullet_damage: 1.0,
            last_damage_time: 0.0,
            last_stamina_use: 0.0,
            last_shot_time: f64::NEG_INFINITY,
            last_hunger_damage: 0.0,
            hunger_pause_until: 0.0,
            power_up_until: 0.0,
            invulnerable_until: 0.0,
            reload_done_at: 0.0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.flags.contains(PlayerFlags::DEAD)
    }

    pub fn is_powered_up(&self) -> bool {
        self.flags.contains(PlayerFlags::POWERED_UP)
    }

    /// Direction the player is looking, for aiming projectiles
    pub fn look_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Apply one frame of input: look, horizontal movement with collision
    /// rejection, jump/gravity, and stamina drain. No-op while dead.
    pub fn apply_input(&mut self, input: &InputState, layout: &WorldLayout, now: f64, dt: f32) {
        if self.is_dead() {
            return;
        }

        self.yaw -= input.look_delta.x * MOUSE_SENSITIVITY;
        self.pitch = (self.pitch - input.look_delta.y * MOUSE_SENSITIVITY)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.flags.set(PlayerFlags::AIMING, input.aim);

        let running = input.sprint && !self.stamina.is_empty();
        self.flags.set(PlayerFlags::RUNNING, running);
        let speed = if running {
            if self.is_powered_up() {
                POWERED_SPRINT_SPEED
            } else {
                SPRINT_SPEED
            }
        } else {
            WALK_SPEED
        };

        // Camera-relative horizontal movement
        let axes = input.move_axes();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let forward = Vec3::new(-sin_yaw, 0.0, -cos_yaw);
        let right = Vec3::new(cos_yaw, 0.0, -sin_yaw);
        self.move_dir = (right * axes.x + forward * axes.y).normalize_or_zero();

        // Proposed step is rejected wholesale on collision (no sliding)
        let proposed = self.position + self.move_dir * speed * dt;
        if !layout.blocks(proposed, PLAYER_RADIUS) {
            self.position = proposed;
        }

        // Jump is gated to one until grounded
        if input.jump && !self.flags.contains(PlayerFlags::JUMPING) {
            self.vertical_velocity = JUMP_IMPULSE;
            self.flags.insert(PlayerFlags::JUMPING);
        }
        self.position.y += self.vertical_velocity * dt;
        self.vertical_velocity -= GRAVITY * dt;
        if self.position.y <= EYE_HEIGHT {
            self.position.y = EYE_HEIGHT;
            self.vertical_velocity = 0.0;
            self.flags.remove(PlayerFlags::JUMPING);
        }

        // Sprinting drains stamina; the power-up suspends the drain
        if running && self.move_dir != Vec3::ZERO {
            if !self.is_powered_up() {
                self.stamina.drain(STAMINA_DRAIN_RATE * dt);
            }
            self.last_stamina_use = now;
        }
    }

    /// Advance the meters: regen after delays, hunger drain while moving,
    /// starvation damage, and expiry of timed states. No-op while dead.
    pub fn update(&mut self, multipliers: &Multipliers, now: f64, dt: f32) -> PlayerTickOutcome {
        let mut outcome = PlayerTickOutcome::default();
        if self.is_dead() {
            return outcome;
        }

        if self.flags.contains(PlayerFlags::HURT) && now >= self.invulnerable_until {
            self.flags.remove(PlayerFlags::HURT);
        }
        if self.is_powered_up() && now >= self.power_up_until {
            self.flags.remove(PlayerFlags::POWERED_UP);
            outcome.power_up_ended = true;
        }
        if self.flags.contains(PlayerFlags::RELOADING) && now >= self.reload_done_at {
            self.ammo.refill();
            self.flags.remove(PlayerFlags::RELOADING);
            outcome.reload_finished = true;
        }

        if now - self.last_damage_time > HEALTH_REGEN_DELAY {
            self.health
                .restore(HEALTH_REGEN_RATE * multipliers.health * dt);
        }
        if now - self.last_stamina_use > STAMINA_REGEN_DELAY {
            self.stamina
                .restore(STAMINA_REGEN_RATE * multipliers.stamina * dt);
        }

        // Hunger drains only while moving, never while powered up or
        // during the pause granted by a bear kill
        let moving = self.move_dir != Vec3::ZERO;
        if moving && !self.is_powered_up() && now >= self.hunger_pause_until {
            let factor = if self.flags.contains(PlayerFlags::RUNNING) {
                SPRINT_HUNGER_FACTOR
            } else {
                1.0
            };
            self.hunger
                .drain(HUNGER_DRAIN_RATE * factor * dt / multipliers.hunger);
        }

        if self.hunger.is_empty() && now - self.last_hunger_damage > STARVATION_INTERVAL {
            self.last_hunger_damage = now;
            match self.take_damage(STARVATION_DAMAGE, now) {
                DamageResult::Ignored => {}
                DamageResult::Applied => outcome.starvation_damage = Some(STARVATION_DAMAGE),
                DamageResult::Fatal => {
                    outcome.starvation_damage = Some(STARVATION_DAMAGE);
                    outcome.died = true;
                }
            }
        }

        outcome
    }

    /// Apply damage to the player. Hits while powered up, inside the
    /// invulnerability window, or dead are ignored so callers can tell
    /// reported damage apart from damage that landed.
    pub fn take_damage(&mut self, amount: f32, now: f64) -> DamageResult {
        if self.is_dead() || self.is_powered_up() || now < self.invulnerable_until {
            return DamageResult::Ignored;
        }
        self.health.drain(amount);
        self.last_damage_time = now;
        self.invulnerable_until = now + INVULNERABILITY_WINDOW;
        self.flags.insert(PlayerFlags::HURT);
        if self.health.is_empty() {
            self.die();
            DamageResult::Fatal
        } else {
            DamageResult::Applied
        }
    }

    /// Transition to the terminal dead state; only `respawn` leaves it
    pub fn die(&mut self) {
        self.flags = PlayerFlags::DEAD;
        self.move_dir = Vec3::ZERO;
        self.vertical_velocity = 0.0;
        log::info!("Player died");
    }

    /// Reset to spawn with full meters and base damage
    pub fn respawn(&mut self, now: f64) {
        self.position = SPAWN_POSITION;
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.vertical_velocity = 0.0;
        self.move_dir = Vec3::ZERO;
        self.health.refill();
        self.stamina.refill();
        self.hunger.refill();
        self.ammo.refill();
        self.flags = PlayerFlags::empty();
        self.bullet_damage = 1.0;
        self.last_damage_time = now;
        self.last_stamina_use = now;
        self.last_shot_time = f64::NEG_INFINITY;
        self.last_hunger_damage = now;
        self.hunger_pause_until = 0.0;
        self.power_up_until = 0.0;
        self.invulnerable_until = 0.0;
        self.reload_done_at = 0.0;
    }

    /// Restore hunger from eating a kill
    pub fn eat(&mut self, amount: f32) {
        self.hunger.restore(amount);
    }

    /// Suspend hunger drain for a few seconds (bear kills)
    pub fn pause_hunger(&mut self, now: f64) {
        self.hunger_pause_until = now + HUNGER_PAUSE_DURATION;
    }

    /// Collect a health pack: heal, full stamina, plus a timed buff
    /// (faster sprint, no hunger drain, damage immunity)
    pub fn power_up(&mut self, now: f64) {
        self.health.restore(HEALTH_PACK_VALUE);
        self.stamina.refill();
        self.flags.insert(PlayerFlags::POWERED_UP);
        self.power_up_until = now + POWER_UP_DURATION;
    }

    /// Begin reloading. Allowed even with full ammo; ignored while
    /// already reloading or dead.
    pub fn start_reload(&mut self, now: f64) {
        if self.is_dead() || self.flags.contains(PlayerFlags::RELOADING) {
            return;
        }
        self.flags.insert(PlayerFlags::RELOADING);
        self.reload_done_at = now + RELOAD_TIME;
    }

    pub fn is_reloading(&self) -> bool {
        self.flags.contains(PlayerFlags::RELOADING)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn empty_layout() -> WorldLayout {
        WorldLayout::empty(SPAWN_POSITION)
    }

    fn forward_input() -> InputState {
        InputState {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_walk_moves_at_walk_speed() {
        let mut player = Player::new();
        let layout = empty_layout();
        let start = player.position;

        player.apply_input(&forward_input(), &layout, 0.0, 1.0);

        // Yaw 0 faces -Z
        let moved = start.z - player.position.z;
        assert!((moved - WALK_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_sprint_drains_stamina_and_regen_after_delay() {
        let mut player = Player::new();
        let layout = empty_layout();
        let mut input = forward_input();
        input.sprint = true;

        player.apply_input(&input, &layout, 0.0, 1.0);
        assert_eq!(player.stamina.current(), MAX_STAMINA - STAMINA_DRAIN_RATE);
        assert!(player.flags.contains(PlayerFlags::RUNNING));

        // Within the regen delay nothing comes back
        player.update(&Multipliers::default(), 0.3, 0.1);
        assert_eq!(player.stamina.current(), MAX_STAMINA - STAMINA_DRAIN_RATE);

        // After the delay stamina regenerates
        player.update(&Multipliers::default(), 1.0, 1.0);
        assert_eq!(
            player.stamina.current(),
            MAX_STAMINA - STAMINA_DRAIN_RATE + STAMINA_REGEN_RATE
        );
    }

    #[test]
    fn test_sprint_without_stamina_falls_back_to_walk() {
        let mut player = Player::new();
        let layout = empty_layout();
        player.stamina.set(0.0);
        let mut input = forward_input();
        input.sprint = true;

        let start = player.position;
        player.apply_input(&input, &layout, 0.0, 1.0);
        assert!(!player.flags.contains(PlayerFlags::RUNNING));
        let moved = start.z - player.position.z;
        assert!((moved - WALK_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_jump_is_gated_until_landing() {
        let mut player = Player::new();
        let layout = empty_layout();
        let mut input = InputState {
            jump: true,
            ..Default::default()
        };
        let dt = 1.0 / 60.0;

        player.apply_input(&input, &layout, 0.0, dt);
        assert!(player.flags.contains(PlayerFlags::JUMPING));
        assert!(player.position.y > EYE_HEIGHT);

        // Holding jump mid-air does not re-trigger the impulse
        let airborne_velocity = player.vertical_velocity;
        player.apply_input(&input, &layout, 0.1, dt);
        assert!(player.vertical_velocity < airborne_velocity);

        // Fall until landing
        input.jump = false;
        for i in 0..120 {
            player.apply_input(&input, &layout, 0.2 + i as f64 * dt as f64, dt);
        }
        assert_eq!(player.position.y, EYE_HEIGHT);
        assert!(!player.flags.contains(PlayerFlags::JUMPING));
        assert_eq!(player.vertical_velocity, 0.0);
    }

    #[test]
    fn test_take_damage_and_invulnerability_window() {
        let mut player = Player::new();

        assert_eq!(player.take_damage(20.0, 10.0), DamageResult::Applied);
        assert_eq!(player.health.current(), 80.0);
        assert!(player.flags.contains(PlayerFlags::HURT));

        // Second hit inside the window is ignored
        assert_eq!(player.take_damage(20.0, 10.5), DamageResult::Ignored);
        assert_eq!(player.health.current(), 80.0);

        // After the window it lands
        assert_eq!(player.take_damage(20.0, 11.5), DamageResult::Applied);
        assert_eq!(player.health.current(), 60.0);
    }

    #[test]
    fn test_power_up_grants_immunity() {
        let mut player = Player::new();
        player.health.set(50.0);
        player.power_up(0.0);
        assert_eq!(player.health.current(), 80.0);

        assert_eq!(player.take_damage(20.0, 1.0), DamageResult::Ignored);
        assert_eq!(player.health.current(), 80.0);

        // Buff expires after its duration
        let outcome = player.update(&Multipliers::default(), 16.0, 0.1);
        assert!(outcome.power_up_ended);
        assert!(!player.is_powered_up());
    }

    #[test]
    fn test_death_is_sticky() {
        let mut player = Player::new();
        player.health.set(10.0);
        assert_eq!(player.take_damage(10.0, 5.0), DamageResult::Fatal);
        assert!(player.is_dead());

        // No movement, damage, or regen while dead
        let layout = empty_layout();
        let start = player.position;
        player.apply_input(&forward_input(), &layout, 6.0, 1.0);
        assert_eq!(player.position, start);
        assert_eq!(player.take_damage(50.0, 7.0), DamageResult::Ignored);
        player.update(&Multipliers::default(), 20.0, 1.0);
        assert_eq!(player.health.current(), 0.0);
    }

    #[test]
    fn test_respawn_resets_everything() {
        let mut player = Player::new();
        player.health.set(0.0);
        player.die();
        player.bullet_damage = 2.0;

        player.respawn(30.0);
        assert!(!player.is_dead());
        assert!(player.health.is_full());
        assert!(player.stamina.is_full());
        assert!(player.hunger.is_full());
        assert!(player.ammo.is_full());
        assert_eq!(player.bullet_damage, 1.0);
        assert_eq!(player.position, SPAWN_POSITION);
    }

    #[test]
    fn test_hunger_drains_only_while_moving() {
        let mut player = Player::new();
        let layout = empty_layout();
        let mult = Multipliers::default();

        // Idle: no drain
        player.update(&mult, 0.1, 1.0);
        assert!(player.hunger.is_full());

        // Moving: drains at the base rate
        player.apply_input(&forward_input(), &layout, 0.2, 1.0 / 60.0);
        player.update(&mult, 0.2, 1.0);
        assert_eq!(player.hunger.current(), MAX_HUNGER - HUNGER_DRAIN_RATE);
    }

    #[test]
    fn test_hunger_pause_after_bear_kill() {
        let mut player = Player::new();
        let layout = empty_layout();
        let mult = Multipliers::default();

        player.pause_hunger(0.0);
        player.apply_input(&forward_input(), &layout, 1.0, 1.0 / 60.0);
        player.update(&mult, 1.0, 1.0);
        assert!(player.hunger.is_full());

        // Pause over: drain resumes
        player.apply_input(&forward_input(), &layout, 6.0, 1.0 / 60.0);
        player.update(&mult, 6.0, 1.0);
        assert!(player.hunger.current() < MAX_HUNGER);
    }

    #[test]
    fn test_starvation_damage_ticks() {
        let mut player = Player::new();
        player.hunger.set(0.0);
        let mult = Multipliers::default();

        let outcome = player.update(&mult, 3.0, 0.1);
        assert_eq!(outcome.starvation_damage, Some(STARVATION_DAMAGE));
        assert_eq!(player.health.current(), MAX_HEALTH - STARVATION_DAMAGE);

        // Next tick is inside the starvation interval
        let outcome = player.update(&mult, 3.1, 0.1);
        assert!(outcome.starvation_damage.is_none());
    }

    #[test]
    fn test_starvation_blocked_by_immunity_reports_nothing() {
        let mut player = Player::new();
        player.hunger.set(0.0);
        player.power_up(0.0);
        let health = player.health.current();

        let outcome = player.update(&Multipliers::default(), 3.0, 0.1);
        assert!(outcome.starvation_damage.is_none());
        assert_eq!(player.health.current(), health);
    }

    #[test]
    fn test_reload_completes_after_delay() {
        let mut player = Player::new();
        player.ammo.set(3.0);
        player.start_reload(0.0);
        assert!(player.is_reloading());

        let outcome = player.update(&Multipliers::default(), 1.0, 0.1);
        assert!(!outcome.reload_finished);
        assert_eq!(player.ammo.current(), 3.0);

        let outcome = player.update(&Multipliers::default(), 2.1, 0.1);
        assert!(outcome.reload_finished);
        assert!(player.ammo.is_full());
        assert!(!player.is_reloading());
    }

    #[test]
    fn test_look_direction_follows_mouse() {
        let mut player = Player::new();
        let layout = empty_layout();
        assert!((player.look_direction() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);

        // Mouse delta turns the view; pitch is clamped
        let input = InputState {
            look_delta: Vec2::new(0.0, -10_000.0),
            ..Default::default()
        };
        player.apply_input(&input, &layout, 0.0, 1.0 / 60.0);
        assert!(player.pitch <= PITCH_LIMIT);
    }
}
