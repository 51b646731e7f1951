//! Projectiles
//!
//! Straight-line bullets fired from the player's eye along the look
//! direction. Firing is gated by the shot cooldown, the reload state
//! and the ammo meter; flight is simple integration with a hard
//! lifetime cap.

use glam::Vec3;

use crate::entity::player::SHOT_COOLDOWN;
use crate::entity::{EntityId, Player};

pub const BULLET_SPEED: f32 = 120.0;
pub const BULLET_LIFETIME: f64 = 2.0;
const MUZZLE_OFFSET: f32 = 0.4;

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub spawned_at: f64,
}

impl Projectile {
    /// Fire a bullet if the player can shoot right now. Spends one
    /// round and stamps the cooldown on success. No-ops (returning
    /// None) while dead, reloading, cooling down, or out of ammo.
    pub fn try_fire(player: &mut Player, now: f64) -> Option<Projectile> {
        if player.is_dead()
            || player.is_reloading()
            || now - player.last_shot_time < SHOT_COOLDOWN
            || player.ammo.is_empty()
        {
            return None;
        }
        player.ammo.drain(1.0);
        player.last_shot_time = now;

        let direction = player.look_direction();
        Some(Projectile {
            id: EntityId::new(),
            position: player.position + direction * MUZZLE_OFFSET,
            velocity: direction * BULLET_SPEED,
            spawned_at: now,
        })
    }

    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now - self.spawned_at > BULLET_LIFETIME
    }
}
