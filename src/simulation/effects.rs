//! Timed visual effects as data
//!
//! The simulation never draws anything; it records effect spawns with a
//! start time and duration, and the host renders whatever is active.
//! Expired effects are swept each tick.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Particle burst where a creature died
    DeathBurst,
    /// Smaller flash where a creature respawned
    RespawnFlash,
    /// Sparkle over a collected chest or gold reward
    GoldSparkle,
    /// Glow where a health pack was taken
    PickupGlow,
}

#[derive(Debug, Clone)]
pub struct Effect {
    pub kind: EffectKind,
    pub position: Vec3,
    pub started_at: f64,
    pub duration: f64,
}

impl Effect {
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.started_at >= self.duration
    }

    /// Normalized progress in `0.0..=1.0` for host-side animation
    pub fn progress(&self, now: f64) -> f32 {
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0) as f32
    }
}

/// Active effect pool
#[derive(Debug, Default)]
pub struct Effects {
    active: Vec<Effect>,
}

impl Effects {
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    pub fn spawn(&mut self, kind: EffectKind, position: Vec3, now: f64, duration: f64) {
        self.active.push(Effect {
            kind,
            position,
            started_at: now,
            duration,
        });
    }

    /// Drop effects whose duration has elapsed
    pub fn update(&mut self, now: f64) {
        self.active.retain(|effect| !effect.is_expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_expire() {
        let mut effects = Effects::new();
        effects.spawn(EffectKind::DeathBurst, Vec3::ZERO, 0.0, 1.0);
        effects.spawn(EffectKind::GoldSparkle, Vec3::ZERO, 0.5, 1.0);

        effects.update(0.9);
        assert_eq!(effects.len(), 2);

        effects.update(1.1);
        assert_eq!(effects.len(), 1);

        effects.update(2.0);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_progress_is_clamped() {
        let effect = Effect {
            kind: EffectKind::PickupGlow,
            position: Vec3::ZERO,
            started_at: 1.0,
            duration: 2.0,
        };
        assert_eq!(effect.progress(0.0), 0.0);
        assert_eq!(effect.progress(2.0), 0.5);
        assert_eq!(effect.progress(10.0), 1.0);
    }
}
