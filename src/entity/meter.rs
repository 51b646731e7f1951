//! Clamped resource gauge
//!
//! One type backs all player meters (health, stamina, hunger, ammo).
//! The invariant `0 <= current <= max` is enforced by clamping; callers
//! never see an out-of-range value.

/// A resource meter clamped to `0..=max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meter {
    current: f32,
    max: f32,
}

impl Meter {
    /// Create a full meter with the given maximum
    pub fn full(max: f32) -> Self {
        Meter { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Remove up to `amount` from the meter
    pub fn drain(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    /// Add up to `amount` to the meter
    pub fn restore(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Set the current value, clamped to `0..=max`
    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }

    /// Refill to the maximum
    pub fn refill(&mut self) {
        self.current = self.max;
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Fill fraction in `0.0..=1.0`, for meter widgets
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }
}
