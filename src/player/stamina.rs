//! Sprint stamina economy.

use crate::config::GameConfig;

/// Stamina pool gating the sprint.
///
/// Drains while sprinting and recovers whenever the player is not actively
/// draining it.  The value is always within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stamina {
    current: f32,
    max: f32,
    /// Spent per second of sprinting.
    drain_rate: f32,
    /// Regained per second while not sprinting.
    recover_rate: f32,
}

impl Stamina {
    pub fn new(max: f32, drain_rate: f32, recover_rate: f32) -> Self {
        Self {
            current: max,
            max,
            drain_rate,
            recover_rate,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_stamina,
            config.stamina_drain_rate,
            config.stamina_recover_rate,
        )
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Spend `drain_rate * dt`, floored at zero.
    pub fn drain(&mut self, dt: f32) {
        self.current = (self.current - self.drain_rate * dt).max(0.0);
    }

    /// Regain `recover_rate * dt`, capped at the pool size.
    pub fn recover(&mut self, dt: f32) {
        self.current = (self.current + self.recover_rate * dt).min(self.max);
    }

    /// Overwrite the current value (clamped).  Used by tests and restarts.
    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }
}
