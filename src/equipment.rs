//! The toggleable blade prop held in front of the camera.
//!
//! Purely cosmetic: the blade does not take part in meteor contact tests.

use crate::config::GameConfig;
use crate::constants::{BLADE_LENGTH, BLADE_RADIUS, GLOW_RADIUS};

/// Blade geometry for one frame, in camera-local units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquipmentPose {
    /// Extension in `[0, 1]`.
    pub progress: f32,
    pub blade_length: f32,
    pub blade_radius: f32,
    pub glow_radius: f32,
    pub glow_alpha: f32,
}

impl EquipmentPose {
    /// Nothing to draw when the blade is fully retracted.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.progress > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Equipment {
    on: bool,
    progress: f32,
    grow_speed: f32,
    pulse_frequency: f32,
}

impl Equipment {
    pub fn new(grow_speed: f32, pulse_frequency: f32) -> Self {
        Self {
            on: false,
            progress: 0.0,
            grow_speed,
            pulse_frequency,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.blade_grow_speed, config.glow_pulse_frequency)
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.on
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Flip the blade and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    /// Extend toward 1 while on, retract toward 0 while off.
    pub fn update(&mut self, dt: f32) {
        let step = self.grow_speed * dt;
        self.progress = if self.on {
            (self.progress + step).min(1.0)
        } else {
            (self.progress - step).max(0.0)
        };
    }

    /// Glow pulse in `[0, 1]` at session time `t` seconds.
    #[inline]
    pub fn glow(&self, t: f32) -> f32 {
        0.5 + 0.5 * (self.pulse_frequency * t).sin()
    }

    pub fn pose(&self, t: f32) -> EquipmentPose {
        let pulse = self.glow(t);
        EquipmentPose {
            progress: self.progress,
            blade_length: BLADE_LENGTH * self.progress,
            blade_radius: BLADE_RADIUS,
            glow_radius: GLOW_RADIUS * (1.0 + 0.12 * pulse),
            glow_alpha: 0.10 + 0.10 * pulse,
        }
    }
}
