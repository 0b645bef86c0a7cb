//! Falling meteors: spawn sampling, fall/spin integration, player contact.
//!
//! Meteors fall at a constant per-instance speed (no acceleration) and spin
//! about a random axis.  A meteor never touches the score itself: it reports
//! what happened through [`MeteorFate`] and the session applies the economy.
//!
//! ## Lifecycle
//!
//! ```text
//! active ──(player contact)──▶ Intercepted  → removed, rewarded
//!    │
//!    └──(y ≤ surface)──▶ inactive ──▶ GroundImpact (charged once) → removed
//! ```

use crate::config::GameConfig;
use bevy::color::Color;
use bevy::math::{Quat, Vec3};
use rand::Rng;

/// Sampling ranges and thresholds for meteors, extracted from [`GameConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeteorParams {
    pub grid_limit: f32,
    pub height_min: f32,
    pub height_max: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub fall_speed_min: f32,
    pub fall_speed_max: f32,
    pub spin_speed_min: f32,
    pub spin_speed_max: f32,
    /// Height at which an active meteor deactivates.
    pub surface_y: f32,
    /// Added to the meteor radius for the player contact test.
    pub hit_margin: f32,
}

impl MeteorParams {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            grid_limit: config.grid_limit,
            height_min: config.meteor_spawn_height_min,
            height_max: config.meteor_spawn_height_max,
            size_min: config.meteor_size_min,
            size_max: config.meteor_size_max,
            fall_speed_min: config.meteor_fall_speed_min,
            fall_speed_max: config.meteor_fall_speed_max,
            spin_speed_min: config.meteor_spin_speed_min,
            spin_speed_max: config.meteor_spin_speed_max,
            surface_y: config.planet_surface_y(),
            hit_margin: config.player_hit_margin,
        }
    }
}

/// Outcome of one meteor's frame, in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteorFate {
    /// Still falling; keep it.
    Falling,
    /// Touched the player while active; reward and remove.
    Intercepted,
    /// Reached the surface this frame; penalise once, then remove.
    GroundImpact,
    /// Inactive and already charged; remove without further scoring.
    Spent,
}

impl MeteorFate {
    /// Whether the meteor should leave the live set after this frame.
    #[inline]
    pub fn is_removed(self) -> bool {
        !matches!(self, MeteorFate::Falling)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    pub position: Vec3,
    /// Radius in world units; also the collision radius.
    pub size: f32,
    /// World units per second.
    pub fall_speed: f32,
    /// Solid colour used when no meteor texture is available.
    pub color: Color,
    /// Degrees, kept in `[0, 360)`.
    pub rotation_angle: f32,
    /// Unit axis.
    pub rotation_axis: Vec3,
    /// Degrees per second.
    pub rotation_speed: f32,
    pub active: bool,
    /// Set once the ground-impact penalty has been applied.
    pub ground_charged: bool,
    surface_y: f32,
    hit_margin: f32,
}

impl Meteor {
    /// Sample a new meteor somewhere above the arena.
    pub fn spawn<R: Rng>(rng: &mut R, params: &MeteorParams) -> Self {
        let limit = params.grid_limit;
        let position = Vec3::new(
            rng.gen_range(-limit..=limit),
            rng.gen_range(params.height_min..=params.height_max),
            rng.gen_range(-limit..=limit),
        );
        let axis = Vec3::new(rng.gen(), rng.gen(), rng.gen()).normalize_or(Vec3::Y);

        Self {
            position,
            size: rng.gen_range(params.size_min..=params.size_max),
            fall_speed: rng.gen_range(params.fall_speed_min..=params.fall_speed_max),
            color: Color::srgb(rng.gen(), rng.gen(), rng.gen()),
            rotation_angle: rng.gen_range(0.0..360.0),
            rotation_axis: axis,
            rotation_speed: rng.gen_range(params.spin_speed_min..=params.spin_speed_max),
            active: true,
            ground_charged: false,
            surface_y: params.surface_y,
            hit_margin: params.hit_margin,
        }
    }

    /// A motionless meteor at `position`; handy for placing test fixtures.
    pub fn at(position: Vec3, size: f32, params: &MeteorParams) -> Self {
        Self {
            position,
            size,
            fall_speed: 0.0,
            color: Color::WHITE,
            rotation_angle: 0.0,
            rotation_axis: Vec3::Y,
            rotation_speed: 0.0,
            active: true,
            ground_charged: false,
            surface_y: params.surface_y,
            hit_margin: params.hit_margin,
        }
    }

    /// Current orientation for rendering.
    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(self.rotation_axis, self.rotation_angle.to_radians())
    }

    /// Fall and spin for `dt` seconds.  Deactivates at or below the surface.
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.position.y -= self.fall_speed * dt;
        self.rotation_angle = (self.rotation_angle + self.rotation_speed * dt).rem_euclid(360.0);

        if self.position.y <= self.surface_y {
            self.active = false;
        }
    }

    /// Contact test against the player.  Deactivates and returns `true` on hit.
    ///
    /// Inactive meteors never hit, so each meteor reports at most one contact.
    pub fn check_collision(&mut self, player: Vec3) -> bool {
        if !self.active {
            return false;
        }
        if self.position.distance(player) < self.size + self.hit_margin {
            self.active = false;
            return true;
        }
        false
    }

    /// Contact test, then ground-impact bookkeeping, in that order.
    ///
    /// Call after [`Meteor::update`].  The collision check short-circuits, so
    /// an intercepted meteor is never charged as a ground impact, and the
    /// charge flag makes the impact report happen exactly once.
    pub fn resolve(&mut self, player: Vec3) -> MeteorFate {
        if self.check_collision(player) {
            return MeteorFate::Intercepted;
        }
        if self.active {
            return MeteorFate::Falling;
        }
        if !self.ground_charged {
            self.ground_charged = true;
            return MeteorFate::GroundImpact;
        }
        MeteorFate::Spent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params() -> MeteorParams {
        MeteorParams::from_config(&GameConfig::default())
    }

    #[test]
    fn spawn_samples_inside_configured_ranges() {
        let params = params();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let m = Meteor::spawn(&mut rng, &params);
            assert!(m.position.x.abs() <= params.grid_limit);
            assert!(m.position.z.abs() <= params.grid_limit);
            assert!((params.height_min..=params.height_max).contains(&m.position.y));
            assert!((params.size_min..=params.size_max).contains(&m.size));
            assert!((params.fall_speed_min..=params.fall_speed_max).contains(&m.fall_speed));
            assert!((m.rotation_axis.length() - 1.0).abs() < 1e-4);
            assert!(m.active && !m.ground_charged);
        }
    }

    #[test]
    fn falls_at_constant_speed() {
        let params = params();
        let mut m = Meteor::at(Vec3::new(0.0, 60.0, 0.0), 1.0, &params);
        m.fall_speed = 6.0;
        m.update(0.5);
        m.update(0.5);
        assert!((m.position.y - 54.0).abs() < 1e-4);
        assert!(m.active);
    }

    #[test]
    fn deactivates_at_exact_surface_height() {
        let params = params();
        let mut m = Meteor::at(Vec3::new(0.0, params.surface_y, 0.0), 1.0, &params);
        m.update(0.0);
        assert!(!m.active);
    }

    #[test]
    fn rotation_angle_wraps() {
        let params = params();
        let mut m = Meteor::at(Vec3::new(0.0, 60.0, 0.0), 1.0, &params);
        m.rotation_angle = 350.0;
        m.rotation_speed = 60.0;
        m.update(0.5);
        assert!((m.rotation_angle - 20.0).abs() < 1e-3);
    }

    #[test]
    fn collision_uses_radius_plus_margin() {
        let params = params();
        let player = Vec3::new(0.0, 1.8, 0.0);

        let mut near = Meteor::at(player + Vec3::new(1.4, 0.0, 0.0), 1.0, &params);
        assert!(near.check_collision(player));
        assert!(!near.active);

        let mut far = Meteor::at(player + Vec3::new(1.6, 0.0, 0.0), 1.0, &params);
        assert!(!far.check_collision(player));
        assert!(far.active);
    }

    #[test]
    fn inactive_meteor_never_collides() {
        let params = params();
        let player = Vec3::new(0.0, 1.8, 0.0);
        let mut m = Meteor::at(player, 2.0, &params);
        assert!(m.check_collision(player));
        assert!(!m.check_collision(player));
    }

    #[test]
    fn ground_impact_is_reported_once() {
        let params = params();
        let player = Vec3::new(0.0, 1.8, 0.0);
        let mut m = Meteor::at(Vec3::new(10.0, params.surface_y - 1.0, 10.0), 1.0, &params);
        m.update(0.016);

        assert_eq!(m.resolve(player), MeteorFate::GroundImpact);
        for _ in 0..5 {
            m.update(0.016);
            assert_eq!(m.resolve(player), MeteorFate::Spent);
        }
    }

    #[test]
    fn intercept_short_circuits_ground_accounting() {
        let params = params();
        let player = Vec3::new(0.0, 1.8, 0.0);
        let mut m = Meteor::at(player, 1.0, &params);
        m.update(0.016);

        assert_eq!(m.resolve(player), MeteorFate::Intercepted);
        assert!(!m.ground_charged);
    }

    #[test]
    fn only_falling_meteors_stay() {
        assert!(!MeteorFate::Falling.is_removed());
        assert!(MeteorFate::Intercepted.is_removed());
        assert!(MeteorFate::GroundImpact.is_removed());
        assert!(MeteorFate::Spent.is_removed());
    }
}
