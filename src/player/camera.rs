//! First-person camera: look, movement integration, arena clamping.
//!
//! The camera *is* the player: its position is used for meteor contact tests
//! and it carries the stamina pool that gates sprinting.

use super::stamina::Stamina;
use crate::config::GameConfig;
use crate::input::InputState;
use bevy::math::Vec3;

/// What the renderer needs to place the 3D view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
    /// Unit look direction (or zero if degenerate).
    pub direction: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCamera {
    pub position: Vec3,
    /// Degrees; unbounded.
    pub yaw: f32,
    /// Degrees; clamped to `[-pitch_limit, pitch_limit]`.
    pub pitch: f32,
    pub fov: f32,
    pub sensitivity: f32,
    pub base_speed: f32,
    pub sprint_speed: f32,
    /// Speed used for the most recent movement step.
    speed: f32,
    sprinting: bool,
    pub stamina: Stamina,
    eye_height: f32,
    grid_limit: f32,
    pitch_limit: f32,
}

impl PlayerCamera {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: Vec3::new(
                crate::constants::PLAYER_START_X,
                config.eye_height,
                crate::constants::PLAYER_START_Z,
            ),
            yaw: config.start_yaw,
            pitch: 0.0,
            fov: config.field_of_view,
            sensitivity: config.mouse_sensitivity,
            base_speed: config.base_speed,
            sprint_speed: config.sprint_speed,
            speed: config.base_speed,
            sprinting: false,
            stamina: Stamina::from_config(config),
            eye_height: config.eye_height,
            grid_limit: config.grid_limit,
            pitch_limit: crate::constants::PITCH_LIMIT,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// `true` if the last movement step consumed stamina.
    #[inline]
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    /// Unit look direction from yaw/pitch.
    ///
    /// Falls back to `Vec3::ZERO` if the spherical conversion degenerates.
    pub fn direction(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize_or_zero()
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            position: self.position,
            direction: self.direction(),
            fov: self.fov,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }

    /// Apply a mouse delta (already sign-adjusted so `+dy` looks up).
    pub fn process_look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity).clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Integrate one frame of WASD movement.
    ///
    /// Sprint needs a movement key, the sprint key and stamina above zero.  A
    /// step that drains the last of the stamina is already taken at base
    /// speed.  Afterwards the camera is pinned to eye height and clamped to
    /// the arena.
    pub fn update_movement(&mut self, input: &InputState, dt: f32) {
        let wants_sprint = input.sprint && input.is_moving();
        self.sprinting = wants_sprint && !self.stamina.is_depleted();

        if self.sprinting {
            self.speed = self.sprint_speed;
            self.stamina.drain(dt);
            if self.stamina.is_depleted() {
                self.speed = self.base_speed;
            }
        } else {
            self.speed = self.base_speed;
            self.stamina.recover(dt);
        }

        let forward = self.direction();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let forward_xz = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        let step = self.speed * dt;

        let mut next = self.position;
        if input.forward {
            next += forward_xz * step;
        }
        if input.backward {
            next -= forward_xz * step;
        }
        if input.left {
            next -= right * step;
        }
        if input.right {
            next += right * step;
        }

        next.y = self.eye_height;
        next.x = next.x.clamp(-self.grid_limit, self.grid_limit);
        next.z = next.z.clamp(-self.grid_limit, self.grid_limit);
        self.position = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BASE_SPEED, EYE_HEIGHT, GRID_LIMIT, SPRINT_SPEED};

    const DT: f32 = 1.0 / 60.0;

    fn camera() -> PlayerCamera {
        PlayerCamera::new(&GameConfig::default())
    }

    fn forward_sprint() -> InputState {
        InputState {
            forward: true,
            sprint: true,
            ..Default::default()
        }
    }

    #[test]
    fn default_pose_looks_down_negative_z() {
        let dir = camera().direction();
        assert!(dir.x.abs() < 1e-5, "got {dir:?}");
        assert!((dir.z + 1.0).abs() < 1e-5, "got {dir:?}");
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = camera();
        cam.process_look(0.0, 10_000.0);
        assert_eq!(cam.pitch, 89.0);
        cam.process_look(0.0, -100_000.0);
        assert_eq!(cam.pitch, -89.0);
    }

    #[test]
    fn look_scales_by_sensitivity() {
        let mut cam = camera();
        cam.process_look(40.0, 8.0);
        assert!((cam.yaw - (-90.0 + 10.0)).abs() < 1e-5);
        assert!((cam.pitch - 2.0).abs() < 1e-5);
    }

    #[test]
    fn walking_forward_moves_along_look_direction() {
        let mut cam = camera();
        let start = cam.position;
        cam.update_movement(
            &InputState {
                forward: true,
                ..Default::default()
            },
            1.0,
        );
        assert!((start.z - cam.position.z - BASE_SPEED).abs() < 1e-4);
        assert!((cam.position.x - start.x).abs() < 1e-4);
    }

    #[test]
    fn looking_down_still_moves_horizontally() {
        let mut cam = camera();
        cam.process_look(0.0, -10_000.0);
        let start = cam.position;
        cam.update_movement(
            &InputState {
                forward: true,
                ..Default::default()
            },
            0.5,
        );
        let moved = cam.position - start;
        assert!((moved.length() - BASE_SPEED * 0.5).abs() < 1e-3);
        assert_eq!(cam.position.y, EYE_HEIGHT);
    }

    #[test]
    fn strafe_right_is_perpendicular_to_forward() {
        let mut cam = camera();
        let start = cam.position;
        cam.update_movement(
            &InputState {
                right: true,
                ..Default::default()
            },
            1.0,
        );
        // Facing −Z, right is +X.
        assert!((cam.position.x - start.x - BASE_SPEED).abs() < 1e-4);
        assert!((cam.position.z - start.z).abs() < 1e-4);
    }

    #[test]
    fn position_stays_in_arena_at_eye_height() {
        let mut cam = camera();
        let input = InputState {
            forward: true,
            left: true,
            ..Default::default()
        };
        for _ in 0..2_000 {
            cam.update_movement(&input, DT);
            assert_eq!(cam.position.y, EYE_HEIGHT);
            assert!(cam.position.x.abs() <= GRID_LIMIT);
            assert!(cam.position.z.abs() <= GRID_LIMIT);
        }
        assert_eq!(cam.position.x, -GRID_LIMIT);
        assert_eq!(cam.position.z, -GRID_LIMIT);
    }

    #[test]
    fn sprint_requires_movement_key() {
        let mut cam = camera();
        let full = cam.stamina.current();
        cam.update_movement(
            &InputState {
                sprint: true,
                ..Default::default()
            },
            DT,
        );
        assert!(!cam.is_sprinting());
        assert_eq!(cam.speed(), BASE_SPEED);
        assert_eq!(cam.stamina.current(), full);
    }

    #[test]
    fn sprinting_uses_sprint_speed_and_drains() {
        let mut cam = camera();
        let full = cam.stamina.current();
        cam.update_movement(&forward_sprint(), DT);
        assert!(cam.is_sprinting());
        assert_eq!(cam.speed(), SPRINT_SPEED);
        assert!(cam.stamina.current() < full);
    }

    #[test]
    fn step_that_empties_stamina_uses_base_speed() {
        let mut cam = camera();
        cam.stamina.set(0.5);
        cam.update_movement(&forward_sprint(), DT);
        assert_eq!(cam.stamina.current(), 0.0);
        assert_eq!(cam.speed(), BASE_SPEED);
    }

    #[test]
    fn depleted_stamina_blocks_sprint_and_recovers() {
        let mut cam = camera();
        cam.stamina.set(0.0);
        cam.update_movement(&forward_sprint(), DT);
        assert!(!cam.is_sprinting());
        assert_eq!(cam.speed(), BASE_SPEED);
        assert!(cam.stamina.current() > 0.0);
    }

    #[test]
    fn stamina_stays_in_bounds_over_long_runs() {
        let mut cam = camera();
        let max = cam.stamina.max();
        for frame in 0..3_000 {
            let input = if (frame / 400) % 2 == 0 {
                forward_sprint()
            } else {
                InputState::default()
            };
            cam.update_movement(&input, DT);
            let s = cam.stamina.current();
            assert!((0.0..=max).contains(&s), "stamina {s} out of range");
            if cam.speed() == SPRINT_SPEED {
                assert!(s > 0.0);
            }
        }
    }
}
