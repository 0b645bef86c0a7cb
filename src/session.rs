//! One playthrough: owns every piece of simulation state and steps it.
//!
//! ## Frame order
//!
//! 1. Clamp the wall-clock delta ([`FrameClock`]).
//! 2. Escape → [`SessionOutcome`] (restart when terminal, quit otherwise).
//! 3. Mode timers: skip, title fade, intro crawl.
//! 4. `Running` only: look, blade toggle, movement, planet spin, spawning,
//!    per-meteor lifecycle with scoring, countdown, terminal check.
//! 5. Blade extension (all modes, so a retracting blade finishes retracting).
//!
//! The session never touches Bevy's ECS; [`crate::game`] wraps it in a
//! resource and turns [`FrameResult`] into state changes, audio and UI.

use std::time::Duration;

use crate::clock::FrameClock;
use crate::config::GameConfig;
use crate::equipment::Equipment;
use crate::input::InputState;
use crate::meteor::{Meteor, MeteorFate, MeteorParams};
use crate::mode::{GameMode, GameModeMachine, ModeTimings};
use crate::player::PlayerCamera;
use crate::score::ScoreBoard;
use crate::spawner::SpawnManager;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Something that happened during a tick that a collaborator may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ModeEntered(GameMode),
    Intercept,
    GroundImpact,
    /// Carries the new blade state.
    EquipmentToggled(bool),
}

/// What the host should do with the session after this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Build a fresh session and start over from the title card.
    Restart,
    /// Leave the game.
    Quit,
}

/// Per-tick summary returned by [`Session::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameResult {
    pub mode: GameMode,
    pub score: i32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub time_remaining: Option<Duration>,
    pub outcome: Option<SessionOutcome>,
    pub events: Vec<SessionEvent>,
}

#[derive(Resource, Debug, Clone)]
pub struct Session {
    pub(crate) clock: FrameClock,
    pub(crate) camera: PlayerCamera,
    pub(crate) spawner: SpawnManager,
    pub(crate) meteors: Vec<Meteor>,
    pub(crate) score: ScoreBoard,
    pub(crate) modes: GameModeMachine,
    pub(crate) equipment: Equipment,
    /// Degrees, kept in `[0, 360)`.
    pub(crate) planet_rotation: f32,
    planet_rotation_speed: f32,
    rng: StdRng,
    seed: u64,
}

impl Session {
    /// Start a new playthrough on the title card.
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let policy = config.scoring_policy();
        Self {
            clock: FrameClock::new(config.max_frame_step()),
            camera: PlayerCamera::new(config),
            spawner: SpawnManager::new(config.spawn_interval(), MeteorParams::from_config(config)),
            meteors: Vec::new(),
            score: ScoreBoard::new(policy),
            modes: GameModeMachine::new(ModeTimings::from_config(config), policy.time_limit),
            equipment: Equipment::from_config(config),
            planet_rotation: 0.0,
            planet_rotation_speed: config.planet_rotation_speed,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.modes.mode()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.modes.mode().is_terminal()
    }

    #[inline]
    pub fn camera(&self) -> &PlayerCamera {
        &self.camera
    }

    #[inline]
    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    #[inline]
    pub fn score(&self) -> &ScoreBoard {
        &self.score
    }

    #[inline]
    pub fn modes(&self) -> &GameModeMachine {
        &self.modes
    }

    #[inline]
    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    #[inline]
    pub fn spawner(&self) -> &SpawnManager {
        &self.spawner
    }

    #[inline]
    pub fn planet_rotation(&self) -> f32 {
        self.planet_rotation
    }

    /// Simulated seconds since the session started.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        self.clock.elapsed_secs()
    }

    /// Advance the game by one frame of `raw_dt` wall-clock time.
    pub fn tick(&mut self, input: &InputState, raw_dt: Duration) -> FrameResult {
        let dt = self.clock.advance(raw_dt);
        let secs = dt.as_secs_f32();
        let mut events = Vec::new();

        let outcome = input.escape.then(|| {
            if self.is_terminal() {
                SessionOutcome::Restart
            } else {
                SessionOutcome::Quit
            }
        });

        if input.skip {
            events.extend(self.modes.skip().map(SessionEvent::ModeEntered));
        }
        events.extend(self.modes.advance(dt).map(SessionEvent::ModeEntered));

        if self.modes.mode() == GameMode::Running {
            self.step_running(input, dt, &mut events);
        }
        self.equipment.update(secs);

        FrameResult {
            mode: self.modes.mode(),
            score: self.score.value(),
            stamina: self.camera.stamina.current(),
            max_stamina: self.camera.stamina.max(),
            time_remaining: self.modes.time_remaining(),
            outcome,
            events,
        }
    }

    fn step_running(&mut self, input: &InputState, dt: Duration, events: &mut Vec<SessionEvent>) {
        let secs = dt.as_secs_f32();

        // Window y grows downward; pushing the mouse up looks up.
        self.camera.process_look(input.mouse_delta.x, -input.mouse_delta.y);
        if input.toggle_equipment {
            events.push(SessionEvent::EquipmentToggled(self.equipment.toggle()));
        }
        self.camera.update_movement(input, secs);

        self.planet_rotation =
            (self.planet_rotation + self.planet_rotation_speed * secs).rem_euclid(360.0);

        if let Some(meteor) = self.spawner.update(dt, &mut self.rng) {
            self.meteors.push(meteor);
        }

        let player = self.camera.position;
        let score = &mut self.score;
        self.meteors.retain_mut(|meteor| {
            meteor.update(secs);
            let fate = meteor.resolve(player);
            match fate {
                MeteorFate::Intercepted => {
                    score.record_intercept();
                    events.push(SessionEvent::Intercept);
                }
                MeteorFate::GroundImpact => {
                    score.record_ground_impact();
                    events.push(SessionEvent::GroundImpact);
                }
                MeteorFate::Falling | MeteorFate::Spent => {}
            }
            !fate.is_removed()
        });

        self.modes.tick_countdown(dt);
        events.extend(self.modes.evaluate(&self.score).map(SessionEvent::ModeEntered));
    }
}
