//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about:
//!
//! ```toml
//! scoring_mode = "points_target"
//! spawn_interval_ms = 750
//! ```
//!
//! Durations are written as integer milliseconds; all other rates are per
//! second.  Keep `src/constants.rs` in sync: it remains the **authoritative
//! default** source used by `GameConfig::default()`.

use std::time::Duration;

use crate::constants::*;
use crate::error::{require_positive, GameError, GameResult};
use crate::score::{ScoringMode, ScoringPolicy};
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena / Planet ───────────────────────────────────────────────────────
    pub grid_limit: f32,
    pub eye_height: f32,
    pub planet_center_y: f32,
    pub planet_radius: f32,
    pub planet_rotation_speed: f32,

    // ── Camera / Player ──────────────────────────────────────────────────────
    pub start_yaw: f32,
    pub field_of_view: f32,
    pub mouse_sensitivity: f32,
    pub base_speed: f32,
    pub sprint_speed: f32,

    // ── Stamina ──────────────────────────────────────────────────────────────
    pub max_stamina: f32,
    pub stamina_drain_rate: f32,
    pub stamina_recover_rate: f32,

    // ── Meteors ──────────────────────────────────────────────────────────────
    pub spawn_interval_ms: u64,
    pub meteor_spawn_height_min: f32,
    pub meteor_spawn_height_max: f32,
    pub meteor_size_min: f32,
    pub meteor_size_max: f32,
    pub meteor_fall_speed_min: f32,
    pub meteor_fall_speed_max: f32,
    pub meteor_spin_speed_min: f32,
    pub meteor_spin_speed_max: f32,
    pub player_hit_margin: f32,

    // ── Scoring ──────────────────────────────────────────────────────────────
    pub scoring_mode: ScoringMode,
    pub intercept_value: i32,
    pub ground_penalty: i32,
    pub start_health: i32,
    pub win_score: i32,
    pub time_limit_ms: u64,

    // ── Title / Intro ────────────────────────────────────────────────────────
    pub title_hold_ms: u64,
    pub title_fade_ms: u64,
    pub crawl_speed: f32,
    pub crawl_line_spacing: f32,
    pub viewport_height: f32,

    // ── Equipment ────────────────────────────────────────────────────────────
    pub blade_grow_speed: f32,
    pub glow_pulse_frequency: f32,

    // ── Clock ────────────────────────────────────────────────────────────────
    pub max_frame_step_ms: u64,

    /// Fixed RNG seed for reproducible meteor showers.  `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Arena / Planet
            grid_limit: GRID_LIMIT,
            eye_height: EYE_HEIGHT,
            planet_center_y: PLANET_CENTER_Y,
            planet_radius: PLANET_RADIUS,
            planet_rotation_speed: PLANET_ROTATION_SPEED,
            // Camera / Player
            start_yaw: START_YAW,
            field_of_view: FIELD_OF_VIEW,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            base_speed: BASE_SPEED,
            sprint_speed: SPRINT_SPEED,
            // Stamina
            max_stamina: MAX_STAMINA,
            stamina_drain_rate: STAMINA_DRAIN_RATE,
            stamina_recover_rate: STAMINA_RECOVER_RATE,
            // Meteors
            spawn_interval_ms: SPAWN_INTERVAL.as_millis() as u64,
            meteor_spawn_height_min: METEOR_SPAWN_HEIGHT_MIN,
            meteor_spawn_height_max: METEOR_SPAWN_HEIGHT_MAX,
            meteor_size_min: METEOR_SIZE_MIN,
            meteor_size_max: METEOR_SIZE_MAX,
            meteor_fall_speed_min: METEOR_FALL_SPEED_MIN,
            meteor_fall_speed_max: METEOR_FALL_SPEED_MAX,
            meteor_spin_speed_min: METEOR_SPIN_SPEED_MIN,
            meteor_spin_speed_max: METEOR_SPIN_SPEED_MAX,
            player_hit_margin: PLAYER_HIT_MARGIN,
            // Scoring
            scoring_mode: ScoringMode::default(),
            intercept_value: INTERCEPT_VALUE,
            ground_penalty: GROUND_PENALTY,
            start_health: START_HEALTH,
            win_score: WIN_SCORE,
            time_limit_ms: TIME_LIMIT.as_millis() as u64,
            // Title / Intro
            title_hold_ms: TITLE_HOLD.as_millis() as u64,
            title_fade_ms: TITLE_FADE.as_millis() as u64,
            crawl_speed: CRAWL_SPEED,
            crawl_line_spacing: CRAWL_LINE_SPACING,
            viewport_height: VIEWPORT_HEIGHT,
            // Equipment
            blade_grow_speed: BLADE_GROW_SPEED,
            glow_pulse_frequency: GLOW_PULSE_FREQUENCY,
            // Clock
            max_frame_step_ms: MAX_FRAME_STEP.as_millis() as u64,
            seed: None,
        }
    }
}

impl GameConfig {
    #[inline]
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    #[inline]
    pub fn title_hold(&self) -> Duration {
        Duration::from_millis(self.title_hold_ms)
    }

    #[inline]
    pub fn title_fade(&self) -> Duration {
        Duration::from_millis(self.title_fade_ms)
    }

    #[inline]
    pub fn max_frame_step(&self) -> Duration {
        Duration::from_millis(self.max_frame_step_ms)
    }

    #[inline]
    pub fn planet_surface_y(&self) -> f32 {
        self.planet_center_y + self.planet_radius
    }

    /// Build the scoring policy selected by `scoring_mode`.
    pub fn scoring_policy(&self) -> ScoringPolicy {
        match self.scoring_mode {
            ScoringMode::HealthTimer => ScoringPolicy {
                mode: ScoringMode::HealthTimer,
                target: self.start_health,
                initial_value: self.start_health,
                intercept_value: self.intercept_value,
                penalty: self.ground_penalty,
                time_limit: Some(Duration::from_millis(self.time_limit_ms)),
            },
            ScoringMode::PointsTarget => ScoringPolicy {
                mode: ScoringMode::PointsTarget,
                target: self.win_score,
                initial_value: 0,
                intercept_value: self.intercept_value,
                penalty: self.ground_penalty,
                time_limit: None,
            },
        }
    }

    /// Intro crawl lines, with the rules of the selected economy.
    pub fn crawl_lines(&self) -> Vec<String> {
        let rules = match self.scoring_mode {
            ScoringMode::HealthTimer => [
                format!(
                    "Every interception restores {} points of planetary health.",
                    self.intercept_value
                ),
                format!(
                    "Every meteor that strikes the surface costs {} points.",
                    self.ground_penalty
                ),
                "If the planet's health runs out, the mission fails.".to_string(),
                "Hold the line until the countdown ends!".to_string(),
            ],
            ScoringMode::PointsTarget => [
                format!("Every interception earns {} points.", self.intercept_value),
                format!(
                    "Every meteor that strikes the surface costs {} points.",
                    self.ground_penalty
                ),
                "If the score would drop below zero, the mission fails.".to_string(),
                format!("Reach {} points to save the planet!", self.win_score),
            ],
        };
        CRAWL_HEADER
            .iter()
            .map(|line| line.to_string())
            .chain(rules)
            .chain(CRAWL_FOOTER.iter().map(|line| line.to_string()))
            .collect()
    }

    /// Total crawl block height in pixels.
    #[inline]
    pub fn crawl_block_height(&self) -> f32 {
        self.crawl_lines().len() as f32 * self.crawl_line_spacing
    }

    /// Parse a TOML document; keys not present keep their defaults.
    pub fn from_toml_str(contents: &str) -> GameResult<Self> {
        toml::from_str::<GameConfig>(contents).map_err(|e| GameError::ConfigParse {
            path: CONFIG_PATH.to_string(),
            reason: e.to_string(),
        })
    }

    /// Reject values the simulation cannot run with.
    ///
    /// Ranges must be ordered (`min <= max`) and every rate, interval and
    /// size must be strictly positive.
    pub fn validate(&self) -> GameResult<()> {
        require_positive("grid_limit", self.grid_limit)?;
        require_positive("planet_radius", self.planet_radius)?;
        require_positive("mouse_sensitivity", self.mouse_sensitivity)?;
        require_positive("base_speed", self.base_speed)?;
        require_positive("sprint_speed", self.sprint_speed)?;
        require_positive("max_stamina", self.max_stamina)?;
        require_positive("stamina_drain_rate", self.stamina_drain_rate)?;
        require_positive("stamina_recover_rate", self.stamina_recover_rate)?;
        require_positive("spawn_interval_ms", self.spawn_interval_ms as f32)?;
        require_positive("meteor_size_min", self.meteor_size_min)?;
        require_positive("meteor_fall_speed_min", self.meteor_fall_speed_min)?;
        require_positive("crawl_speed", self.crawl_speed)?;
        require_positive("blade_grow_speed", self.blade_grow_speed)?;
        require_positive("max_frame_step_ms", self.max_frame_step_ms as f32)?;

        let ranges = [
            (
                "meteor_spawn_height_min",
                self.meteor_spawn_height_min,
                self.meteor_spawn_height_max,
            ),
            ("meteor_size_min", self.meteor_size_min, self.meteor_size_max),
            (
                "meteor_fall_speed_min",
                self.meteor_fall_speed_min,
                self.meteor_fall_speed_max,
            ),
            (
                "meteor_spin_speed_min",
                self.meteor_spin_speed_min,
                self.meteor_spin_speed_max,
            ),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(GameError::InvalidConfig {
                    name,
                    value: min,
                    expected: "min <= max",
                });
            }
        }

        if self.meteor_spawn_height_min <= self.planet_surface_y() {
            return Err(GameError::InvalidConfig {
                name: "meteor_spawn_height_min",
                value: self.meteor_spawn_height_min,
                expected: "above the planet surface",
            });
        }
        Ok(())
    }
}

/// Read and validate a config file.
///
/// Returns `Ok(None)` when the file does not exist; defaults apply and that is
/// not an error.
pub fn load_config_file(path: &str) -> GameResult<Option<GameConfig>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(GameError::ConfigRead {
                path: path.to_string(),
                reason: e.to_string(),
            })
        }
    };
    let config = GameConfig::from_toml_str(&contents)?;
    config.validate()?;
    Ok(Some(config))
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Parse and validation errors are logged but do not abort the game; the
/// compiled defaults stay in place.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match load_config_file(CONFIG_PATH) {
        Ok(Some(loaded)) => {
            *config = loaded;
            println!("✓ Loaded game config from {CONFIG_PATH}");
        }
        Ok(None) => {
            println!("ℹ No {CONFIG_PATH} found; using compiled defaults");
        }
        Err(e) => {
            warn!("⚠ {e}; using defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = GameConfig::from_toml_str(
            "scoring_mode = \"points_target\"\nspawn_interval_ms = 750\n",
        )
        .expect("partial config must parse");

        assert_eq!(config.scoring_mode, ScoringMode::PointsTarget);
        assert_eq!(config.spawn_interval(), Duration::from_millis(750));
        assert_eq!(config.grid_limit, GRID_LIMIT);
        assert_eq!(config.max_stamina, MAX_STAMINA);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameConfig::from_toml_str("grid_limit = \"wide\"").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse { .. }));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let config = GameConfig {
            meteor_size_min: 4.0,
            meteor_size_max: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig {
                name: "meteor_size_min",
                ..
            })
        ));
    }

    #[test]
    fn zero_spawn_interval_is_rejected() {
        let config = GameConfig {
            spawn_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn spawn_band_below_planet_is_rejected() {
        let config = GameConfig {
            meteor_spawn_height_min: -50.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn scoring_policy_follows_mode() {
        let health = GameConfig::default().scoring_policy();
        assert_eq!(health.mode, ScoringMode::HealthTimer);
        assert_eq!(health.initial_value, START_HEALTH);
        assert_eq!(health.time_limit, Some(TIME_LIMIT));

        let points = GameConfig {
            scoring_mode: ScoringMode::PointsTarget,
            ..Default::default()
        }
        .scoring_policy();
        assert_eq!(points.initial_value, 0);
        assert_eq!(points.target, WIN_SCORE);
        assert_eq!(points.time_limit, None);
    }

    #[test]
    fn crawl_quotes_configured_rules() {
        let config = GameConfig {
            intercept_value: 25,
            ground_penalty: 7,
            ..Default::default()
        };
        let lines = config.crawl_lines();
        assert!(lines.iter().any(|l| l.contains("restores 25 points")));
        assert!(lines.iter().any(|l| l.contains("costs 7 points")));
        assert!(lines.iter().any(|l| l.contains("countdown")));
    }

    #[test]
    fn points_crawl_names_the_target() {
        let config = GameConfig {
            scoring_mode: ScoringMode::PointsTarget,
            win_score: 300,
            ..Default::default()
        };
        let lines = config.crawl_lines();
        assert!(lines.iter().any(|l| l.contains("Reach 300 points")));
        assert!(!lines.iter().any(|l| l.contains("health")));
        assert!(!lines.iter().any(|l| l.contains("countdown")));
    }

    #[test]
    fn crawl_height_follows_line_spacing() {
        let config = GameConfig {
            crawl_line_spacing: 50.0,
            ..Default::default()
        };
        let lines = config.crawl_lines().len() as f32;
        assert_eq!(config.crawl_block_height(), lines * 50.0);
        assert_eq!(GameConfig::default().crawl_block_height(), lines * CRAWL_LINE_SPACING);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        assert_eq!(load_config_file("assets/does-not-exist.toml"), Ok(None));
    }
}
