//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  [`crate::config::GameConfig::default`] mirrors every
//! value below, and `assets/game.toml` can override any subset at startup.
//!
//! ## Units
//!
//! Rates are per **second**, never per frame.  Values that used to be tuned
//! at a fixed 60 fps are documented with their per-frame origin so the feel
//! can be compared directly.

use std::time::Duration;

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Half-width of the square arena on the ground plane (world units).
///
/// Both the player and meteor spawn positions are confined to
/// `[-GRID_LIMIT, GRID_LIMIT]` on x and z.
pub const GRID_LIMIT: f32 = 20.0;

/// Fixed camera height above the (invisible) ground plane.
pub const EYE_HEIGHT: f32 = 1.8;

// ── Planet ────────────────────────────────────────────────────────────────────

/// Centre height of the planet sphere below the arena.
pub const PLANET_CENTER_Y: f32 = -130.0;

/// Radius of the planet sphere.
pub const PLANET_RADIUS: f32 = 100.0;

/// Height at which a falling meteor counts as a ground impact.
///
/// Equal to `PLANET_CENTER_Y + PLANET_RADIUS`: the top of the planet.
pub const PLANET_SURFACE_Y: f32 = PLANET_CENTER_Y + PLANET_RADIUS;

/// Planet spin while the game is running (degrees per second; 0.1°/frame).
pub const PLANET_ROTATION_SPEED: f32 = 6.0;

// ── Camera / Player ───────────────────────────────────────────────────────────

/// Player start position on x (world units).
pub const PLAYER_START_X: f32 = 0.0;

/// Player start position on z (world units).
pub const PLAYER_START_Z: f32 = 5.0;

/// Initial yaw in degrees.  −90° looks down −Z.
pub const START_YAW: f32 = -90.0;

/// Pitch is clamped to ±`PITCH_LIMIT` degrees to avoid gimbal flip.
pub const PITCH_LIMIT: f32 = 89.0;

/// Vertical field of view (degrees).
pub const FIELD_OF_VIEW: f32 = 70.0;

/// Degrees of yaw/pitch per pixel of mouse motion.
pub const MOUSE_SENSITIVITY: f32 = 0.25;

/// Walking speed (u/s; 0.1 u/frame).
pub const BASE_SPEED: f32 = 6.0;

/// Sprinting speed (u/s; 0.3 u/frame).
pub const SPRINT_SPEED: f32 = 18.0;

// ── Stamina ───────────────────────────────────────────────────────────────────

/// Full stamina pool.
pub const MAX_STAMINA: f32 = 200.0;

/// Stamina spent per second of sprinting (1.0/frame).  A full pool lasts ~3.3 s.
pub const STAMINA_DRAIN_RATE: f32 = 60.0;

/// Stamina regained per second while not sprinting (0.5/frame).
pub const STAMINA_RECOVER_RATE: f32 = 30.0;

// ── Meteors ───────────────────────────────────────────────────────────────────

/// Time between meteor spawns (60 frames at 60 fps).
pub const SPAWN_INTERVAL: Duration = Duration::from_secs(1);

/// Spawn height band, lower bound.
pub const METEOR_SPAWN_HEIGHT_MIN: f32 = 50.0;

/// Spawn height band, upper bound.
pub const METEOR_SPAWN_HEIGHT_MAX: f32 = 100.0;

/// Meteor radius range.
pub const METEOR_SIZE_MIN: f32 = 1.0;
pub const METEOR_SIZE_MAX: f32 = 3.0;

/// Fall speed range (u/s; 0.05–0.15 u/frame).  No gravity acceleration.
pub const METEOR_FALL_SPEED_MIN: f32 = 3.0;
pub const METEOR_FALL_SPEED_MAX: f32 = 9.0;

/// Spin speed range (degrees per second; 1–5°/frame).
pub const METEOR_SPIN_SPEED_MIN: f32 = 60.0;
pub const METEOR_SPIN_SPEED_MAX: f32 = 300.0;

/// Extra reach added to a meteor's radius when testing contact with the player.
pub const PLAYER_HIT_MARGIN: f32 = 0.5;

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Score delta for intercepting a meteor.
pub const INTERCEPT_VALUE: i32 = 10;

/// Score delta (subtracted) for a meteor reaching the planet.
pub const GROUND_PENALTY: i32 = 5;

/// Starting planetary health in the timed variant.
pub const START_HEALTH: i32 = 100;

/// Points needed to win in the untimed variant.
pub const WIN_SCORE: i32 = 100;

/// Countdown in the timed variant.  Surviving until it expires wins the game.
pub const TIME_LIMIT: Duration = Duration::from_millis(61_000);

// ── Title / Intro ─────────────────────────────────────────────────────────────

/// Title card shown at full opacity (240 frames).
pub const TITLE_HOLD: Duration = Duration::from_secs(4);

/// Title card linear fade-out (90 frames).
pub const TITLE_FADE: Duration = Duration::from_millis(1_500);

/// Intro crawl scroll speed (pixels per second; 0.5 px/frame).
pub const CRAWL_SPEED: f32 = 30.0;

/// Vertical distance between crawl lines (pixels).
pub const CRAWL_LINE_SPACING: f32 = 40.0;

/// Logical viewport height the crawl scrolls through (pixels).
pub const VIEWPORT_HEIGHT: f32 = 720.0;

/// Logical viewport width (pixels).
pub const VIEWPORT_WIDTH: f32 = 1280.0;

/// Game title shown on the title card.
pub const GAME_TITLE: &str = "WAR OF THE SPHERES";

/// Opening lines of the intro crawl, above the rules.
pub const CRAWL_HEADER: &[&str] = &[
    "EPISODE I: THE METEOR MENACE",
    "",
    "Earth is under threat! Meteor showers are striking the planet,",
    "and humanity is in danger. Your mission, space defender,",
    "is to intercept the meteors before they reach the ground.",
];

/// Closing lines of the intro crawl, below the rules.
pub const CRAWL_FOOTER: &[&str] = &[
    "",
    "CONTROLS:",
    "W, A, S, D: Move",
    "LEFT SHIFT: Sprint (uses stamina)",
    "Mouse: Look around",
    "F: Toggle the blade",
    "ESC: Quit",
    "",
    "PREPARE FOR THE DEFENCE!",
    "",
];

// ── Equipment ─────────────────────────────────────────────────────────────────

/// Blade extension rate (progress units per second).  Full extension in 0.5 s.
pub const BLADE_GROW_SPEED: f32 = 2.0;

/// Angular frequency of the blade glow pulse (radians per second).
pub const GLOW_PULSE_FREQUENCY: f32 = 6.0;

/// Full blade length (world units).
pub const BLADE_LENGTH: f32 = 2.0;

/// Core blade radius.
pub const BLADE_RADIUS: f32 = 0.03;

/// Glow sheath radius before pulsing.
pub const GLOW_RADIUS: f32 = 0.06;

/// Hilt dimensions.
pub const HILT_LENGTH: f32 = 0.3;
pub const HILT_RADIUS: f32 = 0.06;

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Largest step a single frame may advance the simulation.
///
/// Frames longer than this (window drag, debugger pause) are simulated as
/// exactly this long.
pub const MAX_FRAME_STEP: Duration = Duration::from_millis(100);
