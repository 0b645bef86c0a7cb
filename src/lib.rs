//! Meteorfall game library
//!
//! A first-person arcade game: stand on a small square arena above a rotating
//! planet and intercept falling meteors before they reach the surface.
//!
//! The simulation core (`session` and everything it owns) is plain data and
//! never touches the ECS; the Bevy plugins in `game`, `scene`, `hud` and
//! `sound` drive it once per frame and present the result.

pub mod assets;
pub mod clock;
pub mod config;
pub mod constants;
pub mod equipment;
pub mod error;
pub mod game;
pub mod hud;
pub mod input;
pub mod meteor;
pub mod mode;
pub mod player;
pub mod render;
pub mod scene;
pub mod score;
pub mod session;
pub mod sound;
pub mod spawner;
