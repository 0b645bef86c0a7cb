//! Error types for the collaborator boundary.
//!
//! The simulation core has no failure modes: every numeric operation clamps
//! instead of failing.  Errors only arise where the game touches the outside
//! world (asset files, `assets/game.toml`), and they are logged and absorbed
//! there so the game loop keeps running.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::error::GameError;
//!
//! fn read_config(path: &str) -> Result<String, GameError> {
//!     std::fs::read_to_string(path).map_err(|e| GameError::ConfigRead {
//!         path: path.to_string(),
//!         reason: e.to_string(),
//!     })
//! }
//! ```

use std::fmt;

/// Top-level error enum for asset and configuration handling.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// A texture or sound file was not found under `assets/`.
    MissingAsset {
        /// Logical name the core asked for (`"meteor"`, `"scream"`, …).
        name: &'static str,
        /// Path relative to the assets directory.
        path: String,
    },

    /// The configuration file exists but could not be read.
    ConfigRead {
        path: String,
        reason: String,
    },

    /// The configuration file is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse {
        path: String,
        reason: String,
    },

    /// A configuration value is outside its usable range.
    InvalidConfig {
        /// Name of the offending key.
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::MissingAsset { name, path } => {
                write!(f, "asset '{}' not found at assets/{}", name, path)
            }
            GameError::ConfigRead { path, reason } => {
                write!(f, "failed to read {}: {}", path, reason)
            }
            GameError::ConfigParse { path, reason } => {
                write!(f, "failed to parse {}: {}", path, reason)
            }
            GameError::InvalidConfig {
                name,
                value,
                expected,
            } => write!(
                f,
                "config value '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

/// Returns an error unless `value` is strictly positive and finite.
pub fn require_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "(0.0, ∞)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_positive_rejects_zero_and_nan() {
        assert!(require_positive("spawn_interval_secs", 1.0).is_ok());
        assert!(require_positive("spawn_interval_secs", 0.0).is_err());
        assert!(require_positive("spawn_interval_secs", f32::NAN).is_err());
    }

    #[test]
    fn missing_asset_message_names_the_path() {
        let err = GameError::MissingAsset {
            name: "meteor",
            path: "textures/meteor.png".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "asset 'meteor' not found at assets/textures/meteor.png"
        );
    }
}
