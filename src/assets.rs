//! Texture and sound lookup for the renderer and audio collaborators.
//!
//! The core asks for assets by logical id and gets `None` back when a file is
//! missing: textures then fall back to solid colours and sounds stay silent.
//! [`GameAssets`] is the Bevy-backed store; [`load_game_assets`] fills it at
//! startup and warns once per missing file.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{GameError, GameResult};
use bevy::prelude::*;

/// Directory Bevy's `AssetServer` resolves relative paths against.
pub const ASSET_ROOT: &str = "assets";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    /// Inside of the sky sphere.
    Stars,
    Meteor,
    Planet,
}

impl TextureId {
    pub const ALL: [TextureId; 3] = [TextureId::Stars, TextureId::Meteor, TextureId::Planet];

    pub fn name(self) -> &'static str {
        match self {
            TextureId::Stars => "stars",
            TextureId::Meteor => "meteor",
            TextureId::Planet => "planet",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            TextureId::Stars => "textures/stars.png",
            TextureId::Meteor => "textures/meteor.png",
            TextureId::Planet => "textures/planet.png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    /// Looping title/intro music.
    Theme,
    /// One-shot cue on losing the planet.
    Scream,
    BladeOn,
    BladeOff,
}

impl SoundId {
    pub const ALL: [SoundId; 4] = [
        SoundId::Theme,
        SoundId::Scream,
        SoundId::BladeOn,
        SoundId::BladeOff,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SoundId::Theme => "theme",
            SoundId::Scream => "scream",
            SoundId::BladeOn => "blade_on",
            SoundId::BladeOff => "blade_off",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            SoundId::Theme => "sounds/theme.ogg",
            SoundId::Scream => "sounds/scream.ogg",
            SoundId::BladeOn => "sounds/blade_on.ogg",
            SoundId::BladeOff => "sounds/blade_off.ogg",
        }
    }
}

pub trait TextureStore {
    /// `None` when the texture is unavailable.
    fn texture(&self, id: TextureId) -> Option<Handle<Image>>;
}

pub trait AudioStore {
    /// `None` when the sound is unavailable.
    fn sound(&self, id: SoundId) -> Option<Handle<AudioSource>>;
}

/// Handles for every asset that was found on disk at startup.
#[derive(Resource, Default, Debug, Clone)]
pub struct GameAssets {
    textures: HashMap<TextureId, Handle<Image>>,
    sounds: HashMap<SoundId, Handle<AudioSource>>,
}

impl GameAssets {
    pub fn insert_texture(&mut self, id: TextureId, handle: Handle<Image>) {
        self.textures.insert(id, handle);
    }

    pub fn insert_sound(&mut self, id: SoundId, handle: Handle<AudioSource>) {
        self.sounds.insert(id, handle);
    }

    #[inline]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn sound_count(&self) -> usize {
        self.sounds.len()
    }
}

impl TextureStore for GameAssets {
    fn texture(&self, id: TextureId) -> Option<Handle<Image>> {
        self.textures.get(&id).cloned()
    }
}

impl AudioStore for GameAssets {
    fn sound(&self, id: SoundId) -> Option<Handle<AudioSource>> {
        self.sounds.get(&id).cloned()
    }
}

/// Check that `path` exists under `root`.
pub fn require_asset(root: &Path, name: &'static str, path: &str) -> GameResult<()> {
    if root.join(path).is_file() {
        Ok(())
    } else {
        Err(GameError::MissingAsset {
            name,
            path: path.to_string(),
        })
    }
}

/// Startup system: queue every asset that exists and warn about the rest.
pub fn load_game_assets(mut assets: ResMut<GameAssets>, asset_server: Res<AssetServer>) {
    let root = Path::new(ASSET_ROOT);

    for id in TextureId::ALL {
        match require_asset(root, id.name(), id.path()) {
            Ok(()) => assets.insert_texture(id, asset_server.load(id.path())),
            Err(e) => warn!("⚠ {e}; drawing with a solid colour"),
        }
    }
    for id in SoundId::ALL {
        match require_asset(root, id.name(), id.path()) {
            Ok(()) => assets.insert_sound(id, asset_server.load(id.path())),
            Err(e) => warn!("⚠ {e}; staying silent"),
        }
    }

    info!(
        "Assets ready: {}/{} textures, {}/{} sounds",
        assets.texture_count(),
        TextureId::ALL.len(),
        assets.sound_count(),
        SoundId::ALL.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_reports_missing() {
        let assets = GameAssets::default();
        for id in TextureId::ALL {
            assert!(assets.texture(id).is_none());
        }
        for id in SoundId::ALL {
            assert!(assets.sound(id).is_none());
        }
    }

    #[test]
    fn inserted_handles_are_returned() {
        let mut assets = GameAssets::default();
        assets.insert_texture(TextureId::Meteor, Handle::default());
        assert!(assets.texture(TextureId::Meteor).is_some());
        assert!(assets.texture(TextureId::Planet).is_none());
    }

    #[test]
    fn missing_file_is_a_missing_asset_error() {
        let err = require_asset(Path::new("no-such-dir"), "meteor", "textures/meteor.png")
            .unwrap_err();
        assert_eq!(
            err,
            GameError::MissingAsset {
                name: "meteor",
                path: "textures/meteor.png".to_string(),
            }
        );
    }

    #[test]
    fn existing_file_passes() {
        assert!(require_asset(Path::new("."), "manifest", "Cargo.toml").is_ok());
    }
}
