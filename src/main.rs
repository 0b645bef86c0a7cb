use bevy::prelude::*;
use bevy::window::WindowResolution;

use meteorfall::assets::load_game_assets;
use meteorfall::config::{load_game_config, GameConfig};
use meteorfall::constants::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use meteorfall::game::GamePlugin;
use meteorfall::hud::HudPlugin;
use meteorfall::scene::ScenePlugin;
use meteorfall::sound::SoundPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Meteorfall".into(),
                resolution: WindowResolution::new(VIEWPORT_WIDTH as u32, VIEWPORT_HEIGHT as u32),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Compiled defaults; load_game_config overwrites them from
        // assets/game.toml (if present) before the session is built in Startup.
        .insert_resource(GameConfig::default())
        .add_plugins((GamePlugin, ScenePlugin, HudPlugin, SoundPlugin))
        // PreStartup: the initial OnEnter(TitleScreen) runs before Startup
        // and already needs the theme handle.
        .add_systems(PreStartup, (load_game_config, load_game_assets))
        .run();
}
