//! Bevy glue around [`Session`]: one tick per frame, mode mirroring, restart.
//!
//! ## Systems (registered by `GamePlugin`)
//!
//! | System                           | Schedule / set            | Purpose                               |
//! |----------------------------------|---------------------------|---------------------------------------|
//! | `start_session`                  | `Startup`                 | Build the first session from config   |
//! | `keyboard_mouse_to_input_system` | `Update / GameSet::Input` | Devices → `InputState`                |
//! | `tick_session`                   | `Update / Simulate`       | Step the session, keep `LastFrame`    |
//! | `apply_session_outcome`          | `Update / Sync`           | Restart or exit on Escape             |
//! | `sync_game_mode`                 | `Update / Sync`           | Mirror session mode into `GameMode`   |
//! | `draw_session`                   | `Update / Draw`           | Rebuild `DrawList`                    |
//! | `grab_cursor`                    | `OnEnter(Running)`        | Lock and hide the cursor              |
//! | `release_cursor`                 | `OnEnter(GameOver / Win)` | Free and show the cursor              |
//!
//! Scene, HUD and audio plugins add their systems to [`GameSet::Present`], so
//! they always see this frame's [`DrawList`] and [`LastFrame`].

use crate::assets::GameAssets;
use crate::config::GameConfig;
use crate::input::{keyboard_mouse_to_input_system, InputState};
use crate::mode::GameMode;
use crate::render::DrawList;
use crate::session::{FrameResult, Session, SessionOutcome};
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

/// Per-frame ordering inside `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Simulate,
    Sync,
    Draw,
    Present,
}

/// Result of the most recent [`Session::tick`].
#[derive(Resource, Default, Debug, Clone)]
pub struct LastFrame(pub Option<FrameResult>);

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameMode>()
            .init_resource::<InputState>()
            .init_resource::<DrawList>()
            .init_resource::<LastFrame>()
            .init_resource::<GameAssets>()
            .configure_sets(
                Update,
                (
                    GameSet::Input,
                    GameSet::Simulate,
                    GameSet::Sync,
                    GameSet::Draw,
                    GameSet::Present,
                )
                    .chain(),
            )
            .add_systems(Startup, start_session)
            .add_systems(
                Update,
                (
                    keyboard_mouse_to_input_system.in_set(GameSet::Input),
                    tick_session.in_set(GameSet::Simulate),
                    (apply_session_outcome, sync_game_mode)
                        .chain()
                        .in_set(GameSet::Sync),
                    draw_session.in_set(GameSet::Draw),
                ),
            )
            .add_systems(OnEnter(GameMode::Running), grab_cursor)
            .add_systems(OnEnter(GameMode::GameOver), release_cursor)
            .add_systems(OnEnter(GameMode::Win), release_cursor);
    }
}

fn session_seed(config: &GameConfig) -> u64 {
    config.seed.unwrap_or_else(rand::random)
}

/// Startup system: build the first session once the config is final.
pub fn start_session(mut commands: Commands, config: Res<GameConfig>) {
    let seed = session_seed(&config);
    info!("Session started (seed {seed}, {:?})", config.scoring_mode);
    commands.insert_resource(Session::new(&config, seed));
}

pub fn tick_session(
    time: Res<Time>,
    input: Res<InputState>,
    mut session: ResMut<Session>,
    mut last: ResMut<LastFrame>,
) {
    last.0 = Some(session.tick(&input, time.delta()));
}

/// Rebuild the session on `Restart`, request exit on `Quit`.
pub fn apply_session_outcome(
    last: Res<LastFrame>,
    config: Res<GameConfig>,
    mut session: ResMut<Session>,
    mut exit: MessageWriter<AppExit>,
) {
    let Some(outcome) = last.0.as_ref().and_then(|frame| frame.outcome) else {
        return;
    };
    match outcome {
        SessionOutcome::Restart => {
            let seed = session_seed(&config);
            info!(
                "Restarting after {:?} with score {} (seed {seed})",
                session.mode(),
                session.score().value()
            );
            *session = Session::new(&config, seed);
        }
        SessionOutcome::Quit => {
            info!("Quit requested from {:?}", session.mode());
            exit.write(AppExit::Success);
        }
    }
}

/// Copy the session's mode into `State<GameMode>` so `OnEnter` hooks fire.
pub fn sync_game_mode(
    session: Res<Session>,
    state: Res<State<GameMode>>,
    mut next: ResMut<NextState<GameMode>>,
) {
    let mode = session.mode();
    if mode != *state.get() {
        info!("Mode {:?} → {:?}", state.get(), mode);
        next.set(mode);
    }
}

pub fn draw_session(session: Res<Session>, assets: Res<GameAssets>, mut draw: ResMut<DrawList>) {
    draw.clear();
    session.render(&*assets, &mut *draw);
}

pub fn grab_cursor(mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    for mut cursor in cursors.iter_mut() {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}

pub fn release_cursor(mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    for mut cursor in cursors.iter_mut() {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_seed_is_used() {
        let config = GameConfig {
            seed: Some(1234),
            ..Default::default()
        };
        assert_eq!(session_seed(&config), 1234);
    }
}
