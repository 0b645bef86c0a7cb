//! Music and one-shot cues.
//!
//! | Trigger                          | Sound                      |
//! |----------------------------------|----------------------------|
//! | `OnEnter(TitleScreen)`           | theme, looping             |
//! | `OnEnter(Running / GameOver / Win)` | theme stops             |
//! | `OnEnter(GameOver)`              | scream, once               |
//! | `SessionEvent::EquipmentToggled` | blade on / blade off       |
//!
//! Missing sounds are skipped silently; [`crate::assets::load_game_assets`]
//! already warned about them.

use crate::assets::{AudioStore, GameAssets, SoundId};
use crate::game::{GameSet, LastFrame};
use crate::mode::GameMode;
use crate::session::SessionEvent;
use bevy::prelude::*;

/// The looping theme entity.
#[derive(Component)]
pub struct ThemeMusic;

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameMode::TitleScreen), start_theme)
            .add_systems(OnEnter(GameMode::Running), stop_theme)
            .add_systems(OnEnter(GameMode::GameOver), (stop_theme, play_scream))
            .add_systems(OnEnter(GameMode::Win), stop_theme)
            .add_systems(Update, play_session_cues.in_set(GameSet::Present));
    }
}

/// Sound for a session event, if it has one.
pub fn cue_for(event: &SessionEvent) -> Option<SoundId> {
    match event {
        SessionEvent::EquipmentToggled(true) => Some(SoundId::BladeOn),
        SessionEvent::EquipmentToggled(false) => Some(SoundId::BladeOff),
        SessionEvent::ModeEntered(_) | SessionEvent::Intercept | SessionEvent::GroundImpact => {
            None
        }
    }
}

fn play_once(commands: &mut Commands, assets: &GameAssets, id: SoundId) {
    if let Some(handle) = assets.sound(id) {
        commands.spawn((AudioPlayer::new(handle), PlaybackSettings::DESPAWN));
    }
}

pub fn start_theme(
    mut commands: Commands,
    assets: Res<GameAssets>,
    playing: Query<(), With<ThemeMusic>>,
) {
    if !playing.is_empty() {
        return;
    }
    if let Some(handle) = assets.sound(SoundId::Theme) {
        commands.spawn((AudioPlayer::new(handle), PlaybackSettings::LOOP, ThemeMusic));
    }
}

pub fn stop_theme(mut commands: Commands, playing: Query<Entity, With<ThemeMusic>>) {
    for entity in playing.iter() {
        commands.entity(entity).despawn();
    }
}

pub fn play_scream(mut commands: Commands, assets: Res<GameAssets>) {
    play_once(&mut commands, &assets, SoundId::Scream);
}

pub fn play_session_cues(mut commands: Commands, assets: Res<GameAssets>, last: Res<LastFrame>) {
    let Some(frame) = last.0.as_ref() else {
        return;
    };
    for id in frame.events.iter().filter_map(cue_for) {
        play_once(&mut commands, &assets, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_blade_toggles_have_cues() {
        assert_eq!(
            cue_for(&SessionEvent::EquipmentToggled(true)),
            Some(SoundId::BladeOn)
        );
        assert_eq!(
            cue_for(&SessionEvent::EquipmentToggled(false)),
            Some(SoundId::BladeOff)
        );
        assert_eq!(cue_for(&SessionEvent::Intercept), None);
        assert_eq!(
            cue_for(&SessionEvent::ModeEntered(GameMode::GameOver)),
            None
        );
    }
}
