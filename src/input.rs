//! Per-frame input snapshot consumed by the session.
//!
//! [`InputState`] is the only thing the simulation knows about input devices.
//! [`keyboard_mouse_to_input_system`] rebuilds it from Bevy's keyboard and
//! mouse resources every frame; tests populate it directly to drive the game
//! without a real device.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

/// Aggregated player input for the current frame.
///
/// Movement and sprint are *held* states; `skip`, `toggle_equipment` and
/// `escape` are true only on the frame the key went down.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    /// Skip the title card / intro crawl.
    pub skip: bool,
    pub toggle_equipment: bool,
    pub escape: bool,
    /// Mouse motion accumulated since the previous frame, in pixels
    /// (`+x` right, `+y` down as reported by the window system).
    pub mouse_delta: Vec2,
}

impl InputState {
    /// `true` while any of the four movement keys is held.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Translate the keyboard and mouse into [`InputState`].
///
/// | Key         | Field              |
/// |-------------|--------------------|
/// | W / S       | `forward` / `backward` |
/// | A / D       | `left` / `right`   |
/// | Left Shift  | `sprint`           |
/// | Space       | `skip`             |
/// | F           | `toggle_equipment` |
/// | Escape      | `escape`           |
pub fn keyboard_mouse_to_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<AccumulatedMouseMotion>,
    mut input: ResMut<InputState>,
) {
    *input = InputState {
        forward: keys.pressed(KeyCode::KeyW),
        backward: keys.pressed(KeyCode::KeyS),
        left: keys.pressed(KeyCode::KeyA),
        right: keys.pressed(KeyCode::KeyD),
        sprint: keys.pressed(KeyCode::ShiftLeft),
        skip: keys.just_pressed(KeyCode::Space),
        toggle_equipment: keys.just_pressed(KeyCode::KeyF),
        escape: keys.just_pressed(KeyCode::Escape),
        mouse_delta: mouse.delta,
    };
}
