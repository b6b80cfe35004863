use bevy::input::touch::Touch;
use bevy::prelude::*;

// All positions are in window space: origin top-left, y pointing down.

fn cursor_position(windows: &Query<&Window>) -> Option<Vec2> {
    windows.get_single().ok()?.cursor_position()
}

pub fn just_pressed_screen_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.just_pressed(MouseButton::Left) {
        cursor_position(windows)
    } else if touch_input.any_just_pressed() {
        let touch = touch_input.iter_just_pressed().next()?;
        Some(touch.position())
    } else {
        None
    }
}

pub fn pressed_screen_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.pressed(MouseButton::Left) {
        cursor_position(windows)
    } else {
        touch_input.first_pressed_position()
    }
}

/// Returns `Some` on the frame the pointer is lifted.
///
/// The inner position is `None` when the mouse was released outside the window.
pub fn just_released_screen_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Option<Vec2>> {
    if button_input.just_released(MouseButton::Left) {
        Some(cursor_position(windows))
    } else if touch_input.any_just_released() {
        Some(touch_input.iter_just_released().next().map(Touch::position))
    } else {
        None
    }
}

/// Whether a mouse button or a finger is currently down, wherever it is.
pub fn is_pointer_held(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
) -> bool {
    button_input.pressed(MouseButton::Left) || touch_input.iter().next().is_some()
}
