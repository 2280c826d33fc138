//! Pointer and touch drag handling.
//! Mouse and the first active touch drive the same drag state machine; each move sample
//! rotates the cube group by the pixel delta times a fixed sensitivity.

use bevy::prelude::*;
use bevy::window::{CursorLeft, PrimaryWindow};

use crate::utils::objects::{AppSettings, CubeGroup, DragState, GroupOrientation};

/// Applies one gesture delta (pixels) to the group. No clamping, no momentum.
pub fn apply_drag_delta(
    orientation: &mut GroupOrientation,
    transform: &mut Transform,
    delta: Vec2,
    sensitivity: f32,
) {
    orientation.rotate_by(delta.x * sensitivity, delta.y * sensitivity);
    transform.rotation = orientation.to_quat();
}

/// Sample of the touch driving the drag, and whether it was lifted or canceled this frame.
/// A touch that vanished without either still ends the drag.
fn tracked_touch(touches: &Touches, id: u64) -> (Option<Vec2>, bool) {
    if let Some(touch) = touches.get_pressed(id) {
        return (Some(touch.position()), false);
    }
    let ended = touches
        .get_released(id)
        .or_else(|| touches.iter_just_canceled().find(|touch| touch.id() == id));
    (ended.map(|touch| touch.position()), true)
}

/// System tracking press, move and release of the pointer.
/// A drag follows the pointer that started it: the mouse, or one touch by id.
/// Runs only while the scene host listens.
pub fn track_pointer_drag(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cursor_left: MessageReader<CursorLeft>,
    settings: Res<AppSettings>,
    mut drag: ResMut<DragState>,
    mut group_query: Query<(&mut GroupOrientation, &mut Transform), With<CubeGroup>>,
) {
    let cursor = windows.single().ok().and_then(Window::cursor_position);
    let left_window = cursor_left.read().count() > 0;

    if !drag.active {
        if let Some(touch) = touches.iter_just_pressed().min_by_key(|touch| touch.id()) {
            drag.press_touch(touch.id(), touch.position());
        } else if mouse.just_pressed(MouseButton::Left) {
            if let Some(position) = cursor {
                drag.press(position);
            }
        }
        return;
    }

    let (pointer, let_go) = match drag.touch_id {
        Some(id) => tracked_touch(&touches, id),
        // A click pressed and released within one frame ends on the next.
        None => (cursor, !mouse.pressed(MouseButton::Left)),
    };

    if let Some(delta) = pointer.and_then(|position| drag.move_to(position)) {
        if delta != Vec2::ZERO {
            for (mut orientation, mut transform) in group_query.iter_mut() {
                apply_drag_delta(
                    &mut orientation,
                    &mut transform,
                    delta,
                    settings.0.gesture.sensitivity,
                );
            }
        }
    }

    if let_go || left_window {
        drag.release();
    }
}
