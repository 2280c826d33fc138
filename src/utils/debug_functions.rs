//! Debug functions for the app.
use bevy::{prelude::*, window::*};

use crate::utils::cube::cube_extent;
use crate::utils::objects::{AppSettings, CubeGroup};

pub struct DebugFunctionsPlugin;

impl Plugin for DebugFunctionsPlugin {
    /// Adds the `toggle_vsync` and `visualize_cube_axes` systems to the app.
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (toggle_vsync, visualize_cube_axes));
    }
}

/// Toggles VSync when the 'V' key is pressed.
fn toggle_vsync(
    input: Res<ButtonInput<KeyCode>>,
    mut window: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !input.just_pressed(KeyCode::KeyV) {
        return;
    }
    let Ok(mut window) = window.single_mut() else {
        return;
    };

    window.present_mode = if matches!(window.present_mode, PresentMode::AutoVsync) {
        PresentMode::AutoNoVsync
    } else {
        PresentMode::AutoVsync
    };

    info!("PRESENT_MODE: {:?}", window.present_mode);
}

/// Draws the local axes of the cube group when toggled with the 'L' key.
fn visualize_cube_axes(
    mut gizmos: Gizmos,
    query: Query<&GlobalTransform, With<CubeGroup>>,
    settings: Res<AppSettings>,
    input: Res<ButtonInput<KeyCode>>,
    mut show_axes: Local<bool>,
) {
    if input.just_pressed(KeyCode::KeyL) {
        *show_axes = !*show_axes;
        info!("Cube axes visualization: {}", *show_axes);
    }

    if *show_axes {
        let length = cube_extent(settings.0.cube.cell_size, settings.0.cube.gap);
        for transform in &query {
            gizmos.axes(*transform, length);
        }
    }
}
