//! Camera placement around the cube and drawable resize handling.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::utils::cube::cube_extent;
use crate::utils::objects::{SceneCamera, SurfaceSize};
use shared::constants::camera_3d_constants::{
    CAMERA_3D_DISTANCE_FACTOR, CAMERA_3D_ELEVATION_FACTOR, CAMERA_3D_FAR, CAMERA_3D_FOV_DEGREES,
    CAMERA_3D_NEAR,
};

/// Camera position for a cube of the given cell size and gap.
/// The distance scales with the cube's total extent; the camera always looks at the origin.
pub fn camera_transform(cell_size: f32, gap: f32) -> Transform {
    let extent = cube_extent(cell_size, gap);
    let distance = extent * CAMERA_3D_DISTANCE_FACTOR;
    Transform::from_xyz(
        distance * CAMERA_3D_ELEVATION_FACTOR,
        distance * CAMERA_3D_ELEVATION_FACTOR,
        distance,
    )
    .looking_at(Vec3::ZERO, Vec3::Y)
}

/// Perspective projection for a drawable of `width` x `height`.
pub fn camera_projection(width: f32, height: f32) -> PerspectiveProjection {
    PerspectiveProjection {
        fov: CAMERA_3D_FOV_DEGREES.to_radians(),
        aspect_ratio: aspect_ratio(width, height),
        near: CAMERA_3D_NEAR,
        far: CAMERA_3D_FAR,
        ..default()
    }
}

/// `width / height`, keeping the previous shape usable for a zero-height (minimized) window.
pub fn aspect_ratio(width: f32, height: f32) -> f32 {
    if height > 0.0 { width / height } else { 1.0 }
}

/// Applies a new drawable size to the projection and the recorded surface size.
pub fn resize_surface(
    projection: &mut Projection,
    surface: &mut SurfaceSize,
    width: f32,
    height: f32,
) {
    surface.width = width;
    surface.height = height;
    if let Projection::Perspective(perspective) = projection {
        perspective.aspect_ratio = aspect_ratio(width, height);
    }
}

/// Resizes the drawable synchronously on every resize of the primary window.
/// Runs only while the scene host listens.
pub fn apply_surface_resize(
    mut resized: MessageReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut surface: ResMut<SurfaceSize>,
    mut camera_query: Query<&mut Projection, With<SceneCamera>>,
) {
    let Ok(primary) = primary.single() else {
        return;
    };
    let Ok(mut projection) = camera_query.single_mut() else {
        return;
    };
    for event in resized.read() {
        if event.window != primary {
            continue;
        }
        resize_surface(&mut projection, &mut surface, event.width, event.height);
        debug!("Surface resized to {}x{}", event.width, event.height);
    }
}
