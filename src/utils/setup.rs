//! Scene host: mounting the cube scene into the primary window and tearing it down.
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::log;
use crate::utils::camera::{camera_projection, camera_transform};
use crate::utils::cube::spawn_cube;
use crate::utils::leaderboard::disconnect_leaderboard;
use crate::utils::objects::*;
use shared::constants::lighting_constants::{
    DIRECTIONAL_LIGHT_ILLUMINANCE, DIRECTIONAL_LIGHT_POSITION, GLOBAL_AMBIENT_LIGHT_INTENSITY,
    SHADOWS_ENABLED,
};

/// Mounts the scene: camera, lights and the cube group.
/// Without a primary window there is nothing to draw into and the host stays unmounted.
pub fn mount_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<AppSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut host: ResMut<SceneHost>,
    mut surface: ResMut<SurfaceSize>,
) {
    if host.mounted {
        return;
    }
    let Ok(window) = windows.single() else {
        error!("Container unavailable, the scene will not render");
        return;
    };
    let cube = &settings.0.cube;
    let (width, height) = (window.width(), window.height());

    let camera = commands
        .spawn((
            Camera3d::default(),
            Projection::Perspective(camera_projection(width, height)),
            camera_transform(cube.cell_size, cube.gap),
            SceneCamera,
        ))
        .id();

    let sun = commands
        .spawn((
            DirectionalLight {
                illuminance: DIRECTIONAL_LIGHT_ILLUMINANCE,
                shadows_enabled: SHADOWS_ENABLED,
                ..default()
            },
            Transform::from_translation(Vec3::from_array(DIRECTIONAL_LIGHT_POSITION))
                .looking_at(Vec3::ZERO, Vec3::Y),
            SceneLight,
        ))
        .id();

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: GLOBAL_AMBIENT_LIGHT_INTENSITY,
        affects_lightmapped_meshes: true,
    });

    let spawned = spawn_cube(
        &mut commands,
        &mut meshes,
        &mut materials,
        cube.cell_size,
        cube.gap,
    );

    *host = SceneHost {
        mounted: true,
        listening: true,
        cube_group: Some(spawned.group),
        camera: Some(camera),
        lights: vec![sun],
        meshes: vec![spawned.mesh],
        materials: vec![spawned.material],
    };
    surface.width = width;
    surface.height = height;

    log!("🧊 Scene mounted ({}x{})", width, height);
}

/// Tears the scene down on unmount or app exit.
/// Listeners are detached before any graphics resource is released, so no straggling
/// input handler can touch a despawned entity.
pub fn unmount_scene(
    mut unmount: MessageReader<UnmountScene>,
    mut exit: MessageReader<AppExit>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut host: ResMut<SceneHost>,
    mut drag: ResMut<DragState>,
    mut sync: ResMut<LeaderboardSync>,
) {
    let requested = unmount.read().count() + exit.read().count() > 0;
    if !requested {
        return;
    }

    // 1. Listeners
    host.listening = false;
    *drag = DragState::default();

    // 2. Remote subscription, opened whether or not the scene mounted
    disconnect_leaderboard(&mut sync);

    if !host.mounted {
        return;
    }

    // 3. Graphics resources
    if let Some(group) = host.cube_group.take() {
        commands.entity(group).despawn();
    }
    if let Some(camera) = host.camera.take() {
        commands.entity(camera).despawn();
    }
    for light in host.lights.drain(..) {
        commands.entity(light).despawn();
    }
    for mesh in host.meshes.drain(..) {
        meshes.remove(&mesh);
    }
    for material in host.materials.drain(..) {
        materials.remove(&material);
    }
    host.mounted = false;

    log!("🧹 Scene unmounted");
}

/// Run condition for systems that only listen while the scene is mounted.
pub fn scene_listening(host: Res<SceneHost>) -> bool {
    host.listening
}
