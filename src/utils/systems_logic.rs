//! Systems logic: resources, messages and the schedule of every app system.

use std::sync::Arc;

use bevy::prelude::*;

use crate::utils::camera::apply_surface_resize;
use crate::utils::game_functions::{
    panel_button_clicks, spawn_control_panel, update_leaderboard_list, update_panel_buttons,
    update_status_text,
};
use crate::utils::gesture_inputs::track_pointer_drag;
use crate::utils::leaderboard::{
    acquire_identity, connect_leaderboard, poll_leaderboard, queue_submission, send_submission,
};
use crate::utils::objects::*;
use crate::utils::session::handle_session_commands;
use crate::utils::setup::{mount_scene, scene_listening, unmount_scene};
use shared::config::AppConfig;
use shared::RankedStore;

/// Plugin carrying the app configuration and the leaderboard store.
/// Without a store the leaderboard stays disabled and the status line says so.
pub struct CubeAppPlugin {
    pub config: AppConfig,
    pub store: Option<Arc<dyn RankedStore>>,
}

impl CubeAppPlugin {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            store: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn RankedStore>) -> Self {
        self.store = Some(store);
        self
    }
}

impl Plugin for CubeAppPlugin {
    /// Builds the plugin by adding resources, messages and systems to the app.
    fn build(&self, app: &mut App) {
        app.insert_resource(AppSettings(self.config.clone()))
            .init_resource::<SceneHost>()
            .init_resource::<SurfaceSize>()
            .init_resource::<DragState>()
            .init_resource::<SessionState>()
            .init_resource::<PlayerIdentity>()
            .init_resource::<StatusMessage>()
            .init_resource::<LeaderboardSync>()
            .add_message::<SessionCommand>()
            .add_message::<UnmountScene>();

        if let Some(store) = &self.store {
            app.insert_resource(RemoteStore(Arc::clone(store)));
        }

        app.add_systems(
            Startup,
            (mount_scene, acquire_identity, connect_leaderboard).chain(),
        )
        .add_systems(
            Update,
            (apply_surface_resize, track_pointer_drag).run_if(scene_listening),
        )
        .add_systems(
            Update,
            (
                (handle_session_commands, queue_submission, send_submission).chain(),
                poll_leaderboard,
            ),
        )
        .add_systems(Last, unmount_scene);
    }
}

/// Control panel and exit key; needs the UI stack of `DefaultPlugins`.
pub struct ControlPanelPlugin;

impl Plugin for ControlPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_control_panel).add_systems(
            Update,
            (
                panel_button_clicks.before(handle_session_commands),
                update_panel_buttons,
                update_status_text,
                update_leaderboard_list.after(poll_leaderboard),
                exit_on_escape,
            ),
        );
    }
}

/// Escape closes the app, which also unmounts the scene.
fn exit_on_escape(input: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if input.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
