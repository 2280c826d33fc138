//! Start-up for cube_leaderboard, with window, plugins, and resources.

use std::sync::Arc;

use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::*,
};

use cube_leaderboard::log;
use cube_leaderboard::utils::{
    debug_functions::DebugFunctionsPlugin,
    systems_logic::{ControlPanelPlugin, CubeAppPlugin},
};
use shared::config::{AppConfig, DEFAULT_CONFIG_PATH};
#[cfg(target_arch = "wasm32")]
use shared::constants::window_constants::WEB_CANVAS_SELECTOR;
use shared::MemoryStore;

/// Reads the config named on the command line, or `cube.toml`.
/// An unreadable file is reported and replaced by defaults.
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> AppConfig {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    AppConfig::load(&path).unwrap_or_else(|e| {
        log!("⚠️ {}, using defaults", e);
        AppConfig::default()
    })
}

/// The browser has no config file; the page ships with defaults.
#[cfg(target_arch = "wasm32")]
fn load_config() -> AppConfig {
    log!("Using default configuration (no {} on the web)", DEFAULT_CONFIG_PATH);
    AppConfig::default()
}

/// Entry point for the application
fn main() {
    let config = load_config();

    let window = Some(Window {
        title: config.window.title.clone(),
        resolution: WindowResolution::new(config.window.width, config.window.height),
        #[cfg(target_arch = "wasm32")]
        canvas: Some(WEB_CANVAS_SELECTOR.into()),
        fit_canvas_to_parent: true,
        prevent_default_event_handling: true,
        present_mode: PresentMode::AutoVsync,
        ..default()
    });

    let store = MemoryStore::new();
    if let Some(leaderboard) = &config.leaderboard {
        store.set_reject_writes(leaderboard.reject_writes);
    }

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: window,
                ..default()
            }),
            LogDiagnosticsPlugin::default(),
            FrameTimeDiagnosticsPlugin::default(),
            CubeAppPlugin::new(config).with_store(Arc::new(store)),
            ControlPanelPlugin,
            DebugFunctionsPlugin,
        ))
        .run();
}
