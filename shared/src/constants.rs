// Constants used in the cube app and shared across libraries.

/// Window defaults
pub mod window_constants {
    pub const WINDOW_TITLE: &str = "Cube Leaderboard";
    pub const WINDOW_WIDTH: u32 = 1280;
    pub const WINDOW_HEIGHT: u32 = 720;

    // Canvas selector used when running in the browser.
    pub const WEB_CANVAS_SELECTOR: &str = "#cube-canvas";
}

/// Cube object
pub mod cube_constants {
    // Cells per axis. The builder always produces a 3x3x3 grid.
    pub const CELLS_PER_AXIS: usize = 3;
    pub const CELL_COUNT: usize = CELLS_PER_AXIS * CELLS_PER_AXIS * CELLS_PER_AXIS;

    pub const CELL_SIZE: f32 = 1.0;
    pub const CELL_GAP: f32 = 0.05;

    // Face colors paired by axis: +X/-X, +Y/-Y, +Z/-Z
    pub const FACE_COLORS: [[f32; 4]; 3] = [
        [1.0, 0.35, 0.0, 1.0], // orange
        [1.0, 1.0, 1.0, 1.0],  // white
        [0.0, 0.45, 1.0, 1.0], // blue
    ];
}

/// 3D camera
pub mod camera_3d_constants {
    // Camera distance from the origin as a multiple of the cube's total extent.
    pub const CAMERA_3D_DISTANCE_FACTOR: f32 = 2.5;
    // Slight elevation so three faces are visible at mount.
    pub const CAMERA_3D_ELEVATION_FACTOR: f32 = 0.6;

    pub const CAMERA_3D_FOV_DEGREES: f32 = 75.0;
    pub const CAMERA_3D_NEAR: f32 = 0.1;
    pub const CAMERA_3D_FAR: f32 = 1000.0;
}

/// Lighting constants
pub mod lighting_constants {
    // Shadow settings
    #[cfg(target_arch = "wasm32")]
    pub const SHADOWS_ENABLED: bool = false; // Need to disable shadows on WASM for weird artifacts
    #[cfg(not(target_arch = "wasm32"))]
    pub const SHADOWS_ENABLED: bool = true;

    pub const GLOBAL_AMBIENT_LIGHT_INTENSITY: f32 = 400.0;
    pub const DIRECTIONAL_LIGHT_ILLUMINANCE: f32 = 8_000.0;
    pub const DIRECTIONAL_LIGHT_POSITION: [f32; 3] = [5.0, 10.0, 7.5];
}

/// Gesture tracking
pub mod gesture_constants {
    // Radians of rotation per pixel of pointer movement.
    pub const GESTURE_SENSITIVITY: f32 = 0.005;
}

/// Session scoring
pub mod session_constants {
    // Points awarded per whole elapsed second.
    pub const POINTS_PER_SECOND: u64 = 10;
}

/// Leaderboard
pub mod leaderboard_constants {
    pub const LEADERBOARD_COLLECTION: &str = "leaderboard";
    pub const LEADERBOARD_MAX_ENTRIES: usize = 10;

    pub const ANONYMOUS_ID_PREFIX: &str = "anon";
}

/// UI
pub mod ui_constants {
    pub const STATUS_FONT_SIZE: f32 = 18.0;
    pub const BUTTON_FONT_SIZE: f32 = 20.0;
    pub const LEADERBOARD_FONT_SIZE: f32 = 16.0;
    pub const PANEL_MARGIN_PX: f32 = 10.0;

    pub const BUTTON_COLOR: [f32; 4] = [0.15, 0.15, 0.15, 1.0];
    pub const BUTTON_HOVER_COLOR: [f32; 4] = [0.25, 0.25, 0.25, 1.0];
    pub const BUTTON_DISABLED_COLOR: [f32; 4] = [0.08, 0.08, 0.08, 0.6];
}
