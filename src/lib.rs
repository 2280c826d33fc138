//! Declaration of the utils modules for cube_leaderboard.

/// Scene, gesture, session and leaderboard systems, with their objects
pub mod utils {
    pub mod camera;
    pub mod cube;
    pub mod debug_functions;
    pub mod game_functions;
    pub mod gesture_inputs;
    pub mod leaderboard;
    pub mod macros;
    pub mod objects;
    pub mod session;
    pub mod setup;
    pub mod systems_logic;
}
