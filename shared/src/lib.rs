//! Configuration, constants and leaderboard backends shared by the cube app.
//!
//! Nothing here depends on the engine: the app crate wires these pieces into its
//! systems, and tests exercise them directly.
//!
//! ## Layout
//!
//! - `config`: `AppConfig`, read once at startup from TOML
//! - `identity`: anonymous and custom identity providers
//! - `store`: the ranked store contract and its in-process implementation
//! - `error`: `AppError`, reported through the app's status line

pub mod config;
pub mod constants;
pub mod error;
pub mod identity;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use store::{LeaderboardEntry, MemoryStore, NewScore, RankedStore, Snapshot, Subscription};

// Platform modules
cfg_if::cfg_if! {
    if #[cfg(not(target_arch = "wasm32"))] {
        mod native;
        pub use native::*;
    } else {
        mod web;
        pub use web::*;
    }
}
