//! Startup configuration, read once and handed to the app plugin.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::{
    cube_constants::{CELL_GAP, CELL_SIZE},
    gesture_constants::GESTURE_SENSITIVITY,
    leaderboard_constants::{LEADERBOARD_COLLECTION, LEADERBOARD_MAX_ENTRIES},
    window_constants::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH},
};
use crate::error::{AppError, AppResult};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "cube.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    pub cell_size: f32,
    pub gap: f32,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            gap: CELL_GAP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Radians per pixel.
    pub sensitivity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            sensitivity: GESTURE_SENSITIVITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdentityMode {
    #[default]
    Anonymous,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub mode: IdentityMode,
    /// Required when `mode = "custom"`.
    pub custom_id: Option<String>,
    /// Fixed seed for reproducible anonymous ids; seeded from the clock when absent.
    pub seed: Option<u64>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            mode: IdentityMode::Anonymous,
            custom_id: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub collection: String,
    pub max_entries: usize,
    /// Makes the in-process store reject every write.
    pub reject_writes: bool,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            collection: LEADERBOARD_COLLECTION.to_string(),
            max_entries: LEADERBOARD_MAX_ENTRIES,
            reject_writes: false,
        }
    }
}

/// Whole-app configuration.
///
/// `identity` and `leaderboard` are optional: a file that omits them disables those
/// subsystems while the cube still renders. Running without any file uses
/// [`AppConfig::default`], which enables both.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub cube: CubeConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    pub identity: Option<IdentityConfig>,
    pub leaderboard: Option<LeaderboardConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            cube: CubeConfig::default(),
            gesture: GestureConfig::default(),
            identity: Some(IdentityConfig::default()),
            leaderboard: Some(LeaderboardConfig::default()),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> AppResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| AppError::ConfigInvalid(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_toml_str(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(AppError::ConfigInvalid(format!("{}: {e}", path.display()))),
        }
    }

    fn validate(&self) -> AppResult<()> {
        if !(self.cube.cell_size > 0.0 && self.cube.cell_size.is_finite()) {
            return Err(AppError::ConfigInvalid("cube.cell_size must be positive".into()));
        }
        if !(self.cube.gap >= 0.0 && self.cube.gap.is_finite()) {
            return Err(AppError::ConfigInvalid(
                "cube.gap must be finite and not negative".into(),
            ));
        }
        if !self.gesture.sensitivity.is_finite() {
            return Err(AppError::ConfigInvalid("gesture.sensitivity must be finite".into()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(AppError::ConfigInvalid("window size must be non-zero".into()));
        }
        if let Some(leaderboard) = &self.leaderboard {
            if leaderboard.max_entries == 0 {
                return Err(AppError::ConfigInvalid(
                    "leaderboard.max_entries must be at least 1".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn identity(&self) -> AppResult<&IdentityConfig> {
        self.identity
            .as_ref()
            .ok_or(AppError::ConfigMissing { subsystem: "identity" })
    }

    pub fn leaderboard(&self) -> AppResult<&LeaderboardConfig> {
        self.leaderboard
            .as_ref()
            .ok_or(AppError::ConfigMissing { subsystem: "leaderboard" })
    }
}
