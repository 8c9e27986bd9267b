//! Gameplay Configuration
//!
//! One serde document holding the tuning of every component. Missing fields
//! take their defaults, so a config file only lists what it changes:
//!
//! ```json
//! { "initial_mode": "weapon", "locomotion": { "run_speed": 3.0 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;
use crate::error::GameplayError;
use crate::modes::{BuildConfig, ModeKind};
use crate::player::LocomotionConfig;
use crate::sensor::SensorConfig;
use crate::world::GridConfig;

/// Central configuration for the gameplay core.
///
/// `Default` matches the tuning the character and build tools shipped with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub grid: GridConfig,
    pub locomotion: LocomotionConfig,
    pub camera: CameraConfig,
    pub sensor: SensorConfig,
    pub build: BuildConfig,
    /// Mode entered when the simulation starts
    pub initial_mode: ModeKind,
    /// Modes with a registered handler
    pub modes: Vec<ModeKind>,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            locomotion: LocomotionConfig::default(),
            camera: CameraConfig::default(),
            sensor: SensorConfig::default(),
            build: BuildConfig::default(),
            initial_mode: ModeKind::Build,
            modes: ModeKind::ALL.to_vec(),
        }
    }
}

impl GameplayConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, GameplayError> {
        let config: GameplayConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self, GameplayError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("[Config] Loaded {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, GameplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), GameplayError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_string()?)?;
        log::info!("[Config] Saved {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), GameplayError> {
        self.grid.validate()?;
        self.locomotion.validate()?;
        self.camera.validate()?;
        self.sensor.validate()?;
        if !self.modes.contains(&self.initial_mode) {
            log::warn!(
                "[Config] Initial mode {:?} has no handler, mode machine will stay idle",
                self.initial_mode
            );
        }
        Ok(())
    }
}
