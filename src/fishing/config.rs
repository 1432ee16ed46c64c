//! Tuning for every fishing phase, loadable from a RON file.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::board::FishingBoardConfig;
use super::reeling::ReelingConfig;
use super::throw_hook::ThrowHookConfig;
use crate::error::{FishingError, FishingResult};

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/fishing.ron";

#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FishingConfig {
    pub throw_hook: ThrowHookConfig,
    pub board: FishingBoardConfig,
    pub reeling: ReelingConfig,
}

impl FishingConfig {
    /// Parse and validate a RON document. Missing sections take their defaults.
    pub fn from_ron_str(source: &str) -> FishingResult<Self> {
        let config: Self = ron::from_str(source)?;
        config.board.zones.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> FishingResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| FishingError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Load `path`, falling back to defaults when the file is missing or bad.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("[Config] No fishing config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("[Config] Loaded fishing config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("[Config] {}; using defaults", e);
                Self::default()
            }
        }
    }
}
