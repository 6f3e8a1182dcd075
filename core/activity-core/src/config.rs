//! Configuration loading and saving.
//!
//! `config.json` is optional. A missing file means defaults; a corrupt one is
//! logged and also yields defaults so rendering never stops over settings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::Argb;
use crate::error::{ActivityError, Result};
use crate::presentation::{HourCycle, SystemCalendar};
use crate::state::FALLBACK_PRIMARY_COLOR;
use crate::storage::StorageConfig;
use crate::surface::{CapabilityTier, SurfaceThresholds};

/// Engine settings read from `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityConfig {
    pub thresholds: SurfaceThresholds,
    /// Overrides the hour cycle detected from the locale.
    pub hour_cycle: Option<HourCycle>,
    pub capability_tier: CapabilityTier,
    /// Used when the store has no primary color for an instance.
    pub fallback_color: Argb,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            thresholds: SurfaceThresholds::default(),
            hour_cycle: None,
            capability_tier: CapabilityTier::default(),
            fallback_color: FALLBACK_PRIMARY_COLOR,
        }
    }
}

impl ActivityConfig {
    /// Host calendar honoring the hour cycle override.
    pub fn system_calendar(&self) -> SystemCalendar {
        match self.hour_cycle {
            Some(hour_cycle) => SystemCalendar::new(hour_cycle),
            None => SystemCalendar::detect(),
        }
    }
}

/// Reads a config file. Missing ⇒ defaults; unparsable ⇒ `ConfigMalformed`.
pub fn read_config(path: &Path) -> Result<ActivityConfig> {
    if !path.exists() {
        return Ok(ActivityConfig::default());
    }

    let content = fs_err::read_to_string(path).map_err(|source| ActivityError::Io {
        context: "reading config".to_string(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(ActivityConfig::default());
    }

    serde_json::from_str(&content).map_err(|e| ActivityError::ConfigMalformed {
        path: path.to_path_buf(),
        details: e.to_string(),
    })
}

/// Loads the config, falling back to defaults on any error.
pub fn load_config(storage: &StorageConfig) -> ActivityConfig {
    let path = storage.config_file();
    match read_config(&path) {
        Ok(config) => {
            debug!(path = %path.display(), "Loaded activity config");
            config
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Using default activity config");
            ActivityConfig::default()
        }
    }
}

/// Writes the config as pretty JSON, creating the root directory if needed.
pub fn save_config(storage: &StorageConfig, config: &ActivityConfig) -> Result<()> {
    fs_err::create_dir_all(storage.root()).map_err(|source| ActivityError::Io {
        context: "creating config directory".to_string(),
        source,
    })?;

    let content = serde_json::to_string_pretty(config).map_err(|source| ActivityError::Json {
        context: "serializing config".to_string(),
        source,
    })?;

    fs_err::write(storage.config_file(), content).map_err(|source| ActivityError::Io {
        context: "writing config".to_string(),
        source,
    })
}
