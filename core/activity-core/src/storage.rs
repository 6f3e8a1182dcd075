//! Storage paths for the activity engine.
//!
//! All file locations are derived from one root so tests can point the whole
//! engine at a temp directory with [`StorageConfig::with_root`].

use std::path::{Path, PathBuf};

use crate::error::{ActivityError, Result};

/// Directory name under the home directory.
pub const ROOT_DIR_NAME: &str = ".print-activity";

/// Central configuration for every path the engine reads or writes.
///
/// Production code uses [`StorageConfig::from_home`], which points to
/// `~/.print-activity/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    root: PathBuf,
}

impl StorageConfig {
    /// Root under the current user's home directory.
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(ActivityError::HomeDirNotFound)?;
        Ok(Self {
            root: home.join(ROOT_DIR_NAME),
        })
    }

    /// Creates a StorageConfig with a custom root directory.
    /// Used for testing with temp directories.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Files
    // ─────────────────────────────────────────────────────────────────────────────

    /// Path to store.json (fallback values written by the host app).
    pub fn store_file(&self) -> PathBuf {
        self.root.join("store.json")
    }

    /// Path to config.json (thresholds, tier, hour cycle override).
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Directories
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Ensures the root directory and the logs directory exist.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.root.clone(), self.logs_dir()] {
            fs_err::create_dir_all(&dir).map_err(|source| ActivityError::Io {
                context: format!("creating {}", dir.display()),
                source,
            })?;
        }
        Ok(())
    }
}
