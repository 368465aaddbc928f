// Application configuration
// Optional config.toml in the platform config dir; every field has a default

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::services::store::Identity;

pub const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "clearmonth.db";
const SNAPSHOT_FILE: &str = "tasks.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Override for the synced SQLite database location.
    pub database_path: Option<PathBuf>,
    /// Override for the guest snapshot file.
    pub snapshot_path: Option<PathBuf>,
    /// Signed-in user id; absent means guest mode.
    pub user: Option<String>,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
}

/// Resolved locations of the two backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub database: PathBuf,
    pub snapshot: PathBuf,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "ClearMonth", "ClearMonth")
}

impl AppConfig {
    /// Read `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        toml::from_str(&data).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Load from the platform config directory.
    pub fn load_default() -> Result<Self> {
        match project_dirs() {
            Some(dirs) => Self::load(&dirs.config_dir().join(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
        let data = toml::to_string_pretty(self)?;
        fs::write(path, data)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn identity(&self) -> Identity {
        Identity::from_user(self.user.as_deref())
    }

    /// Explicit overrides win; otherwise files live in the platform data dir,
    /// or the working directory when there is none.
    pub fn paths(&self) -> AppPaths {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_default();
        self.paths_in(&data_dir)
    }

    pub fn paths_in(&self, data_dir: &Path) -> AppPaths {
        AppPaths {
            database: self
                .database_path
                .clone()
                .unwrap_or_else(|| data_dir.join(DATABASE_FILE)),
            snapshot: self
                .snapshot_path
                .clone()
                .unwrap_or_else(|| data_dir.join(SNAPSHOT_FILE)),
        }
    }
}
