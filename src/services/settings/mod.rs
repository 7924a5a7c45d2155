//! Settings persistence.
//! Loads and saves the TOML configuration file. Debug builds read from the
//! working directory; release builds use the platform config directory.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
#[cfg(not(debug_assertions))]
use directories::ProjectDirs;

use crate::models::settings::Settings;

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new() -> Self {
        Self {
            path: resolve_settings_path(),
        }
    }

    /// Use an explicit file path instead of the platform default.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the configuration. A missing file yields the defaults; an
    /// unreadable or unparseable file is an error so a typo never silently
    /// reverts the backend URL.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let raw = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

impl Default for SettingsService {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_settings_path() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from("care-board.toml")
    }

    #[cfg(not(debug_assertions))]
    {
        if let Some(proj_dirs) = ProjectDirs::from("com", "CareBoard", "CareBoard") {
            proj_dirs.config_dir().join("care-board.toml")
        } else {
            PathBuf::from("care-board.toml")
        }
    }
}
