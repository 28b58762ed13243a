//! User settings, persisted as TOML in the OS config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::timeline::DEFAULT_PLANNING_YEAR;
use crate::timeline::Grouping;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Calendar year shown on the timeline.
    pub planning_year: i32,
    pub default_grouping: Grouping,
    /// Roadmap reopened on startup.
    pub last_file: Option<PathBuf>,
    /// Write the roadmap file after every edit.
    pub autosave: bool,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            planning_year: DEFAULT_PLANNING_YEAR,
            default_grouping: Grouping::Metric,
            last_file: None,
            autosave: true,
            window_size: [1280.0, 800.0],
        }
    }
}

impl AppConfig {
    /// Location of the config file, or `None` when the platform has no
    /// home directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "roadmap-planner")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location. A missing or broken file yields the
    /// defaults.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("No config directory available, using default settings");
            return Self::default();
        };
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring unreadable config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save to the default location, logging failures.
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            return;
        };
        if let Err(e) = self.save_to(&path) {
            log::error!("Failed to save config to {}: {}", path.display(), e);
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
