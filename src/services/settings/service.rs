use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::SchedulerSettings;

const SETTINGS_FILE_NAME: &str = "scheduler.toml";

/// Loads and stores [`SchedulerSettings`] as a TOML file.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to the platform configuration directory.
    pub fn from_default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "StaffingCalendar", "Scheduler")
            .ok_or_else(|| anyhow!("No home directory available for settings"))?;
        Ok(Self::new(dirs.config_dir().join(SETTINGS_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current settings, falling back to defaults when no file exists
    pub fn get(&self) -> Result<SchedulerSettings> {
        if !self.path.exists() {
            log::debug!("No settings file at {:?}, using defaults", self.path);
            return Ok(SchedulerSettings::default());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {:?}", self.path))?;
        let settings: SchedulerSettings = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse settings in {:?}", self.path))?;

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {:?}: {}", self.path, e))?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &SchedulerSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let raw = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write settings to {:?}", self.path))?;

        log::info!("Saved scheduler settings to {:?}", self.path);
        Ok(())
    }
}
