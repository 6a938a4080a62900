//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Default daily study budget for schedule generation
//! - The local user id the CLI operates as
//!
//! Configuration is stored at `~/.config/studyplan/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::scheduler::DEFAULT_HOURS_PER_DAY;

use super::data_dir;

/// Bounds the CLI applies to the configured daily budget. The scheduler
/// itself accepts any positive value.
const MIN_HOURS_PER_DAY: f64 = 0.5;
const MAX_HOURS_PER_DAY: f64 = 12.0;

/// Schedule-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyplan/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// User id the CLI operates as; overridden by STUDYPLAN_USER.
    #[serde(default)]
    pub user: Option<String>,
}

fn default_hours_per_day() -> f64 {
    DEFAULT_HOURS_PER_DAY
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            hours_per_day: default_hours_per_day(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule: ScheduleConfig::default(),
            user: None,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load configuration from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults if missing or invalid.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Save configuration to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// The configured daily budget clamped to the CLI's [0.5, 12] range.
    pub fn clamped_hours_per_day(&self) -> f64 {
        let hours = self.schedule.hours_per_day;
        if hours.is_finite() {
            hours.clamp(MIN_HOURS_PER_DAY, MAX_HOURS_PER_DAY)
        } else {
            DEFAULT_HOURS_PER_DAY
        }
    }
}
