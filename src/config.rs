//! Application configuration
//!
//! Read from `config.toml` in the user's config directory. Every key is
//! optional; a missing file yields the built-in defaults.

use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schedule::time::hhmm;

const APP_DIR_NAME: &str = "homeschool-planner";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Config directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default()
}

fn default_end_time() -> NaiveTime {
    NaiveTime::from_hms_opt(15, 0, 0).unwrap_or_default()
}

fn minutes(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

/// Values seeded into a day the first time it is selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleDefaults {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub block_length_minutes: NonZeroU32,
    /// Block lengths offered by the editor. The engine accepts any positive length.
    pub block_length_options: Vec<NonZeroU32>,
}

impl Default for ScheduleDefaults {
    fn default() -> Self {
        Self {
            start_time: default_start_time(),
            end_time: default_end_time(),
            block_length_minutes: minutes(45),
            block_length_options: vec![minutes(30), minutes(45), minutes(60)],
        }
    }
}

impl ScheduleDefaults {
    pub fn offers_block_length(&self, block_length_minutes: u32) -> bool {
        self.block_length_options
            .iter()
            .any(|option| option.get() == block_length_minutes)
    }

    fn validate(&self) -> Result<()> {
        if self.block_length_options.is_empty() {
            return Err(ConfigError::Invalid(
                "schedule.block_length_options must not be empty".to_string(),
            ));
        }
        if !self.offers_block_length(self.block_length_minutes.get()) {
            return Err(ConfigError::Invalid(format!(
                "schedule.block_length_minutes ({}) is not one of block_length_options",
                self.block_length_minutes
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides where schedules are stored
    pub data_dir: Option<PathBuf>,
    pub schedule: ScheduleDefaults,
}

impl AppConfig {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME).join("config.toml"))
            .ok_or(ConfigError::DataDirNotFound)
    }

    /// Load config from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.schedule.validate()?;
        Ok(config)
    }

    /// Directory that holds the `schedules/` folder
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_local_dir()
                .map(|p| p.join(APP_DIR_NAME))
                .ok_or(ConfigError::DataDirNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let defaults = ScheduleDefaults::default();
        assert_eq!(defaults.start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(defaults.end_time, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
        assert_eq!(defaults.block_length_minutes.get(), 45);
        assert!(defaults.offers_block_length(30));
        assert!(!defaults.offers_block_length(50));
    }

    #[test]
    fn test_parse_partial_config() {
        let config = AppConfig::from_toml(
            r#"
            [schedule]
            start_time = "09:30"
            block_length_minutes = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, None);
        assert_eq!(config.schedule.start_time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(config.schedule.end_time, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
        assert_eq!(config.schedule.block_length_minutes.get(), 30);
    }

    #[test]
    fn test_data_dir_override() {
        let config = AppConfig::from_toml("data_dir = \"/srv/planner\"").unwrap();
        assert_eq!(config.resolve_data_dir().unwrap(), PathBuf::from("/srv/planner"));
    }

    #[test]
    fn test_rejects_zero_block_length() {
        let result = AppConfig::from_toml("[schedule]\nblock_length_minutes = 0\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_default_outside_options() {
        let result = AppConfig::from_toml(
            "[schedule]\nblock_length_minutes = 50\nblock_length_options = [30, 45]\n",
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_time() {
        let result = AppConfig::from_toml("[schedule]\nend_time = \"3pm\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[schedule]\nend_time = \"14:00\"\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.schedule.end_time, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
    }
}
