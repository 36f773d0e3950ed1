use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use uuid::Uuid;

use planner_lib::config::AppConfig;
use planner_lib::schedule::ScheduleEditor;
use planner_lib::storage::ScheduleStorage;

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub storage: ScheduleStorage,
}

impl App {
    /// Load config and open schedule storage
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => AppConfig::default_path().context("Failed to locate config directory")?,
        };
        let mut config = AppConfig::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
        if data_dir.is_some() {
            config.data_dir = data_dir;
        }

        let data_dir = config
            .resolve_data_dir()
            .context("Failed to get data directory")?;
        let storage = ScheduleStorage::new(data_dir.clone())
            .with_context(|| format!("Failed to open schedule storage in {}", data_dir.display()))?;

        Ok(Self { config, storage })
    }

    /// Open an editor on the student's stored schedule (or an empty week)
    pub fn open_editor(&self, student_id: Uuid) -> Result<ScheduleEditor> {
        ScheduleEditor::load(&self.storage, student_id, self.config.schedule.clone())
            .with_context(|| format!("Failed to read schedule for student {}", student_id))
    }
}
