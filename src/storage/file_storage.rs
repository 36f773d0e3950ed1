use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use super::ScheduleStore;
use crate::schedule::WeeklySchedule;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schedule not found for student: {0}")]
    ScheduleNotFound(Uuid),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Stores one JSON file per student under `<data_dir>/schedules/`
pub struct ScheduleStorage {
    schedules_dir: PathBuf,
}

impl ScheduleStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        let schedules_dir = data_dir.join("schedules");
        fs::create_dir_all(&schedules_dir)?;
        Ok(Self { schedules_dir })
    }

    fn schedule_path(&self, student_id: Uuid) -> PathBuf {
        self.schedules_dir.join(format!("{}.json", student_id))
    }

    /// Students that have a stored schedule
    pub fn list_students(&self) -> Result<Vec<Uuid>> {
        let mut students = Vec::new();

        for entry in fs::read_dir(&self.schedules_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Uuid::parse_str(stem) {
                Ok(id) => students.push(id),
                Err(_) => log::warn!("Skipping unexpected file in schedules dir: {}", path.display()),
            }
        }

        students.sort();
        Ok(students)
    }

    pub fn load_schedule(&self, student_id: Uuid) -> Result<Option<WeeklySchedule>> {
        let path = self.schedule_path(student_id);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let schedule: WeeklySchedule = serde_json::from_str(&content)?;
        log::debug!("Loaded schedule for student {}", student_id);
        Ok(Some(schedule))
    }

    /// Write the schedule through a temporary file so a failed write leaves the
    /// previous version in place
    pub fn save_schedule(&self, student_id: Uuid, schedule: &WeeklySchedule) -> Result<()> {
        let json = serde_json::to_string_pretty(schedule)?;
        let path = self.schedule_path(student_id);
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, json)?;
        if let Err(err) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }

        log::info!(
            "Saved schedule for student {} ({} days, {} blocks/week)",
            student_id,
            schedule.selected_days().len(),
            schedule.total_blocks()
        );
        Ok(())
    }

    pub fn delete_schedule(&self, student_id: Uuid) -> Result<()> {
        let path = self.schedule_path(student_id);
        if !path.exists() {
            return Err(StorageError::ScheduleNotFound(student_id));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}

impl ScheduleStore for ScheduleStorage {
    fn save(&self, student_id: Uuid, schedule: &WeeklySchedule) -> Result<()> {
        self.save_schedule(student_id, schedule)
    }

    fn load(&self, student_id: Uuid) -> Result<Option<WeeklySchedule>> {
        self.load_schedule(student_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{parse_time, WeekdayKey};
    use tempfile::TempDir;

    fn create_test_storage() -> (ScheduleStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = ScheduleStorage::new(temp_dir.path().to_path_buf()).unwrap();
        (storage, temp_dir)
    }

    fn sample_schedule() -> WeeklySchedule {
        let mut schedule = WeeklySchedule::new();
        schedule.toggle_day(WeekdayKey::Monday);
        schedule.toggle_day(WeekdayKey::Wednesday);
        schedule.set_end_time(WeekdayKey::Wednesday, parse_time("12:00").unwrap());
        schedule.toggle_day(WeekdayKey::Sunday);
        schedule.toggle_day(WeekdayKey::Sunday);
        schedule
    }

    #[test]
    fn test_missing_schedule_loads_as_none() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.load_schedule(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_schedule() {
        let (storage, _temp) = create_test_storage();
        let student = Uuid::new_v4();
        let schedule = sample_schedule();

        storage.save_schedule(student, &schedule).unwrap();
        let loaded = storage.load_schedule(student).unwrap().unwrap();

        assert_eq!(loaded, schedule);
        // deselected Sunday keeps its stored window
        assert!(loaded.day(WeekdayKey::Sunday).window().is_some());
        assert_eq!(loaded.day(WeekdayKey::Wednesday).blocks(), 5);
    }

    #[test]
    fn test_save_overwrites_previous_version() {
        let (storage, temp) = create_test_storage();
        let student = Uuid::new_v4();
        let mut schedule = sample_schedule();
        storage.save_schedule(student, &schedule).unwrap();

        schedule.set_uniform(true);
        storage.save_schedule(student, &schedule).unwrap();

        let loaded = storage.load_schedule(student).unwrap().unwrap();
        assert!(loaded.is_uniform());
        assert!(!temp
            .path()
            .join("schedules")
            .join(format!("{}.json.tmp", student))
            .exists());
    }

    #[test]
    fn test_list_students() {
        let (storage, temp) = create_test_storage();
        let mut ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        for id in &ids {
            storage.save_schedule(*id, &WeeklySchedule::new()).unwrap();
        }
        fs::write(temp.path().join("schedules").join("notes.json"), "{}").unwrap();

        ids.sort();
        assert_eq!(storage.list_students().unwrap(), ids);
    }

    #[test]
    fn test_delete_schedule() {
        let (storage, _temp) = create_test_storage();
        let student = Uuid::new_v4();
        storage.save_schedule(student, &sample_schedule()).unwrap();

        storage.delete_schedule(student).unwrap();
        assert!(storage.load_schedule(student).unwrap().is_none());
        assert!(matches!(
            storage.delete_schedule(student),
            Err(StorageError::ScheduleNotFound(_))
        ));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (storage, temp) = create_test_storage();
        let student = Uuid::new_v4();
        fs::write(
            temp.path().join("schedules").join(format!("{}.json", student)),
            r#"{"days":{"monday":{"selected":true,"window":{"startTime":"08:00","endTime":"09:00","blockLengthMinutes":0}}}}"#,
        )
        .unwrap();

        assert!(matches!(storage.load_schedule(student), Err(StorageError::Json(_))));
    }
}
