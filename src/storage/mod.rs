mod file_storage;

use uuid::Uuid;

use crate::schedule::WeeklySchedule;

pub use file_storage::{Result, ScheduleStorage, StorageError};

/// Where confirmed schedules are handed off. Implementations own any retry
/// policy; the editor calls `save` once per confirmation.
pub trait ScheduleStore {
    fn save(&self, student_id: Uuid, schedule: &WeeklySchedule) -> Result<()>;

    fn load(&self, student_id: Uuid) -> Result<Option<WeeklySchedule>>;
}
