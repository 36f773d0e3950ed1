//! Schedule editor session
//!
//! Holds one student's schedule while it is being edited. Edits stay in memory
//! until `confirm` hands the schedule to a store; `cancel` drops them.

use chrono::NaiveTime;
use uuid::Uuid;

use super::error::{Result, ScheduleError};
use super::models::{WeekdayKey, WeeklySchedule};
use super::sync::UniformAlignment;
use crate::config::ScheduleDefaults;
use crate::storage::ScheduleStore;

pub struct ScheduleEditor {
    student_id: Uuid,
    saved: WeeklySchedule,
    working: WeeklySchedule,
    last_alignment: Option<UniformAlignment>,
}

impl ScheduleEditor {
    /// Open an editor on `initial`, or on an empty week when nothing was stored
    pub fn open(student_id: Uuid, initial: Option<WeeklySchedule>, defaults: ScheduleDefaults) -> Self {
        let saved = initial.unwrap_or_default().with_defaults(defaults);
        Self {
            student_id,
            working: saved.clone(),
            saved,
            last_alignment: None,
        }
    }

    /// Open an editor on whatever `store` holds for the student
    pub fn load<S: ScheduleStore + ?Sized>(
        store: &S,
        student_id: Uuid,
        defaults: ScheduleDefaults,
    ) -> crate::storage::Result<Self> {
        let initial = store.load(student_id)?;
        Ok(Self::open(student_id, initial, defaults))
    }

    pub fn student_id(&self) -> Uuid {
        self.student_id
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.working
    }

    pub fn is_dirty(&self) -> bool {
        self.working != self.saved
    }

    /// Result of the most recent switch to uniform mode, for telling the user
    /// which day's values were copied
    pub fn last_alignment(&self) -> Option<&UniformAlignment> {
        self.last_alignment.as_ref()
    }

    /// Whether the editor offers this block length in its picker
    pub fn is_offered_block_length(&self, block_length_minutes: u32) -> bool {
        self.working.defaults().offers_block_length(block_length_minutes)
    }

    pub fn toggle_day(&mut self, day: WeekdayKey) -> bool {
        self.working.toggle_day(day)
    }

    pub fn set_start_time(&mut self, day: WeekdayKey, start_time: NaiveTime) -> Vec<WeekdayKey> {
        self.working.set_start_time(day, start_time)
    }

    pub fn set_end_time(&mut self, day: WeekdayKey, end_time: NaiveTime) -> Vec<WeekdayKey> {
        self.working.set_end_time(day, end_time)
    }

    pub fn set_block_length(&mut self, day: WeekdayKey, block_length_minutes: u32) -> Result<Vec<WeekdayKey>> {
        self.working.set_block_length(day, block_length_minutes)
    }

    pub fn set_uniform(&mut self, enabled: bool) -> Option<&UniformAlignment> {
        self.last_alignment = self.working.set_uniform(enabled);
        self.last_alignment.as_ref()
    }

    /// Hand the working schedule to `store`.
    ///
    /// On failure the working copy is left as it was and stays editable; the
    /// caller decides whether to try again.
    pub fn confirm<S: ScheduleStore + ?Sized>(&mut self, store: &S) -> Result<()> {
        match store.save(self.student_id, &self.working) {
            Ok(()) => {
                self.saved = self.working.clone();
                Ok(())
            }
            Err(err) => {
                log::error!("Saving schedule for student {} failed: {}", self.student_id, err);
                Err(ScheduleError::SaveFailure(err))
            }
        }
    }

    /// Drop unsaved edits and return the last saved schedule
    pub fn cancel(self) -> WeeklySchedule {
        if self.is_dirty() {
            log::debug!("Discarding unsaved schedule edits for student {}", self.student_id);
        }
        self.saved
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::schedule::time::parse_time;
    use crate::storage::StorageError;

    fn t(raw: &str) -> NaiveTime {
        parse_time(raw).unwrap()
    }

    /// In-memory store that can be told to fail
    #[derive(Default)]
    struct MemoryStore {
        saved: RefCell<Option<WeeklySchedule>>,
        saves: Cell<usize>,
        fail: Cell<bool>,
    }

    impl ScheduleStore for MemoryStore {
        fn save(&self, _student_id: Uuid, schedule: &WeeklySchedule) -> crate::storage::Result<()> {
            self.saves.set(self.saves.get() + 1);
            if self.fail.get() {
                return Err(StorageError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )));
            }
            *self.saved.borrow_mut() = Some(schedule.clone());
            Ok(())
        }

        fn load(&self, _student_id: Uuid) -> crate::storage::Result<Option<WeeklySchedule>> {
            Ok(self.saved.borrow().clone())
        }
    }

    fn open_empty() -> ScheduleEditor {
        ScheduleEditor::open(Uuid::new_v4(), None, ScheduleDefaults::default())
    }

    #[test]
    fn test_open_without_schedule() {
        let editor = open_empty();
        assert!(editor.schedule().selected_days().is_empty());
        assert!(editor.schedule().days().all(|(_, d)| d.window().is_none()));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_weekly_plan_scenario() {
        let mut editor = open_empty();
        editor.toggle_day(WeekdayKey::Monday);
        editor.toggle_day(WeekdayKey::Wednesday);
        for day in [WeekdayKey::Monday, WeekdayKey::Wednesday] {
            editor.set_start_time(day, t("08:00"));
            editor.set_end_time(day, t("15:00"));
            editor.set_block_length(day, 45).unwrap();
        }

        let alignment = editor.set_uniform(true).unwrap();
        assert_eq!(alignment.reference, WeekdayKey::Monday);
        assert!(alignment.realigned.is_empty());
        assert_eq!(editor.schedule().day(WeekdayKey::Monday).blocks(), 9);
        assert_eq!(editor.schedule().day(WeekdayKey::Wednesday).blocks(), 9);

        editor.set_end_time(WeekdayKey::Monday, t("14:00"));
        let wednesday = editor.schedule().day(WeekdayKey::Wednesday).window().unwrap();
        assert_eq!(wednesday.end_time(), t("14:00"));
        assert_eq!(wednesday.blocks(), 8);

        editor.set_uniform(false);
        editor.set_block_length(WeekdayKey::Wednesday, 60).unwrap();
        let monday = editor.schedule().day(WeekdayKey::Monday).window().unwrap();
        let wednesday = editor.schedule().day(WeekdayKey::Wednesday).window().unwrap();
        assert_eq!(wednesday.blocks(), 6);
        assert_eq!(monday.blocks(), 8);
        assert_eq!(monday.block_length_minutes().get(), 45);
    }

    #[test]
    fn test_uniform_alignment_is_kept_for_display() {
        let mut editor = open_empty();
        editor.toggle_day(WeekdayKey::Tuesday);
        editor.toggle_day(WeekdayKey::Thursday);
        editor.set_end_time(WeekdayKey::Thursday, t("12:00"));

        editor.set_uniform(true);
        let alignment = editor.last_alignment().unwrap();
        assert_eq!(alignment.reference, WeekdayKey::Tuesday);
        assert_eq!(alignment.realigned, vec![WeekdayKey::Thursday]);

        editor.set_uniform(false);
        assert!(editor.last_alignment().is_none());
    }

    #[test]
    fn test_confirm_saves_once() {
        let store = MemoryStore::default();
        let mut editor = open_empty();
        editor.toggle_day(WeekdayKey::Friday);
        assert!(editor.is_dirty());

        editor.confirm(&store).unwrap();

        assert_eq!(store.saves.get(), 1);
        assert!(!editor.is_dirty());
        let stored = store.saved.borrow().clone().unwrap();
        assert!(stored.day(WeekdayKey::Friday).is_selected());
    }

    #[test]
    fn test_save_failure_keeps_edits() {
        let store = MemoryStore::default();
        store.fail.set(true);
        let mut editor = open_empty();
        editor.toggle_day(WeekdayKey::Monday);
        let before = editor.schedule().clone();

        let err = editor.confirm(&store).unwrap_err();

        assert!(matches!(err, ScheduleError::SaveFailure(StorageError::Io(_))));
        assert_eq!(store.saves.get(), 1);
        assert!(store.saved.borrow().is_none());
        assert!(editor.is_dirty());
        assert_eq!(editor.schedule(), &before);

        // still editable, and a later confirm goes through
        editor.set_block_length(WeekdayKey::Monday, 30).unwrap();
        store.fail.set(false);
        editor.confirm(&store).unwrap();
        assert_eq!(store.saved.borrow().as_ref().unwrap().day(WeekdayKey::Monday).blocks(), 14);
    }

    #[test]
    fn test_cancel_returns_saved_schedule() {
        let store = MemoryStore::default();
        let mut editor = open_empty();
        editor.toggle_day(WeekdayKey::Monday);
        editor.confirm(&store).unwrap();

        editor.toggle_day(WeekdayKey::Tuesday);
        editor.set_uniform(true);
        let restored = editor.cancel();

        assert_eq!(store.saves.get(), 1);
        assert_eq!(restored.selected_days(), vec![WeekdayKey::Monday]);
        assert!(!restored.is_uniform());
    }

    #[test]
    fn test_load_from_store_applies_defaults() {
        let store = MemoryStore::default();
        let student = Uuid::new_v4();
        let mut first = ScheduleEditor::load(&store, student, ScheduleDefaults::default()).unwrap();
        first.toggle_day(WeekdayKey::Monday);
        first.confirm(&store).unwrap();

        let mut defaults = ScheduleDefaults::default();
        defaults.start_time = t("13:00");
        let mut editor = ScheduleEditor::load(&store, student, defaults).unwrap();
        editor.toggle_day(WeekdayKey::Saturday);

        let saturday = editor.schedule().day(WeekdayKey::Saturday).window().unwrap();
        assert_eq!(saturday.start_time(), t("13:00"));
        assert_eq!(editor.schedule().day(WeekdayKey::Monday).blocks(), 9);
    }

    #[test]
    fn test_offered_block_lengths() {
        let editor = open_empty();
        assert!(editor.is_offered_block_length(45));
        assert!(!editor.is_offered_block_length(20));
    }
}
