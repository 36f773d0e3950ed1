//! Synchronizer
//!
//! Field edits land on one day and, in uniform mode, are mirrored onto every
//! other selected day before the call returns. All three editable fields go
//! through the same `apply_edit` path.

use std::num::NonZeroU32;

use chrono::NaiveTime;
use serde::Serialize;

use super::error::{Result, ScheduleError};
use super::models::{DayWindow, WeekdayKey, WeeklySchedule};

/// A change to one of a day's editable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    StartTime(NaiveTime),
    EndTime(NaiveTime),
    BlockLength(NonZeroU32),
}

impl FieldEdit {
    fn apply_to(self, window: &mut DayWindow) {
        match self {
            FieldEdit::StartTime(time) => window.set_start_time(time),
            FieldEdit::EndTime(time) => window.set_end_time(time),
            FieldEdit::BlockLength(minutes) => window.set_block_length(minutes),
        }
    }
}

/// Outcome of switching uniform mode on, for showing the user which day's
/// values were copied and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniformAlignment {
    /// First selected day in canonical order; its values won
    pub reference: WeekdayKey,
    /// Selected days whose values changed to match the reference
    pub realigned: Vec<WeekdayKey>,
}

impl WeeklySchedule {
    /// Apply `edit` to `day` and, when `day` is selected in uniform mode, to
    /// every other selected day.
    ///
    /// A deselected day is edited on its own; it rejoins the shared settings
    /// only when selected again. Returns the days whose fields changed, the
    /// edited day first. A day with no stored window is seeded from the
    /// defaults before the edit.
    pub fn apply_edit(&mut self, day: WeekdayKey, edit: FieldEdit) -> Vec<WeekdayKey> {
        let mut touched = Vec::new();
        let seed = DayWindow::from_defaults(&self.defaults);

        if edit_day(self, day, edit, &seed) {
            touched.push(day);
        }

        if self.uniform && self.day(day).selected {
            let others: Vec<WeekdayKey> = self
                .selected_days()
                .into_iter()
                .filter(|other| *other != day)
                .collect();
            for other in others {
                if edit_day(self, other, edit, &seed) {
                    touched.push(other);
                }
            }
            if touched.len() > 1 {
                log::debug!("Propagated {:?} from {} to {:?}", edit, day, &touched[1..]);
            }
        }

        debug_assert!(self.is_consistent());
        touched
    }

    pub fn set_start_time(&mut self, day: WeekdayKey, start_time: NaiveTime) -> Vec<WeekdayKey> {
        self.apply_edit(day, FieldEdit::StartTime(start_time))
    }

    pub fn set_end_time(&mut self, day: WeekdayKey, end_time: NaiveTime) -> Vec<WeekdayKey> {
        self.apply_edit(day, FieldEdit::EndTime(end_time))
    }

    /// Set the block length; zero is rejected before anything changes
    pub fn set_block_length(&mut self, day: WeekdayKey, block_length_minutes: u32) -> Result<Vec<WeekdayKey>> {
        let minutes = NonZeroU32::new(block_length_minutes).ok_or_else(|| {
            ScheduleError::InvalidConfiguration(format!(
                "block length must be positive, got {}",
                block_length_minutes
            ))
        })?;
        Ok(self.apply_edit(day, FieldEdit::BlockLength(minutes)))
    }

    /// Switch uniform mode.
    ///
    /// Turning it on copies the first selected day's settings onto every other
    /// selected day and reports what changed. With no selected day, or when
    /// turning it off, nothing is copied and `None` is returned.
    pub fn set_uniform(&mut self, enabled: bool) -> Option<UniformAlignment> {
        self.uniform = enabled;
        if !enabled {
            return None;
        }

        let selected = self.selected_days();
        let (&reference, others) = selected.split_first()?;
        let reference_window = match self.day(reference).window.clone() {
            Some(window) => window,
            None => {
                let seed = DayWindow::from_defaults(&self.defaults);
                self.day_mut(reference).window = Some(seed.clone());
                seed
            }
        };

        let mut realigned = Vec::new();
        for &other in others {
            let entry = self.day_mut(other);
            let matches = entry
                .window
                .as_ref()
                .is_some_and(|w| w.same_settings(&reference_window));
            if !matches {
                entry.window = Some(reference_window.clone());
                realigned.push(other);
            }
        }

        if !realigned.is_empty() {
            log::info!(
                "Uniform schedule enabled: copied {} settings to {:?}",
                reference,
                realigned
            );
        }

        debug_assert!(self.is_consistent());
        Some(UniformAlignment {
            reference,
            realigned,
        })
    }
}

/// Apply one edit to one day, returning whether any field changed
fn edit_day(schedule: &mut WeeklySchedule, day: WeekdayKey, edit: FieldEdit, seed: &DayWindow) -> bool {
    let entry = schedule.day_mut(day);
    let window = entry.window.get_or_insert_with(|| seed.clone());
    let before = window.clone();
    edit.apply_to(window);
    !window.same_settings(&before)
}
