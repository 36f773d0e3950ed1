//! Day selection manager

use super::models::{DayWindow, WeekdayKey, WeeklySchedule};

impl WeeklySchedule {
    /// Flip whether `day` takes part in the weekly plan and return its new state.
    ///
    /// A day selected for the first time is seeded from the schedule defaults.
    /// In uniform mode a newly selected day instead takes the shared settings
    /// of the days already selected, even if it had its own stored window.
    /// Deselecting keeps the stored window for a later reselect.
    pub fn toggle_day(&mut self, day: WeekdayKey) -> bool {
        if self.day(day).selected {
            self.day_mut(day).selected = false;
            log::debug!("Deselected {}", day);
            return false;
        }

        let shared = if self.uniform {
            self.days()
                .find(|(other, schedule)| *other != day && schedule.selected)
                .and_then(|(_, schedule)| schedule.window.clone())
        } else {
            None
        };
        let seed = DayWindow::from_defaults(&self.defaults);

        let entry = self.day_mut(day);
        entry.selected = true;
        match shared {
            Some(window) => {
                log::debug!("Selected {} with the shared uniform settings", day);
                entry.window = Some(window);
            }
            None if entry.window.is_none() => {
                log::debug!("Selected {} for the first time; seeding defaults", day);
                entry.window = Some(seed);
            }
            None => log::debug!("Reselected {} with its stored settings", day),
        }
        true
    }
}
