//! Weekly schedule data models

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::blocks::blocks_in_window;
use super::error::ScheduleError;
use super::time::{hhmm, truncate_to_minute};
use crate::config::ScheduleDefaults;

/// Day of the week a schedule entry belongs to.
///
/// Declaration order is the canonical display order and also decides which
/// day wins when uniform mode is switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayKey {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekdayKey {
    pub const ALL: [WeekdayKey; 7] = [
        WeekdayKey::Monday,
        WeekdayKey::Tuesday,
        WeekdayKey::Wednesday,
        WeekdayKey::Thursday,
        WeekdayKey::Friday,
        WeekdayKey::Saturday,
        WeekdayKey::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekdayKey::Monday => "monday",
            WeekdayKey::Tuesday => "tuesday",
            WeekdayKey::Wednesday => "wednesday",
            WeekdayKey::Thursday => "thursday",
            WeekdayKey::Friday => "friday",
            WeekdayKey::Saturday => "saturday",
            WeekdayKey::Sunday => "sunday",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeekdayKey::Monday => "Monday",
            WeekdayKey::Tuesday => "Tuesday",
            WeekdayKey::Wednesday => "Wednesday",
            WeekdayKey::Thursday => "Thursday",
            WeekdayKey::Friday => "Friday",
            WeekdayKey::Saturday => "Saturday",
            WeekdayKey::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for WeekdayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WeekdayKey {
    type Err = ScheduleError;

    /// Accepts full names and three-letter abbreviations, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        WeekdayKey::ALL
            .into_iter()
            .find(|day| day.as_str() == lower || (lower.len() == 3 && day.as_str().starts_with(&lower)))
            .ok_or_else(|| ScheduleError::UnknownDay(s.to_string()))
    }
}

impl From<chrono::Weekday> for WeekdayKey {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => WeekdayKey::Monday,
            chrono::Weekday::Tue => WeekdayKey::Tuesday,
            chrono::Weekday::Wed => WeekdayKey::Wednesday,
            chrono::Weekday::Thu => WeekdayKey::Thursday,
            chrono::Weekday::Fri => WeekdayKey::Friday,
            chrono::Weekday::Sat => WeekdayKey::Saturday,
            chrono::Weekday::Sun => WeekdayKey::Sunday,
        }
    }
}

impl From<WeekdayKey> for chrono::Weekday {
    fn from(day: WeekdayKey) -> Self {
        match day {
            WeekdayKey::Monday => chrono::Weekday::Mon,
            WeekdayKey::Tuesday => chrono::Weekday::Tue,
            WeekdayKey::Wednesday => chrono::Weekday::Wed,
            WeekdayKey::Thursday => chrono::Weekday::Thu,
            WeekdayKey::Friday => chrono::Weekday::Fri,
            WeekdayKey::Saturday => chrono::Weekday::Sat,
            WeekdayKey::Sunday => chrono::Weekday::Sun,
        }
    }
}

/// Serialized form of a day's time window. `blocks` is written for
/// downstream readers but ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayWindowRecord {
    #[serde(with = "hhmm")]
    start_time: NaiveTime,
    #[serde(with = "hhmm")]
    end_time: NaiveTime,
    block_length_minutes: u32,
    #[serde(default)]
    blocks: u32,
}

/// A day's active time window and the number of blocks that fit in it.
///
/// `blocks` is derived and recomputed whenever one of the other three fields
/// changes; there is no setter for it. Times are kept at minute precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DayWindowRecord", into = "DayWindowRecord")]
pub struct DayWindow {
    start_time: NaiveTime,
    end_time: NaiveTime,
    block_length_minutes: NonZeroU32,
    blocks: u32,
}

impl DayWindow {
    pub fn new(start_time: NaiveTime, end_time: NaiveTime, block_length_minutes: NonZeroU32) -> Self {
        let start_time = truncate_to_minute(start_time);
        let end_time = truncate_to_minute(end_time);
        Self {
            start_time,
            end_time,
            block_length_minutes,
            blocks: blocks_in_window(start_time, end_time, block_length_minutes),
        }
    }

    pub fn from_defaults(defaults: &ScheduleDefaults) -> Self {
        Self::new(
            defaults.start_time,
            defaults.end_time,
            defaults.block_length_minutes,
        )
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn block_length_minutes(&self) -> NonZeroU32 {
        self.block_length_minutes
    }

    pub fn blocks(&self) -> u32 {
        self.blocks
    }

    /// Whether the window crosses midnight into the next day
    pub fn is_overnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Minutes of instruction actually covered by whole blocks
    pub fn scheduled_minutes(&self) -> u32 {
        self.blocks * self.block_length_minutes.get()
    }

    /// Compares the three editable fields
    pub fn same_settings(&self, other: &DayWindow) -> bool {
        self.start_time == other.start_time
            && self.end_time == other.end_time
            && self.block_length_minutes == other.block_length_minutes
    }

    pub(crate) fn set_start_time(&mut self, start_time: NaiveTime) {
        self.start_time = truncate_to_minute(start_time);
        self.recompute();
    }

    pub(crate) fn set_end_time(&mut self, end_time: NaiveTime) {
        self.end_time = truncate_to_minute(end_time);
        self.recompute();
    }

    pub(crate) fn set_block_length(&mut self, block_length_minutes: NonZeroU32) {
        self.block_length_minutes = block_length_minutes;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.blocks = blocks_in_window(self.start_time, self.end_time, self.block_length_minutes);
    }
}

impl TryFrom<DayWindowRecord> for DayWindow {
    type Error = ScheduleError;

    fn try_from(record: DayWindowRecord) -> Result<Self, Self::Error> {
        let block_length = NonZeroU32::new(record.block_length_minutes).ok_or_else(|| {
            ScheduleError::InvalidConfiguration("block length must be positive".to_string())
        })?;
        Ok(DayWindow::new(record.start_time, record.end_time, block_length))
    }
}

impl From<DayWindow> for DayWindowRecord {
    fn from(window: DayWindow) -> Self {
        Self {
            start_time: window.start_time,
            end_time: window.end_time,
            block_length_minutes: window.block_length_minutes.get(),
            blocks: window.blocks,
        }
    }
}

/// One weekday's entry in the weekly plan.
///
/// Deselecting a day keeps its window so that selecting it again restores the
/// previous configuration. `window` is `None` only for days that were never
/// configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    #[serde(default)]
    pub(crate) selected: bool,
    #[serde(default)]
    pub(crate) window: Option<DayWindow>,
}

impl DaySchedule {
    pub fn configured(window: DayWindow, selected: bool) -> Self {
        Self {
            selected,
            window: Some(window),
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn window(&self) -> Option<&DayWindow> {
        self.window.as_ref()
    }

    /// Block count, zero for a day that was never configured
    pub fn blocks(&self) -> u32 {
        self.window.as_ref().map_or(0, DayWindow::blocks)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeeklyScheduleRecord {
    #[serde(default)]
    days: BTreeMap<WeekdayKey, DaySchedule>,
    #[serde(default)]
    uniform: bool,
}

/// Per-day time windows for one student plus the uniform-mode flag.
///
/// All seven weekdays are always present. Invariants held after every
/// operation:
/// - every window's `blocks` matches its other three fields;
/// - with `uniform` set, all selected days share the same three editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WeeklyScheduleRecord", into = "WeeklyScheduleRecord")]
pub struct WeeklySchedule {
    pub(crate) days: BTreeMap<WeekdayKey, DaySchedule>,
    pub(crate) uniform: bool,
    /// Seed values for days configured for the first time. Not persisted.
    pub(crate) defaults: ScheduleDefaults,
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl WeeklySchedule {
    /// All seven days unselected and unconfigured, uniform mode off
    pub fn new() -> Self {
        Self {
            days: WeekdayKey::ALL
                .into_iter()
                .map(|day| (day, DaySchedule::default()))
                .collect(),
            uniform: false,
            defaults: ScheduleDefaults::default(),
        }
    }

    /// Builder method to replace the seed values used by `toggle_day` and edits
    pub fn with_defaults(mut self, defaults: ScheduleDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &ScheduleDefaults {
        &self.defaults
    }

    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    pub fn day(&self, day: WeekdayKey) -> &DaySchedule {
        // every key is inserted by `new` and never removed
        &self.days[&day]
    }

    pub(crate) fn day_mut(&mut self, day: WeekdayKey) -> &mut DaySchedule {
        self.days.entry(day).or_default()
    }

    /// Days in canonical order
    pub fn days(&self) -> impl Iterator<Item = (WeekdayKey, &DaySchedule)> {
        self.days.iter().map(|(day, schedule)| (*day, schedule))
    }

    pub fn selected_days(&self) -> Vec<WeekdayKey> {
        self.days()
            .filter(|(_, schedule)| schedule.selected)
            .map(|(day, _)| day)
            .collect()
    }

    /// Blocks per week across selected days
    pub fn total_blocks(&self) -> u32 {
        self.days()
            .filter(|(_, schedule)| schedule.selected)
            .map(|(_, schedule)| schedule.blocks())
            .sum()
    }

    /// Minutes per week covered by whole blocks on selected days
    pub fn total_minutes(&self) -> u32 {
        self.days()
            .filter(|(_, schedule)| schedule.selected)
            .filter_map(|(_, schedule)| schedule.window.as_ref())
            .map(DayWindow::scheduled_minutes)
            .sum()
    }

    /// Check both schedule invariants
    pub fn is_consistent(&self) -> bool {
        let blocks_fresh = self.days.values().filter_map(|d| d.window.as_ref()).all(|w| {
            w.blocks == blocks_in_window(w.start_time, w.end_time, w.block_length_minutes)
        });
        if !blocks_fresh || self.days.len() != WeekdayKey::ALL.len() {
            return false;
        }
        if !self.uniform {
            return true;
        }

        let mut selected = self
            .days
            .values()
            .filter(|d| d.selected)
            .map(|d| d.window.as_ref());
        match selected.next() {
            None => true,
            Some(None) => false,
            Some(Some(first)) => selected.all(|w| w.is_some_and(|w| w.same_settings(first))),
        }
    }
}

impl TryFrom<WeeklyScheduleRecord> for WeeklySchedule {
    type Error = ScheduleError;

    fn try_from(record: WeeklyScheduleRecord) -> Result<Self, Self::Error> {
        let mut schedule = WeeklySchedule::new();
        for (day, entry) in record.days {
            *schedule.day_mut(day) = entry;
        }

        let seed = DayWindow::from_defaults(&schedule.defaults);
        for (day, entry) in schedule.days.iter_mut() {
            if entry.selected && entry.window.is_none() {
                log::warn!("Selected day {} had no time window; seeding defaults", day);
                entry.window = Some(seed.clone());
            }
        }

        if record.uniform {
            if let Some(alignment) = schedule.set_uniform(true) {
                if !alignment.realigned.is_empty() {
                    log::warn!(
                        "Stored uniform schedule disagreed; aligned {:?} to {}",
                        alignment.realigned,
                        alignment.reference
                    );
                }
            }
        }

        Ok(schedule)
    }
}

impl From<WeeklySchedule> for WeeklyScheduleRecord {
    fn from(schedule: WeeklySchedule) -> Self {
        Self {
            days: schedule.days,
            uniform: schedule.uniform,
        }
    }
}
