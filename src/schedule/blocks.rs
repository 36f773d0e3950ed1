//! Block calculator
//!
//! Maps a day's time window and block length to the number of whole learning
//! blocks that fit. Windows whose end time is earlier than their start time
//! cross midnight into the next day. Equal start and end times form a
//! zero-length window, not a full day.
//!
//! Block counts are always recomputed from the window, never cached apart from
//! it.

use std::num::NonZeroU32;

use chrono::{Duration, NaiveTime};
use serde::Serialize;

use super::error::{Result, ScheduleError};
use super::models::DayWindow;
use super::time::{format_time, minutes_since_midnight, parse_time, MINUTES_PER_DAY};

/// Length of the window in minutes, wrapping past midnight when `end < start`
pub fn window_minutes(start_time: NaiveTime, end_time: NaiveTime) -> u32 {
    let start = minutes_since_midnight(start_time);
    let end = minutes_since_midnight(end_time);
    if end >= start {
        end - start
    } else {
        end + MINUTES_PER_DAY - start
    }
}

pub(crate) fn blocks_in_window(
    start_time: NaiveTime,
    end_time: NaiveTime,
    block_length_minutes: NonZeroU32,
) -> u32 {
    window_minutes(start_time, end_time) / block_length_minutes.get()
}

/// Number of whole blocks of `block_length_minutes` between two times.
///
/// A block length of zero is a caller bug and fails with
/// `ScheduleError::InvalidConfiguration`.
pub fn compute_blocks(
    start_time: NaiveTime,
    end_time: NaiveTime,
    block_length_minutes: u32,
) -> Result<u32> {
    let block_length = NonZeroU32::new(block_length_minutes).ok_or_else(|| {
        ScheduleError::InvalidConfiguration(format!(
            "block length must be positive, got {}",
            block_length_minutes
        ))
    })?;
    Ok(blocks_in_window(start_time, end_time, block_length))
}

/// `compute_blocks` over "HH:MM" strings
pub fn compute_blocks_hhmm(start_time: &str, end_time: &str, block_length_minutes: u32) -> Result<u32> {
    compute_blocks(parse_time(start_time)?, parse_time(end_time)?, block_length_minutes)
}

/// One block within a day's window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSlot {
    /// Zero-based position within the day
    pub index: u32,
    #[serde(serialize_with = "serialize_hhmm")]
    pub start: NaiveTime,
    #[serde(serialize_with = "serialize_hhmm")]
    pub end: NaiveTime,
}

fn serialize_hhmm<S: serde::Serializer>(time: &NaiveTime, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_time(*time))
}

/// Expand a window into consecutive blocks starting at its start time.
///
/// Slot times wrap past midnight. Leftover minutes that do not make up a whole
/// block get no slot, so the result always has `window.blocks()` entries.
pub fn block_slots(window: &DayWindow) -> Vec<BlockSlot> {
    let length = i64::from(window.block_length_minutes().get());
    (0..window.blocks())
        .map(|index| {
            let offset = i64::from(index) * length;
            let (start, _) = window
                .start_time()
                .overflowing_add_signed(Duration::minutes(offset));
            let (end, _) = start.overflowing_add_signed(Duration::minutes(length));
            BlockSlot { index, start, end }
        })
        .collect()
}
