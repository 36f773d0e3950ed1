//! Wall-clock time helpers
//!
//! Schedule times are abstract local times with no date and no zone. They are
//! stored as `NaiveTime` and exchanged as `"HH:MM"` strings.

use chrono::{NaiveTime, Timelike};

use super::error::{Result, ScheduleError};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse a time string in "HH:MM" (or "HH:MM:SS") format.
///
/// Seconds are accepted but dropped, so the result always formats back to
/// the same "HH:MM".
pub fn parse_time(time_str: &str) -> Result<NaiveTime> {
    let trimmed = time_str.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map(truncate_to_minute)
        .map_err(|_| {
            ScheduleError::InvalidConfiguration(format!(
                "'{}' is not a valid HH:MM time",
                time_str
            ))
        })
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Clear seconds and sub-second precision
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Minutes since midnight; seconds are dropped.
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Serde adapter storing a `NaiveTime` as "HH:MM"
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        let time = parse_time("08:30").unwrap();
        assert_eq!(time.hour(), 8);
        assert_eq!(time.minute(), 30);

        let time = parse_time("22:15:40").unwrap();
        assert_eq!(minutes_since_midnight(time), 22 * 60 + 15);
        assert_eq!(time.second(), 0);
        assert_eq!(time, parse_time("22:15").unwrap());
    }

    #[test]
    fn test_truncate_to_minute() {
        let time = NaiveTime::from_hms_milli_opt(9, 41, 12, 500).unwrap();
        assert_eq!(truncate_to_minute(time), NaiveTime::from_hms_opt(9, 41, 0).unwrap());
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        for raw in ["", "8", "25:00", "12:60", "noon", "12-30"] {
            let err = parse_time(raw).unwrap_err();
            assert!(matches!(err, ScheduleError::InvalidConfiguration(_)), "{raw}");
        }
    }

    #[test]
    fn test_format_time_drops_seconds() {
        let time = NaiveTime::from_hms_opt(7, 5, 59).unwrap();
        assert_eq!(format_time(time), "07:05");
    }
}
