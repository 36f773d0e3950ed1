//! Homeschool planner core.
//!
//! The `schedule` module holds the weekly term-plan schedule: which days a
//! student works, each day's time window, and how many learning blocks fit
//! into it. `storage` persists schedules per student and `config` supplies the
//! defaults used when a day is configured for the first time.

pub mod config;
pub mod schedule;
pub mod storage;
