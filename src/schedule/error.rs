use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A caller handed the engine a value the editor UI should never produce
    /// (zero block length, malformed time).
    #[error("Invalid schedule configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown day of week: {0}")]
    UnknownDay(String),

    #[error("Failed to save schedule: {0}")]
    SaveFailure(#[source] StorageError),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
