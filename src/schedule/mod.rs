//! Weekly schedule editing: block computation and cross-day synchronization

pub mod blocks;
pub mod editor;
pub mod error;
pub mod models;
pub mod selection;
pub mod sync;
pub mod time;

pub use blocks::{block_slots, compute_blocks, compute_blocks_hhmm, window_minutes, BlockSlot};
pub use editor::ScheduleEditor;
pub use error::ScheduleError;
pub use models::*;
pub use sync::{FieldEdit, UniformAlignment};
pub use time::{format_time, parse_time};
