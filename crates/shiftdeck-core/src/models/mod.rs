//! Data models for Shiftdeck

mod conflict;
mod entry;
mod ids;

pub use conflict::{Conflict, ConflictItem, PreviewRow};
pub use entry::TimeClockEntry;
pub use ids::{ShiftId, UserId, WorklogId};
