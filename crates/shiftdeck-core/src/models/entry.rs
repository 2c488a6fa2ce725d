//! Time-clock entry model

use serde::{Deserialize, Serialize};

use super::{ShiftId, UserId, WorklogId};

/// One row of the time-clock table: a recorded clock-in/clock-out span.
///
/// Read-only projection fetched per date range; the client never mutates
/// these locally except to re-fetch the whole set after a server mutation
/// succeeds (the checklog delete path optimistically removes one row and
/// rolls back on failure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeClockEntry {
    pub worklog_id: WorklogId,
    pub user_id: UserId,
    pub user_name: String,
    pub shift_id: ShiftId,
    pub shift_name: String,
    /// Calendar day the span was logged on, `YYYY-MM-DD`
    pub date: String,
    pub clock_in: String,
    pub clock_out: String,
    /// Worked duration as `HH:mm`
    pub total: String,
    #[serde(default)]
    pub color: Option<String>,
}
