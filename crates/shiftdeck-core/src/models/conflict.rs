//! Conflict models for the time-clock detail view.

use serde::{Deserialize, Serialize};

use super::{ShiftId, UserId, WorklogId};

/// One logged time span belonging to one user on one day.
///
/// `start` and `end` arrive as raw time-of-day strings (bare `HH:mm` or full
/// ISO timestamps) and are parsed on demand through
/// [`crate::timefmt::TimeParser`]. An item whose boundaries fail to parse is
/// unusable for classification and routes its group to manual deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictItem {
    pub user_id: UserId,
    /// Backing record; absent when the span is synthetic
    #[serde(default)]
    pub worklog_id: Option<WorklogId>,
    pub shift_id: ShiftId,
    pub shift_name: String,
    pub start: String,
    pub end: String,
    /// Display only
    #[serde(default)]
    pub color: Option<String>,
}

/// A group of worklogs for one user whose spans overlap on one calendar day.
///
/// In practice groups hold exactly two items; classification guards every
/// other size by offering only manual deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub formatted_date: String,
    pub items: Vec<ConflictItem>,
}

/// Client-side projection of what a resolution action will leave behind.
///
/// Derived, never persisted; shown in the confirmation step before the
/// mutating call fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRow {
    pub shift_name: String,
    /// `HH:mm`, empty when the source instant was invalid
    pub start: String,
    pub end: String,
    /// Zero-padded `HH:mm` duration
    pub total: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worklog_id: Option<WorklogId>,
    pub user_id: UserId,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn conflict_item_deserializes_with_optional_fields_missing() {
        let raw = r#"{
            "user_id": 4,
            "shift_id": 9,
            "shift_name": "Morning",
            "start": "09:00",
            "end": "12:00"
        }"#;
        let item: ConflictItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.worklog_id, None);
        assert_eq!(item.color, None);
        assert_eq!(item.shift_name, "Morning");
    }

    #[test]
    fn preview_row_omits_missing_worklog_id() {
        let row = PreviewRow {
            shift_name: "Morning".to_string(),
            start: "09:00".to_string(),
            end: "12:00".to_string(),
            total: "03:00".to_string(),
            worklog_id: None,
            user_id: UserId::new(4),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(!json.contains("worklog_id"));
    }
}
