//! Resolution strategies: preview computation and the per-conflict flow.
//!
//! A preview is computed locally and shown for confirmation; only the
//! confirming step issues a server mutation, and the server remains the
//! authority on record state afterwards.

use crate::classify::Span;
use crate::models::{ConflictItem, PreviewRow};
use crate::timefmt::{diff_hm, format_hm, ClockTime, TimeParser};

/// Index of the longer of two items, the default candidate for trimming.
///
/// Ties favor the first item. Returns `None` when the slice does not hold
/// exactly two items; callers should already have classified such groups as
/// delete-only.
#[must_use]
pub fn longer_index(parser: &mut TimeParser, items: &[ConflictItem]) -> Option<usize> {
    let [first, second] = items else {
        return None;
    };

    let first_minutes = Span::of(parser, first).duration_minutes();
    let second_minutes = Span::of(parser, second).duration_minutes();
    if second_minutes > first_minutes {
        Some(1)
    } else {
        Some(0)
    }
}

/// Compute the rows a cut of `selected` against `other` leaves behind.
///
/// Emits the selected item's remainder on each side where it extends past
/// the other item, plus the other item unchanged, sorted by start time.
/// Containment (the split case) naturally yields both remainder segments.
#[must_use]
pub fn cut_preview(
    parser: &mut TimeParser,
    selected: &ConflictItem,
    other: &ConflictItem,
) -> Vec<PreviewRow> {
    let selected_span = Span::of(parser, selected);
    let other_span = Span::of(parser, other);

    let mut rows: Vec<(ClockTime, PreviewRow)> = Vec::with_capacity(3);

    if selected_span.start.cmp_stable(&other_span.start).is_lt() {
        rows.push((
            selected_span.start,
            segment_row(selected, &selected_span.start, &other_span.start),
        ));
    }
    if other_span.end.cmp_stable(&selected_span.end).is_lt() {
        rows.push((
            other_span.end,
            segment_row(selected, &other_span.end, &selected_span.end),
        ));
    }
    rows.push((
        other_span.start,
        segment_row(other, &other_span.start, &other_span.end),
    ));

    rows.sort_by(|(a, _), (b, _)| a.cmp_stable(b));
    rows.into_iter().map(|(_, row)| row).collect()
}

/// The single-row preview for deleting one item outright.
#[must_use]
pub fn delete_preview(parser: &mut TimeParser, item: &ConflictItem) -> PreviewRow {
    let span = Span::of(parser, item);
    segment_row(item, &span.start, &span.end)
}

fn segment_row(source: &ConflictItem, start: &ClockTime, end: &ClockTime) -> PreviewRow {
    PreviewRow {
        shift_name: source.shift_name.clone(),
        start: format_hm(start),
        end: format_hm(end),
        total: diff_hm(start, end),
        worklog_id: source.worklog_id,
        user_id: source.user_id,
    }
}

/// Which action a resolution menu entry triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAction {
    Cut,
    Delete,
}

/// Client-local resolution state for one conflict card.
///
/// Purely transient; nothing here survives a reload and nothing is
/// persisted. Transitions that do not apply to the current state are
/// ignored rather than panicking, mirroring how a menu click on a closed
/// card is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    MenuOpen {
        action: ResolveAction,
    },
    PreviewOpen {
        action: ResolveAction,
        rows: Vec<PreviewRow>,
    },
    Mutating,
    Failed {
        reason: String,
    },
}

/// State machine driving one conflict card's resolution flow:
/// `Idle → MenuOpen → PreviewOpen → Mutating → Idle | Failed`.
#[derive(Debug, Default)]
pub struct ResolutionFlow {
    state: FlowState,
}

impl ResolutionFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &FlowState {
        &self.state
    }

    /// Open the cut/delete menu. Only valid from idle or a failed attempt.
    pub fn open_menu(&mut self, action: ResolveAction) {
        if matches!(self.state, FlowState::Idle | FlowState::Failed { .. }) {
            self.state = FlowState::MenuOpen { action };
        }
    }

    /// Attach the computed preview rows and move to the confirmation step.
    pub fn open_preview(&mut self, rows: Vec<PreviewRow>) {
        if let FlowState::MenuOpen { action } = self.state {
            self.state = FlowState::PreviewOpen { action, rows };
        }
    }

    /// Confirm the open preview, taking its rows and entering `Mutating`.
    ///
    /// The menu is closed before the request starts, so no second mutation
    /// for the same conflict can be triggered while one is in flight.
    pub fn confirm(&mut self) -> Option<(ResolveAction, Vec<PreviewRow>)> {
        match std::mem::take(&mut self.state) {
            FlowState::PreviewOpen { action, rows } => {
                self.state = FlowState::Mutating;
                Some((action, rows))
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Discard local selection state; no server call is made.
    pub fn cancel(&mut self) {
        if !matches!(self.state, FlowState::Mutating) {
            self.state = FlowState::Idle;
        }
    }

    /// Record the outcome of the in-flight mutation.
    pub fn settle(&mut self, outcome: Result<(), String>) {
        if matches!(self.state, FlowState::Mutating) {
            self.state = match outcome {
                Ok(()) => FlowState::Idle,
                Err(reason) => FlowState::Failed { reason },
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{ShiftId, UserId, WorklogId};

    fn item(worklog: i64, name: &str, start: &str, end: &str) -> ConflictItem {
        ConflictItem {
            user_id: UserId::new(1),
            worklog_id: Some(WorklogId::new(worklog)),
            shift_id: ShiftId::new(2),
            shift_name: name.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            color: None,
        }
    }

    #[test]
    fn longer_index_picks_longer_item() {
        let mut parser = TimeParser::new();
        let items = [
            item(1, "Short", "09:00", "12:00"),
            item(2, "Long", "09:00", "17:00"),
        ];
        assert_eq!(longer_index(&mut parser, &items), Some(1));
    }

    #[test]
    fn longer_index_tie_favors_first_item() {
        let mut parser = TimeParser::new();
        let items = [
            item(1, "A", "09:00", "12:00"),
            item(2, "B", "13:00", "16:00"),
        ];
        assert_eq!(longer_index(&mut parser, &items), Some(0));
    }

    #[test]
    fn longer_index_rejects_wrong_group_size() {
        let mut parser = TimeParser::new();
        assert_eq!(
            longer_index(&mut parser, &[item(1, "A", "09:00", "12:00")]),
            None
        );
    }

    #[test]
    fn cut_with_shared_start_leaves_remainder_and_other() {
        let mut parser = TimeParser::new();
        let selected = item(1, "Long", "09:00", "17:00");
        let other = item(2, "Short", "09:00", "12:00");

        let rows = cut_preview(&mut parser, &selected, &other);
        assert_eq!(rows.len(), 2);
        // Sorted by start time: the untouched short item comes first.
        assert_eq!(rows[0].start, "09:00");
        assert_eq!(rows[0].end, "12:00");
        assert_eq!(rows[0].worklog_id, Some(WorklogId::new(2)));
        assert_eq!(rows[1].start, "12:00");
        assert_eq!(rows[1].end, "17:00");
        assert_eq!(rows[1].total, "05:00");
        assert_eq!(rows[1].worklog_id, Some(WorklogId::new(1)));
    }

    #[test]
    fn cut_with_shared_end_leaves_leading_remainder() {
        let mut parser = TimeParser::new();
        let selected = item(1, "Long", "08:00", "16:00");
        let other = item(2, "Short", "12:00", "16:00");

        let rows = cut_preview(&mut parser, &selected, &other);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].start.as_str(), rows[0].end.as_str()), ("08:00", "12:00"));
        assert_eq!((rows[1].start.as_str(), rows[1].end.as_str()), ("12:00", "16:00"));
    }

    #[test]
    fn cut_around_contained_item_splits_into_three_rows() {
        let mut parser = TimeParser::new();
        let container = item(1, "Day", "08:00", "18:00");
        let contained = item(2, "Break", "10:00", "11:00");

        let rows = cut_preview(&mut parser, &container, &contained);
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].start.as_str(), rows[0].end.as_str()), ("08:00", "10:00"));
        assert_eq!((rows[1].start.as_str(), rows[1].end.as_str()), ("10:00", "11:00"));
        assert_eq!((rows[2].start.as_str(), rows[2].end.as_str()), ("11:00", "18:00"));
        assert_eq!(rows[0].total, "02:00");
        assert_eq!(rows[2].total, "07:00");
        assert_eq!(rows[1].worklog_id, Some(WorklogId::new(2)));
    }

    #[test]
    fn delete_preview_projects_single_item() {
        let mut parser = TimeParser::new();
        let row = delete_preview(&mut parser, &item(5, "Evening", "18:00", "22:30"));
        assert_eq!(row.start, "18:00");
        assert_eq!(row.end, "22:30");
        assert_eq!(row.total, "04:30");
        assert_eq!(row.worklog_id, Some(WorklogId::new(5)));
    }

    #[test]
    fn flow_happy_path_reaches_idle() {
        let mut parser = TimeParser::new();
        let rows = cut_preview(
            &mut parser,
            &item(1, "Long", "09:00", "17:00"),
            &item(2, "Short", "09:00", "12:00"),
        );

        let mut flow = ResolutionFlow::new();
        flow.open_menu(ResolveAction::Cut);
        flow.open_preview(rows.clone());
        let (action, confirmed) = flow.confirm().unwrap();
        assert_eq!(action, ResolveAction::Cut);
        assert_eq!(confirmed, rows);
        assert_eq!(flow.state(), &FlowState::Mutating);

        flow.settle(Ok(()));
        assert_eq!(flow.state(), &FlowState::Idle);
    }

    #[test]
    fn flow_failure_records_reason() {
        let mut flow = ResolutionFlow::new();
        flow.open_menu(ResolveAction::Delete);
        flow.open_preview(Vec::new());
        flow.confirm().unwrap();
        flow.settle(Err("boom".to_string()));
        assert_eq!(
            flow.state(),
            &FlowState::Failed {
                reason: "boom".to_string()
            }
        );

        // A failed attempt can be retried from the menu.
        flow.open_menu(ResolveAction::Delete);
        assert_eq!(
            flow.state(),
            &FlowState::MenuOpen {
                action: ResolveAction::Delete
            }
        );
    }

    #[test]
    fn flow_cancel_discards_selection_without_mutation() {
        let mut flow = ResolutionFlow::new();
        flow.open_menu(ResolveAction::Cut);
        flow.open_preview(Vec::new());
        flow.cancel();
        assert_eq!(flow.state(), &FlowState::Idle);
        assert!(flow.confirm().is_none());
    }

    #[test]
    fn flow_ignores_out_of_order_transitions() {
        let mut flow = ResolutionFlow::new();
        flow.open_preview(Vec::new());
        assert_eq!(flow.state(), &FlowState::Idle);
        assert!(flow.confirm().is_none());

        flow.open_menu(ResolveAction::Cut);
        flow.open_preview(Vec::new());
        flow.confirm().unwrap();
        // Mutating: cancel and re-opening the menu are no-ops.
        flow.cancel();
        flow.open_menu(ResolveAction::Delete);
        assert_eq!(flow.state(), &FlowState::Mutating);
    }
}
