//! Conflict group classification.
//!
//! Given the items of one conflict group, decide which resolution surface
//! applies. The decision is purely structural; the authoritative overlap
//! computation already happened server-side.

use crate::models::ConflictItem;
use crate::timefmt::{ClockTime, TimeParser};

/// Which resolution strategy a conflict group supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// The two spans share a start or an end boundary; the longer one can be
    /// trimmed down to the edge of the shorter one.
    CutDelete,
    /// One span strictly contains the other; cutting splits the container
    /// into a before-segment and an after-segment around the hole.
    SplitDelete,
    /// No clean structural relationship; only manual deletion is offered.
    DeleteOnly,
}

impl ConflictKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CutDelete => "cut-delete",
            Self::SplitDelete => "split-delete",
            Self::DeleteOnly => "delete-only",
        }
    }
}

/// Parsed `[start, end)` boundaries of one conflict item.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Span {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl Span {
    pub(crate) fn of(parser: &mut TimeParser, item: &ConflictItem) -> Self {
        Self {
            start: parser.parse(&item.start),
            end: parser.parse(&item.end),
        }
    }

    pub(crate) const fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }

    pub(crate) fn duration_minutes(&self) -> i64 {
        self.start.minutes_until(&self.end).unwrap_or(0)
    }

    fn strictly_contains(&self, other: &Self) -> bool {
        self.start.cmp_stable(&other.start).is_lt() && other.end.cmp_stable(&self.end).is_lt()
    }
}

/// Classify a conflict group into its resolution strategy.
///
/// Falls back to [`ConflictKind::DeleteOnly`] whenever the group shape or
/// the boundary instants cannot be trusted: any size other than two, or any
/// unparseable start/end.
pub fn classify(parser: &mut TimeParser, items: &[ConflictItem]) -> ConflictKind {
    let [first, second] = items else {
        tracing::warn!(
            item_count = items.len(),
            "conflict group size is not two, offering delete only"
        );
        return ConflictKind::DeleteOnly;
    };

    let a = Span::of(parser, first);
    let b = Span::of(parser, second);
    if !a.is_valid() || !b.is_valid() {
        tracing::warn!("conflict group has unparseable boundaries, offering delete only");
        return ConflictKind::DeleteOnly;
    }

    let shares_start = a.start.cmp_stable(&b.start).is_eq();
    let shares_end = a.end.cmp_stable(&b.end).is_eq();
    if shares_start || shares_end {
        return ConflictKind::CutDelete;
    }

    if a.strictly_contains(&b) || b.strictly_contains(&a) {
        return ConflictKind::SplitDelete;
    }

    ConflictKind::DeleteOnly
}
