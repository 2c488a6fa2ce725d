//! Pure list pipeline: filter, sort, paginate.
//!
//! The presentation layer calls these explicitly instead of recomputing
//! derived collections per render; nothing here knows about any UI
//! framework.

use crate::models::{ShiftId, TimeClockEntry, UserId};

/// Field filters applied to the entry list. Empty filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub user_id: Option<UserId>,
    pub shift_id: Option<ShiftId>,
    /// Case-insensitive substring match on user and shift names
    pub search: Option<String>,
}

impl EntryFilter {
    fn matches(&self, entry: &TimeClockEntry) -> bool {
        if let Some(user_id) = self.user_id {
            if entry.user_id != user_id {
                return false;
            }
        }
        if let Some(shift_id) = self.shift_id {
            if entry.shift_id != shift_id {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if needle.is_empty() {
                return true;
            }
            return entry.user_name.to_lowercase().contains(&needle)
                || entry.shift_name.to_lowercase().contains(&needle);
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    UserName,
    ShiftName,
    Total,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// One page of a derived list, with enough metadata to render a pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Keep the entries matching `filter`, preserving input order.
#[must_use]
pub fn filter_entries(entries: &[TimeClockEntry], filter: &EntryFilter) -> Vec<TimeClockEntry> {
    entries
        .iter()
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect()
}

/// Sort entries by the given key; equal keys keep their relative order.
#[must_use]
pub fn sort_entries(
    mut entries: Vec<TimeClockEntry>,
    key: SortKey,
    direction: SortDirection,
) -> Vec<TimeClockEntry> {
    entries.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Date => a.date.cmp(&b.date).then_with(|| a.clock_in.cmp(&b.clock_in)),
            SortKey::UserName => a.user_name.cmp(&b.user_name),
            SortKey::ShiftName => a.shift_name.cmp(&b.shift_name),
            SortKey::Total => a.total.cmp(&b.total),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    entries
}

/// Slice one page out of a derived list.
///
/// Pages are 1-based; out-of-range pages yield an empty item list with the
/// metadata intact. `per_page` of zero is treated as one.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);

    let offset = (page - 1).saturating_mul(per_page);
    let page_items = items
        .iter()
        .skip(offset)
        .take(per_page)
        .cloned()
        .collect();

    Page {
        items: page_items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::WorklogId;

    fn entry(worklog: i64, user: &str, shift: &str, date: &str) -> TimeClockEntry {
        TimeClockEntry {
            worklog_id: WorklogId::new(worklog),
            user_id: UserId::new(worklog % 2),
            user_name: user.to_string(),
            shift_id: ShiftId::new(1),
            shift_name: shift.to_string(),
            date: date.to_string(),
            clock_in: "09:00".to_string(),
            clock_out: "17:00".to_string(),
            total: "08:00".to_string(),
            color: None,
        }
    }

    fn sample() -> Vec<TimeClockEntry> {
        vec![
            entry(1, "Dana", "Morning", "2024-03-12"),
            entry(2, "Alex", "Evening", "2024-03-11"),
            entry(3, "Dana", "Evening", "2024-03-13"),
        ]
    }

    #[test]
    fn filter_by_user_id() {
        let filter = EntryFilter {
            user_id: Some(UserId::new(1)),
            ..EntryFilter::default()
        };
        let kept = filter_entries(&sample(), &filter);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|e| e.user_id == UserId::new(1)));
    }

    #[test]
    fn filter_search_is_case_insensitive() {
        let filter = EntryFilter {
            search: Some("dana".to_string()),
            ..EntryFilter::default()
        };
        assert_eq!(filter_entries(&sample(), &filter).len(), 2);

        let filter = EntryFilter {
            search: Some("EVENING".to_string()),
            ..EntryFilter::default()
        };
        assert_eq!(filter_entries(&sample(), &filter).len(), 2);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        assert_eq!(
            filter_entries(&sample(), &EntryFilter::default()).len(),
            3
        );
    }

    #[test]
    fn sort_by_date_ascending_and_descending() {
        let sorted = sort_entries(sample(), SortKey::Date, SortDirection::Ascending);
        assert_eq!(sorted[0].date, "2024-03-11");
        assert_eq!(sorted[2].date, "2024-03-13");

        let sorted = sort_entries(sample(), SortKey::Date, SortDirection::Descending);
        assert_eq!(sorted[0].date, "2024-03-13");
    }

    #[test]
    fn sort_by_user_name_is_stable_for_equal_keys() {
        let sorted = sort_entries(sample(), SortKey::UserName, SortDirection::Ascending);
        assert_eq!(sorted[0].user_name, "Alex");
        // Dana's two rows keep their original relative order.
        assert_eq!(sorted[1].worklog_id, WorklogId::new(1));
        assert_eq!(sorted[2].worklog_id, WorklogId::new(3));
    }

    #[test]
    fn paginate_slices_and_reports_totals() {
        let items: Vec<i32> = (1..=7).collect();
        let page = paginate(&items, 2, 3);
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total_items, 7);
        assert_eq!(page.total_pages, 3);

        let last = paginate(&items, 3, 3);
        assert_eq!(last.items, vec![7]);
    }

    #[test]
    fn paginate_clamps_degenerate_input() {
        let items: Vec<i32> = vec![1, 2];
        let page = paginate(&items, 0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.items, vec![1]);

        let beyond = paginate(&items, 9, 2);
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_pages, 1);
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let page = paginate::<i32>(&[], 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }
}
