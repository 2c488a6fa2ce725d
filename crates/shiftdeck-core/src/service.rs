//! Service layer tying mutations to the refetch loop.
//!
//! The server owns overlap detection and record state; after every
//! successful mutation the whole entry set for the active range is fetched
//! again instead of reconciling incrementally. The one exception is the
//! checklog delete path, which removes the row locally first and restores
//! it when the server call fails.

use crate::api::{CutRecord, DateRange, WorklogBackend};
use crate::error::Result;
use crate::models::{Conflict, PreviewRow, TimeClockEntry, WorklogId};

/// Local cache of the fetched entry list.
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: Vec<TimeClockEntry>,
}

impl EntryStore {
    #[must_use]
    pub fn entries(&self) -> &[TimeClockEntry] {
        &self.entries
    }

    pub fn replace(&mut self, entries: Vec<TimeClockEntry>) {
        self.entries = entries;
    }

    /// Remove the entry for a worklog, returning its position and value so
    /// the caller can restore it on rollback.
    fn remove(&mut self, worklog_id: WorklogId) -> Option<(usize, TimeClockEntry)> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.worklog_id == worklog_id)?;
        Some((index, self.entries.remove(index)))
    }

    fn restore(&mut self, index: usize, entry: TimeClockEntry) {
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry);
    }
}

/// Drives cut/delete mutations and the follow-up refetch for one active
/// date range. Callers serialize mutations; no two run concurrently.
#[derive(Debug)]
pub struct TimeClockService<B: WorklogBackend> {
    backend: B,
    store: EntryStore,
    range: DateRange,
}

impl<B: WorklogBackend> TimeClockService<B> {
    pub fn new(backend: B, range: DateRange) -> Self {
        Self {
            backend,
            store: EntryStore::default(),
            range,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[TimeClockEntry] {
        self.store.entries()
    }

    #[must_use]
    pub const fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn set_range(&mut self, range: DateRange) {
        self.range = range;
    }

    /// Fetch the entry list for the active range into the store.
    pub async fn refresh(&mut self) -> Result<()> {
        let entries = self.backend.fetch_time_clock(&self.range).await?;
        self.store.replace(entries);
        Ok(())
    }

    /// Fetch the conflict groups for the active range.
    pub async fn conflicts(&self) -> Result<Vec<Conflict>> {
        self.backend.fetch_conflicts(&self.range).await
    }

    /// Send a confirmed cut preview as one batch mutation.
    ///
    /// On success the full entry set is fetched again; on failure the error
    /// is returned and no refetch happens.
    pub async fn confirm_cut(&mut self, rows: &[PreviewRow]) -> Result<()> {
        let cut_data: Vec<CutRecord> = rows.iter().map(CutRecord::from).collect();
        self.backend.cut_worklog(&cut_data).await?;
        self.refresh().await
    }

    /// Delete one worklog record, then refetch.
    pub async fn confirm_delete(&mut self, worklog_id: WorklogId) -> Result<()> {
        self.backend.delete_worklog(worklog_id).await?;
        self.refresh().await
    }

    /// Checklog delete: remove the row locally before the server call and
    /// roll the removal back when the call fails. No refetch either way.
    pub async fn delete_checklog(&mut self, worklog_id: WorklogId) -> Result<()> {
        let removed = self.store.remove(worklog_id);
        match self.backend.delete_worklog(worklog_id).await {
            Ok(()) => Ok(()),
            Err(error) => {
                if let Some((index, entry)) = removed {
                    tracing::warn!(%worklog_id, "checklog delete failed, restoring row");
                    self.store.restore(index, entry);
                }
                Err(error)
            }
        }
    }
}
