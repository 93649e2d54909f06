//! Record use-case service owning the in-memory snapshot.
//!
//! # Contract
//! - `refresh()` replaces the snapshot with a fresh full scan.
//! - `records()` exposes the snapshot; it is point-in-time and only changes
//!   on an explicit `refresh()`.
//! - `visible_to()` narrows the snapshot through the visibility filter.

use crate::model::record::{Record, RecordId};
use crate::model::user::User;
use crate::repo::record_repo::RecordRepository;
use crate::repo::RepoResult;
use crate::service::Storage;
use crate::visibility;

pub struct RecordService<R: RecordRepository> {
    storage: Storage<R>,
    snapshot: Vec<Record>,
}

impl<R: RecordRepository> RecordService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            storage: Storage::Ready(repo),
            snapshot: Vec::new(),
        }
    }

    /// Degraded mode for when the storage facility could not be opened: the
    /// snapshot stays empty and writes fail with `reason`.
    pub fn detached(reason: impl Into<String>) -> Self {
        Self {
            storage: Storage::Unavailable(reason.into()),
            snapshot: Vec::new(),
        }
    }

    pub fn is_detached(&self) -> bool {
        self.storage.is_unavailable()
    }

    /// Re-reads the full record set. Detached services keep the empty view
    /// and report 0 instead of failing, so the app can still render.
    pub fn refresh(&mut self) -> RepoResult<usize> {
        match &self.storage {
            Storage::Ready(repo) => {
                self.snapshot = repo.get_all()?;
                Ok(self.snapshot.len())
            }
            Storage::Unavailable(_) => {
                self.snapshot.clear();
                Ok(0)
            }
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.snapshot
    }

    /// Records from the snapshot that `viewer` may observe, in order.
    pub fn visible_to<'s>(&'s self, viewer: &User) -> Vec<&'s Record> {
        visibility::visible(viewer, &self.snapshot)
    }

    /// Persists `record`; ownership defaults to `viewer` when absent. The
    /// snapshot is not touched — callers refresh explicitly.
    pub fn save(&self, record: &Record, viewer: Option<&User>) -> RepoResult<RecordId> {
        self.storage
            .ready()?
            .put(record, viewer.map(|user| user.id.as_str()))
    }

    pub fn delete(&self, id: RecordId) -> RepoResult<()> {
        self.storage.ready()?.delete(id)
    }

    /// Secondary-index lookup straight from storage.
    pub fn list_by_date(&self, date: &str) -> RepoResult<Vec<Record>> {
        self.storage.ready()?.list_by_date(date)
    }
}
