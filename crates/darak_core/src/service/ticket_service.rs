//! Ticket-wall use-case service owning the in-memory snapshot.

use crate::model::ticket::{Ticket, TicketId};
use crate::repo::ticket_repo::TicketRepository;
use crate::repo::RepoResult;
use crate::service::Storage;

pub struct TicketService<R: TicketRepository> {
    storage: Storage<R>,
    snapshot: Vec<Ticket>,
}

impl<R: TicketRepository> TicketService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            storage: Storage::Ready(repo),
            snapshot: Vec::new(),
        }
    }

    /// Degraded mode for when the storage facility could not be opened.
    pub fn detached(reason: impl Into<String>) -> Self {
        Self {
            storage: Storage::Unavailable(reason.into()),
            snapshot: Vec::new(),
        }
    }

    pub fn is_detached(&self) -> bool {
        self.storage.is_unavailable()
    }

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

    /// Newest first, matching repository order.
    pub fn tickets(&self) -> &[Ticket] {
        &self.snapshot
    }

    pub fn save(&self, ticket: &Ticket) -> RepoResult<TicketId> {
        self.storage.ready()?.put(ticket)
    }

    pub fn delete(&self, id: TicketId) -> RepoResult<()> {
        self.storage.ready()?.delete(id)
    }
}
