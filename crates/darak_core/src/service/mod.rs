//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own explicit point-in-time snapshots instead of ambient globals.
//!
//! # Invariants
//! - Snapshots never refresh implicitly; callers re-fetch after mutations.
//! - A detached service reads as empty and fails writes with the retained
//!   unavailability reason.

pub mod record_service;
pub mod ticket_service;
pub mod user_directory;

use crate::repo::{RepoError, RepoResult};

/// Backing state of a snapshot service: a live repository, or the reason the
/// storage facility could not be provided.
pub(crate) enum Storage<R> {
    Ready(R),
    Unavailable(String),
}

impl<R> Storage<R> {
    pub(crate) fn ready(&self) -> RepoResult<&R> {
        match self {
            Self::Ready(repo) => Ok(repo),
            Self::Unavailable(reason) => Err(RepoError::Unavailable(reason.clone())),
        }
    }

    pub(crate) fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
