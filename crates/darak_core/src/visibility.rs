//! Ownership-and-sharing visibility filter.
//!
//! # Responsibility
//! - Decide which records a given viewer may observe.
//!
//! # Invariants
//! - Pure: no storage access, no mutation.
//! - Input order is preserved; no record is duplicated.
//! - The all-friends gate checks the *viewer's* friend list for the owner:
//!   the friend graph is directed, and sharing via `AllFriends` is only
//!   visible to viewers who have separately friended the owner.

use crate::model::record::{Record, ShareTarget};
use crate::model::user::User;

/// Returns the subset of `all_records` that `viewer` may observe, in the
/// input order.
pub fn visible<'a>(viewer: &User, all_records: &'a [Record]) -> Vec<&'a Record> {
    all_records
        .iter()
        .filter(|record| can_view(viewer, record))
        .collect()
}

/// Whether a single record is observable by `viewer`.
pub fn can_view(viewer: &User, record: &Record) -> bool {
    let owner = match record.owner_id.as_deref() {
        // Records persisted before per-record ownership existed stay visible
        // to every authenticated viewer.
        None => return true,
        Some(owner) => owner,
    };

    if owner == viewer.id {
        return true;
    }

    for target in &record.shared_with {
        match target {
            ShareTarget::User(id) if id == &viewer.id => return true,
            ShareTarget::AllFriends if viewer.is_friend_of(owner) => return true,
            _ => {}
        }
    }

    false
}
