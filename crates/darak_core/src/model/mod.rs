//! Domain models for records, tickets and users.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep wire shapes (legacy flat store, backup bundle) stable via serde.
//!
//! # Invariants
//! - Every record/ticket is identified by a stable epoch-millisecond id.
//! - Write paths validate models before persistence.

pub mod bucket;
pub mod record;
pub mod ticket;
pub mod user;

use std::time::{SystemTime, UNIX_EPOCH};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Current wall-clock time as epoch milliseconds.
///
/// Clocks before the unix epoch collapse to 0; id-producing callers treat the
/// value as "monotonic enough", not as a uniqueness guarantee.
pub(crate) fn epoch_ms_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

/// Current wall-clock time as an RFC 3339 string.
pub(crate) fn now_utc_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
