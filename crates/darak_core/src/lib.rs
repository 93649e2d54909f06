//! Core data layer for Darak, a local-first journal of watched, read and
//! visited memories. This crate is the single source of truth for
//! persistence, migration and sharing-visibility invariants.

pub mod backup;
pub mod category;
pub mod db;
pub mod legacy;
pub mod logging;
pub mod media;
pub mod model;
pub mod repo;
pub mod service;
pub mod visibility;

pub use backup::{export_bundle, import_bundle, Bundle, SearchConfig};
pub use legacy::{LegacyImportError, LegacyImporter};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{Record, RecordId, RecordValidationError, ShareTarget, ALL_FRIENDS_TOKEN};
pub use model::ticket::{Ticket, TicketId, TicketValidationError};
pub use model::user::User;
pub use repo::kv_repo::KvStore;
pub use repo::record_repo::{RecordRepository, SqliteRecordRepository};
pub use repo::ticket_repo::{SqliteTicketRepository, TicketRepository};
pub use repo::{RepoError, RepoResult};
pub use service::record_service::RecordService;
pub use service::ticket_service::TicketService;
pub use service::user_directory::{DirectoryError, DirectoryResult, UserDirectory};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
