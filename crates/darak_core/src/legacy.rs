//! One-time import of the pre-database flat record store.
//!
//! # Responsibility
//! - Detect the flat JSON file left behind by the old persistence format.
//! - Replay its entries into the record repository, then remove the file.
//!
//! # Invariants
//! - Idempotent: an absent file is a no-op returning 0.
//! - Legacy entries keep `owner_id` absent unless they already carried one.
//! - The file is removed only after every persistable entry has been stored;
//!   a persistence failure aborts the run with the file left in place.
//! - Entries that fail to decode are skipped and logged; they can never
//!   succeed on a retry and do not block completion.

use crate::model::record::Record;
use crate::repo::record_repo::RecordRepository;
use crate::repo::RepoError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name the old persistence format stored its record array under.
pub const LEGACY_FLAT_BASENAME: &str = "spacelog_records.json";

pub struct LegacyImporter<'a, R: RecordRepository> {
    flat_path: PathBuf,
    repo: &'a R,
}

impl<'a, R: RecordRepository> LegacyImporter<'a, R> {
    pub fn new(flat_path: impl Into<PathBuf>, repo: &'a R) -> Self {
        Self {
            flat_path: flat_path.into(),
            repo,
        }
    }

    /// Convenience constructor for the conventional flat-file location next
    /// to the database file.
    pub fn beside_database(db_path: &Path, repo: &'a R) -> Self {
        let dir = db_path.parent().unwrap_or_else(|| Path::new("."));
        Self::new(dir.join(LEGACY_FLAT_BASENAME), repo)
    }

    /// Imports all flat entries and returns how many were persisted.
    pub fn migrate(&self) -> Result<usize, LegacyImportError> {
        let raw = match fs::read_to_string(&self.flat_path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                // Already migrated (or never present on this device).
                return Ok(0);
            }
            Err(err) => return Err(LegacyImportError::Io(err)),
        };

        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&raw).map_err(LegacyImportError::Parse)?;
        if entries.is_empty() {
            return Ok(0);
        }

        let mut imported = 0usize;
        let mut skipped = 0usize;
        for entry in entries {
            let record: Record = match serde_json::from_value(entry) {
                Ok(record) => record,
                Err(err) => {
                    warn!(
                        "event=legacy_import module=legacy status=skip error_code=parse_failure error={err}"
                    );
                    skipped += 1;
                    continue;
                }
            };

            // No forced owner: legacy entries stay legacy unless they already
            // carried an owner.
            self.repo
                .put(&record, None)
                .map_err(LegacyImportError::Storage)?;
            imported += 1;
        }

        fs::remove_file(&self.flat_path).map_err(LegacyImportError::Io)?;
        info!(
            "event=legacy_import module=legacy status=ok imported={imported} skipped={skipped} flat_path={}",
            self.flat_path.display()
        );
        Ok(imported)
    }
}

#[derive(Debug)]
pub enum LegacyImportError {
    Io(std::io::Error),
    /// The top-level payload is not a JSON array; the file is left untouched.
    Parse(serde_json::Error),
    Storage(RepoError),
}

impl Display for LegacyImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "legacy flat store io failure: {err}"),
            Self::Parse(err) => write!(f, "legacy flat store is not a record array: {err}"),
            Self::Storage(err) => write!(f, "legacy import aborted by storage failure: {err}"),
        }
    }
}

impl Error for LegacyImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}
