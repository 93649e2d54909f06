//! Record repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable upsert/delete/scan APIs over the `records` table.
//! - Keep SQL and JSON-column details inside the persistence boundary.
//!
//! # Invariants
//! - `put` is an upsert keyed by id; an `owner_id` already stored is never
//!   overwritten by an absent incoming one.
//! - `delete` of a nonexistent id reports success without state change.
//! - Write paths call `Record::validate()` before SQL mutations.

use crate::model::record::{Record, RecordId, ShareTarget};
use crate::repo::{ensure_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use std::collections::BTreeMap;

const RECORD_SELECT_SQL: &str = "SELECT
    id,
    owner_id,
    date,
    title,
    category,
    location,
    release_year,
    rating,
    mood,
    review,
    details,
    shared_with,
    image,
    youtube,
    audio
FROM records";

/// Repository interface for journal records.
pub trait RecordRepository {
    /// Upserts `record`. When the record lacks an owner and `viewer` names
    /// the active session user, ownership is assigned at write time.
    fn put(&self, record: &Record, viewer: Option<&str>) -> RepoResult<RecordId>;
    fn delete(&self, id: RecordId) -> RepoResult<()>;
    fn get_all(&self) -> RepoResult<Vec<Record>>;
    fn list_by_date(&self, date: &str) -> RepoResult<Vec<Record>>;
}

/// SQLite-backed record repository.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    /// Wraps a migrated connection, rejecting one that is not ready.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_ready(conn, &["records"])?;
        Ok(Self { conn })
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn put(&self, record: &Record, viewer: Option<&str>) -> RepoResult<RecordId> {
        record.validate()?;

        let owner_id = record
            .owner_id
            .clone()
            .or_else(|| viewer.map(str::to_string));
        let details = encode_json(&record.details, "records.details")?;
        let shared_with = encode_json(&record.shared_with, "records.shared_with")?;

        self.conn.execute(
            "INSERT INTO records (
                id, owner_id, date, title, category, location, release_year,
                rating, mood, review, details, shared_with, image, youtube, audio
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            ON CONFLICT(id) DO UPDATE SET
                owner_id = COALESCE(records.owner_id, excluded.owner_id),
                date = excluded.date,
                title = excluded.title,
                category = excluded.category,
                location = excluded.location,
                release_year = excluded.release_year,
                rating = excluded.rating,
                mood = excluded.mood,
                review = excluded.review,
                details = excluded.details,
                shared_with = excluded.shared_with,
                image = excluded.image,
                youtube = excluded.youtube,
                audio = excluded.audio,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                record.id,
                owner_id,
                record.date.as_str(),
                record.title.as_deref(),
                record.category.as_str(),
                record.location.as_deref(),
                record.release_year.as_deref(),
                i64::from(record.rating),
                record.mood.as_deref(),
                record.review.as_deref(),
                details,
                shared_with,
                record.image.as_deref(),
                record.youtube.as_deref(),
                record.audio.as_deref(),
            ],
        )?;

        Ok(record.id)
    }

    fn delete(&self, id: RecordId) -> RepoResult<()> {
        // Deleting an id that was never stored still reports success.
        self.conn
            .execute("DELETE FROM records WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn get_all(&self) -> RepoResult<Vec<Record>> {
        self.query_records(&format!("{RECORD_SELECT_SQL} ORDER BY date ASC, id ASC;"), &[])
    }

    fn list_by_date(&self, date: &str) -> RepoResult<Vec<Record>> {
        self.query_records(
            &format!("{RECORD_SELECT_SQL} WHERE date = ?1 ORDER BY id ASC;"),
            &[date],
        )
    }
}

impl SqliteRecordRepository<'_> {
    fn query_records(&self, sql: &str, bind: &[&str]) -> RepoResult<Vec<Record>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(bind))?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<Record> {
    let details_text: String = row.get("details")?;
    let details: BTreeMap<String, String> = serde_json::from_str(&details_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid JSON `{details_text}` in records.details"))
    })?;

    let shared_text: String = row.get("shared_with")?;
    let shared_with: Vec<ShareTarget> = serde_json::from_str(&shared_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid JSON `{shared_text}` in records.shared_with"
        ))
    })?;

    let rating_raw: i64 = row.get("rating")?;
    let rating = u8::try_from(rating_raw).map_err(|_| {
        RepoError::InvalidData(format!("invalid rating value `{rating_raw}` in records.rating"))
    })?;

    let record = Record {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        date: row.get("date")?,
        title: row.get("title")?,
        category: row.get("category")?,
        location: row.get("location")?,
        release_year: row.get("release_year")?,
        rating,
        mood: row.get("mood")?,
        review: row.get("review")?,
        details,
        shared_with,
        image: row.get("image")?,
        youtube: row.get("youtube")?,
        audio: row.get("audio")?,
    };
    record.validate()?;
    Ok(record)
}

fn encode_json<T: serde::Serialize>(value: &T, column: &str) -> RepoResult<String> {
    serde_json::to_string(value)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode {column}: {err}")))
}
