//! Flat key/value store over the `kv` table.
//!
//! Holds the entries that ride alongside the keyed collections: the user
//! directory, the current-session pointer, custom categories, search
//! credentials and the bucket list.

use crate::repo::{ensure_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const KEY_USERS: &str = "darak_users";
pub const KEY_CURRENT_USER: &str = "darak_current_user";
pub const KEY_CATEGORIES: &str = "darak_categories";
pub const KEY_CONFIG: &str = "darak_config";
pub const KEY_BUCKET_LIST: &str = "darak_bucketlist";

/// SQLite-backed flat entry store.
#[derive(Clone, Copy)]
pub struct KvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> KvStore<'conn> {
    /// Wraps a migrated connection, rejecting one that is not ready.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_ready(conn, &["kv"])?;
        Ok(Self { conn })
    }

    pub fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    /// Removing an absent key still reports success.
    pub fn remove(&self, key: &str) -> RepoResult<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1;", [key])?;
        Ok(())
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> RepoResult<Option<T>> {
        match self.get(key)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|err| RepoError::InvalidData(format!("invalid JSON at kv `{key}`: {err}"))),
        }
    }

    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) -> RepoResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|err| RepoError::InvalidData(format!("cannot encode kv `{key}`: {err}")))?;
        self.put(key, &raw)
    }
}
