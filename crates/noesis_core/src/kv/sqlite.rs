//! SQLite-backed key-value backend.
//!
//! # Invariants
//! - Values live in `kv_entries`, one row per key.
//! - `set` is a single upsert statement; no multi-statement transactions.

use super::{KeyValueStore, KvResult};
use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Durable key-value store over a migrated SQLite connection.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Wraps a connection that already has migrations applied.
    ///
    /// # Errors
    /// - Returns [`DbError::MissingRequiredTable`] when `kv_entries` is absent.
    pub fn try_new(conn: Connection) -> KvResult<Self> {
        ensure_kv_table_ready(&conn)?;
        Ok(Self { conn })
    }

    /// Opens (and migrates) a database file and wraps it.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        let conn = open_db(path)?;
        Self::try_new(conn)
    }

    /// Opens (and migrates) a private in-memory database.
    pub fn open_in_memory() -> KvResult<Self> {
        let conn = open_db_in_memory()?;
        Self::try_new(conn)
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KvResult<()> {
        self.conn.execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

fn ensure_kv_table_ready(conn: &Connection) -> Result<(), DbError> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'kv_entries'
        );",
        [],
        |row| row.get(0),
    )?;

    if exists == 1 {
        Ok(())
    } else {
        Err(DbError::MissingRequiredTable("kv_entries"))
    }
}
