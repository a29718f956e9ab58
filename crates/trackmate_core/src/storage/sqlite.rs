//! SQLite-backed key-value adapter.
//!
//! # Responsibility
//! - Persist opaque JSON text per key in the `kv_entries` table.
//!
//! # Invariants
//! - One row per key; writes are upserts.
//! - Construction fails fast when the schema has not been migrated.

use super::{KeyValueStorage, StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value adapter over a borrowed, migrated connection.
pub struct SqliteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStorage<'conn> {
    /// Wraps a connection returned by [`super::open_storage`].
    ///
    /// # Errors
    /// - `Unavailable` when the `kv_entries` table is missing.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(StorageError::Unavailable(
                "kv_entries table missing; open the database with open_storage".to_string(),
            ));
        }
        Ok(Self { conn })
    }

    /// Lists stored keys in ascending order.
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl KeyValueStorage for SqliteStorage<'_> {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
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

    fn set_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
