//! Schema migrations for the SQLite key-value adapter.
//!
//! # Invariants
//! - Versions are strictly increasing; the applied version lives in
//!   `PRAGMA user_version`.
//! - All pending steps commit in one transaction or none do.

use crate::storage::{StorageError, StorageResult};
use log::info;
use rusqlite::Connection;

/// `(version, sql)` pairs in apply order.
const STEPS: &[(u32, &str)] = &[(1, include_str!("0001_kv_entries.sql"))];

/// Returns the newest schema version this build understands.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Brings the connection's schema up to [`latest_version`].
///
/// Returns how many steps were applied.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
pub fn apply_migrations(conn: &mut Connection) -> StorageResult<usize> {
    let from = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let latest = latest_version();

    if from > latest {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }

    let pending: Vec<_> = STEPS.iter().filter(|(version, _)| *version > from).collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for (version, sql) in &pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!(
        "event=storage_migrate module=storage status=ok from_version={from} to_version={latest} steps={}",
        pending.len()
    );
    Ok(pending.len())
}
