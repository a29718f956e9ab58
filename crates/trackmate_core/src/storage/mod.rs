//! Durable key-value storage consumed by the task store.
//!
//! # Responsibility
//! - Define the get/set capability the store persists through.
//! - Provide JSON load/save helpers with fallback-to-default reads.
//! - Ship an in-memory adapter and a SQLite-backed adapter.
//!
//! # Invariants
//! - Adapters never interpret stored values; they hold opaque JSON text.
//! - Reads never fail the caller: missing, unreadable or corrupt values yield
//!   the caller's default.
//! - Writes report failures so callers can keep the previous state.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
pub mod migrations;
mod open;
mod sqlite;

pub use memory::MemoryStorage;
pub use open::{open_storage, open_storage_in_memory};
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    Serialize(serde_json::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Adapter-specific failure such as a full quota or missing table.
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize value: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Synchronous get/set capability over named JSON values.
pub trait KeyValueStorage {
    /// Returns the raw stored text for `key`, or `None` when absent.
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the stored text for `key`.
    fn set_raw(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_raw(key, value)
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_raw(key, value)
    }
}

/// Reads and decodes `key`, substituting `default` on any failure.
///
/// # Side effects
/// - Emits a `storage_read` warning when the value is unreadable or corrupt.
pub fn load_or_default<T, S>(storage: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    let raw = match storage.get_raw(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=storage_read module=storage status=missing key={key}");
            return default;
        }
        Err(err) => {
            warn!(
                "event=storage_read module=storage status=fallback key={key} error_code=read_failed error={err}"
            );
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=storage_read module=storage status=fallback key={key} error_code=corrupt_value bytes={} error={err}",
                raw.len()
            );
            default
        }
    }
}

/// Encodes `value` as JSON and writes it under `key`.
pub fn save<T, S>(storage: &S, key: &str, value: &T) -> StorageResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    let encoded = serde_json::to_string(value)?;
    storage.set_raw(key, &encoded)
}
