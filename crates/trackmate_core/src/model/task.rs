//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record persisted by the task store.
//! - Keep the on-disk JSON shape (`camelCase`, RFC 3339 timestamps) stable.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `updated_at >= created_at`.
//! - `order` mirrors the task's position inside its collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque stable identifier of a task.
///
/// Stored as free text so collections written by older clients (which used
/// `<millis>-<random>` ids) still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Already trimmed; 3..=200 characters.
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Zero-based manual sort position.
    #[serde(default)]
    pub order: usize,
    pub created_at: DateTime<Utc>,
    /// Bumped by toggle and edit, never by reorder.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task at the front position.
    ///
    /// The caller is responsible for passing an already validated title.
    pub fn new(title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::with_id(TaskId::generate(), title, now)
    }

    /// Creates a task with a caller-provided identifier.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: TaskId, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns whether the task has been edited or toggled since creation.
    pub fn was_updated(&self) -> bool {
        self.updated_at > self.created_at
    }
}
