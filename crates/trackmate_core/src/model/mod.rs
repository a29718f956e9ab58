//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the persisted task record and its identifier.
//! - Define the view selectors (`Filter`, `Theme`) persisted as preferences.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` that is never reused.
//! - Deletion is a hard delete; there are no tombstones.

pub mod preference;
pub mod task;
