//! Task store: the single owner of the task collection.
//!
//! # Responsibility
//! - Expose create/toggle/delete/edit/reorder over the collection.
//! - Persist the full collection through a [`KeyValueStorage`] after every
//!   successful mutation.
//!
//! # Invariants
//! - Task ids are pairwise distinct.
//! - Every title written by the store is trimmed and 3..=200 UTF-16 units
//!   long. Records loaded from storage are trimmed but never dropped for
//!   length alone.
//! - `tasks()[i].order == i` after every operation, including delete.
//! - `updated_at >= created_at`, and `updated_at` never moves backwards.
//! - New tasks are inserted at the front.
//! - A failed operation (validation or storage) leaves the collection and
//!   storage untouched.

pub mod ordering;

use crate::clock::{Clock, SystemClock};
use crate::config::CoreConfig;
use crate::model::task::{Task, TaskId};
use crate::storage::{load_or_default, save, KeyValueStorage, StorageError};
use crate::validation::{validate_title, TitleValidationError};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a store mutation. The collection is unchanged in every case.
#[derive(Debug)]
pub enum StoreError {
    /// Title rejected; user-correctable.
    Validation(TitleValidationError),
    /// The next collection could not be written.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "failed to persist tasks: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<TitleValidationError> for StoreError {
    fn from(value: TitleValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Aggregate counts over the current collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Owned task collection with write-through persistence.
pub struct TaskStore<S: KeyValueStorage, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    tasks_key: String,
    tasks: Vec<Task>,
}

impl<S: KeyValueStorage> TaskStore<S, SystemClock> {
    /// Loads the store with wall-clock timestamps and default keys.
    pub fn open(storage: S) -> Self {
        Self::load(storage, SystemClock, &CoreConfig::default())
    }
}

impl<S: KeyValueStorage, C: Clock> TaskStore<S, C> {
    /// Reads the collection once from `storage`.
    ///
    /// Missing or corrupt data yields an empty collection. Records that break
    /// collection invariants are repaired in memory; the repaired collection is
    /// written on the next successful mutation.
    pub fn load(storage: S, clock: C, config: &CoreConfig) -> Self {
        let raw: Vec<Task> = load_or_default(&storage, &config.tasks_key, Vec::new());
        let (tasks, repairs) = ordering::repair_loaded(raw);

        if !repairs.is_clean() {
            warn!(
                "event=store_load module=store status=repaired dropped_duplicates={} dropped_blank_titles={} retrimmed_titles={} clamped_timestamps={} renumbered={}",
                repairs.dropped_duplicates,
                repairs.dropped_blank_titles,
                repairs.retrimmed_titles,
                repairs.clamped_timestamps,
                repairs.renumbered
            );
        }
        info!(
            "event=store_load module=store status=ok key={} tasks={}",
            config.tasks_key,
            tasks.len()
        );

        Self {
            storage,
            clock,
            tasks_key: config.tasks_key.clone(),
            tasks,
        }
    }

    /// Read-only snapshot in manual order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn counts(&self) -> TaskCounts {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskCounts {
            total: self.tasks.len(),
            completed,
            pending: self.tasks.len() - completed,
        }
    }

    /// Returns the storage adapter, e.g. to share it with preferences.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Creates a pending task at the front of the list.
    ///
    /// # Errors
    /// - `Validation` when the title is rejected; nothing is written.
    /// - `Storage` when persisting fails; the collection is unchanged.
    pub fn create(&mut self, title: &str) -> StoreResult<Task> {
        let title = validated("task_create", title)?;
        let task = Task::new(title, self.clock.now());

        let mut next = self.tasks.clone();
        ordering::prepend(&mut next, task.clone());
        self.commit("task_create", next)?;

        info!(
            "event=task_create module=store status=ok task_id={} tasks={}",
            task.id,
            self.tasks.len()
        );
        Ok(task)
    }

    /// Flips completion state of `id`.
    ///
    /// Returns `Ok(false)` without writing when `id` is unknown.
    pub fn toggle(&mut self, id: &TaskId) -> StoreResult<bool> {
        let Some(index) = self.position(id) else {
            debug!("event=task_toggle module=store status=skipped reason=not_found task_id={id}");
            return Ok(false);
        };

        let mut next = self.tasks.clone();
        let stamped = self.stamp(&next[index]);
        let task = &mut next[index];
        task.completed = !task.completed;
        task.updated_at = stamped;
        let completed = task.completed;
        self.commit("task_toggle", next)?;

        info!("event=task_toggle module=store status=ok task_id={id} completed={completed}");
        Ok(true)
    }

    /// Removes `id` permanently and closes the gap in `order`.
    ///
    /// Returns `Ok(false)` without writing when `id` is unknown.
    pub fn delete(&mut self, id: &TaskId) -> StoreResult<bool> {
        let Some(index) = self.position(id) else {
            debug!("event=task_delete module=store status=skipped reason=not_found task_id={id}");
            return Ok(false);
        };

        let mut next = self.tasks.clone();
        next.remove(index);
        ordering::renumber(&mut next);
        self.commit("task_delete", next)?;

        info!(
            "event=task_delete module=store status=ok task_id={id} tasks={}",
            self.tasks.len()
        );
        Ok(true)
    }

    /// Replaces the title of `id`.
    ///
    /// Returns `Ok(true)` when a new title was written and `Ok(false)` when
    /// there was nothing to change: the trimmed title equals the current one
    /// (no timestamp bump) or `id` is unknown.
    ///
    /// # Errors
    /// - `Validation` when the title is rejected, even for an unknown id.
    /// - `Storage` when persisting fails; the collection is unchanged.
    pub fn edit(&mut self, id: &TaskId, title: &str) -> StoreResult<bool> {
        let title = validated("task_edit", title)?;
        let Some(index) = self.position(id) else {
            debug!("event=task_edit module=store status=skipped reason=not_found task_id={id}");
            return Ok(false);
        };
        if self.tasks[index].title == title {
            debug!("event=task_edit module=store status=skipped reason=unchanged task_id={id}");
            return Ok(false);
        }

        let mut next = self.tasks.clone();
        let stamped = self.stamp(&next[index]);
        next[index].title = title;
        next[index].updated_at = stamped;
        self.commit("task_edit", next)?;

        info!("event=task_edit module=store status=ok task_id={id}");
        Ok(true)
    }

    /// Moves `dragged` to the position currently held by `target`.
    ///
    /// Returns `Ok(false)` without writing when either id is unknown or both
    /// name the same task. Timestamps are not touched.
    pub fn reorder(&mut self, dragged: &TaskId, target: &TaskId) -> StoreResult<bool> {
        let (Some(from), Some(to)) = (self.position(dragged), self.position(target)) else {
            debug!(
                "event=task_reorder module=store status=skipped reason=not_found dragged_id={dragged} target_id={target}"
            );
            return Ok(false);
        };
        if from == to {
            return Ok(false);
        }

        let mut next = self.tasks.clone();
        ordering::move_to(&mut next, from, to);
        self.commit("task_reorder", next)?;

        info!("event=task_reorder module=store status=ok task_id={dragged} from={from} to={to}");
        Ok(true)
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }

    /// Next `updated_at` for `task`, never earlier than its current value.
    fn stamp(&self, task: &Task) -> DateTime<Utc> {
        self.clock.now().max(task.updated_at)
    }

    fn commit(&mut self, event: &str, next: Vec<Task>) -> StoreResult<()> {
        debug_assert!(ordering::is_dense(&next));
        if let Err(err) = save(&self.storage, &self.tasks_key, &next) {
            error!(
                "event={event} module=store status=error error_code=storage_write_failed error={err}"
            );
            return Err(err.into());
        }
        self.tasks = next;
        Ok(())
    }
}

fn validated(event: &str, raw: &str) -> StoreResult<String> {
    validate_title(raw).map_err(|err| {
        debug!("event={event} module=store status=rejected reason={err:?}");
        StoreError::Validation(err)
    })
}
