//! Two-phase drag protocol for manual reordering and drag-to-delete.
//!
//! # Invariants
//! - At most one drag is in flight.
//! - Every terminal step (`complete_drag`, `drop_on_delete_zone`, `cancel`)
//!   clears the pending source.
//! - Dropping on the delete zone never deletes directly; it yields a
//!   [`PendingDelete`] that must be confirmed.

use crate::clock::Clock;
use crate::model::task::TaskId;
use crate::storage::KeyValueStorage;
use crate::store::{StoreResult, TaskStore};

/// Drag state owned by a list view.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DragSession {
    source: Option<TaskId>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id` as the dragged task, replacing any stale source.
    pub fn begin_drag(&mut self, id: TaskId) {
        self.source = Some(id);
    }

    /// Task currently being dragged.
    pub fn dragging(&self) -> Option<&TaskId> {
        self.source.as_ref()
    }

    pub fn is_dragging(&self, id: &TaskId) -> bool {
        self.source.as_ref() == Some(id)
    }

    /// Drops the dragged task onto `target`, moving it to the target's slot.
    ///
    /// Returns `Ok(false)` when no drag was in flight, when `target` is the
    /// dragged task itself, or when the store skipped the move.
    pub fn complete_drag<S, C>(
        &mut self,
        store: &mut TaskStore<S, C>,
        target: &TaskId,
    ) -> StoreResult<bool>
    where
        S: KeyValueStorage,
        C: Clock,
    {
        let Some(source) = self.source.take() else {
            return Ok(false);
        };
        if &source == target {
            return Ok(false);
        }
        store.reorder(&source, target)
    }

    /// Drops the dragged task onto the delete zone.
    pub fn drop_on_delete_zone(&mut self) -> Option<PendingDelete> {
        self.source.take().map(|id| PendingDelete { id })
    }

    /// Ends the drag without effect.
    pub fn cancel(&mut self) {
        self.source = None;
    }
}

/// Deletion awaiting user confirmation. Dropping it cancels.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending delete does nothing until confirmed"]
pub struct PendingDelete {
    id: TaskId,
}

impl PendingDelete {
    pub fn id(&self) -> &TaskId {
        &self.id
    }

    /// Deletes the task. Returns `Ok(false)` when it is already gone.
    pub fn confirm<S, C>(self, store: &mut TaskStore<S, C>) -> StoreResult<bool>
    where
        S: KeyValueStorage,
        C: Clock,
    {
        store.delete(&self.id)
    }
}
