//! Transient user-facing notifications for task operations.
//!
//! Validation failures map to a message naming the violated rule; storage
//! failures stay silent by default and are left to logging.

use crate::store::StoreError;
use crate::validation::{TitleValidationError, TITLE_MAX_LEN, TITLE_MIN_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Message shown briefly after a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn task_added() -> Self {
        Self::success("Task added successfully!")
    }

    pub fn task_updated() -> Self {
        Self::success("Task updated successfully!")
    }

    pub fn task_deleted() -> Self {
        Self::success("Task deleted successfully")
    }

    /// Notice for a title rejected while adding a task.
    pub fn invalid_title(err: TitleValidationError) -> Self {
        Self::error(title_message(err, "Please enter a task"))
    }

    /// Notice for a title rejected while editing an existing task.
    pub fn invalid_edit_title(err: TitleValidationError) -> Self {
        Self::error(title_message(err, "Task cannot be empty"))
    }

    /// Notice for a failed add, `None` when the failure is silent.
    pub fn for_store_error(err: &StoreError) -> Option<Self> {
        match err {
            StoreError::Validation(err) => Some(Self::invalid_title(*err)),
            StoreError::Storage(_) => None,
        }
    }

    /// Notice for a failed edit, `None` when the failure is silent.
    pub fn for_edit_error(err: &StoreError) -> Option<Self> {
        match err {
            StoreError::Validation(err) => Some(Self::invalid_edit_title(*err)),
            StoreError::Storage(_) => None,
        }
    }
}

fn title_message(err: TitleValidationError, empty: &str) -> String {
    match err {
        TitleValidationError::Empty => empty.to_string(),
        TitleValidationError::TooShort { .. } => {
            format!("Task must be at least {TITLE_MIN_LEN} characters long")
        }
        TitleValidationError::TooLong { .. } => {
            format!("Task must be less than {TITLE_MAX_LEN} characters")
        }
    }
}
