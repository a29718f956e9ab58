//! Core domain logic for TrackMate, a single-user to-do list.
//! This crate is the single source of truth for task invariants.

pub mod clock;
pub mod config;
pub mod drag;
pub mod logging;
pub mod model;
pub mod notice;
pub mod preferences;
pub mod storage;
pub mod store;
pub mod validation;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CoreConfig;
pub use drag::{DragSession, PendingDelete};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::preference::{Filter, Theme};
pub use model::task::{Task, TaskId};
pub use notice::{Notice, NoticeKind};
pub use preferences::Preferences;
pub use storage::{
    load_or_default, open_storage, open_storage_in_memory, save, KeyValueStorage, MemoryStorage,
    SqliteStorage, StorageError, StorageResult,
};
pub use store::{StoreError, StoreResult, TaskCounts, TaskStore};
pub use validation::{title_len, validate_title, TitleValidationError, TITLE_MAX_LEN, TITLE_MIN_LEN};
pub use view::{clamp_page, page_window, project, ListState, TaskPage};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
