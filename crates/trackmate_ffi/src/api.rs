//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task list operations a UI host needs: list, add, toggle,
//!   delete, edit, reorder, plus filter and theme preferences.
//! - Keep error semantics simple: boolean/string envelopes, never panics.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens storage, applies one operation and releases it, so the
//!   database file is the only shared state between calls.

use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use trackmate_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_storage,
    page_window, ping as ping_inner, CoreConfig, Filter, ListState, Notice, NoticeKind,
    Preferences, SqliteStorage, StoreError, Task, TaskId, TaskStore,
};

const DB_FILE_NAME: &str = "trackmate.sqlite3";
const DB_PATH_ENV: &str = "TRACKMATE_DB_PATH";
const MAX_VISIBLE_PAGES: usize = 5;
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task row shown by the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub order: u32,
    /// RFC 3339.
    pub created_at: String,
    /// RFC 3339.
    pub updated_at: String,
}

/// One rendered page of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub items: Vec<TaskItem>,
    /// Effective page after clamping.
    pub page: u32,
    pub total_pages: u32,
    /// Count for the active filter (the "Total: N tasks" label).
    pub filtered_count: u32,
    /// `all|completed|pending`.
    pub filter: String,
    /// Page buttons to render; empty when the pager is hidden.
    pub visible_pages: Vec<u32>,
    /// Diagnostics; empty on success.
    pub message: String,
}

/// Outcome of a mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation succeeded (the `addTask`/`editTask` flag).
    pub ok: bool,
    pub task_id: Option<String>,
    /// `success|error|info`, empty when nothing should be shown.
    pub notice_kind: String,
    /// Toast text; empty when nothing should be shown.
    pub message: String,
}

impl TaskActionResponse {
    fn done(task_id: Option<String>, notice: Option<Notice>) -> Self {
        let (notice_kind, message) = split_notice(notice);
        Self {
            ok: true,
            task_id,
            notice_kind,
            message,
        }
    }

    fn failed(notice: Option<Notice>) -> Self {
        let (notice_kind, message) = split_notice(notice);
        Self {
            ok: false,
            task_id: None,
            notice_kind,
            message,
        }
    }

    fn from_error(op: &str, err: &StoreError) -> Self {
        Self::from_error_with(op, err, Notice::for_store_error)
    }

    fn from_edit_error(err: &StoreError) -> Self {
        Self::from_error_with("task_edit", err, Notice::for_edit_error)
    }

    fn from_error_with(
        op: &str,
        err: &StoreError,
        notice: fn(&StoreError) -> Option<Notice>,
    ) -> Self {
        if matches!(err, StoreError::Storage(_)) {
            warn!("event=ffi_call module=ffi status=error op={op} error={err}");
        }
        Self::failed(notice(err))
    }
}

/// Lists one page of tasks for `filter` (falls back to the stored filter
/// when `None` or unrecognised).
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_list(filter: Option<String>, page: u32) -> TaskListResponse {
    let config = CoreConfig::default();
    let result = with_storage(|storage| {
        let stored_filter = Preferences::load(storage, &config).filter();
        let filter = filter
            .as_deref()
            .and_then(Filter::parse)
            .unwrap_or(stored_filter);
        let store = TaskStore::open(storage);

        let mut state = ListState::new(filter);
        state.set_page(page as usize);
        let projected = state.refresh(store.tasks(), config.page_size());
        let visible_pages = page_window(state.page, projected.total_pages, MAX_VISIBLE_PAGES)
            .map(|range| range.map(to_u32).collect())
            .unwrap_or_default();

        Ok(TaskListResponse {
            items: projected.items.iter().map(to_task_item).collect(),
            page: to_u32(projected.page),
            total_pages: to_u32(projected.total_pages),
            filtered_count: to_u32(projected.filtered_count),
            filter: filter.as_str().to_string(),
            visible_pages,
            message: String::new(),
        })
    });

    result.unwrap_or_else(|message| TaskListResponse {
        items: Vec::new(),
        page: page.max(1),
        total_pages: 0,
        filtered_count: 0,
        filter: filter.unwrap_or_else(|| Filter::All.as_str().to_string()),
        visible_pages: Vec::new(),
        message: format!("tasks_list failed: {message}"),
    })
}

/// Adds a task; `ok=false` with a validation notice when the title is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(title: String) -> TaskActionResponse {
    run_action("task_add", |store| match store.create(&title) {
        Ok(task) => {
            TaskActionResponse::done(Some(task.id.to_string()), Some(Notice::task_added()))
        }
        Err(err) => TaskActionResponse::from_error("task_add", &err),
    })
}

/// Flips completion of `task_id`. Unknown ids succeed silently.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(task_id: String) -> TaskActionResponse {
    let id = TaskId::from(task_id);
    run_action("task_toggle", |store| match store.toggle(&id) {
        Ok(_) => TaskActionResponse::done(Some(id.to_string()), None),
        Err(err) => TaskActionResponse::from_error("task_toggle", &err),
    })
}

/// Deletes `task_id`. Unknown ids succeed silently.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> TaskActionResponse {
    let id = TaskId::from(task_id);
    run_action("task_delete", |store| match store.delete(&id) {
        Ok(true) => TaskActionResponse::done(Some(id.to_string()), Some(Notice::task_deleted())),
        Ok(false) => TaskActionResponse::done(None, None),
        Err(err) => TaskActionResponse::from_error("task_delete", &err),
    })
}

/// Renames `task_id`; `ok=false` with a validation notice when rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit(task_id: String, title: String) -> TaskActionResponse {
    let id = TaskId::from(task_id);
    run_action("task_edit", |store| match store.edit(&id, &title) {
        Ok(true) => TaskActionResponse::done(Some(id.to_string()), Some(Notice::task_updated())),
        Ok(false) => TaskActionResponse::done(Some(id.to_string()), None),
        Err(err) => TaskActionResponse::from_edit_error(&err),
    })
}

/// Moves `dragged_id` into the slot of `target_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_reorder(dragged_id: String, target_id: String) -> TaskActionResponse {
    let dragged = TaskId::from(dragged_id);
    let target = TaskId::from(target_id);
    run_action("task_reorder", |store| match store.reorder(&dragged, &target) {
        Ok(_) => TaskActionResponse::done(Some(dragged.to_string()), None),
        Err(err) => TaskActionResponse::from_error("task_reorder", &err),
    })
}

/// Persists the active filter. Returns an empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn filter_set(filter: String) -> String {
    let Some(parsed) = Filter::parse(&filter) else {
        return format!("unknown filter `{}`; expected all|completed|pending", filter.trim());
    };
    with_storage(|storage| {
        Preferences::load(storage, &CoreConfig::default())
            .set_filter(parsed)
            .map_err(|err| err.to_string())
    })
    .err()
    .unwrap_or_default()
}

/// Returns whether the dark theme is active.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_is_dark() -> bool {
    with_storage(|storage| Ok(Preferences::load(storage, &CoreConfig::default()).theme()))
        .map(|theme| theme.is_dark())
        .unwrap_or(false)
}

/// Flips the theme and returns whether dark is now active.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_toggle() -> bool {
    with_storage(|storage| {
        let mut prefs = Preferences::load(storage, &CoreConfig::default());
        let next = prefs.theme().toggled();
        if let Err(err) = prefs.set_theme(next) {
            warn!("event=ffi_call module=ffi status=error op=theme_toggle error={err}");
        }
        Ok(prefs.theme())
    })
    .map(|theme| theme.is_dark())
    .unwrap_or(false)
}

fn run_action(
    op: &str,
    f: impl FnOnce(&mut TaskStore<&SqliteStorage<'_>>) -> TaskActionResponse,
) -> TaskActionResponse {
    with_storage(|storage| {
        let mut store = TaskStore::open(storage);
        Ok(f(&mut store))
    })
    .unwrap_or_else(|message| {
        warn!("event=ffi_call module=ffi status=error op={op} error_code=storage_open_failed");
        TaskActionResponse {
            ok: false,
            task_id: None,
            notice_kind: String::new(),
            message: format!("{op} failed: {message}"),
        }
    })
}

fn with_storage<T>(f: impl FnOnce(&SqliteStorage<'_>) -> Result<T, String>) -> Result<T, String> {
    let conn =
        open_storage(resolve_db_path()).map_err(|err| format!("storage open failed: {err}"))?;
    let storage =
        SqliteStorage::try_new(&conn).map_err(|err| format!("storage init failed: {err}"))?;
    f(&storage)
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn split_notice(notice: Option<Notice>) -> (String, String) {
    match notice {
        Some(notice) => (notice_kind_label(notice.kind).to_string(), notice.message),
        None => (String::new(), String::new()),
    }
}

fn notice_kind_label(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "success",
        NoticeKind::Error => "error",
        NoticeKind::Info => "info",
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        title: task.title.clone(),
        completed: task.completed,
        order: to_u32(task.order),
        created_at: task.created_at.to_rfc3339(),
        updated_at: task.updated_at.to_rfc3339(),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, filter_set, init_logging, ping, task_add, task_delete, task_edit,
        task_reorder, task_toggle, tasks_list,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn task_add_rejects_short_title_with_notice() {
        let response = task_add("ab".to_string());
        assert!(!response.ok);
        assert_eq!(response.notice_kind, "error");
        assert_eq!(response.message, "Task must be at least 3 characters long");
    }

    #[test]
    fn added_task_can_be_toggled_edited_and_deleted() {
        let title = unique_token("ffi-task");
        let added = task_add(format!("  {title}  "));
        assert!(added.ok, "{}", added.message);
        assert_eq!(added.message, "Task added successfully!");
        let id = added.task_id.expect("add should return task_id");

        let listed = tasks_list(Some("all".to_string()), 1);
        assert!(listed.message.is_empty(), "{}", listed.message);
        assert_eq!(listed.items.first().map(|item| item.title.as_str()), Some(title.as_str()));

        assert!(task_toggle(id.clone()).ok);
        let edited = task_edit(id.clone(), format!("{title} v2"));
        assert!(edited.ok);
        assert_eq!(edited.message, "Task updated successfully!");

        let rejected = task_edit(id.clone(), " ".to_string());
        assert!(!rejected.ok);
        assert_eq!(rejected.message, "Task cannot be empty");
        assert_eq!(task_add("  ".to_string()).message, "Please enter a task");

        let deleted = task_delete(id.clone());
        assert!(deleted.ok);
        assert_eq!(deleted.message, "Task deleted successfully");
        assert!(task_delete(id).message.is_empty());
    }

    #[test]
    fn unknown_ids_are_accepted_silently() {
        assert!(task_toggle("missing".to_string()).ok);
        assert!(task_reorder("missing".to_string(), "also-missing".to_string()).ok);
    }

    #[test]
    fn filter_set_rejects_unknown_values() {
        assert!(!filter_set("archived".to_string()).is_empty());
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
