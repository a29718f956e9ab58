//! View projection: filtered, paginated read-only slices of the task list.
//!
//! # Responsibility
//! - Derive the visible page from a collection snapshot, a filter and a page.
//! - Provide the page clamping and pager window rules used by list views.
//!
//! # Invariants
//! - Projection is pure; identical inputs give identical outputs.
//! - Filtering is stable and never reorders tasks.
//! - Pages are 1-based.

mod list_state;

pub use list_state::ListState;

use crate::config::normalize_page_size;
use crate::model::preference::Filter;
use crate::model::task::Task;
use std::ops::RangeInclusive;

/// Number of page buttons shown by the pager.
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

/// One page of filtered tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    pub items: Vec<Task>,
    /// Effective (1-based) page the items were sliced from; a requested `0`
    /// reads as `1`.
    pub page: usize,
    /// `ceil(filtered_count / page_size)`, `0` when nothing matches.
    pub total_pages: usize,
    pub filtered_count: usize,
}

/// Returns the tasks matching `filter`, in collection order.
pub fn filter_tasks(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task.completed))
        .collect()
}

/// Computes `ceil(count / page_size)`. A zero `page_size` uses the default.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(normalize_page_size(page_size))
}

/// Slices page `page` (1-based) out of the filtered sequence.
///
/// Page `0` is treated as page `1`. A page past the end yields no items; use
/// [`clamp_page`] (or [`ListState::clamp`]) to correct it.
pub fn project(tasks: &[Task], filter: Filter, page: usize, page_size: usize) -> TaskPage {
    let page_size = normalize_page_size(page_size);
    let page = page.max(1);
    let filtered = filter_tasks(tasks, filter);
    let filtered_count = filtered.len();

    let items = filtered
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();

    TaskPage {
        items,
        page,
        total_pages: total_pages(filtered_count, page_size),
        filtered_count,
    }
}

/// Returns the effective page after the filtered set changed size.
///
/// Pages beyond `total_pages` are pulled back to the last page; when there are
/// no pages the current page is kept (at least `1`).
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    if total_pages > 0 && page > total_pages {
        total_pages
    } else {
        page.max(1)
    }
}

/// Page numbers shown by the pager around `current`.
///
/// The window holds at most `max_visible` pages, centred on `current` where
/// possible and shifted to stay inside `1..=total`. `None` when the pager
/// should be hidden (`total <= 1`).
pub fn page_window(
    current: usize,
    total: usize,
    max_visible: usize,
) -> Option<RangeInclusive<usize>> {
    if total <= 1 {
        return None;
    }
    let max_visible = max_visible.max(1);
    let current = current.clamp(1, total);

    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = (start + max_visible - 1).min(total);
    if end + 1 - start < max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }
    Some(start..=end)
}

#[cfg(test)]
mod tests {
    use super::{clamp_page, page_window, project, total_pages};
    use crate::model::preference::Filter;
    use crate::model::task::{Task, TaskId};
    use chrono::{TimeZone, Utc};

    fn collection(completed: &[bool]) -> Vec<Task> {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        completed
            .iter()
            .enumerate()
            .map(|(index, done)| {
                let mut task =
                    Task::with_id(TaskId::from(format!("t{index}")), format!("task {index}"), now);
                task.order = index;
                task.completed = *done;
                task
            })
            .collect()
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|task| task.id.as_str()).collect()
    }

    #[test]
    fn pending_filter_keeps_collection_order() {
        let tasks = collection(&[true, false, true, false, true]);
        let page = project(&tasks, Filter::Pending, 1, 5);
        assert_eq!(ids(&page.items), ["t1", "t3"]);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.filtered_count, 2);
    }

    #[test]
    fn last_page_holds_remainder() {
        let tasks = collection(&[false; 12]);
        let page = project(&tasks, Filter::All, 3, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(ids(&page.items), ["t10", "t11"]);
    }

    #[test]
    fn empty_filter_result_has_zero_pages() {
        let tasks = collection(&[false, false]);
        let page = project(&tasks, Filter::Completed, 1, 5);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn page_zero_reports_first_page() {
        let tasks = collection(&[false; 7]);
        let page = project(&tasks, Filter::All, 0, 5);
        assert_eq!(page.page, 1);
        assert_eq!(ids(&page.items), ["t0", "t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn page_past_end_is_empty_until_clamped() {
        let tasks = collection(&[false; 10]);
        let page = project(&tasks, Filter::All, 4, 5);
        assert!(page.items.is_empty());
        assert_eq!(clamp_page(4, page.total_pages), 2);
    }

    #[test]
    fn clamp_keeps_page_when_nothing_matches() {
        assert_eq!(clamp_page(3, 0), 3);
        assert_eq!(clamp_page(0, 0), 1);
        assert_eq!(clamp_page(2, 5), 2);
    }

    #[test]
    fn projection_is_reproducible() {
        let tasks = collection(&[true, false, false, true, false, false, true]);
        assert_eq!(
            project(&tasks, Filter::Pending, 1, 3),
            project(&tasks, Filter::Pending, 1, 3)
        );
    }

    #[test]
    fn zero_page_size_uses_default() {
        assert_eq!(total_pages(12, 0), 3);
    }

    #[test]
    fn page_window_centres_and_shifts_inside_bounds() {
        assert_eq!(page_window(1, 1, 5), None);
        assert_eq!(page_window(1, 3, 5), Some(1..=3));
        assert_eq!(page_window(1, 10, 5), Some(1..=5));
        assert_eq!(page_window(6, 10, 5), Some(4..=8));
        assert_eq!(page_window(10, 10, 5), Some(6..=10));
        assert_eq!(page_window(9, 10, 5), Some(6..=10));
    }
}
