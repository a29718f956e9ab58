//! Caller-side list position: active filter plus current page.

use super::{clamp_page, project, TaskPage};
use crate::model::preference::Filter;
use crate::model::task::Task;

/// Filter and page selected by a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListState {
    pub filter: Filter,
    pub page: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(Filter::All)
    }
}

impl ListState {
    pub fn new(filter: Filter) -> Self {
        Self { filter, page: 1 }
    }

    /// Switches the filter and returns to the first page.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Pulls `page` back inside `1..=total_pages` when it ran past the end.
    ///
    /// Returns whether the page changed.
    pub fn clamp(&mut self, total_pages: usize) -> bool {
        let clamped = clamp_page(self.page, total_pages);
        let changed = clamped != self.page;
        self.page = clamped;
        changed
    }

    /// Clamps against `tasks` and projects the resulting page.
    ///
    /// Call after every mutation that can shrink the filtered set.
    pub fn refresh(&mut self, tasks: &[Task], page_size: usize) -> TaskPage {
        let first = project(tasks, self.filter, self.page, page_size);
        if self.clamp(first.total_pages) {
            project(tasks, self.filter, self.page, page_size)
        } else {
            first
        }
    }
}
