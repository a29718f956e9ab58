//! Core configuration: storage keys and list paging.

/// Storage key holding the task collection.
pub const DEFAULT_TASKS_KEY: &str = "trackmate_tasks";
/// Storage key holding the active filter.
pub const DEFAULT_FILTER_KEY: &str = "trackmate_filter";
/// Storage key holding the color scheme.
pub const DEFAULT_THEME_KEY: &str = "theme";
/// Tasks shown per list page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Settings shared by the store, preferences and list projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub tasks_key: String,
    pub filter_key: String,
    pub theme_key: String,
    pub page_size: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            tasks_key: DEFAULT_TASKS_KEY.to_string(),
            filter_key: DEFAULT_FILTER_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CoreConfig {
    /// Returns a copy with `page_size` replaced; `0` falls back to the default.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = normalize_page_size(page_size);
        self
    }

    /// Effective page size, never zero.
    pub fn page_size(&self) -> usize {
        normalize_page_size(self.page_size)
    }
}

pub(crate) fn normalize_page_size(page_size: usize) -> usize {
    if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    }
}
