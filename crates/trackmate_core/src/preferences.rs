//! Persisted view preferences: active filter and color theme.
//!
//! # Invariants
//! - Reads fall back to defaults (`Filter::All`, `Theme::Light`).
//! - The theme is stored as the bare word `light` or `dark`, matching browser
//!   clients; a JSON-quoted value is still accepted on read.
//! - In-memory values change even when persisting them fails; preferences
//!   carry no collection invariants.

use crate::config::CoreConfig;
use crate::model::preference::{Filter, Theme};
use crate::storage::{load_or_default, save, KeyValueStorage, StorageResult};
use log::{debug, info, warn};

/// Filter and theme preferences bound to a storage adapter.
pub struct Preferences<S: KeyValueStorage> {
    storage: S,
    filter_key: String,
    theme_key: String,
    filter: Filter,
    theme: Theme,
}

impl<S: KeyValueStorage> Preferences<S> {
    pub fn load(storage: S, config: &CoreConfig) -> Self {
        let filter = load_or_default(&storage, &config.filter_key, Filter::default());
        let theme = load_theme(&storage, &config.theme_key);
        Self {
            storage,
            filter_key: config.filter_key.clone(),
            theme_key: config.theme_key.clone(),
            filter,
            theme,
        }
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_filter(&mut self, filter: Filter) -> StorageResult<()> {
        self.filter = filter;
        let result = save(&self.storage, &self.filter_key, &filter);
        log_write("filter_set", &self.filter_key, result)
    }

    pub fn set_theme(&mut self, theme: Theme) -> StorageResult<()> {
        self.theme = theme;
        let result = self.storage.set_raw(&self.theme_key, theme.as_str());
        log_write("theme_set", &self.theme_key, result)
    }

    /// Flips between light and dark and returns the new theme.
    pub fn toggle_theme(&mut self) -> StorageResult<Theme> {
        let next = self.theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}

fn load_theme<S: KeyValueStorage>(storage: &S, key: &str) -> Theme {
    if let Ok(Some(raw)) = storage.get_raw(key) {
        if let Some(theme) = Theme::parse(&raw) {
            debug!("event=storage_read module=preferences status=ok key={key} format=bare");
            return theme;
        }
    }
    load_or_default(storage, key, Theme::default())
}

fn log_write(event: &str, key: &str, result: StorageResult<()>) -> StorageResult<()> {
    match &result {
        Ok(()) => info!("event={event} module=preferences status=ok key={key}"),
        Err(err) => warn!("event={event} module=preferences status=error key={key} error={err}"),
    }
    result
}
