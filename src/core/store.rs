//! Preference persistence port
//!
//! List views remember a few things between visits: the last device the
//! user opened and which columns they chose to show. The views talk to a
//! [`PreferenceStore`] instead of a storage medium, so any key-value backend
//! can sit behind them.

use crate::core::sort::SortState;
use anyhow::Result;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const LAST_VISITED_DEVICE_KEY: &str = "last_visited_device_id";

/// Key-value store for user preferences
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Get a stored value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous one
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove a value; removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Which columns of a view the user has chosen to show
///
/// Columns never toggled are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnVisibility {
    columns: IndexMap<String, bool>,
}

impl ColumnVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, column: &str) -> bool {
        self.columns.get(column).copied().unwrap_or(true)
    }

    pub fn set_visible(&mut self, column: impl Into<String>, visible: bool) {
        self.columns.insert(column.into(), visible);
    }

    /// Flip a column and return its new visibility
    pub fn toggle(&mut self, column: &str) -> bool {
        let visible = !self.is_visible(column);
        self.set_visible(column, visible);
        visible
    }

    /// Columns from `all` that are currently shown, in the given order
    pub fn visible_columns<'a>(&self, all: &[&'a str]) -> Vec<&'a str> {
        all.iter().copied().filter(|c| self.is_visible(c)).collect()
    }
}

/// Typed access to the preferences the list views keep
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// The device the user last opened
    ///
    /// Unreadable values are dropped and reported as absent.
    pub async fn last_visited_device(&self) -> Result<Option<i64>> {
        let Some(raw) = self.store.get(LAST_VISITED_DEVICE_KEY).await? else {
            return Ok(None);
        };
        match raw.trim().parse::<i64>() {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "Ignoring unreadable last visited device");
                Ok(None)
            }
        }
    }

    pub async fn set_last_visited_device(&self, device_id: i64) -> Result<()> {
        self.store
            .set(LAST_VISITED_DEVICE_KEY, device_id.to_string())
            .await
    }

    pub async fn clear_last_visited_device(&self) -> Result<()> {
        self.store.remove(LAST_VISITED_DEVICE_KEY).await
    }

    /// Column visibility of a view; corrupt entries reset to all visible
    pub async fn column_visibility(&self, view: &str) -> Result<ColumnVisibility> {
        self.read_json(&columns_key(view)).await
    }

    pub async fn set_column_visibility(&self, view: &str, columns: &ColumnVisibility) -> Result<()> {
        self.store
            .set(&columns_key(view), serde_json::to_string(columns)?)
            .await
    }

    /// Sort state the user last chose in a view
    pub async fn sort_state(&self, view: &str) -> Result<Option<SortState>> {
        let Some(raw) = self.store.get(&sort_key(view)).await? else {
            return Ok(None);
        };
        let state = SortState::parse(&raw);
        if state.is_none() {
            tracing::warn!(view, value = %raw, "Ignoring unreadable sort preference");
        }
        Ok(state)
    }

    /// Remember a sort state; an unsorted state clears the preference
    pub async fn set_sort_state(&self, view: &str, state: &SortState) -> Result<()> {
        match state.key {
            Some(_) => self.store.set(&sort_key(view), state.to_string()).await,
            None => self.store.remove(&sort_key(view)).await,
        }
    }

    async fn read_json<T: for<'de> Deserialize<'de> + Default>(&self, key: &str) -> Result<T> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring corrupt preference");
                Ok(T::default())
            }
        }
    }
}

fn columns_key(view: &str) -> String {
    format!("columns.{}", view)
}

fn sort_key(view: &str) -> String {
    format!("sort.{}", view)
}
