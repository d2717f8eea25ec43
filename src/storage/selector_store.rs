use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::program::types::FilterState;

/// Ephemeral per-visitor filter selectors.
///
/// Mirrors per-tab session storage on the service side: selectors live for
/// the lifetime of the process only and default to all-unset for visitors
/// the store has never seen. Nothing here is written to disk.
#[derive(Default)]
pub struct SelectorStore {
    entries: Mutex<HashMap<Uuid, FilterState>>,
}

impl SelectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selectors for a visitor, all-unset when unknown or when the map is
    /// unavailable.
    pub fn get(&self, visitor: Uuid) -> FilterState {
        match self.entries.lock() {
            Ok(entries) => entries.get(&visitor).cloned().unwrap_or_default(),
            Err(_) => FilterState::default(),
        }
    }

    pub fn set(&self, visitor: Uuid, filter: FilterState) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(visitor, filter);
        }
    }
}
