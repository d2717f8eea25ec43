use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// User-selected subset of session ids, kept in insertion order.
///
/// The only mutation is `toggle`: remove the id when present, append it when
/// absent. Two identical toggles restore the original list, and toggling one
/// id never reorders the others. Membership checks for the pipeline go
/// through `id_set`, a hashed set, so annotating a payload stays linear in
/// session count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Favorites {
    ids: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an id list loaded from a favorites store.
    pub fn from_ids(ids: Vec<String>) -> Self {
        Self { ids }
    }

    /// Remove `id` when present, append it otherwise.
    pub fn toggle(&mut self, id: &str) {
        match self.ids.iter().position(|existing| existing == id) {
            Some(index) => {
                self.ids.remove(index);
            }
            None => self.ids.push(id.to_string()),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Hashed view of the ids for O(1) membership tests.
    pub fn id_set(&self) -> HashSet<&str> {
        self.ids.iter().map(String::as_str).collect()
    }
}
