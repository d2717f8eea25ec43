//! Favorites Store Trait
//!
//! This module defines the `FavoritesStore` trait, the interface for the
//! durable favorites collaborator. Implementors persist the ordered list of
//! favorited session ids and hand it back on startup.
//!
//! All methods return a `Result`; a failing store is never fatal to the
//! service, which degrades to an in-memory default instead.

use crate::error_handling::types::StorageError;

/// Key-value style persistence for the favorites id list.
pub trait FavoritesStore: Send + Sync {
    /// Load the persisted id list. A store with nothing saved yet returns an
    /// empty list, not an error.
    fn load(&self) -> Result<Vec<String>, StorageError>;

    /// Persist the full id list, replacing whatever was saved before.
    fn save(&self, ids: &[String]) -> Result<(), StorageError>;
}
