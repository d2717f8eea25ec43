use std::sync::Mutex;

use log::warn;

use crate::error_handling::types::StorageError;
use crate::storage::favorites_store::FavoritesStore;

/// In-memory favorites store. Used when the file backend cannot initialize
/// so the service keeps rendering with favorites scoped to the process
/// lifetime instead of halting.
#[derive(Default)]
pub struct MemoryFavorites {
    ids: Mutex<Vec<String>>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesStore for MemoryFavorites {
    fn load(&self) -> Result<Vec<String>, StorageError> {
        match self.ids.lock() {
            Ok(ids) => Ok(ids.clone()),
            Err(_) => {
                warn!("Favorites mutex poisoned, load failed");
                Err(StorageError::ReadFailed)
            }
        }
    }

    fn save(&self, ids: &[String]) -> Result<(), StorageError> {
        match self.ids.lock() {
            Ok(mut stored) => {
                *stored = ids.to_vec();
                Ok(())
            }
            Err(_) => {
                warn!("Favorites mutex poisoned, dropping save");
                Err(StorageError::WriteFailed)
            }
        }
    }
}
