use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::error_handling::types::StorageError;
use crate::storage::favorites_store::FavoritesStore;

const FAVORITES_FILE: &str = "favorites.txt";

/// Filesystem-backed favorites store: one session id per line under the
/// configured storage directory. The format is plain text so the file can be
/// inspected and edited by hand.
pub struct FileFavorites {
    path: PathBuf,
}

impl FileFavorites {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, StorageError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).map_err(|e| {
            error!(
                "Failed to create storage dir {}: {}",
                base_path.display(),
                e
            );
            StorageError::WriteFailed
        })?;
        let path = base_path.join(FAVORITES_FILE);
        info!("FileFavorites initialized at {}", path.display());
        Ok(Self { path })
    }

    /// Construct FileFavorites using env var PODIUM_STORAGE_DIR if set,
    /// otherwise the current directory.
    pub fn new_default() -> Result<Self, StorageError> {
        if let Ok(dir) = std::env::var("PODIUM_STORAGE_DIR") {
            info!("Using FileFavorites from PODIUM_STORAGE_DIR: {}", dir);
            return Self::new(PathBuf::from(dir));
        }
        let cwd = std::env::current_dir().map_err(|e| {
            error!("Failed to get current dir: {}", e);
            StorageError::ReadFailed
        })?;
        info!("Using FileFavorites at current directory: {}", cwd.display());
        Self::new(cwd)
    }
}

impl FavoritesStore for FileFavorites {
    fn load(&self) -> Result<Vec<String>, StorageError> {
        if !self.path.exists() {
            debug!("No favorites file at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            error!("Failed to read {}: {}", self.path.display(), e);
            StorageError::ReadFailed
        })?;
        let ids: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        debug!("Loaded {} favorite(s) from {}", ids.len(), self.path.display());
        Ok(ids)
    }

    fn save(&self, ids: &[String]) -> Result<(), StorageError> {
        let mut f = File::create(&self.path).map_err(|e| {
            error!("Failed to create {}: {}", self.path.display(), e);
            StorageError::WriteFailed
        })?;
        for id in ids {
            writeln!(f, "{}", id).map_err(|e| {
                error!("Failed to write {}: {}", self.path.display(), e);
                StorageError::WriteFailed
            })?;
        }
        debug!("Saved {} favorite(s) to {}", ids.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileFavorites::new(dir.path()).unwrap();
        assert_eq!(store.load().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_save_and_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = FileFavorites::new(dir.path()).unwrap();
        let ids = vec!["s2".to_string(), "s1".to_string(), "s3".to_string()];
        store.save(&ids).unwrap();
        assert_eq!(store.load().unwrap(), ids);
    }

    #[test]
    fn test_save_replaces_previous_list() {
        let dir = TempDir::new().unwrap();
        let store = FileFavorites::new(dir.path()).unwrap();
        store.save(&["a".to_string(), "b".to_string()]).unwrap();
        store.save(&["b".to_string()]).unwrap();
        assert_eq!(store.load().unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let dir = TempDir::new().unwrap();
        let store = FileFavorites::new(dir.path()).unwrap();
        fs::write(dir.path().join(FAVORITES_FILE), "s1\n\n  \ns2\n").unwrap();
        assert_eq!(store.load().unwrap(), vec!["s1".to_string(), "s2".to_string()]);
    }

    #[test]
    #[serial]
    fn test_new_default_honors_env_var() {
        let dir = TempDir::new().unwrap();
        std::env::set_var("PODIUM_STORAGE_DIR", dir.path());
        let store = FileFavorites::new_default().unwrap();
        store.save(&["s1".to_string()]).unwrap();
        assert!(dir.path().join(FAVORITES_FILE).exists());
        std::env::remove_var("PODIUM_STORAGE_DIR");
    }
}
