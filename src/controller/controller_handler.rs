use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;
use log::{error, info, warn};

use crate::configuration::config::Config;
use crate::data_source::client::SessionApiClient;
use crate::error_handling::types::ControllerError;
use crate::program::favorites::Favorites;
use crate::storage::favorites_store::FavoritesStore;
use crate::storage::file_store::FileFavorites;
use crate::storage::memory_store::MemoryFavorites;
use crate::storage::selector_store::SelectorStore;
use crate::web_interface::types::AppState;
use crate::web_interface::web_server::WebServer;

/// Service controller.
///
/// Owns startup: load the favorites store (degrading to memory when the
/// file backend is unavailable), perform the one-shot session fetch and
/// hand the shared state to the web server. A failed fetch is not fatal;
/// the web interface keeps serving its loading state.
pub struct Controller {
    pub config: Config,
}

impl Controller {
    /// Build a controller from the command line (or `--config` file).
    pub fn new() -> Result<Self, ControllerError> {
        match Config::from_args() {
            Ok(config) => Ok(Self { config }),
            Err(err) => {
                error!("Unable to load configuration: {}", err);
                Err(ControllerError::Config(err))
            }
        }
    }

    /// Build a controller around an already-validated configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<(), ControllerError> {
        let favorites_store = self.open_favorites_store();
        let favorites = match favorites_store.load() {
            Ok(ids) => Favorites::from_ids(ids),
            Err(e) => {
                warn!("Could not load favorites ({}), starting empty", e);
                Favorites::new()
            }
        };
        info!("Loaded {} favorite(s)", favorites.len());

        let client = SessionApiClient::new(self.config.api_url.clone());
        let (sessions, fetched_at) = match client.fetch_sessions().await {
            Ok(list) => (Some(list), Some(Utc::now())),
            Err(e) => {
                warn!("Session fetch failed: {}; serving the loading state", e);
                (None, None)
            }
        };

        let state = Arc::new(AppState {
            sessions: RwLock::new(sessions),
            fetched_at: RwLock::new(fetched_at),
            favorites: Mutex::new(favorites),
            favorites_store,
            selectors: SelectorStore::new(),
            first_day: self.config.first_day.clone(),
        });

        WebServer::new(state)
            .start(&self.config.bind_address, self.config.web_port)
            .await
            .map_err(ControllerError::Web)
    }

    fn open_favorites_store(&self) -> Arc<dyn FavoritesStore> {
        match FileFavorites::new(&self.config.storage_path) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!(
                    "File favorites unavailable ({}), falling back to in-memory favorites",
                    e
                );
                Arc::new(MemoryFavorites::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn test_config(storage_path: PathBuf) -> Config {
        Config {
            config_file: None,
            api_url: "http://localhost:1/sessions".to_string(),
            bind_address: "127.0.0.1".to_string(),
            web_port: 8080,
            storage_path,
            first_day: "2021-12-08".to_string(),
        }
    }

    #[test]
    fn test_with_config_keeps_configuration() {
        let controller = Controller::with_config(test_config(PathBuf::from("data")));
        assert_eq!(controller.config.first_day, "2021-12-08");
    }

    #[test]
    fn test_open_favorites_store_uses_file_backend() {
        let dir = TempDir::new().unwrap();
        let controller = Controller::with_config(test_config(dir.path().to_path_buf()));
        let store = controller.open_favorites_store();
        store.save(&["s1".to_string()]).unwrap();
        assert_eq!(store.load().unwrap(), vec!["s1".to_string()]);
        assert!(dir.path().join("favorites.txt").exists());
    }
}
