use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::program::favorites::Favorites;
use crate::program::types::{ProgramView, Session};
use crate::storage::favorites_store::FavoritesStore;
use crate::storage::selector_store::SelectorStore;

/// API error payload
#[derive(Serialize)]
pub struct ApiError {
    pub message: String,
}

/// Shared dependencies handed to every route.
///
/// `sessions` is `None` until the one-shot fetch has completed; the program
/// route renders a loading response in that state rather than an error.
pub struct AppState {
    pub sessions: RwLock<Option<Vec<Session>>>,
    pub fetched_at: RwLock<Option<DateTime<Utc>>>,
    pub favorites: Mutex<Favorites>,
    pub favorites_store: Arc<dyn FavoritesStore>,
    pub selectors: SelectorStore,
    pub first_day: String,
}

/// Query parameters of GET /program. Every selector is optional; present
/// values update the visitor's stored selectors, absent ones fall back to
/// them.
#[derive(Debug, Deserialize)]
pub struct ProgramQuery {
    pub visitor: Option<Uuid>,
    pub day: Option<String>,
    pub language: Option<String>,
    pub format: Option<String>,
}

#[derive(Serialize)]
pub struct ProgramResponse {
    pub loading: bool,
    pub fetched_at: Option<DateTime<Utc>>,
    pub program: Option<ProgramView>,
}

#[derive(Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<String>,
}
