//! Storage subsystem
//!
//! Collaborators that persist user state around the filter pipeline.
//!
//! Components:
//! - `favorites_store`: the FavoritesStore trait defining a uniform API.
//! - `file_store`: filesystem-backed favorites, durable across restarts.
//! - `memory_store`: in-memory favorites used as a degradation fallback.
//! - `selector_store`: ephemeral per-visitor filter selectors.

pub mod favorites_store;
pub mod file_store;
pub mod memory_store;
pub mod selector_store;

pub use favorites_store::FavoritesStore;
pub use file_store::FileFavorites;
pub use memory_store::MemoryFavorites;
pub use selector_store::SelectorStore;
