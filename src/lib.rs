pub mod configuration;
pub use configuration::Config;

pub mod controller;
pub use controller::Controller;

pub mod data_source;
pub use data_source::SessionApiClient;

pub mod error_handling;

pub mod program;
pub use program::{build_program, Favorites, FilterState, ProgramView, Session};

pub mod storage;
pub use storage::FavoritesStore;

pub mod web_interface;
