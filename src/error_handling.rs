pub mod types;

pub use types::{ConfigError, ControllerError, FetchError, StorageError, WebError};
