use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    EmptyApiUrl(String),
    BadDayFormat(String),
    BadPortRange(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::EmptyApiUrl(e) => write!(f, "API URL error: {}", e),
            ConfigError::BadDayFormat(e) => write!(f, "Day format error: {}", e),
            ConfigError::BadPortRange(e) => write!(f, "Port range error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

#[derive(Debug)]
pub enum FetchError {
    RequestFailed(String),
    BadStatus(u16),
    DecodeFailed(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::RequestFailed(e) => write!(f, "Session API request failed: {}", e),
            FetchError::BadStatus(code) => {
                write!(f, "Session API responded with status {}", code)
            }
            FetchError::DecodeFailed(e) => write!(f, "Session payload decode failed: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug)]
pub enum StorageError {
    ReadFailed,
    WriteFailed,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadFailed => write!(f, "Storage read failed"),
            StorageError::WriteFailed => write!(f, "Storage write failed"),
        }
    }
}

impl std::error::Error for StorageError {}

#[derive(Debug)]
pub enum WebError {
    InvalidBindAddress(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::InvalidBindAddress(e) => write!(f, "Invalid bind address: {}", e),
        }
    }
}

impl std::error::Error for WebError {}

#[derive(Debug)]
pub enum ControllerError {
    Config(ConfigError),
    Web(WebError),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Config(e) => write!(f, "Configuration error: {}", e),
            ControllerError::Web(e) => write!(f, "Web interface error: {}", e),
        }
    }
}

impl std::error::Error for ControllerError {}
