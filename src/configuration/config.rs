use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use regex::Regex;
use serde::Deserialize;

use crate::error_handling::types::ConfigError;

/// Public endpoint serving the full session list for the conference.
pub const DEFAULT_API_URL: &str =
    "https://sleepingpill.javazone.no/public/allSessions/javazone_2021";

/// Application configuration defining all runtime parameters.
///
/// Parsed either from command-line flags (`clap` derive) or from a TOML file
/// given with `--config`; file values fall back to the same defaults as the
/// flags. Every load path runs `validate` before the configuration is used.
#[derive(Parser, Debug, Clone, Deserialize)]
#[command(name = "podium")]
#[command(about = "Conference program service")]
pub struct Config {
    /// Optional TOML configuration file. When given, the file replaces the
    /// other command-line flags entirely.
    ///
    /// # Command Line
    /// Use `--config <FILE>` to set this value from the CLI
    #[arg(long = "config")]
    #[serde(skip)]
    pub config_file: Option<PathBuf>,

    /// URL of the public session API returning `{ "sessions": [...] }`.
    ///
    /// # Command Line
    /// Use `--api-url <URL>` to set this value from the CLI
    #[arg(long, default_value = DEFAULT_API_URL)]
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Network address to bind the web interface to.
    ///
    /// # Command Line
    /// Use `--bind-address <ADDRESS>` to set this value from the CLI
    #[arg(long, default_value = "0.0.0.0")]
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port number for the web interface. Should not be an IANA reserved
    /// port, so 1024 - 65535 both included.
    ///
    /// # Command Line
    /// Use `--web-port <PORT>` to set this value from the CLI
    #[arg(long, default_value_t = 8080)]
    #[serde(default = "default_web_port")]
    pub web_port: u16,

    /// File system path where the favorites list is persisted.
    ///
    /// # Command Line
    /// Use `--storage-path <PATH>` to set this value from the CLI
    #[arg(long, default_value = "data")]
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Calendar date of the first conference day; sessions on this date form
    /// the Wednesday partition of the program, everything else the Thursday
    /// partition.
    ///
    /// # Command Line
    /// Use `--first-day <YYYY-MM-DD>` to set this value from the CLI
    #[arg(long, default_value = "2021-12-08")]
    #[serde(default = "default_first_day")]
    pub first_day: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    8080
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data")
}

fn default_first_day() -> String {
    "2021-12-08".to_string()
}

impl Config {
    /// Build the configuration from the command line, deferring to
    /// `from_file` when `--config` is given.
    pub fn from_args() -> Result<Self, ConfigError> {
        let mut config = Config::parse();
        if let Some(path) = config.config_file.take() {
            return Self::from_file(&path);
        }
        config.validate()?;
        Ok(config)
    }

    /// Load and validate the configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::TomlError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::EmptyApiUrl(
                "api_url must not be empty".to_string(),
            ));
        }
        let date_shape = Regex::new(r"^\d{4}-\d{2}-\d{2}$")
            .map_err(|e| ConfigError::BadDayFormat(e.to_string()))?;
        if !date_shape.is_match(&self.first_day) {
            return Err(ConfigError::BadDayFormat(format!(
                "first_day must look like YYYY-MM-DD, got {}",
                self.first_day
            )));
        }
        if self.web_port < 1024 {
            return Err(ConfigError::BadPortRange(format!(
                "web_port must be 1024 or above, got {}",
                self.web_port
            )));
        }
        Ok(())
    }

    #[cfg(test)]
    fn from_args_under_test(args: &[&str]) -> Result<Config, ConfigError> {
        let mut config = Config::try_parse_from(args).expect("arguments should parse");
        if let Some(path) = config.config_file.take() {
            return Self::from_file(&path);
        }
        config.validate()?;
        Ok(config)
    }
}
