//! TOML configuration for the `hate_crime` binary.
//!
//! The built-in defaults are embedded at compile time from
//! `config/default.toml`. A user file given with `--config` replaces them;
//! any table or key it leaves out falls back to the built-in value.

use std::path::{Path, PathBuf};

use hate_crime_analytics_models::DashboardConfig;
use hate_crime_source::LoadOptions;
use serde::Deserialize;

/// Built-in configuration.
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file couldn't be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file isn't valid TOML for [`AppConfig`].
    #[error("Invalid config: {message}")]
    Parse {
        /// Parser message.
        message: String,
    },

    /// The dataset delimiter isn't a single ASCII character.
    #[error("Delimiter must be a single ASCII character, got {value:?}")]
    InvalidDelimiter {
        /// The rejected value.
        value: String,
    },
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where and how to read the incident file.
    pub dataset: DatasetConfig,
    /// Chart tunables.
    pub dashboard: DashboardConfig,
}

/// `[dataset]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Incident file used when `--data` isn't given.
    pub path: PathBuf,
    /// Field delimiter.
    pub delimiter: String,
    /// Stop after this many records.
    pub max_records: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("hate_crime.csv"),
            delimiter: ",".to_string(),
            max_records: None,
        }
    }
}

impl DatasetConfig {
    /// Loader options for this table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDelimiter`] if `delimiter` isn't exactly
    /// one ASCII character.
    pub fn load_options(&self) -> Result<LoadOptions, ConfigError> {
        let delimiter = match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => *byte,
            _ => {
                return Err(ConfigError::InvalidDelimiter {
                    value: self.delimiter.clone(),
                });
            }
        };

        Ok(LoadOptions {
            delimiter,
            max_records: self.max_records,
        })
    }
}

/// Parses a TOML config string.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed or a value has
/// the wrong type.
pub fn parse(toml_str: &str) -> Result<AppConfig, ConfigError> {
    toml::de::from_str(toml_str).map_err(|e| ConfigError::Parse {
        message: e.to_string(),
    })
}

/// Loads the config at `path`, or the built-in defaults when `None`.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] if the file can't be read and
/// [`ConfigError::Parse`] if it isn't a valid config.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let Some(path) = path else {
        return parse(DEFAULT_CONFIG);
    };

    log::debug!("Reading config from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents)
}
