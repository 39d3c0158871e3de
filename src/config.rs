use crate::game::Bounds;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// Size of the playing field
    #[serde(default)]
    pub(crate) grid: Bounds,

    /// Where & how much to log
    #[serde(default)]
    pub(crate) logging: LoggingConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("termsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LoggingConfig {
    /// Whether to write a log file at all
    pub(crate) enabled: bool,

    /// Path to the log file; if unset, [`LoggingConfig::default_file()`] is
    /// used
    pub(crate) file: Option<PathBuf>,

    /// Filter directive for log events, e.g. `"info"` or `"termsnake=debug"`
    pub(crate) level: String,
}

impl LoggingConfig {
    /// Return the default log file path
    pub(crate) fn default_file() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("termsnake").join("termsnake.log"))
    }

    /// Return the configured log file path, falling back to the default
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.file.clone().or_else(LoggingConfig::default_file)
    }
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            enabled: true,
            file: None,
            level: String::from("info"),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
