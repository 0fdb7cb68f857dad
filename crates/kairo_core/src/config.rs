//! Runtime configuration resolved from the environment.

use crate::logging::{init_logging, LogLevel, LoggingError};
use log::warn;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "KAIRO_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "KAIRO_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "KAIRO_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "kairo.sqlite3";
pub const DEFAULT_LOG_DIR_NAME: &str = "kairo-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    pub log_dir: PathBuf,
}

impl CoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db_path = value(DB_PATH_ENV)
            .map(|raw| PathBuf::from(raw.trim()))
            .unwrap_or_else(default_db_path);
        let log_level = match value(LOG_LEVEL_ENV) {
            Some(raw) => LogLevel::parse(&raw).unwrap_or_else(|err| {
                warn!("event=config_resolve module=config status=fallback key={LOG_LEVEL_ENV} error={err}");
                LogLevel::build_default()
            }),
            None => LogLevel::build_default(),
        };
        let log_dir = value(LOG_DIR_ENV)
            .map(|raw| PathBuf::from(raw.trim()))
            .unwrap_or_else(default_log_dir);

        Self {
            db_path,
            log_level,
            log_dir,
        }
    }

    /// Starts file logging with the configured level and directory.
    pub fn init_logging(&self) -> Result<(), LoggingError> {
        init_logging(self.log_level.as_str(), &self.log_dir.to_string_lossy())
    }
}

pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

pub fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)
}
