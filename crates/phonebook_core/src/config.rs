//! Runtime configuration for embedding the core.
//!
//! # Responsibility
//! - Describe where the store lives and how logging is set up.
//! - Parse JSON configuration documents with every field optional.
//!
//! # Invariants
//! - A missing `database_path` means an in-memory store.
//! - Logging starts only when `log_dir` is configured.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration consumed by hosts and the CLI probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhonebookConfig {
    /// SQLite file path; `None` opens an in-memory store.
    pub database_path: Option<PathBuf>,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<PathBuf>,
}

impl Default for PhonebookConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl PhonebookConfig {
    /// Parses a JSON document; absent fields take their defaults.
    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Opens the configured store with migrations and seed applied.
    pub fn open_store(&self) -> DbResult<Connection> {
        match self.database_path.as_ref() {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }

    /// Starts file logging when `log_dir` is set.
    ///
    /// Returns `Ok(false)` when logging is not configured.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = self.log_dir.as_ref() else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir is not valid UTF-8: `{}`", log_dir.display()))?;
        init_logging(self.log_level.as_str(), log_dir)?;
        Ok(true)
    }
}
