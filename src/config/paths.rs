//! Path management for Bookkeeper
//!
//! ## Path Resolution Order
//!
//! 1. `BOOKKEEPER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `bookkeeper`
//!    (`~/.config/bookkeeper`, `~/Library/Application Support/bookkeeper`,
//!    `%APPDATA%\bookkeeper`)

use directories::BaseDirs;
use std::path::{Path, PathBuf};

use crate::error::BookkeeperError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BOOKKEEPER_DATA_DIR";

/// Manages all paths used by Bookkeeper
#[derive(Debug, Clone)]
pub struct BookkeeperPaths {
    base_dir: PathBuf,
}

impl BookkeeperPaths {
    /// Resolve the base directory from the environment or the platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BookkeeperError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BookkeeperError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            BookkeeperError::Io(format!("Failed to create base directory: {}", e))
        })?;

        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            BookkeeperError::Io(format!("Failed to create data directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if Bookkeeper has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BookkeeperError> {
    let dirs = BaseDirs::new().ok_or_else(|| {
        BookkeeperError::Config("Could not determine the home directory".into())
    })?;
    Ok(dirs.config_dir().join("bookkeeper"))
}
