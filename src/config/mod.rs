//! Configuration module for Bookkeeper
//!
//! This module provides configuration management including:
//! - Data directory resolution (`BOOKKEEPER_DATA_DIR` or the platform config dir)
//! - User settings persistence
//! - Report defaults (tag patterns and schemas)

pub mod paths;
pub mod settings;

pub use paths::BookkeeperPaths;
pub use settings::Settings;
