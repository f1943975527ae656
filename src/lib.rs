//! Bookkeeper - personal bookkeeping ledger
//!
//! This library provides the ledger engine behind the `bookkeeper` CLI:
//! accounts, transactions, validated journal entries, balances and
//! tag-driven financial statements.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, journal entries, money)
//! - `storage`: JSON file storage layer and the `LedgerStore` trait
//! - `services`: Business logic (CRUD, journal validation and posting, balances)
//! - `reports`: Balance sheet, income statement and report schemas
//! - `audit`: Audit logging system
//! - `display`, `export`: Terminal tables and CSV/JSON/YAML output
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use bookkeeper::config::{BookkeeperPaths, Settings};
//! use bookkeeper::reports::BalanceSheet;
//! use bookkeeper::storage::Storage;
//!
//! let paths = BookkeeperPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let today = chrono::Local::now().date_naive();
//! let sheet = BalanceSheet::generate(&storage, today, &settings.balance_sheet_tags)?;
//! println!("Equities: {}", sheet.equities);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::BookkeeperError;
