//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod export;
pub mod journal;
pub mod report;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use export::{handle_export_command, ExportCommands};
pub use journal::{handle_journal_command, JournalCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{parse_date, Money};

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY/MM/DD` or `YYYY-MM-DD` argument, defaulting to today
pub fn parse_date_arg(value: Option<&str>) -> BookkeeperResult<NaiveDate> {
    match value {
        None => Ok(today()),
        Some(s) => parse_date(s).ok_or_else(|| {
            BookkeeperError::Validation(format!(
                "Invalid date '{}'. Use YYYY/MM/DD or YYYY-MM-DD",
                s
            ))
        }),
    }
}

pub fn parse_amount(value: &str) -> BookkeeperResult<Money> {
    Money::parse(value).map_err(|e| {
        BookkeeperError::Validation(format!(
            "Invalid amount '{}'. Use a format like '100.00' or '-45.12'. Error: {}",
            value, e
        ))
    })
}

/// Whether row formatters should emit ANSI colors
pub fn use_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Open `path` for writing, or stdout when no path is given
pub fn output_writer(path: Option<&Path>) -> BookkeeperResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                BookkeeperError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
