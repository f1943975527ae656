//! Journal CLI commands
//!
//! Journal entries are read from JSON files:
//!
//! ```json
//! {
//!   "title": "Groceries",
//!   "transactions": [
//!     {"account_name": "Checking", "type": "Out", "date": "2024-03-01",
//!      "category": "Food", "sub_category": "Groceries", "amount": -4512}
//!   ],
//!   "validators": ["transfer_match", "zero_balance:Checking"]
//! }
//! ```
//!
//! When `validators` is absent the configured defaults apply.

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{JournalEntry, Validator};
use crate::services::JournalService;
use crate::storage::Storage;

use super::{parse_amount, parse_date_arg};

/// Journal subcommands
#[derive(Subcommand)]
pub enum JournalCommands {
    /// Validate and post a journal entry from a JSON file
    Post {
        /// Path to the journal entry
        file: PathBuf,
    },
    /// Validate a journal entry without posting it
    Check {
        /// Path to the journal entry
        file: PathBuf,
    },
    /// Post a transfer between two accounts
    Transfer {
        /// Source account name
        #[arg(long)]
        from: String,
        /// Destination account name
        #[arg(long)]
        to: String,
        /// Amount to move (positive)
        #[arg(short, long)]
        amount: String,
        /// Transfer date (YYYY/MM/DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long, default_value = "Transfer")]
        title: String,
        #[arg(long, default_value = "")]
        desc: String,
    },
}

/// Read a journal entry, filling in the configured validators when the
/// file names none
pub fn load_entry(path: &Path, defaults: &[Validator]) -> BookkeeperResult<JournalEntry> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        BookkeeperError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_entry(&contents, defaults)
}

fn parse_entry(contents: &str, defaults: &[Validator]) -> BookkeeperResult<JournalEntry> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    let has_validators = value.get("validators").is_some();

    let mut entry: JournalEntry = serde_json::from_value(value)?;
    if !has_validators {
        entry.validators = defaults.to_vec();
    }
    Ok(entry)
}

/// Handle a journal command
pub fn handle_journal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: JournalCommands,
) -> BookkeeperResult<()> {
    let service = JournalService::new(storage);

    match cmd {
        JournalCommands::Post { file } => {
            let entry = load_entry(&file, &settings.default_validators)?;
            let title = entry.title.clone();
            let saved = service.post(entry)?;

            println!("Posted '{}' ({} transactions)", title, saved.len());
            for txn in &saved {
                println!("  {}  {}", txn.id, txn);
            }
        }

        JournalCommands::Check { file } => {
            let entry = load_entry(&file, &settings.default_validators)?;
            let checked = service.check(entry)?;

            let rules: Vec<String> = checked.validators.iter().map(|v| v.to_string()).collect();
            println!(
                "'{}' is valid ({} transactions; rules: {})",
                checked.title,
                checked.len(),
                if rules.is_empty() { "none".to_string() } else { rules.join(", ") }
            );
        }

        JournalCommands::Transfer {
            from,
            to,
            amount,
            date,
            title,
            desc,
        } => {
            let amount = parse_amount(&amount)?;
            if !amount.is_positive() {
                return Err(BookkeeperError::Validation(
                    "Transfer amount must be positive".into(),
                ));
            }
            if from == to {
                return Err(BookkeeperError::Validation(
                    "Cannot transfer to the same account".into(),
                ));
            }

            let entry = JournalEntry::transfer(
                title,
                desc,
                &from,
                &to,
                amount,
                parse_date_arg(date.as_deref())?,
                settings.default_validators.clone(),
            );
            let saved = service.post(entry)?;

            println!(
                "Transferred {} from {} to {}",
                amount.format_accounting(&settings.currency_symbol),
                from,
                to
            );
            if let Some(first) = saved.first() {
                println!("  Association ID: {}", first.association_id);
            }
        }
    }

    Ok(())
}
