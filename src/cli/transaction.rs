//! Transaction CLI commands
//!
//! Implements CLI commands for single transactions. Multi-line postings go
//! through `journal` instead.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{
    account_names, format_transaction_details, format_transaction_register,
};
use crate::error::{BookkeeperError, BookkeeperResult};
use crate::export::export_transactions_csv;
use crate::models::TransactionType;
use crate::services::{AccountService, CreateTransactionInput, TransactionService};
use crate::storage::{QueryTranslator, ShorthandQuery, Storage};

use super::{output_writer, parse_amount, parse_date_arg, today};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a single transaction
    Add {
        /// Account name or ID
        account: String,
        /// Amount, e.g. "45.12"; a positive amount on an outgoing type is stored negated
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// In, Out, TransferIn, TransferOut, BalanceChange or LiabilityChange
        #[arg(short = 'T', long = "type", default_value = "Out")]
        kind: String,
        /// Transaction date (YYYY/MM/DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Category (required for In and Out)
        #[arg(short, long)]
        category: Option<String>,
        /// Sub-category (required for In and Out)
        #[arg(short, long)]
        sub_category: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// Association id (required for transfers)
        #[arg(long)]
        association_id: Option<String>,
    },
    /// List transactions
    List {
        /// Query such as "past week", "past 10 days", "2024Q1" or
        /// "date>=2024/01/01 AND date<=2024/01/31", optionally followed by "on <account>"
        #[arg(short, long, default_value = "past week")]
        query: String,
        /// Show at most this many of the most recent matches
        #[arg(short, long)]
        limit: Option<usize>,
        /// Write the matches to a CSV file instead of printing a table
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BookkeeperResult<()> {
    let service = TransactionService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            account,
            amount,
            kind,
            date,
            category,
            sub_category,
            notes,
            association_id,
        } => {
            let target = AccountService::new(storage).require(&account)?;
            let kind: TransactionType = kind
                .parse()
                .map_err(|e| BookkeeperError::Validation(format!("{}", e)))?;

            let mut amount = parse_amount(&amount)?;
            if kind.is_outgoing() && amount.is_positive() {
                amount = -amount;
            }

            let txn = service.create(CreateTransactionInput {
                account_id: target.id,
                kind,
                date: parse_date_arg(date.as_deref())?,
                amount,
                category,
                sub_category,
                notes,
                association_id,
            })?;

            println!("Created transaction {}", txn.id);
            println!("  {}", txn);
            println!("  Account: {}", target.name);
        }

        TransactionCommands::List {
            query,
            limit,
            output,
        } => {
            let mut filter = ShorthandQuery.translate(&query, today())?;
            if let Some(limit) = limit {
                filter = filter.with_limit(limit);
            }

            let transactions = service.list(&filter)?;
            let names = account_names(&storage.accounts.get_all()?);

            match output {
                Some(path) => {
                    let writer = output_writer(Some(path.as_path()))?;
                    export_transactions_csv(&transactions, &names, writer)?;
                    println!(
                        "Wrote {} transactions to {}",
                        transactions.len(),
                        path.display()
                    );
                }
                None => {
                    println!("{}", format_transaction_register(&transactions, &names, symbol));
                }
            }
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| BookkeeperError::transaction_not_found(&id))?;
            let account_name = storage
                .accounts
                .get(txn.account_id)?
                .map(|a| a.name)
                .unwrap_or_else(|| txn.account_id.to_string());

            print!("{}", format_transaction_details(&txn, &account_name, symbol));
        }

        TransactionCommands::Delete { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| BookkeeperError::transaction_not_found(&id))?;
            let deleted = service.delete(txn.id)?;
            println!("Deleted transaction {}: {}", deleted.id, deleted);
        }
    }

    Ok(())
}
