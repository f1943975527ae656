//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::BookkeeperResult;
use crate::services::{AccountChanges, AccountService, BalanceCalculator};
use crate::storage::Storage;

use super::parse_date_arg;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name (unique, case-sensitive)
        name: String,
        /// Free-text description
        #[arg(short, long, default_value = "")]
        desc: String,
        /// Comma-separated tags, e.g. "asset,cash"
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// List all accounts
    List {
        /// Only accounts carrying all of these tags
        #[arg(short, long, value_delimiter = ',')]
        tag: Vec<String>,
    },
    /// Show account details and balance
    Show {
        /// Account name or ID
        account: String,
        /// Balance as of this date (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Edit an account
    Edit {
        /// Account name or ID
        account: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        desc: Option<String>,
        /// Replace the tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },
    /// Delete an account that has no transactions
    Delete {
        /// Account name or ID
        account: String,
    },
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> BookkeeperResult<()> {
    let service = AccountService::new(storage);

    match cmd {
        AccountCommands::Create { name, desc, tags } => {
            let account = service.create(&name, &desc, tags)?;

            println!("Created account: {}", account.name);
            println!("  ID:   {}", account.id);
            if !account.tags.is_empty() {
                println!("  Tags: {}", account.tags.join(", "));
            }
        }

        AccountCommands::List { tag } => {
            let accounts = if tag.is_empty() {
                service.list()?
            } else {
                service.list_tagged(&tag)?
            };
            println!("{}", format_account_list(&accounts));
        }

        AccountCommands::Show { account, date } => {
            let found = service.require(&account)?;
            let cutoff = parse_date_arg(date.as_deref())?;

            let balance = BalanceCalculator::new(storage).balance_as_of(found.id, cutoff)?;
            let count = storage.transactions.count_for_account(found.id)?;
            print!(
                "{}",
                format_account_details(&found, balance, count, &settings.currency_symbol)
            );
        }

        AccountCommands::Edit {
            account,
            name,
            desc,
            tags,
        } => {
            let found = service.require(&account)?;

            if name.is_none() && desc.is_none() && tags.is_none() {
                println!("No changes specified. Use --name, --desc or --tags.");
                return Ok(());
            }

            let updated = service.update(
                found.id,
                AccountChanges {
                    name,
                    description: desc,
                    tags,
                },
            )?;
            println!("Updated account: {}", updated);
        }

        AccountCommands::Delete { account } => {
            let found = service.require(&account)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted account: {}", deleted.name);
        }
    }

    Ok(())
}
