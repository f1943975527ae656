//! CLI commands for data export
//!
//! Provides commands for exporting the ledger in various formats.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::display::transaction::account_names;
use crate::error::{BookkeeperError, BookkeeperResult};
use crate::export::{
    export_accounts_csv, export_full_json, export_full_yaml, export_transactions_csv, FullExport,
};
use crate::storage::Storage;

/// Full export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON; can be loaded again with `init --data-file`
    Json,
    /// YAML, human-readable
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export accounts and transactions to one file
    All {
        /// Output file path
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
    },

    /// Export all transactions to CSV
    Transactions {
        /// Output file path
        output: PathBuf,
    },

    /// Export accounts to CSV
    Accounts {
        /// Output file path
        output: PathBuf,
    },

    /// Show what an export would contain without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> BookkeeperResult<()> {
    match cmd {
        ExportCommands::All { output, format } => {
            let mut writer = create(&output)?;
            match format {
                ExportFormat::Json => export_full_json(storage, &mut writer)?,
                ExportFormat::Yaml => export_full_yaml(storage, &mut writer)?,
            }
            writer.flush()?;
            println!("Full ledger exported to: {}", output.display());
        }

        ExportCommands::Transactions { output } => {
            let mut transactions = storage.transactions.get_all()?;
            transactions.reverse();
            let names = account_names(&storage.accounts.get_all()?);

            export_transactions_csv(&transactions, &names, create(&output)?)?;
            println!(
                "Exported {} transactions to: {}",
                transactions.len(),
                output.display()
            );
        }

        ExportCommands::Accounts { output } => {
            let accounts = storage.accounts.get_all()?;
            export_accounts_csv(&accounts, create(&output)?)?;
            println!("Exported {} accounts to: {}", accounts.len(), output.display());
        }

        ExportCommands::Info => {
            let export = FullExport::from_storage(storage)?;

            println!("Export Information");
            println!("==================\n");
            println!("Schema Version: {}", export.schema_version);
            println!("App Version:    {}", export.app_version);
            println!();
            println!("Data Summary:");
            println!("  Accounts:      {}", export.metadata.account_count);
            println!("  Transactions:  {}", export.metadata.transaction_count);

            if let (Some(earliest), Some(latest)) = (
                &export.metadata.earliest_transaction,
                &export.metadata.latest_transaction,
            ) {
                println!();
                println!("Transaction Date Range: {} to {}", earliest, latest);
            }
        }
    }

    Ok(())
}

fn create(path: &Path) -> BookkeeperResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BookkeeperError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
