use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bookkeeper::cli::{
    handle_account_command, handle_export_command, handle_journal_command, handle_report_command,
    handle_transaction_command,
};
use bookkeeper::config::{BookkeeperPaths, Settings};
use bookkeeper::export::import_from_yaml;
use bookkeeper::storage::{initialize_storage, load_dump, LedgerDump, Storage};

#[derive(Parser)]
#[command(
    name = "bookkeeper",
    version,
    about = "Personal bookkeeping ledger with validated journal entries",
    long_about = "Bookkeeper records accounts and transactions, checks multi-line \
                  journal entries before posting them, and produces balance sheets \
                  and income statements from tagged accounts and categorized \
                  transactions."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(bookkeeper::cli::AccountCommands),

    /// Single transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(bookkeeper::cli::TransactionCommands),

    /// Validate and post journal entries
    #[command(subcommand)]
    Journal(bookkeeper::cli::JournalCommands),

    /// Balance sheets, income statements and account balances
    #[command(subcommand)]
    Report(bookkeeper::cli::ReportCommands),

    /// Export the ledger to JSON, YAML or CSV
    #[command(subcommand)]
    Export(bookkeeper::cli::ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize a new ledger
    Init {
        /// Accounts and transactions to load (JSON dump or YAML export)
        #[arg(long)]
        data_file: Option<PathBuf>,
        /// Print what would be loaded without writing anything
        #[arg(long, requires = "data_file")]
        dry_run: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BookkeeperPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Account(cmd)) => handle_account_command(&storage, &settings, cmd)?,
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Journal(cmd)) => handle_journal_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Audit { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry);
            }
        }
        Some(Commands::Init { data_file, dry_run }) => {
            println!("Initializing Bookkeeper at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;

            if let Some(path) = data_file {
                let dump = read_data_file(&path)?;
                let plan = load_dump(&storage, dump, dry_run)?;

                for action in &plan.actions {
                    println!("  {}", action);
                }
                if dry_run {
                    println!(
                        "Dry run: would load {} accounts and {} transactions.",
                        plan.accounts, plan.transactions
                    );
                    return Ok(());
                }
                println!(
                    "Loaded {} accounts and {} transactions.",
                    plan.accounts, plan.transactions
                );
            }
            println!("Initialization complete!");
        }
        Some(Commands::Config) => {
            println!("Bookkeeper Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Date format:        {}", settings.date_format);
            let validators: Vec<String> = settings
                .default_validators
                .iter()
                .map(|v| v.to_string())
                .collect();
            println!("  Default validators: {}", validators.join(", "));
            println!(
                "  Asset groups:       {}",
                settings.balance_sheet_tags.assets.join(", ")
            );
            println!(
                "  Liability groups:   {}",
                settings.balance_sheet_tags.liabilities.join(", ")
            );
        }
        None => {
            println!("Bookkeeper - personal bookkeeping ledger");
            println!();
            println!("Run 'bookkeeper --help' for usage information.");
            println!("Run 'bookkeeper init' to set up a new ledger.");
        }
    }

    Ok(())
}

/// A YAML export, or a JSON `{accounts, transactions}` dump (a JSON export also fits)
fn read_data_file(path: &Path) -> Result<LedgerDump> {
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(import_from_yaml(&text)?.into_dump());
    }
    LedgerDump::from_file(path).with_context(|| format!("Failed to load {}", path.display()))
}
