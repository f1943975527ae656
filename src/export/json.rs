//! JSON Export functionality
//!
//! Exports the complete ledger to JSON with schema versioning. The `accounts`
//! and `transactions` arrays use the same shape as an `init --data-file`
//! dump, so an export can seed a fresh ledger.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{Account, Transaction};
use crate::storage::{LedgerDump, Storage};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub accounts: Vec<Account>,

    /// All transactions, oldest first
    pub transactions: Vec<Transaction>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub account_count: usize,
    pub transaction_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> BookkeeperResult<Self> {
        let accounts = storage.accounts.get_all()?;
        let mut transactions = storage.transactions.get_all()?;
        transactions.sort_by_key(|t| (t.date, t.id));

        let metadata = ExportMetadata {
            account_count: accounts.len(),
            transaction_count: transactions.len(),
            earliest_transaction: transactions.first().map(|t| t.date.format("%Y/%m/%d").to_string()),
            latest_transaction: transactions.last().map(|t| t.date.format("%Y/%m/%d").to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            accounts,
            transactions,
            metadata,
        })
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let account_ids: HashSet<_> = self.accounts.iter().map(|a| a.id).collect();
        for txn in &self.transactions {
            if !account_ids.contains(&txn.account_id) {
                return Err(format!(
                    "Transaction {} references unknown account {}",
                    txn.id, txn.account_id
                ));
            }
        }

        Ok(())
    }

    /// The accounts and transactions as an initial data dump
    pub fn into_dump(self) -> LedgerDump {
        LedgerDump {
            accounts: self.accounts,
            transactions: self.transactions,
        }
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W) -> BookkeeperResult<()> {
    let export = FullExport::from_storage(storage)?;
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| BookkeeperError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BookkeeperError::Export(e.to_string()))
}

/// Write any serializable value (statements, balances) as pretty JSON
pub fn export_value_json<W: Write, T: Serialize + ?Sized>(value: &T, writer: &mut W) -> BookkeeperResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)
        .map_err(|e| BookkeeperError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BookkeeperError::Export(e.to_string()))
}
