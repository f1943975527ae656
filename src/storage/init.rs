//! Storage initialization
//!
//! First-run setup and loading of an initial `{accounts, transactions}` data
//! dump. Ids in the dump are kept so that transactions keep pointing at their
//! accounts.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audit::EntityType;
use crate::config::paths::BookkeeperPaths;
use crate::config::settings::Settings;
use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{Account, AccountId, Transaction, TransactionId};

use super::file_io::read_json_required;
use super::Storage;

/// Initial data for a fresh ledger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerDump {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl LedgerDump {
    pub fn from_file(path: impl AsRef<Path>) -> BookkeeperResult<Self> {
        read_json_required(path)
    }
}

/// What loading a dump does (or did)
#[derive(Debug, Clone, Default)]
pub struct DumpPlan {
    pub actions: Vec<String>,
    pub accounts: usize,
    pub transactions: usize,
}

/// Create directories and default settings for a fresh installation
///
/// Existing settings are left untouched.
pub fn initialize_storage(paths: &BookkeeperPaths) -> BookkeeperResult<Settings> {
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(paths)?;
    if !paths.is_initialized() {
        settings.save(paths)?;
    }
    Ok(settings)
}

/// Validate a dump against the current store and, unless `dry_run`, write it
///
/// Nothing is written when any record is invalid.
pub fn load_dump(storage: &Storage, dump: LedgerDump, dry_run: bool) -> BookkeeperResult<DumpPlan> {
    let mut plan = DumpPlan::default();

    let mut account_ids: BTreeSet<AccountId> = storage
        .accounts
        .get_all()?
        .into_iter()
        .map(|a| a.id)
        .collect();
    let mut names = BTreeSet::new();

    for account in &dump.accounts {
        account
            .validate()
            .map_err(|e| BookkeeperError::Validation(e.to_string()))?;
        if !account.id.is_assigned() {
            return Err(BookkeeperError::Validation(format!(
                "Account '{}' in the data file has no id",
                account.name
            )));
        }
        if !account_ids.insert(account.id) {
            return Err(BookkeeperError::Duplicate {
                entity_type: "Account",
                identifier: account.id.to_string(),
            });
        }
        if !names.insert(account.name.as_str()) || storage.accounts.name_exists(&account.name, None)? {
            return Err(BookkeeperError::Duplicate {
                entity_type: "Account",
                identifier: account.name.clone(),
            });
        }
        plan.actions
            .push(format!("insert account {} '{}'", account.id, account.name));
    }

    let mut transaction_ids: BTreeSet<TransactionId> = BTreeSet::new();
    for (i, txn) in dump.transactions.iter().enumerate() {
        txn.validate()
            .map_err(|e| BookkeeperError::InvalidTransaction {
                transaction_index: i,
                reason: e.to_string(),
            })?;
        if !account_ids.contains(&txn.account_id) {
            return Err(BookkeeperError::account_not_found(txn.account_id.to_string()));
        }
        if txn.id.is_assigned()
            && (!transaction_ids.insert(txn.id) || storage.transactions.get(txn.id)?.is_some())
        {
            return Err(BookkeeperError::Duplicate {
                entity_type: "Transaction",
                identifier: txn.id.to_string(),
            });
        }
        plan.actions.push(format!(
            "insert transaction {} on account {}: {}",
            if txn.id.is_assigned() { txn.id.to_string() } else { "(new)".into() },
            txn.account_id,
            txn
        ));
    }

    plan.accounts = dump.accounts.len();
    plan.transactions = dump.transactions.len();
    if dry_run {
        return Ok(plan);
    }

    for account in dump.accounts {
        let saved = storage.accounts.insert(account)?;
        storage.log_create(EntityType::Account, saved.id, Some(saved.name.clone()), &saved)?;
    }
    storage.accounts.save()?;

    // Explicit ids first so that generated ids cannot collide with them
    let (with_ids, without_ids): (Vec<_>, Vec<_>) = dump
        .transactions
        .into_iter()
        .partition(|t| t.id.is_assigned());
    for txn in with_ids.into_iter().chain(without_ids) {
        let saved = storage.transactions.insert(txn)?;
        storage.log_create(EntityType::Transaction, saved.id, None, &saved)?;
    }
    storage.transactions.save()?;

    Ok(plan)
}
