//! Storage layer for Bookkeeper
//!
//! JSON file repositories with atomic writes, plus the `LedgerStore` trait
//! through which the ledger engine reads and writes.

pub mod accounts;
pub mod file_io;
pub mod filter;
pub mod init;
pub mod transactions;

pub use accounts::AccountRepository;
pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use filter::{QueryTranslator, ShorthandQuery, TransactionFilter};
pub use init::{initialize_storage, load_dump, DumpPlan, LedgerDump};
pub use transactions::TransactionRepository;

use chrono::NaiveDate;
use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::BookkeeperPaths;
use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{Account, AccountId, JournalEntry, Money, Transaction};

/// Data access needed by the ledger engine
///
/// Calls are synchronous and return fully materialized results.
pub trait LedgerStore {
    fn list_accounts(&self) -> BookkeeperResult<Vec<Account>>;

    /// Transactions matching `filter`, newest first
    fn list_transactions(&self, filter: &TransactionFilter) -> BookkeeperResult<Vec<Transaction>>;

    /// Net amount booked on an account on or before `cutoff`; zero when none
    fn sum_transaction_amount(&self, account_id: AccountId, cutoff: NaiveDate)
        -> BookkeeperResult<Money>;

    /// Persist a transaction and return it with its assigned id
    fn insert_transaction(&self, transaction: Transaction) -> BookkeeperResult<Transaction>;

    /// Called once after every line of a journal entry has been inserted
    fn record_posting(&self, _entry: &JournalEntry, _saved: &[Transaction]) -> BookkeeperResult<()> {
        Ok(())
    }
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BookkeeperPaths,
    pub accounts: AccountRepository,
    pub transactions: TransactionRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating its directories
    pub fn new(paths: BookkeeperPaths) -> Result<Self, BookkeeperError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.accounts_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &BookkeeperPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), BookkeeperError> {
        self.accounts.load()?;
        self.transactions.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BookkeeperError> {
        self.accounts.save()?;
        self.transactions.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl ToString,
        entity_name: Option<String>,
        entity: &T,
    ) -> BookkeeperResult<()> {
        self.audit.log(&AuditEntry::create(
            entity_type,
            entity_id.to_string(),
            entity_name,
            entity,
        ))
    }

    /// Log an update with a summary of the changed fields
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl ToString,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> BookkeeperResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id.to_string(),
            entity_name,
            before,
            after,
            diff,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl ToString,
        entity_name: Option<String>,
        entity: &T,
    ) -> BookkeeperResult<()> {
        self.audit.log(&AuditEntry::delete(
            entity_type,
            entity_id.to_string(),
            entity_name,
            entity,
        ))
    }

    /// Replace an account name in the filter with its id
    fn resolve_filter(&self, filter: &TransactionFilter) -> BookkeeperResult<TransactionFilter> {
        let mut resolved = filter.clone();
        if let Some(name) = resolved.account_name.take() {
            let account = self
                .accounts
                .get_by_name(&name)?
                .ok_or_else(|| BookkeeperError::account_not_found(&name))?;
            if resolved.account_id.is_some_and(|id| id != account.id) {
                // Name and id disagree; nothing can match both
                resolved.limit = Some(0);
            }
            resolved.account_id = Some(account.id);
        }
        Ok(resolved)
    }
}

impl LedgerStore for Storage {
    fn list_accounts(&self) -> BookkeeperResult<Vec<Account>> {
        self.accounts.get_all()
    }

    fn list_transactions(&self, filter: &TransactionFilter) -> BookkeeperResult<Vec<Transaction>> {
        let filter = self.resolve_filter(filter)?;
        self.transactions.query(&filter)
    }

    fn sum_transaction_amount(
        &self,
        account_id: AccountId,
        cutoff: NaiveDate,
    ) -> BookkeeperResult<Money> {
        self.transactions.sum_as_of(account_id, cutoff)
    }

    fn insert_transaction(&self, transaction: Transaction) -> BookkeeperResult<Transaction> {
        let saved = self.transactions.insert(transaction)?;
        self.transactions.save()?;
        self.log_create(EntityType::Transaction, saved.id, None, &saved)?;
        Ok(saved)
    }

    fn record_posting(&self, entry: &JournalEntry, saved: &[Transaction]) -> BookkeeperResult<()> {
        let ids: Vec<String> = saved.iter().map(|t| t.id.to_string()).collect();
        let summary = format!("{} transactions: {}", saved.len(), ids.join(", "));
        self.audit.log(&AuditEntry::post(&entry.title, summary, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookkeeperPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_insert_transaction_persists_and_audits() {
        let (temp_dir, storage) = create_test_storage();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let txn = Transaction::new(
            TransactionType::BalanceChange,
            AccountId::new(1),
            date,
            Money::from_cents(150000),
        );

        let saved = storage.insert_transaction(txn).unwrap();
        assert!(saved.id.is_assigned());
        assert!(temp_dir.path().join("data").join("transactions.json").exists());

        let log = storage.audit().read_all().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].entity_type, EntityType::Transaction);
        assert_eq!(log[0].entity_id, saved.id.to_string());

        assert_eq!(
            storage.sum_transaction_amount(AccountId::new(1), date).unwrap().cents(),
            150000
        );
    }

    #[test]
    fn test_list_transactions_by_account_name() {
        let (_temp_dir, storage) = create_test_storage();
        let checking = storage.accounts.insert(Account::new("Checking")).unwrap();
        let savings = storage.accounts.insert(Account::new("Savings")).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        for (account, cents) in [(checking.id, 100), (savings.id, 200), (checking.id, 300)] {
            storage
                .insert_transaction(Transaction::new(
                    TransactionType::BalanceChange,
                    account,
                    date,
                    Money::from_cents(cents),
                ))
                .unwrap();
        }

        let filter = TransactionFilter::all().for_account_name("Checking");
        let listed = storage.list_transactions(&filter).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|t| t.account_id == checking.id));

        let missing = TransactionFilter::all().for_account_name("Nowhere");
        assert!(storage.list_transactions(&missing).unwrap_err().is_not_found());
    }
}
