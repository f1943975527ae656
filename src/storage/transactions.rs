//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json and keeps a
//! per-account index for balance queries.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::error::BookkeeperError;
use crate::models::{net_amount_as_of, AccountId, Money, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::filter::TransactionFilter;

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

#[derive(Debug, Default)]
struct Index {
    data: BTreeMap<TransactionId, Transaction>,
    by_account: HashMap<AccountId, Vec<TransactionId>>,
}

impl Index {
    fn insert(&mut self, txn: Transaction) {
        self.by_account.entry(txn.account_id).or_default().push(txn.id);
        self.data.insert(txn.id, txn);
    }

    fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let txn = self.data.remove(&id)?;
        if let Some(ids) = self.by_account.get_mut(&txn.account_id) {
            ids.retain(|&tid| tid != id);
        }
        Some(txn)
    }
}

/// Repository for transaction persistence with an account index
pub struct TransactionRepository {
    path: PathBuf,
    index: RwLock<Index>,
}

/// Newest first, ties broken by id
fn sort_recent_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            index: RwLock::new(Index::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Index>, BookkeeperError> {
        self.index
            .read()
            .map_err(|e| BookkeeperError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Index>, BookkeeperError> {
        self.index
            .write()
            .map_err(|e| BookkeeperError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load transactions from disk and build the index
    pub fn load(&self) -> Result<(), BookkeeperError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut index = self.write()?;
        *index = Index::default();
        for txn in file_data.transactions {
            index.insert(txn);
        }

        Ok(())
    }

    /// Save transactions to disk, ordered by id
    pub fn save(&self) -> Result<(), BookkeeperError> {
        let file_data = TransactionData {
            transactions: self.read()?.data.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, BookkeeperError> {
        Ok(self.read()?.data.get(&id).cloned())
    }

    /// All transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, BookkeeperError> {
        let mut transactions: Vec<_> = self.read()?.data.values().cloned().collect();
        sort_recent_first(&mut transactions);
        Ok(transactions)
    }

    /// Transactions booked on one account, newest first
    pub fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, BookkeeperError> {
        let index = self.read()?;
        let ids = index
            .by_account
            .get(&account_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut transactions: Vec<_> = ids
            .iter()
            .filter_map(|id| index.data.get(id).cloned())
            .collect();
        sort_recent_first(&mut transactions);
        Ok(transactions)
    }

    /// Transactions matching a filter whose account name is already resolved
    pub fn query(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, BookkeeperError> {
        let mut transactions = match filter.account_id {
            Some(account_id) => self.get_by_account(account_id)?,
            None => self.get_all()?,
        };
        transactions.retain(|t| filter.matches(t));
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    /// Net amount booked on an account on or before `cutoff`
    pub fn sum_as_of(&self, account_id: AccountId, cutoff: NaiveDate) -> Result<Money, BookkeeperError> {
        let index = self.read()?;
        let booked = index
            .by_account
            .get(&account_id)
            .into_iter()
            .flatten()
            .filter_map(|id| index.data.get(id));
        Ok(net_amount_as_of(booked, account_id, cutoff))
    }

    /// Insert a new transaction, assigning the next free id when it has none
    pub fn insert(&self, mut txn: Transaction) -> Result<Transaction, BookkeeperError> {
        let mut index = self.write()?;

        if !txn.id.is_assigned() {
            txn.id = index
                .data
                .keys()
                .next_back()
                .map(TransactionId::next)
                .unwrap_or(TransactionId::new(1));
        } else if index.data.contains_key(&txn.id) {
            return Err(BookkeeperError::Duplicate {
                entity_type: "Transaction",
                identifier: txn.id.to_string(),
            });
        }

        index.insert(txn.clone());
        Ok(txn)
    }

    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, BookkeeperError> {
        Ok(self.write()?.remove(id))
    }

    /// Number of transactions booked on an account
    pub fn count_for_account(&self, account_id: AccountId) -> Result<usize, BookkeeperError> {
        Ok(self
            .read()?
            .by_account
            .get(&account_id)
            .map_or(0, |ids| ids.len()))
    }

    pub fn count(&self) -> Result<usize, BookkeeperError> {
        Ok(self.read()?.data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn txn(account: u64, day: u32, cents: i64) -> Transaction {
        Transaction::new(
            TransactionType::BalanceChange,
            AccountId::new(account),
            date(day),
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_assigns_ids() {
        let (_temp_dir, repo) = create_test_repo();

        let first = repo.insert(txn(1, 15, -5000)).unwrap();
        let second = repo.insert(txn(1, 16, -100)).unwrap();

        assert_eq!(first.id, TransactionId::new(1));
        assert_eq!(second.id, TransactionId::new(2));
        assert_eq!(repo.get(first.id).unwrap().unwrap().amount.cents(), -5000);
    }

    #[test]
    fn test_get_by_account() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(txn(1, 15, -100)).unwrap();
        repo.insert(txn(1, 16, -200)).unwrap();
        repo.insert(txn(2, 15, -300)).unwrap();

        let account1 = repo.get_by_account(AccountId::new(1)).unwrap();
        assert_eq!(account1.len(), 2);
        assert_eq!(account1[0].date, date(16));
        assert_eq!(repo.count_for_account(AccountId::new(2)).unwrap(), 1);
    }

    #[test]
    fn test_sum_as_of_includes_cutoff_day() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(txn(1, 10, 100)).unwrap();
        repo.insert(txn(1, 15, 200)).unwrap();
        repo.insert(txn(1, 20, 400)).unwrap();
        repo.insert(txn(2, 10, 800)).unwrap();

        let account = AccountId::new(1);
        assert_eq!(repo.sum_as_of(account, date(9)).unwrap(), Money::zero());
        assert_eq!(repo.sum_as_of(account, date(15)).unwrap().cents(), 300);
        assert_eq!(repo.sum_as_of(account, date(31)).unwrap().cents(), 700);
        assert_eq!(repo.sum_as_of(AccountId::new(9), date(31)).unwrap(), Money::zero());
    }

    #[test]
    fn test_query_filters_and_limits() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(txn(1, 10, -100)).unwrap();
        repo.insert(txn(1, 15, -200)).unwrap();
        repo.insert(txn(1, 20, -300)).unwrap();

        let range = repo
            .query(&TransactionFilter::between(date(12), date(18)))
            .unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range[0].amount.cents(), -200);

        let latest = repo.query(&TransactionFilter::all().with_limit(2)).unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].date, date(20));
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let saved = repo.insert(txn(1, 15, -5000)).unwrap();
        repo.save().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get(saved.id).unwrap().unwrap(), saved);
        assert_eq!(repo2.sum_as_of(AccountId::new(1), date(31)).unwrap().cents(), -5000);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let saved = repo.insert(txn(1, 15, -5000)).unwrap();

        assert_eq!(repo.delete(saved.id).unwrap(), Some(saved));
        assert_eq!(repo.count().unwrap(), 0);
        assert_eq!(repo.count_for_account(AccountId::new(1)).unwrap(), 0);
    }
}
