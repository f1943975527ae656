//! Account repository for JSON storage
//!
//! Manages loading and saving accounts to accounts.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BookkeeperError;
use crate::models::{Account, AccountId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable account data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AccountData {
    accounts: Vec<Account>,
}

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<AccountId, Account>>,
}

impl AccountRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<AccountId, Account>>, BookkeeperError> {
        self.data
            .read()
            .map_err(|e| BookkeeperError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<AccountId, Account>>, BookkeeperError> {
        self.data
            .write()
            .map_err(|e| BookkeeperError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load accounts from disk
    pub fn load(&self) -> Result<(), BookkeeperError> {
        let file_data: AccountData = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for account in file_data.accounts {
            data.insert(account.id, account);
        }

        Ok(())
    }

    /// Save accounts to disk, ordered by id
    pub fn save(&self) -> Result<(), BookkeeperError> {
        let file_data = AccountData {
            accounts: self.read()?.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: AccountId) -> Result<Option<Account>, BookkeeperError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All accounts ordered by id
    pub fn get_all(&self) -> Result<Vec<Account>, BookkeeperError> {
        Ok(self.read()?.values().cloned().collect())
    }

    /// Get an account by its exact (case-sensitive) name
    pub fn get_by_name(&self, name: &str) -> Result<Option<Account>, BookkeeperError> {
        Ok(self.read()?.values().find(|a| a.name == name).cloned())
    }

    /// Insert a new account, assigning the next free id when it has none
    pub fn insert(&self, mut account: Account) -> Result<Account, BookkeeperError> {
        let mut data = self.write()?;

        if !account.id.is_assigned() {
            account.id = data
                .keys()
                .next_back()
                .map(AccountId::next)
                .unwrap_or(AccountId::new(1));
        } else if data.contains_key(&account.id) {
            return Err(BookkeeperError::Duplicate {
                entity_type: "Account",
                identifier: account.id.to_string(),
            });
        }

        data.insert(account.id, account.clone());
        Ok(account)
    }

    /// Insert or replace an account under its current id
    pub fn upsert(&self, account: Account) -> Result<(), BookkeeperError> {
        self.write()?.insert(account.id, account);
        Ok(())
    }

    pub fn delete(&self, id: AccountId) -> Result<bool, BookkeeperError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    pub fn exists(&self, id: AccountId) -> Result<bool, BookkeeperError> {
        Ok(self.read()?.contains_key(&id))
    }

    /// Check if an account name is already taken
    pub fn name_exists(
        &self,
        name: &str,
        exclude_id: Option<AccountId>,
    ) -> Result<bool, BookkeeperError> {
        Ok(self
            .read()?
            .values()
            .any(|a| a.name == name && Some(a.id) != exclude_id))
    }

    pub fn count(&self) -> Result<usize, BookkeeperError> {
        Ok(self.read()?.len())
    }
}
