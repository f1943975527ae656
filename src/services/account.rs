//! Account service
//!
//! Business logic for account management: CRUD with validation, unique
//! names, and audit logging.

use crate::audit::EntityType;
use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{Account, AccountId};
use crate::storage::Storage;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

/// Changes to apply to an existing account; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new account
    pub fn create(&self, name: &str, description: &str, tags: Vec<String>) -> BookkeeperResult<Account> {
        let name = name.trim();
        if self.storage.accounts.name_exists(name, None)? {
            return Err(BookkeeperError::Duplicate {
                entity_type: "Account",
                identifier: name.to_string(),
            });
        }

        let mut account = Account::with_tags(name, normalize_tags(tags));
        account.description = description.trim().to_string();
        account
            .validate()
            .map_err(|e| BookkeeperError::Validation(e.to_string()))?;

        let account = self.storage.accounts.insert(account)?;
        self.storage.accounts.save()?;

        self.storage.log_create(
            EntityType::Account,
            account.id,
            Some(account.name.clone()),
            &account,
        )?;

        Ok(account)
    }

    pub fn get(&self, id: AccountId) -> BookkeeperResult<Option<Account>> {
        self.storage.accounts.get(id)
    }

    /// Find an account by exact name, falling back to its id
    pub fn find(&self, identifier: &str) -> BookkeeperResult<Option<Account>> {
        if let Some(account) = self.storage.accounts.get_by_name(identifier)? {
            return Ok(Some(account));
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            return self.storage.accounts.get(id);
        }

        Ok(None)
    }

    /// Like `find`, but a missing account is an error
    pub fn require(&self, identifier: &str) -> BookkeeperResult<Account> {
        self.find(identifier)?
            .ok_or_else(|| BookkeeperError::account_not_found(identifier))
    }

    pub fn list(&self) -> BookkeeperResult<Vec<Account>> {
        self.storage.accounts.get_all()
    }

    /// Accounts carrying every one of `tags`
    pub fn list_tagged(&self, tags: &[String]) -> BookkeeperResult<Vec<Account>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|a| tags.iter().all(|t| a.has_tag(t)))
            .collect())
    }

    pub fn update(&self, id: AccountId, changes: AccountChanges) -> BookkeeperResult<Account> {
        let mut account = self
            .storage
            .accounts
            .get(id)?
            .ok_or_else(|| BookkeeperError::account_not_found(id.to_string()))?;

        let before = account.clone();

        if let Some(new_name) = changes.name {
            let new_name = new_name.trim();
            if self.storage.accounts.name_exists(new_name, Some(id))? {
                return Err(BookkeeperError::Duplicate {
                    entity_type: "Account",
                    identifier: new_name.to_string(),
                });
            }
            account.name = new_name.to_string();
        }
        if let Some(description) = changes.description {
            account.description = description.trim().to_string();
        }
        if let Some(tags) = changes.tags {
            account.tags = normalize_tags(tags);
        }

        account
            .validate()
            .map_err(|e| BookkeeperError::Validation(e.to_string()))?;

        if account == before {
            return Ok(account);
        }

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        self.storage.log_update(
            EntityType::Account,
            account.id,
            Some(account.name.clone()),
            &before,
            &account,
        )?;

        Ok(account)
    }

    /// Delete an account that has no transactions
    pub fn delete(&self, id: AccountId) -> BookkeeperResult<Account> {
        let account = self
            .storage
            .accounts
            .get(id)?
            .ok_or_else(|| BookkeeperError::account_not_found(id.to_string()))?;

        let count = self.storage.transactions.count_for_account(id)?;
        if count > 0 {
            return Err(BookkeeperError::Validation(format!(
                "Account '{}' still has {} transaction(s)",
                account.name, count
            )));
        }

        self.storage.accounts.delete(id)?;
        self.storage.accounts.save()?;

        self.storage.log_delete(
            EntityType::Account,
            account.id,
            Some(account.name.clone()),
            &account,
        )?;

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::BookkeeperPaths;
    use crate::models::{Money, Transaction, TransactionType};
    use crate::storage::LedgerStore;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookkeeperPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_account() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        let account = service
            .create(" Checking ", "Main account", tags(&["asset", " cash", "cash", ""]))
            .unwrap();

        assert_eq!(account.name, "Checking");
        assert_eq!(account.id, AccountId::new(1));
        assert_eq!(account.tags, tags(&["asset", "cash"]));
        assert!(account.is_asset());
    }

    #[test]
    fn test_create_rejects_empty_and_duplicate_names() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        assert!(service.create("   ", "", vec![]).unwrap_err().is_validation());

        service.create("Checking", "", vec![]).unwrap();
        let result = service.create("Checking", "", vec![]);
        assert!(matches!(result, Err(BookkeeperError::Duplicate { .. })));
    }

    #[test]
    fn test_find_by_name_then_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        let created = service.create("My Checking", "", vec![]).unwrap();

        assert_eq!(service.find("My Checking").unwrap().unwrap().id, created.id);
        assert_eq!(service.find("1").unwrap().unwrap().id, created.id);
        assert_eq!(service.find("acc-1").unwrap().unwrap().id, created.id);
        assert!(service.find("my checking").unwrap().is_none());
        assert!(service.require("Nowhere").unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_tagged_is_conjunctive() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        service.create("Brokerage", "", tags(&["asset", "taxable", "liquid"])).unwrap();
        service.create("House", "", tags(&["asset", "real estate"])).unwrap();

        assert_eq!(service.list_tagged(&tags(&["asset"])).unwrap().len(), 2);
        let liquid = service.list_tagged(&tags(&["asset", "liquid"])).unwrap();
        assert_eq!(liquid.len(), 1);
        assert_eq!(liquid[0].name, "Brokerage");
    }

    #[test]
    fn test_update_account_logs_diff() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        let account = service.create("Old Name", "", vec![]).unwrap();
        let updated = service
            .update(
                account.id,
                AccountChanges {
                    name: Some("New Name".into()),
                    tags: Some(tags(&["liability", "credit card"])),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "New Name");
        assert!(updated.is_liability());

        let log = storage.audit().read_all().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].operation, Operation::Update);
        assert!(log[1].diff_summary.as_deref().unwrap_or("").contains("name"));
    }

    #[test]
    fn test_update_to_taken_name_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        service.create("Checking", "", vec![]).unwrap();
        let savings = service.create("Savings", "", vec![]).unwrap();

        let result = service.update(
            savings.id,
            AccountChanges {
                name: Some("Checking".into()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(BookkeeperError::Duplicate { .. })));
    }

    #[test]
    fn test_delete_refuses_accounts_with_transactions() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        let used = service.create("Checking", "", vec![]).unwrap();
        let unused = service.create("Old Card", "", vec![]).unwrap();
        storage
            .insert_transaction(Transaction::new(
                TransactionType::BalanceChange,
                used.id,
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                Money::from_cents(100),
            ))
            .unwrap();

        assert!(service.delete(used.id).unwrap_err().is_validation());
        service.delete(unused.id).unwrap();
        assert_eq!(service.list().unwrap().len(), 1);
    }
}
