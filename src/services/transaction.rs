//! Transaction service
//!
//! Provides business logic for single transactions: creation with
//! validation, lookup, filtered listing and deletion.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{AccountId, Money, Transaction, TransactionId, TransactionType};
use crate::storage::{LedgerStore, QueryTranslator, Storage, TransactionFilter};

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub account_id: AccountId,
    pub kind: TransactionType,
    pub date: NaiveDate,
    pub amount: Money,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub notes: Option<String>,
    pub association_id: Option<String>,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> BookkeeperResult<Transaction> {
        if !self.storage.accounts.exists(input.account_id)? {
            return Err(BookkeeperError::account_not_found(input.account_id.to_string()));
        }

        let mut txn = Transaction::new(input.kind, input.account_id, input.date, input.amount);
        txn.category = input.category.unwrap_or_default().trim().to_string();
        txn.sub_category = input.sub_category.unwrap_or_default().trim().to_string();
        txn.notes = input.notes.unwrap_or_default();
        txn.association_id = input.association_id.unwrap_or_default().trim().to_string();

        txn.validate()
            .map_err(|e| BookkeeperError::Validation(e.to_string()))?;

        self.storage.insert_transaction(txn)
    }

    pub fn get(&self, id: TransactionId) -> BookkeeperResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by id string ("42" or "txn-42")
    pub fn find(&self, identifier: &str) -> BookkeeperResult<Option<Transaction>> {
        match identifier.parse::<TransactionId>() {
            Ok(id) => self.storage.transactions.get(id),
            Err(_) => Ok(None),
        }
    }

    /// Transactions matching the filter, newest first
    pub fn list(&self, filter: &TransactionFilter) -> BookkeeperResult<Vec<Transaction>> {
        self.storage.list_transactions(filter)
    }

    /// Translate free text into a filter and list what matches
    pub fn query(
        &self,
        translator: &dyn QueryTranslator,
        text: &str,
        today: NaiveDate,
    ) -> BookkeeperResult<Vec<Transaction>> {
        let filter = translator.translate(text, today)?;
        self.list(&filter)
    }

    pub fn delete(&self, id: TransactionId) -> BookkeeperResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .delete(id)?
            .ok_or_else(|| BookkeeperError::transaction_not_found(id.to_string()))?;
        self.storage.transactions.save()?;

        self.storage
            .log_delete(EntityType::Transaction, txn.id, None, &txn)?;

        Ok(txn)
    }
}
