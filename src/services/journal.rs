//! Journal validation and posting
//!
//! A journal entry is posted in three steps: account names are resolved to
//! ids, each line and then the whole entry is validated, and only then are
//! the transactions written. Any failure before the write leaves the store
//! untouched.

use std::collections::{BTreeMap, HashMap};

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{
    Account, AccountId, JournalEntry, Money, Transaction, Validator,
};
use crate::storage::LedgerStore;

/// Checks journal entries against a fixed set of known accounts
pub struct JournalValidator {
    accounts: HashMap<String, AccountId>,
}

impl JournalValidator {
    pub fn new(known_accounts: &[Account]) -> Self {
        Self {
            accounts: known_accounts
                .iter()
                .map(|a| (a.name.clone(), a.id))
                .collect(),
        }
    }

    /// Fill in every line's account id from its account name
    ///
    /// Names match exactly. If any name is unknown the entry is left as it was.
    pub fn resolve_account_ids(&self, entry: &mut JournalEntry) -> BookkeeperResult<()> {
        let ids = entry
            .transactions
            .iter()
            .map(|line| {
                self.accounts
                    .get(&line.account_name)
                    .copied()
                    .ok_or_else(|| BookkeeperError::UnknownAccount {
                        account_name: line.account_name.clone(),
                    })
            })
            .collect::<BookkeeperResult<Vec<_>>>()?;

        for (line, id) in entry.transactions.iter_mut().zip(ids) {
            line.transaction.account_id = id;
        }
        Ok(())
    }

    /// Check each line on its own, then run the entry's validators in order
    pub fn validate(&self, entry: &JournalEntry) -> BookkeeperResult<()> {
        if entry.is_empty() {
            return Err(BookkeeperError::Validation(format!(
                "Journal entry '{}' has no transactions",
                entry.title
            )));
        }

        check_lines(entry)?;

        for validator in &entry.validators {
            match validator {
                Validator::TransferMatch => check_transfer_match(entry)?,
                Validator::ZeroBalance { account_name } => check_zero_balance(entry, account_name)?,
            }
        }
        Ok(())
    }
}

/// Transfer lines need an association id, and each association must net to zero
///
/// A missing id is reported for the first offending line. When several
/// associations are unbalanced the smallest id is reported.
pub fn check_transfer_match(entry: &JournalEntry) -> BookkeeperResult<()> {
    let mut sums: BTreeMap<&str, Money> = BTreeMap::new();

    for (i, line) in entry.transactions.iter().enumerate() {
        let txn = &line.transaction;
        if !txn.is_transfer() {
            continue;
        }
        if txn.association_id.is_empty() {
            return Err(BookkeeperError::MissingAssociationId {
                transaction_index: i,
            });
        }
        *sums.entry(txn.association_id.as_str()).or_default() += txn.amount;
    }

    match sums.into_iter().find(|(_, sum)| !sum.is_zero()) {
        Some((association_id, _)) => Err(BookkeeperError::UnmatchedTransfer {
            association_id: association_id.to_string(),
        }),
        None => Ok(()),
    }
}

/// Lines booked on `account_name` must net to zero
pub fn check_zero_balance(entry: &JournalEntry, account_name: &str) -> BookkeeperResult<()> {
    let balance = entry.balance_on_account(account_name);
    if balance.is_zero() {
        Ok(())
    } else {
        Err(BookkeeperError::NonZeroBalance {
            account_name: account_name.to_string(),
            balance,
        })
    }
}

/// Per-line checks
///
/// Transfer lines without an association id are reported first, whatever
/// other malformed lines come before them.
fn check_lines(entry: &JournalEntry) -> BookkeeperResult<()> {
    let missing_association = entry.transactions.iter().position(|line| {
        line.transaction.is_transfer() && line.transaction.association_id.is_empty()
    });
    if let Some(i) = missing_association {
        return Err(BookkeeperError::MissingAssociationId {
            transaction_index: i,
        });
    }

    for (i, line) in entry.transactions.iter().enumerate() {
        line.transaction
            .validate()
            .map_err(|e| BookkeeperError::InvalidTransaction {
                transaction_index: i,
                reason: e.to_string(),
            })?;
    }
    Ok(())
}

/// Service for checking and posting journal entries
pub struct JournalService<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> JournalService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Resolve and validate without writing anything
    ///
    /// Returns the entry with its account ids filled in.
    pub fn check(&self, mut entry: JournalEntry) -> BookkeeperResult<JournalEntry> {
        let validator = JournalValidator::new(&self.store.list_accounts()?);
        validator.resolve_account_ids(&mut entry)?;
        validator.validate(&entry)?;
        Ok(entry)
    }

    /// Resolve, validate, then write every transaction in line order
    pub fn post(&self, entry: JournalEntry) -> BookkeeperResult<Vec<Transaction>> {
        let entry = self.check(entry)?;

        let saved = entry
            .transactions
            .iter()
            .map(|line| self.store.insert_transaction(line.transaction.clone()))
            .collect::<BookkeeperResult<Vec<_>>>()?;

        self.store.record_posting(&entry, &saved)?;
        Ok(saved)
    }
}
