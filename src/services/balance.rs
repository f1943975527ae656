//! Balance calculator
//!
//! Computes what an account holds as of the end of a given day. Results are
//! never cached; every call reads through the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{Account, AccountId, Money};
use crate::storage::LedgerStore;

/// An account together with its balance as of some date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    #[serde(flatten)]
    pub account: Account,
    pub balance: Money,
}

/// Service computing point-in-time account balances
pub struct BalanceCalculator<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> BalanceCalculator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Net of every transaction on the account dated on or before `cutoff`
    ///
    /// The whole cutoff day is included. An account without transactions has
    /// a zero balance.
    pub fn balance_as_of(&self, account_id: AccountId, cutoff: NaiveDate) -> BookkeeperResult<Money> {
        self.store.sum_transaction_amount(account_id, cutoff)
    }

    /// Balance of the account with the given exact name
    pub fn balance_by_name(&self, name: &str, cutoff: NaiveDate) -> BookkeeperResult<AccountBalance> {
        let account = self
            .store
            .list_accounts()?
            .into_iter()
            .find(|a| a.name == name)
            .ok_or_else(|| BookkeeperError::account_not_found(name))?;

        let balance = self.balance_as_of(account.id, cutoff)?;
        Ok(AccountBalance { account, balance })
    }

    /// Balances of every account, in store order
    pub fn balances_as_of(&self, cutoff: NaiveDate) -> BookkeeperResult<Vec<AccountBalance>> {
        self.store
            .list_accounts()?
            .into_iter()
            .map(|account| {
                let balance = self.balance_as_of(account.id, cutoff)?;
                Ok(AccountBalance { account, balance })
            })
            .collect()
    }
}
