//! Service layer for Bookkeeper
//!
//! Business logic on top of the storage layer: account and transaction CRUD,
//! point-in-time balances, and validated journal posting.

pub mod account;
pub mod balance;
pub mod journal;
pub mod transaction;

pub use account::{AccountChanges, AccountService};
pub use balance::{AccountBalance, BalanceCalculator};
pub use journal::{check_transfer_match, check_zero_balance, JournalService, JournalValidator};
pub use transaction::{CreateTransactionInput, TransactionService};
