//! Core data models for Bookkeeper
//!
//! This module contains the data structures of the ledger: accounts,
//! transactions, journal entries, money amounts and report periods.

pub mod account;
pub mod ids;
pub mod journal;
pub mod money;
pub mod period;
pub mod transaction;

pub use account::{Account, AccountValidationError};
pub use ids::{AccountId, TransactionId};
pub use journal::{JournalEntry, JournalLine, Validator, ValidatorParseError};
pub use money::{Money, MoneyParseError};
pub use period::{parse_date, PeriodParseError, ReportPeriod};
pub use transaction::{net_amount_as_of, Transaction, TransactionType, TransactionValidationError};
