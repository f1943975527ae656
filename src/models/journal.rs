//! Journal entry model
//!
//! A journal entry proposes one or more transactions for a single real-world
//! event (a paycheck, a transfer, a purchase split over accounts). Lines refer
//! to accounts by name; names are resolved to ids when the entry is posted.
//! Entries are checked by their validators before anything is written.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::money::Money;
use super::transaction::{Transaction, TransactionType};

/// One proposed transaction plus the name of the account it books against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    #[serde(flatten)]
    pub transaction: Transaction,

    pub account_name: String,
}

impl JournalLine {
    pub fn new(account_name: impl Into<String>, transaction: Transaction) -> Self {
        Self {
            transaction,
            account_name: account_name.into(),
        }
    }
}

/// A rule a journal entry must satisfy before it is posted
///
/// The string form is `transfer_match` or `zero_balance:<account name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Validator {
    /// Every transfer line has an association id and each association sums to zero
    TransferMatch,
    /// Lines booked on the named account sum to zero
    ZeroBalance { account_name: String },
}

impl Validator {
    pub const TRANSFER_MATCH: &'static str = "transfer_match";
    pub const ZERO_BALANCE: &'static str = "zero_balance";

    pub fn zero_balance(account_name: impl Into<String>) -> Self {
        Self::ZeroBalance {
            account_name: account_name.into(),
        }
    }

    /// Rule name without its argument
    pub fn name(&self) -> &'static str {
        match self {
            Self::TransferMatch => Self::TRANSFER_MATCH,
            Self::ZeroBalance { .. } => Self::ZERO_BALANCE,
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransferMatch => f.write_str(Self::TRANSFER_MATCH),
            Self::ZeroBalance { account_name } => {
                write!(f, "{}:{}", Self::ZERO_BALANCE, account_name)
            }
        }
    }
}

impl FromStr for Validator {
    type Err = ValidatorParseError;

    /// Rule names are case-insensitive; the account argument is kept as written
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, argument) = match s.split_once(':') {
            Some((kind, argument)) => (kind.trim(), Some(argument)),
            None => (s.trim(), None),
        };

        if kind.eq_ignore_ascii_case(Self::TRANSFER_MATCH) {
            return match argument {
                None => Ok(Self::TransferMatch),
                Some(_) => Err(ValidatorParseError::UnexpectedArgument(s.to_string())),
            };
        }

        if kind.eq_ignore_ascii_case(Self::ZERO_BALANCE) {
            return match argument {
                Some(name) if !name.trim().is_empty() => Ok(Self::zero_balance(name)),
                _ => Err(ValidatorParseError::MissingAccount(s.to_string())),
            };
        }

        Err(ValidatorParseError::Unknown(s.to_string()))
    }
}

impl TryFrom<String> for Validator {
    type Error = ValidatorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Validator> for String {
    fn from(value: Validator) -> Self {
        value.to_string()
    }
}

/// Error type for validator parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorParseError {
    Unknown(String),
    MissingAccount(String),
    UnexpectedArgument(String),
}

impl fmt::Display for ValidatorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(s) => write!(
                f,
                "Unknown validator '{}' (valid: transfer_match, zero_balance:<account>)",
                s
            ),
            Self::MissingAccount(s) => {
                write!(f, "Validator '{}' needs an account name: zero_balance:<account>", s)
            }
            Self::UnexpectedArgument(s) => write!(f, "Validator '{}' takes no argument", s),
        }
    }
}

impl std::error::Error for ValidatorParseError {}

fn default_validators() -> Vec<Validator> {
    vec![Validator::TransferMatch]
}

/// A proposed set of transactions describing one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub title: String,

    #[serde(default)]
    pub desc: String,

    #[serde(default)]
    pub transactions: Vec<JournalLine>,

    /// Rules run in order before posting
    #[serde(default = "default_validators")]
    pub validators: Vec<Validator>,
}

impl JournalEntry {
    /// Create an empty entry carrying the given validators
    pub fn new(title: impl Into<String>, validators: Vec<Validator>) -> Self {
        Self {
            title: title.into(),
            desc: String::new(),
            transactions: Vec::new(),
            validators,
        }
    }

    /// Build a transfer between two accounts
    ///
    /// The `TransferOut` line takes the negated amount and the `TransferIn`
    /// line the amount itself; both share a fresh association id.
    pub fn transfer(
        title: impl Into<String>,
        desc: impl Into<String>,
        from_account: &str,
        to_account: &str,
        amount: Money,
        date: NaiveDate,
        validators: Vec<Validator>,
    ) -> Self {
        let mut entry = Self::new(title, validators);
        entry.desc = desc.into();
        let association_id = Uuid::new_v4().to_string();

        for (kind, account_name, signed) in [
            (TransactionType::TransferOut, from_account, -amount),
            (TransactionType::TransferIn, to_account, amount),
        ] {
            let mut txn = Transaction::new(kind, Default::default(), date, signed);
            txn.notes = format!("{};{};{}", entry.title, entry.desc, kind.as_str());
            txn.association_id = association_id.clone();
            entry.push(account_name, txn);
        }

        entry
    }

    pub fn push(&mut self, account_name: impl Into<String>, transaction: Transaction) {
        self.transactions
            .push(JournalLine::new(account_name, transaction));
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Running sum of the lines booked on `account_name`
    pub fn balance_on_account(&self, account_name: &str) -> Money {
        self.transactions
            .iter()
            .filter(|line| line.account_name == account_name)
            .map(|line| line.transaction.amount)
            .sum()
    }
}
