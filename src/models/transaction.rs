//! Transaction model
//!
//! A transaction is one signed movement of money against exactly one account.
//! Transfers between accounts are a `TransferOut`/`TransferIn` pair that share
//! an association id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{AccountId, TransactionId};
use super::money::Money;

/// Kind of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Income or other categorized inflow
    In,
    /// Expense or other categorized outflow
    Out,
    /// Receiving side of a transfer
    TransferIn,
    /// Sending side of a transfer
    TransferOut,
    /// Valuation change of an asset (e.g. market movement)
    BalanceChange,
    /// Change in an amount owed
    LiabilityChange,
}

impl TransactionType {
    /// Every transaction type, in display order
    pub const ALL: [TransactionType; 6] = [
        Self::In,
        Self::Out,
        Self::TransferIn,
        Self::TransferOut,
        Self::BalanceChange,
        Self::LiabilityChange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "In",
            Self::Out => "Out",
            Self::TransferIn => "TransferIn",
            Self::TransferOut => "TransferOut",
            Self::BalanceChange => "BalanceChange",
            Self::LiabilityChange => "LiabilityChange",
        }
    }

    /// `TransferIn` or `TransferOut`
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::TransferIn | Self::TransferOut)
    }

    /// `In` or `Out`; these carry a category and show up on income statements
    pub fn is_categorized(&self) -> bool {
        matches!(self, Self::In | Self::Out)
    }

    /// Types whose user-entered magnitude is stored as a negative amount
    pub fn is_outgoing(&self) -> bool {
        matches!(self, Self::Out | Self::TransferOut | Self::LiabilityChange)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TransactionValidationError::UnknownType(s.to_string()))
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Numeric identifier assigned by the store
    #[serde(default)]
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Calendar day of the transaction
    pub date: NaiveDate,

    /// Tier 1 of the two-tier category
    #[serde(default)]
    pub category: String,

    /// Tier 2 of the two-tier category
    #[serde(default)]
    pub sub_category: String,

    #[serde(default)]
    pub account_id: AccountId,

    /// Amount in cents (positive for inflow, negative for outflow)
    pub amount: Money,

    #[serde(default)]
    pub notes: String,

    /// Links a TransferOut with its TransferIn; empty otherwise
    #[serde(default)]
    pub association_id: String,
}

impl Transaction {
    /// Create a new, not yet persisted transaction
    pub fn new(kind: TransactionType, account_id: AccountId, date: NaiveDate, amount: Money) -> Self {
        Self {
            id: TransactionId::default(),
            kind,
            date,
            category: String::new(),
            sub_category: String::new(),
            account_id,
            amount,
            notes: String::new(),
            association_id: String::new(),
        }
    }

    /// Create a categorized (`In`/`Out`) transaction
    pub fn categorized(
        kind: TransactionType,
        account_id: AccountId,
        date: NaiveDate,
        amount: Money,
        category: impl Into<String>,
        sub_category: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(kind, account_id, date, amount);
        txn.category = category.into();
        txn.sub_category = sub_category.into();
        txn
    }

    pub fn is_transfer(&self) -> bool {
        self.kind.is_transfer()
    }

    /// Key used to classify the transaction on income statements: "Category/SubCategory"
    pub fn category_path(&self) -> String {
        format!("{}/{}", self.category, self.sub_category)
    }

    /// Validate the per-type field requirements
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.kind.is_categorized() {
            if self.category.trim().is_empty() {
                return Err(TransactionValidationError::MissingCategory(self.kind));
            }
            if self.sub_category.trim().is_empty() {
                return Err(TransactionValidationError::MissingSubCategory(self.kind));
            }
        }

        if self.kind.is_transfer() && self.association_id.is_empty() {
            return Err(TransactionValidationError::MissingAssociationId(self.kind));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y/%m/%d"),
            self.kind,
            self.category_path(),
            self.amount
        )
    }
}

/// Net of all amounts booked on `account_id` on or before `cutoff`
pub fn net_amount_as_of<'a, I>(transactions: I, account_id: AccountId, cutoff: NaiveDate) -> Money
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.account_id == account_id && t.date <= cutoff)
        .map(|t| t.amount)
        .sum()
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    UnknownType(String),
    MissingCategory(TransactionType),
    MissingSubCategory(TransactionType),
    MissingAssociationId(TransactionType),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType(s) => {
                let valid: Vec<_> = TransactionType::ALL.iter().map(|t| t.as_str()).collect();
                write!(f, "Unknown transaction type '{}' (valid: {})", s, valid.join(", "))
            }
            Self::MissingCategory(kind) => write!(f, "{} transactions need a category", kind),
            Self::MissingSubCategory(kind) => {
                write!(f, "{} transactions need a sub-category", kind)
            }
            Self::MissingAssociationId(kind) => {
                write!(f, "{} transactions need an association id", kind)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!("TransferOut".parse::<TransactionType>().unwrap(), TransactionType::TransferOut);
        assert_eq!("out".parse::<TransactionType>().unwrap(), TransactionType::Out);
        assert!(matches!(
            "Refund".parse::<TransactionType>(),
            Err(TransactionValidationError::UnknownType(_))
        ));
    }

    #[test]
    fn test_categorized_needs_both_tiers() {
        let account = AccountId::new(1);
        let mut txn = Transaction::new(TransactionType::Out, account, date(2024, 1, 5), Money::from_cents(-500));
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::MissingCategory(TransactionType::Out))
        );

        txn.category = "Food & Dining".into();
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::MissingSubCategory(TransactionType::Out))
        );

        txn.sub_category = "Groceries".into();
        assert!(txn.validate().is_ok());
        assert_eq!(txn.category_path(), "Food & Dining/Groceries");
    }

    #[test]
    fn test_transfer_needs_association_id() {
        let mut txn = Transaction::new(
            TransactionType::TransferIn,
            AccountId::new(2),
            date(2024, 1, 5),
            Money::from_cents(1000),
        );
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::MissingAssociationId(TransactionType::TransferIn))
        );
        txn.association_id = "a1".into();
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_uncategorized_types_need_nothing() {
        for kind in [TransactionType::BalanceChange, TransactionType::LiabilityChange] {
            let txn = Transaction::new(kind, AccountId::new(1), date(2024, 1, 5), Money::from_cents(-1));
            assert!(txn.validate().is_ok());
        }
    }

    #[test]
    fn test_net_amount_as_of() {
        let a = AccountId::new(1);
        let b = AccountId::new(2);
        let txns = vec![
            Transaction::new(TransactionType::BalanceChange, a, date(2024, 3, 1), Money::from_cents(100)),
            Transaction::new(TransactionType::BalanceChange, a, date(2024, 3, 2), Money::from_cents(40)),
            Transaction::new(TransactionType::BalanceChange, b, date(2024, 3, 1), Money::from_cents(7)),
        ];
        assert_eq!(net_amount_as_of(&txns, a, date(2024, 3, 1)).cents(), 100);
        assert_eq!(net_amount_as_of(&txns, a, date(2024, 3, 2)).cents(), 140);
        assert_eq!(net_amount_as_of(&txns, a, date(2024, 2, 29)).cents(), 0);
    }

    #[test]
    fn test_payload_round_trip() {
        let json = r#"{"type": "TransferOut", "date": "2024-03-01", "amount": -2500, "association_id": "x"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.kind, TransactionType::TransferOut);
        assert_eq!(txn.amount.cents(), -2500);
        assert!(txn.category.is_empty());
        assert!(!txn.id.is_assigned());
    }
}
