//! Custom error types for Bookkeeper
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for Bookkeeper operations
#[derive(Error, Debug)]
pub enum BookkeeperError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A journal line failed its own structural validation
    #[error("Transaction {transaction_index} is invalid: {reason}")]
    InvalidTransaction {
        transaction_index: usize,
        reason: String,
    },

    /// A journal line names an account that does not exist
    #[error("Account name '{account_name}' is not found in valid accounts")]
    UnknownAccount { account_name: String },

    /// Transfer amounts sharing an association id do not cancel out
    #[error("validator transfer_match failed for association id {association_id} with reason: unmatched transfer")]
    UnmatchedTransfer { association_id: String },

    /// A transfer line has no association id
    #[error("validator transfer_match failed on transaction {transaction_index} with reason: no association id")]
    MissingAssociationId { transaction_index: usize },

    /// A zero-balance check found money left on the account
    #[error("validator zero_balance failed for account '{account_name}' with reason: non-zero balance {balance}")]
    NonZeroBalance { account_name: String, balance: Money },

    /// A report asked for a field the statement does not expose
    #[error("Report field not found: {field}")]
    ReportFieldNotFound { field: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BookkeeperError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error rejected a journal entry before anything was written
    pub fn is_journal_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransaction { .. }
                | Self::UnknownAccount { .. }
                | Self::UnmatchedTransfer { .. }
                | Self::MissingAssociationId { .. }
                | Self::NonZeroBalance { .. }
        )
    }

    /// Name of the journal validator that produced this error, if any
    pub fn validator(&self) -> Option<&'static str> {
        match self {
            Self::UnmatchedTransfer { .. } | Self::MissingAssociationId { .. } => {
                Some("transfer_match")
            }
            Self::NonZeroBalance { .. } => Some("zero_balance"),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BookkeeperError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BookkeeperError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Bookkeeper operations
pub type BookkeeperResult<T> = Result<T, BookkeeperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookkeeperError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BookkeeperError::account_not_found("Checking");
        assert_eq!(err.to_string(), "Account not found: Checking");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_journal_errors_name_the_offender() {
        let err = BookkeeperError::MissingAssociationId {
            transaction_index: 2,
        };
        assert_eq!(
            err.to_string(),
            "validator transfer_match failed on transaction 2 with reason: no association id"
        );
        assert_eq!(err.validator(), Some("transfer_match"));
        assert!(err.is_journal_rejection());

        let err = BookkeeperError::UnmatchedTransfer {
            association_id: "abc".into(),
        };
        assert!(err.to_string().contains("association id abc"));

        let err = BookkeeperError::NonZeroBalance {
            account_name: "Payroll".into(),
            balance: Money::from_cents(-1250),
        };
        assert_eq!(err.validator(), Some("zero_balance"));
        assert!(err.to_string().contains("'Payroll'"));
        assert!(err.to_string().contains("-$12.50"));
    }

    #[test]
    fn test_report_field_error_is_not_journal_rejection() {
        let err = BookkeeperError::ReportFieldNotFound {
            field: "Assets/bogus".into(),
        };
        assert!(!err.is_journal_rejection());
        assert_eq!(err.validator(), None);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BookkeeperError = io_err.into();
        assert!(matches!(err, BookkeeperError::Io(_)));
    }
}
