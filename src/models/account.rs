//! Account model
//!
//! An account is a named bucket of money. Its tags classify it (asset,
//! liability) and also group it on reports (cash, retirement, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;

/// Tags that put an account on the asset side of the balance sheet
pub const ASSET_TAGS: [&str; 2] = ["asset", "assets"];

/// Tags that put an account on the liability side of the balance sheet
pub const LIABILITY_TAGS: [&str; 2] = ["liability", "liabilities"];

/// A financial account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Numeric identifier assigned by the store
    #[serde(default)]
    pub id: AccountId,

    /// Unique account name (e.g., "Chase Checking")
    pub name: String,

    /// Free-text description
    #[serde(default, rename = "desc")]
    pub description: String,

    /// Classification and report-grouping tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Account {
    /// Create a new, not yet persisted account
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: AccountId::default(),
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
        }
    }

    /// Create a new account with tags
    pub fn with_tags<I, S>(name: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut account = Self::new(name);
        account.tags = tags.into_iter().map(Into::into).collect();
        account
    }

    /// Exact tag membership test
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether this account counts towards total assets
    pub fn is_asset(&self) -> bool {
        ASSET_TAGS.iter().any(|t| self.has_tag(t))
    }

    /// Whether this account counts towards total liabilities
    pub fn is_liability(&self) -> bool {
        LIABILITY_TAGS.iter().any(|t| self.has_tag(t))
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tags.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} [{}]", self.name, self.tags.join(", "))
        }
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new("Checking");
        assert_eq!(account.name, "Checking");
        assert!(!account.id.is_assigned());
        assert!(account.tags.is_empty());
    }

    #[test]
    fn test_classification() {
        let checking = Account::with_tags("Checking", ["asset", "cash"]);
        assert!(checking.is_asset());
        assert!(!checking.is_liability());

        let card = Account::with_tags("Card", ["liabilities", "credit card"]);
        assert!(card.is_liability());
        assert!(!card.is_asset());

        // exact match only
        let odd = Account::with_tags("Odd", ["assets-ish", "Asset"]);
        assert!(!odd.is_asset());
    }

    #[test]
    fn test_validation() {
        let mut account = Account::new("Valid Name");
        assert!(account.validate().is_ok());

        account.name = "   ".to_string();
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyName));
    }

    #[test]
    fn test_payload_field_names() {
        let account: Account =
            serde_json::from_str(r#"{"name": "Savings", "desc": "rainy day", "tags": ["asset"]}"#)
                .unwrap();
        assert_eq!(account.description, "rainy day");
        assert!(!account.id.is_assigned());
        assert!(account.is_asset());
    }

    #[test]
    fn test_display() {
        let account = Account::with_tags("My Checking", ["asset", "cash"]);
        assert_eq!(format!("{}", account), "My Checking [asset, cash]");
    }
}
