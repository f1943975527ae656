//! Strongly-typed ID wrappers for stored entities
//!
//! Ids are numeric and handed out by the store on insert. A value of zero
//! means "not yet persisted". Newtypes keep account ids and transaction ids
//! from being mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw numeric id
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// The raw numeric value
            pub const fn value(&self) -> u64 {
                self.0
            }

            /// Whether the store has assigned this id
            pub const fn is_assigned(&self) -> bool {
                self.0 != 0
            }

            /// The id following this one
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            /// Accepts "42" as well as the prefixed form "acc-42"
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(AccountId, "acc-");
define_id!(TransactionId, "txn-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unassigned() {
        assert!(!AccountId::default().is_assigned());
        assert!(TransactionId::new(7).is_assigned());
    }

    #[test]
    fn test_parse() {
        assert_eq!("12".parse::<AccountId>().unwrap(), AccountId::new(12));
        assert_eq!("acc-12".parse::<AccountId>().unwrap(), AccountId::new(12));
        assert_eq!("txn-3".parse::<TransactionId>().unwrap(), TransactionId::new(3));
        assert!("Checking".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_next_and_ordering() {
        let id = AccountId::new(4);
        assert_eq!(id.next(), AccountId::new(5));
        assert!(id < id.next());
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&TransactionId::new(42)).unwrap();
        assert_eq!(json, "42");
        let back: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value(), 42);
    }
}
