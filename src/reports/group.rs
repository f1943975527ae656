//! Report groups
//!
//! A group is a headline total plus named subtotals. Subtotals come from
//! patterns that may overlap, so they need not add up to the total.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Money;

/// A named total with possibly overlapping subtotals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportGroup {
    pub total: Money,
    pub groups: BTreeMap<String, Money>,
}

impl ReportGroup {
    /// Create a group with every pattern present at zero
    pub fn with_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            total: Money::zero(),
            groups: patterns
                .into_iter()
                .map(|p| (p.into(), Money::zero()))
                .collect(),
        }
    }

    /// Subtotal for one pattern
    pub fn subtotal(&self, pattern: &str) -> Option<Money> {
        self.groups.get(pattern).copied()
    }

    pub fn add_to(&mut self, pattern: &str, amount: Money) {
        *self.groups.entry(pattern.to_string()).or_default() += amount;
    }

    /// The part of the total not covered by any subtotal
    ///
    /// Only meaningful when the patterns do not overlap.
    pub fn remainder(&self) -> Money {
        self.total - self.groups.values().sum::<Money>()
    }
}
