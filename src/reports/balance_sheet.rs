//! Balance Sheet
//!
//! Point-in-time snapshot of assets, liabilities and equity. Accounts are
//! classified by their `asset`/`liability` tags and grouped by tag patterns
//! such as `cash` or `taxable+liquid`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::BookkeeperResult;
use crate::models::Money;
use crate::services::{AccountBalance, BalanceCalculator};
use crate::storage::LedgerStore;

use super::fields::{Statement, StatementField};
use super::group::ReportGroup;
use super::matching::has_all_tags;

/// Tag patterns used to group balance sheet sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetTags {
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub liabilities: Vec<String>,
}

impl Default for BalanceSheetTags {
    fn default() -> Self {
        Self {
            assets: [
                "cash",
                "taxable+liquid",
                "retirement",
                "education",
                "nonliquid",
                "real estate",
            ]
            .map(String::from)
            .to_vec(),
            liabilities: ["credit card", "loan"].map(String::from).to_vec(),
        }
    }
}

/// Balance sheet as of the end of `date`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub date: NaiveDate,
    pub assets: ReportGroup,
    /// Liabilities as positive amounts (balances negated)
    pub liabilities: ReportGroup,
    pub equities: Money,
}

impl BalanceSheet {
    /// Build a balance sheet from precomputed account balances
    ///
    /// Accounts tagged neither as assets nor as liabilities are left out.
    pub fn compute(date: NaiveDate, balances: &[AccountBalance], tags: &BalanceSheetTags) -> Self {
        let mut assets = ReportGroup::with_patterns(tags.assets.iter().cloned());
        let mut liabilities = ReportGroup::with_patterns(tags.liabilities.iter().cloned());

        for AccountBalance { account, balance } in balances {
            if account.is_asset() {
                add_account(&mut assets, &tags.assets, &account.tags, *balance);
            }
            if account.is_liability() {
                add_account(&mut liabilities, &tags.liabilities, &account.tags, -*balance);
            }
        }

        let equities = assets.total - liabilities.total;
        Self {
            date,
            assets,
            liabilities,
            equities,
        }
    }

    /// Compute the balance sheet from the store's balances as of `date`
    pub fn generate<S: LedgerStore + ?Sized>(
        store: &S,
        date: NaiveDate,
        tags: &BalanceSheetTags,
    ) -> BookkeeperResult<Self> {
        let balances = BalanceCalculator::new(store).balances_as_of(date)?;
        Ok(Self::compute(date, &balances, tags))
    }

    /// One balance sheet per date, in the given order
    pub fn generate_many<S: LedgerStore + ?Sized>(
        store: &S,
        dates: &[NaiveDate],
        tags: &BalanceSheetTags,
    ) -> BookkeeperResult<Vec<Self>> {
        dates
            .iter()
            .map(|date| Self::generate(store, *date, tags))
            .collect()
    }
}

fn add_account(group: &mut ReportGroup, patterns: &[String], tags: &[String], amount: Money) {
    group.total += amount;
    for pattern in patterns {
        if has_all_tags(tags, pattern) {
            group.add_to(pattern, amount);
        }
    }
}

impl Statement for BalanceSheet {
    fn label(&self) -> String {
        self.date.format("%Y/%m/%d").to_string()
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["Assets", "Liabilities", "Equities"]
    }

    fn field(&self, name: &str) -> Option<StatementField<'_>> {
        match name {
            "Assets" => Some(StatementField::Group(&self.assets)),
            "Liabilities" => Some(StatementField::Group(&self.liabilities)),
            "Equities" => Some(StatementField::Scalar(self.equities)),
            _ => None,
        }
    }
}
