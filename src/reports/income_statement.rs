//! Income Statement
//!
//! Revenue, taxes, expenses and investments over a period, grouped by
//! category prefix. Only categorized (`In`/`Out`) transactions take part.

use serde::{Deserialize, Serialize};

use crate::error::BookkeeperResult;
use crate::models::{Money, ReportPeriod, Transaction};
use crate::storage::{LedgerStore, TransactionFilter};

use super::fields::{Statement, StatementField};
use super::group::ReportGroup;
use super::matching::matches_prefix;

/// Category patterns for each income statement section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementTags {
    #[serde(default)]
    pub revenue: Vec<String>,
    #[serde(default)]
    pub taxes: Vec<String>,
    #[serde(default)]
    pub expenses: Vec<String>,
    #[serde(default)]
    pub investments: Vec<String>,
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for IncomeStatementTags {
    fn default() -> Self {
        Self {
            revenue: strings(&[
                "Professional Income/Salary",
                "Professional Income/RSU",
                "Professional Income/Employer Match",
                "Other Income/",
            ]),
            taxes: strings(&["Taxes/"]),
            expenses: strings(&[
                "Home/Mortgage Interest",
                "Home/Loan Fees",
                "Home/HOA",
                "Food & Dining/",
                "Kids/",
                "Bills & Utilities/",
                "Transportation/",
                "Entertainment/",
                "Shopping/",
                "Communications/",
                "Medical Exp/",
                "Other Exp/",
            ]),
            investments: strings(&[
                "Investment/Taxable Investment",
                "Investment/Retirement Investment",
                "Investment/Education Investment",
            ]),
        }
    }
}

/// Income statement for one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub period: ReportPeriod,
    pub revenue: ReportGroup,
    /// Taxes paid, as positive amounts
    pub taxes: ReportGroup,
    /// Spending, as positive amounts
    pub expenses: ReportGroup,
    pub investments: ReportGroup,
    pub revenue_net_taxes: Money,
    pub operating_income: Money,
    pub total_earnings: Money,
}

impl IncomeStatement {
    /// Aggregate the categorized transactions dated within `period`
    ///
    /// Both ends of the period are inclusive. Transactions outside it are
    /// ignored, so callers may pass a superset.
    pub fn compute<'a, I>(period: ReportPeriod, transactions: I, tags: &IncomeStatementTags) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut revenue = ReportGroup::with_patterns(tags.revenue.iter().cloned());
        let mut taxes = ReportGroup::with_patterns(tags.taxes.iter().cloned());
        let mut expenses = ReportGroup::with_patterns(tags.expenses.iter().cloned());
        let mut investments = ReportGroup::with_patterns(tags.investments.iter().cloned());

        for txn in transactions {
            if !txn.kind.is_categorized() || !period.contains(txn.date) {
                continue;
            }
            let key = txn.category_path();
            add_transaction(&mut revenue, &tags.revenue, &key, txn.amount);
            add_transaction(&mut taxes, &tags.taxes, &key, -txn.amount);
            add_transaction(&mut expenses, &tags.expenses, &key, -txn.amount);
            add_transaction(&mut investments, &tags.investments, &key, txn.amount);
        }

        let revenue_net_taxes = revenue.total - taxes.total;
        let operating_income = revenue_net_taxes - expenses.total;
        let total_earnings = operating_income + investments.total;

        Self {
            period,
            revenue,
            taxes,
            expenses,
            investments,
            revenue_net_taxes,
            operating_income,
            total_earnings,
        }
    }

    /// Compute the statement from the store's transactions within `period`
    pub fn generate<S: LedgerStore + ?Sized>(
        store: &S,
        period: ReportPeriod,
        tags: &IncomeStatementTags,
    ) -> BookkeeperResult<Self> {
        let filter = TransactionFilter::between(period.start_date(), period.end_date());
        let transactions = store.list_transactions(&filter)?;
        Ok(Self::compute(period, &transactions, tags))
    }

    /// One income statement per period, in the given order
    pub fn generate_many<S: LedgerStore + ?Sized>(
        store: &S,
        periods: &[ReportPeriod],
        tags: &IncomeStatementTags,
    ) -> BookkeeperResult<Vec<Self>> {
        periods
            .iter()
            .map(|period| Self::generate(store, *period, tags))
            .collect()
    }
}

/// Add to the total once if any pattern matches, and to every matching group
fn add_transaction(group: &mut ReportGroup, patterns: &[String], key: &str, amount: Money) {
    let mut matched = false;
    for pattern in patterns {
        if matches_prefix(key, pattern) {
            group.add_to(pattern, amount);
            matched = true;
        }
    }
    if matched {
        group.total += amount;
    }
}

impl Statement for IncomeStatement {
    fn label(&self) -> String {
        self.period.to_string()
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "Revenue",
            "Taxes",
            "RevenueNetTaxes",
            "Expenses",
            "OperatingIncome",
            "Investments",
            "TotalEarnings",
        ]
    }

    fn field(&self, name: &str) -> Option<StatementField<'_>> {
        match name {
            "Revenue" => Some(StatementField::Group(&self.revenue)),
            "Taxes" => Some(StatementField::Group(&self.taxes)),
            "Expenses" => Some(StatementField::Group(&self.expenses)),
            "Investments" => Some(StatementField::Group(&self.investments)),
            "RevenueNetTaxes" => Some(StatementField::Scalar(self.revenue_net_taxes)),
            "OperatingIncome" => Some(StatementField::Scalar(self.operating_income)),
            "TotalEarnings" => Some(StatementField::Scalar(self.total_earnings)),
            _ => None,
        }
    }
}
