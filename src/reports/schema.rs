//! Report schemas
//!
//! A schema turns one or more statements into a table: `order` lists the row
//! labels (`-` is a blank separator row), `mapping` lists the field paths
//! summed into each row, and `formatters` styles individual rows.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::Money;
use crate::storage::read_json_required;

use super::fields::Statement;

/// Row label that renders as an empty row
pub const SEPARATOR: &str = "-";

/// Styling applied to every cell of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formatter {
    Bold,
    Underline,
    Green,
    Red,
    Yellow,
}

/// Layout of a statement table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSchema {
    pub mapping: BTreeMap<String, Vec<String>>,
    pub order: Vec<String>,
    #[serde(default)]
    pub formatters: BTreeMap<String, Vec<Formatter>>,
}

/// One rendered table row; `values` has one entry per statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRow {
    Separator,
    Item {
        label: String,
        values: Vec<Money>,
        formatters: Vec<Formatter>,
    },
}

struct SchemaBuilder(ReportSchema);

impl SchemaBuilder {
    fn new() -> Self {
        Self(ReportSchema {
            mapping: BTreeMap::new(),
            order: Vec::new(),
            formatters: BTreeMap::new(),
        })
    }

    fn row(mut self, label: &str, paths: &[&str]) -> Self {
        self.0.order.push(label.to_string());
        self.0
            .mapping
            .insert(label.to_string(), paths.iter().map(|p| p.to_string()).collect());
        self
    }

    fn styled(mut self, label: &str, paths: &[&str], formatters: &[Formatter]) -> Self {
        self = self.row(label, paths);
        self.0.formatters.insert(label.to_string(), formatters.to_vec());
        self
    }

    fn separator(mut self) -> Self {
        self.0.order.push(SEPARATOR.to_string());
        self
    }
}

impl ReportSchema {
    /// Layout matching the default balance sheet tags
    pub fn default_balance_sheet() -> Self {
        use Formatter::*;

        SchemaBuilder::new()
            .row("Cash", &["Assets/cash"])
            .row("Taxable Investments", &["Assets/taxable+liquid"])
            .row("Retirement", &["Assets/retirement"])
            .row("Education", &["Assets/education"])
            .row("Non-liquid", &["Assets/nonliquid"])
            .row("Real Estate", &["Assets/real estate"])
            .row("Other Assets", &["Assets/UNCLASSIFIED"])
            .styled("Total Assets", &["Assets/TOTAL"], &[Bold])
            .separator()
            .row("Credit Cards", &["Liabilities/credit card"])
            .row("Loans", &["Liabilities/loan"])
            .row("Other Liabilities", &["Liabilities/UNCLASSIFIED"])
            .styled("Total Liabilities", &["Liabilities/TOTAL"], &[Bold])
            .separator()
            .styled("Net Worth", &["Equities/TOTAL"], &[Bold, Green])
            .0
    }

    /// Layout matching the default income statement tags
    pub fn default_income_statement() -> Self {
        use Formatter::*;

        SchemaBuilder::new()
            .row("Salary", &["Revenue/Professional Income/Salary"])
            .row("RSU", &["Revenue/Professional Income/RSU"])
            .row("Employer Match", &["Revenue/Professional Income/Employer Match"])
            .row("Other Income", &["Revenue/Other Income/"])
            .styled("Total Revenue", &["Revenue/TOTAL"], &[Bold])
            .row("Taxes", &["Taxes/TOTAL"])
            .styled("Revenue Net Taxes", &["RevenueNetTaxes/TOTAL"], &[Underline])
            .separator()
            .row(
                "Housing",
                &[
                    "Expenses/Home/Mortgage Interest",
                    "Expenses/Home/Loan Fees",
                    "Expenses/Home/HOA",
                ],
            )
            .row("Food & Dining", &["Expenses/Food & Dining/"])
            .row("Kids", &["Expenses/Kids/"])
            .row("Bills & Utilities", &["Expenses/Bills & Utilities/"])
            .row("Transportation", &["Expenses/Transportation/"])
            .row("Entertainment", &["Expenses/Entertainment/"])
            .row("Shopping", &["Expenses/Shopping/"])
            .row("Communications", &["Expenses/Communications/"])
            .row("Medical", &["Expenses/Medical Exp/"])
            .row("Other Expenses", &["Expenses/Other Exp/"])
            .styled("Total Expenses", &["Expenses/TOTAL"], &[Bold, Red])
            .separator()
            .styled("Operating Income", &["OperatingIncome/TOTAL"], &[Bold])
            .row("Investments", &["Investments/TOTAL"])
            .styled("Total Earnings", &["TotalEarnings/TOTAL"], &[Bold, Green])
            .0
    }

    /// Load a custom schema from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> BookkeeperResult<Self> {
        let path = path.as_ref();
        let schema: Self = read_json_required(path).map_err(|e| {
            BookkeeperError::Config(format!("Invalid report schema {}: {}", path.display(), e))
        })?;
        schema.check_labels()?;
        Ok(schema)
    }

    /// Every non-separator label in `order` must have a mapping
    pub fn check_labels(&self) -> BookkeeperResult<()> {
        match self
            .order
            .iter()
            .find(|label| *label != SEPARATOR && !self.mapping.contains_key(*label))
        {
            Some(label) => Err(BookkeeperError::Config(format!(
                "Report schema row '{}' has no mapping",
                label
            ))),
            None => Ok(()),
        }
    }

    /// Evaluate every row against each statement, one value per statement
    pub fn build_rows<S: Statement>(&self, statements: &[S]) -> BookkeeperResult<Vec<ReportRow>> {
        self.check_labels()?;

        let mut rows = Vec::with_capacity(self.order.len());
        for label in &self.order {
            if label == SEPARATOR {
                rows.push(ReportRow::Separator);
                continue;
            }

            let paths = self.mapping.get(label).map(Vec::as_slice).unwrap_or_default();
            let values = statements
                .iter()
                .map(|statement| {
                    paths
                        .iter()
                        .map(|path| statement.amount(path))
                        .sum::<BookkeeperResult<Money>>()
                })
                .collect::<BookkeeperResult<Vec<_>>>()?;

            rows.push(ReportRow::Item {
                label: label.clone(),
                values,
                formatters: self.formatters.get(label).cloned().unwrap_or_default(),
            });
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountId, ReportPeriod, Transaction, TransactionType};
    use crate::reports::{BalanceSheet, BalanceSheetTags, IncomeStatement, IncomeStatementTags};
    use crate::services::AccountBalance;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sheet(cash: i64, card: i64) -> BalanceSheet {
        let balances = vec![
            AccountBalance {
                account: Account::with_tags("Checking", ["asset", "cash"]),
                balance: Money::from_cents(cash),
            },
            AccountBalance {
                account: Account::with_tags("Card", ["liability", "credit card"]),
                balance: Money::from_cents(card),
            },
        ];
        BalanceSheet::compute(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            &balances,
            &BalanceSheetTags::default(),
        )
    }

    fn item(rows: &[ReportRow], wanted: &str) -> Vec<i64> {
        rows.iter()
            .find_map(|row| match row {
                ReportRow::Item { label, values, .. } if label == wanted => {
                    Some(values.iter().map(|v| v.cents()).collect())
                }
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_default_balance_sheet_rows() {
        let rows = ReportSchema::default_balance_sheet()
            .build_rows(&[sheet(150000, -20000), sheet(100, 0)])
            .unwrap();

        assert_eq!(item(&rows, "Cash"), vec![150000, 100]);
        assert_eq!(item(&rows, "Credit Cards"), vec![20000, 0]);
        assert_eq!(item(&rows, "Net Worth"), vec![130000, 100]);
        assert_eq!(item(&rows, "Other Assets"), vec![0, 0]);
        assert!(rows.contains(&ReportRow::Separator));
    }

    #[test]
    fn test_default_income_statement_rows() {
        let txns = vec![
            Transaction::categorized(
                TransactionType::In,
                AccountId::new(1),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                Money::from_cents(500000),
                "Professional Income",
                "Salary",
            ),
            Transaction::categorized(
                TransactionType::Out,
                AccountId::new(1),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                Money::from_cents(-2500),
                "Hobbies",
                "Boats",
            ),
        ];
        let statement = IncomeStatement::compute(
            ReportPeriod::year(2024),
            &txns,
            &IncomeStatementTags::default(),
        );

        let rows = ReportSchema::default_income_statement()
            .build_rows(&[statement])
            .unwrap();
        assert_eq!(item(&rows, "Salary"), vec![500000]);
        assert_eq!(item(&rows, "Total Expenses"), vec![0]);
        assert_eq!(item(&rows, "Total Earnings"), vec![500000]);
    }

    #[test]
    fn test_formatters_are_attached() {
        let rows = ReportSchema::default_balance_sheet()
            .build_rows(&[sheet(1, 0)])
            .unwrap();
        let styled = rows.iter().find_map(|row| match row {
            ReportRow::Item { label, formatters, .. } if label == "Net Worth" => Some(formatters.clone()),
            _ => None,
        });
        assert_eq!(styled, Some(vec![Formatter::Bold, Formatter::Green]));
    }

    #[test]
    fn test_missing_mapping_is_a_config_error() {
        let mut schema = ReportSchema::default_balance_sheet();
        schema.order.push("Mystery".into());

        let err = schema.build_rows(&[sheet(1, 0)]).unwrap_err();
        assert!(matches!(err, BookkeeperError::Config(ref m) if m.contains("Mystery")));
    }

    #[test]
    fn test_bad_path_is_field_not_found() {
        let mut schema = ReportSchema::default_balance_sheet();
        schema
            .mapping
            .insert("Cash".into(), vec!["Assets/savings".into()]);

        let err = schema.build_rows(&[sheet(1, 0)]).unwrap_err();
        assert!(matches!(err, BookkeeperError::ReportFieldNotFound { ref field } if field == "Assets/savings"));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"order": ["Cash", "-", "Worth"],
                "mapping": {{"Cash": ["Assets/cash"], "Worth": ["Equities/TOTAL"]}},
                "formatters": {{"Worth": ["bold", "yellow"]}}}}"#
        )
        .unwrap();

        let schema = ReportSchema::from_file(file.path()).unwrap();
        assert_eq!(schema.order.len(), 3);
        assert_eq!(schema.formatters["Worth"], vec![Formatter::Bold, Formatter::Yellow]);

        let mut bad = NamedTempFile::new().unwrap();
        write!(bad, r#"{{"order": ["Cash"], "mapping": {{}}}}"#).unwrap();
        assert!(matches!(
            ReportSchema::from_file(bad.path()),
            Err(BookkeeperError::Config(_))
        ));
    }
}
