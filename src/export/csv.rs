//! CSV Export functionality
//!
//! Exports transactions, accounts and statement tables to CSV. Amounts are
//! written as decimal strings ("-45.12"), never as floats.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{Account, AccountId, Money, Transaction};
use crate::reports::ReportRow;

fn export_err(e: impl std::fmt::Display) -> BookkeeperError {
    BookkeeperError::Export(e.to_string())
}

/// Format cents as a plain decimal string
pub fn decimal(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}{}.{:02}", sign, amount.dollars().abs(), amount.cents_part())
}

/// Export transactions to CSV
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    names: &HashMap<AccountId, String>,
    writer: W,
) -> BookkeeperResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "ID",
        "Date",
        "Type",
        "Account",
        "Category",
        "Subcategory",
        "Amount",
        "Notes",
        "Association ID",
    ])
    .map_err(export_err)?;

    for txn in transactions {
        let account = names
            .get(&txn.account_id)
            .cloned()
            .unwrap_or_else(|| txn.account_id.to_string());
        csv.write_record([
            txn.id.to_string(),
            txn.date.format("%Y/%m/%d").to_string(),
            txn.kind.to_string(),
            account,
            txn.category.clone(),
            txn.sub_category.clone(),
            decimal(txn.amount),
            txn.notes.clone(),
            txn.association_id.clone(),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)
}

/// Export accounts to CSV
pub fn export_accounts_csv<W: Write>(accounts: &[Account], writer: W) -> BookkeeperResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Name", "Description", "Tags"])
        .map_err(export_err)?;

    for account in accounts {
        csv.write_record([
            account.id.to_string(),
            account.name.clone(),
            account.description.clone(),
            account.tags.join(";"),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)
}

/// Export statement rows with one column per heading
///
/// Separator rows are written as empty records.
pub fn export_statement_csv<W: Write>(
    headings: &[String],
    rows: &[ReportRow],
    writer: W,
) -> BookkeeperResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec![String::from("Item")];
    header.extend(headings.iter().cloned());
    csv.write_record(&header).map_err(export_err)?;

    for row in rows {
        let record: Vec<String> = match row {
            ReportRow::Separator => vec![String::new(); header.len()],
            ReportRow::Item { label, values, .. } => std::iter::once(label.clone())
                .chain(values.iter().map(|v| decimal(*v)))
                .collect(),
        };
        csv.write_record(&record).map_err(export_err)?;
    }

    csv.flush().map_err(export_err)
}
