//! Transaction display formatting
//!
//! Register tables and detail views for transactions.

use std::collections::HashMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Account, AccountId, Transaction};

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

/// Look up account names by id for display
pub fn account_names(accounts: &[Account]) -> HashMap<AccountId, String> {
    accounts.iter().map(|a| (a.id, a.name.clone())).collect()
}

fn category_label(txn: &Transaction) -> String {
    if txn.kind.is_categorized() {
        txn.category_path()
    } else if txn.is_transfer() {
        format!("<{}>", txn.association_id)
    } else {
        String::new()
    }
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    transactions: &[Transaction],
    names: &HashMap<AccountId, String>,
    symbol: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|txn| RegisterRow {
        id: txn.id.to_string(),
        date: txn.date.format("%Y/%m/%d").to_string(),
        kind: txn.kind.as_str(),
        account: names
            .get(&txn.account_id)
            .cloned()
            .unwrap_or_else(|| txn.account_id.to_string()),
        category: category_label(txn),
        amount: txn.amount.format_accounting(symbol),
        notes: txn.notes.clone(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .modify(Columns::single(5), Alignment::right());
    table.to_string()
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, account_name: &str, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y/%m/%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Account:     {}\n", account_name));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_accounting(symbol)));

    if txn.kind.is_categorized() {
        output.push_str(&format!("Category:    {}\n", txn.category));
        output.push_str(&format!("Subcategory: {}\n", txn.sub_category));
    }
    if !txn.association_id.is_empty() {
        output.push_str(&format!("Association: {}\n", txn.association_id));
    }
    if !txn.notes.is_empty() {
        output.push_str(&format!("Notes:       {}\n", txn.notes));
    }

    output
}
