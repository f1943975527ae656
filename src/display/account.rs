//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Account, Money};

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Class")]
    class: &'static str,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn class_of(account: &Account) -> &'static str {
    match (account.is_asset(), account.is_liability()) {
        (true, true) => "both",
        (true, false) => "asset",
        (false, true) => "liability",
        (false, false) => "",
    }
}

/// Format a list of accounts as a table
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let rows = accounts.iter().map(|a| AccountRow {
        id: a.id.to_string(),
        name: a.name.clone(),
        class: class_of(a),
        tags: a.tags.join(", "),
        description: a.description.clone(),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

/// Format a single account's details
pub fn format_account_details(
    account: &Account,
    balance: Money,
    transaction_count: usize,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  ID:           {}\n", account.id));
    if !account.description.is_empty() {
        output.push_str(&format!("  Description:  {}\n", account.description));
    }
    output.push_str(&format!(
        "  Tags:         {}\n",
        if account.tags.is_empty() {
            "(none)".to_string()
        } else {
            account.tags.join(", ")
        }
    ));
    if !class_of(account).is_empty() {
        output.push_str(&format!("  Class:        {}\n", class_of(account)));
    }
    output.push('\n');
    output.push_str(&format!(
        "  Balance:      {}\n",
        balance.format_accounting(symbol)
    ));
    output.push_str(&format!("  Transactions: {}\n", transaction_count));

    output
}
