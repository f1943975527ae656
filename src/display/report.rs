//! Report formatting for terminal output
//!
//! Statement tables (one column per statement) and account balance lists.

use tabled::builder::Builder;
use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Alignment, Style};

use crate::models::Money;
use crate::reports::{Formatter, ReportRow};
use crate::services::AccountBalance;

const RESET: &str = "\x1b[0m";

fn ansi_code(formatter: Formatter) -> &'static str {
    match formatter {
        Formatter::Bold => "\x1b[1m",
        Formatter::Underline => "\x1b[4m",
        Formatter::Green => "\x1b[32m",
        Formatter::Red => "\x1b[31m",
        Formatter::Yellow => "\x1b[33m",
    }
}

/// Wrap text in the ANSI codes for `formatters`
pub fn paint(text: &str, formatters: &[Formatter]) -> String {
    if formatters.is_empty() || text.is_empty() {
        return text.to_string();
    }
    let codes: String = formatters.iter().map(|f| ansi_code(*f)).collect();
    format!("{}{}{}", codes, text, RESET)
}

/// Format a money amount in red when negative
pub fn format_money_colored(amount: Money, symbol: &str) -> String {
    let text = amount.format_accounting(symbol);
    if amount.is_negative() {
        paint(&text, &[Formatter::Red])
    } else {
        text
    }
}

/// Render statement rows as a table with one column per heading
///
/// With `color` off, row formatters are ignored.
pub fn format_statement_table(
    headings: &[String],
    rows: &[ReportRow],
    symbol: &str,
    color: bool,
) -> String {
    let mut builder = Builder::default();

    let mut header = vec![String::new()];
    header.extend(headings.iter().cloned());
    builder.push_record(header);

    for row in rows {
        match row {
            ReportRow::Separator => {
                builder.push_record(vec![String::new(); headings.len() + 1]);
            }
            ReportRow::Item {
                label,
                values,
                formatters,
            } => {
                let style: &[Formatter] = if color { formatters } else { &[] };
                let mut record = vec![paint(label, style)];
                record.extend(
                    values
                        .iter()
                        .map(|v| paint(&v.format_accounting(symbol), style)),
                );
                builder.push_record(record);
            }
        }
    }

    let mut table = builder.build();
    table
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right())
        .modify(Rows::first(), Alignment::center());
    table.to_string()
}

/// Format account balances as of a date, with a net total
///
/// With `color` on, negative balances are shown in red.
pub fn format_balance_list(balances: &[AccountBalance], symbol: &str, color: bool) -> String {
    if balances.is_empty() {
        return "No accounts found.".to_string();
    }

    let money = |amount: Money| {
        if color {
            format_money_colored(amount, symbol)
        } else {
            amount.format_accounting(symbol)
        }
    };

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Tags", "Balance"]);
    for entry in balances {
        builder.push_record([
            entry.account.id.to_string(),
            entry.account.name.clone(),
            entry.account.tags.join(", "),
            money(entry.balance),
        ]);
    }
    let total: Money = balances.iter().map(|b| b.balance).sum();
    builder.push_record([
        String::new(),
        "TOTAL".to_string(),
        String::new(),
        money(total),
    ]);

    let mut table = builder.build();
    table
        .with(Style::sharp())
        .modify(Columns::last(), Alignment::right());
    table.to_string()
}
