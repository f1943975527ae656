//! Report CLI commands
//!
//! Implements CLI commands for generating reports.

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::display::report::{format_balance_list, format_statement_table};
use crate::error::{BookkeeperError, BookkeeperResult};
use crate::export::{export_statement_csv, export_value_json, export_value_yaml};
use crate::models::ReportPeriod;
use crate::reports::{
    BalanceSheet, BalanceSheetTags, IncomeStatement, IncomeStatementTags, ReportSchema, Statement,
};
use crate::services::BalanceCalculator;
use crate::storage::Storage;

use super::{output_writer, parse_date_arg, today, use_color};

/// How a statement is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Terminal table laid out by the report schema
    #[default]
    Table,
    /// The raw statements as JSON
    Json,
    /// The raw statements as YAML
    Yaml,
    /// Schema rows as CSV
    Csv,
}

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Balance sheet as of one or more dates
    Balance {
        /// Comma-separated dates (YYYY/MM/DD), one column each; defaults to today
        #[arg(short, long, value_delimiter = ',')]
        date: Vec<String>,
        /// Asset group patterns, e.g. "cash,taxable+liquid"
        #[arg(long, value_delimiter = ',')]
        asset_tags: Option<Vec<String>>,
        /// Liability group patterns
        #[arg(long, value_delimiter = ',')]
        liability_tags: Option<Vec<String>>,
        /// Report schema file (JSON) replacing the configured layout
        #[arg(long)]
        schema: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t)]
        format: ReportFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Income statement for one or more periods
    Income {
        /// Comma-separated periods: 2024, 2024H1, 2024Q3, 2024/03 or
        /// 2024/01/01..2024/03/31; defaults to the current year
        #[arg(short, long, value_delimiter = ',')]
        period: Vec<String>,
        /// Revenue category patterns, e.g. "Professional Income/Salary,Other Income/"
        #[arg(long, value_delimiter = ',')]
        revenue_tags: Option<Vec<String>>,
        #[arg(long, value_delimiter = ',')]
        taxes_tags: Option<Vec<String>>,
        #[arg(long, value_delimiter = ',')]
        expenses_tags: Option<Vec<String>>,
        #[arg(long, value_delimiter = ',')]
        investments_tags: Option<Vec<String>>,
        /// Report schema file (JSON) replacing the configured layout
        #[arg(long)]
        schema: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t)]
        format: ReportFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Balance of one account, or of every account
    AccountBalance {
        /// Account name; all accounts when omitted
        #[arg(short, long)]
        account: Option<String>,
        /// Cutoff date (YYYY/MM/DD), inclusive; defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> BookkeeperResult<()> {
    match cmd {
        ReportCommands::Balance {
            date,
            asset_tags,
            liability_tags,
            schema,
            format,
            output,
        } => {
            let dates = parse_dates(&date)?;
            let defaults = &settings.balance_sheet_tags;
            let tags = BalanceSheetTags {
                assets: asset_tags.unwrap_or_else(|| defaults.assets.clone()),
                liabilities: liability_tags.unwrap_or_else(|| defaults.liabilities.clone()),
            };
            let schema = load_schema(schema, &settings.balance_sheet_schema)?;

            let sheets = BalanceSheet::generate_many(storage, &dates, &tags)?;
            render(&sheets, &schema, settings, format, output)?;
        }

        ReportCommands::Income {
            period,
            revenue_tags,
            taxes_tags,
            expenses_tags,
            investments_tags,
            schema,
            format,
            output,
        } => {
            let periods = parse_periods(&period)?;
            let defaults = &settings.income_statement_tags;
            let tags = IncomeStatementTags {
                revenue: revenue_tags.unwrap_or_else(|| defaults.revenue.clone()),
                taxes: taxes_tags.unwrap_or_else(|| defaults.taxes.clone()),
                expenses: expenses_tags.unwrap_or_else(|| defaults.expenses.clone()),
                investments: investments_tags.unwrap_or_else(|| defaults.investments.clone()),
            };
            let schema = load_schema(schema, &settings.income_statement_schema)?;

            let statements = IncomeStatement::generate_many(storage, &periods, &tags)?;
            render(&statements, &schema, settings, format, output)?;
        }

        ReportCommands::AccountBalance { account, date } => {
            let cutoff = parse_date_arg(date.as_deref())?;
            let calculator = BalanceCalculator::new(storage);
            let balances = match account {
                Some(name) => vec![calculator.balance_by_name(&name, cutoff)?],
                None => calculator.balances_as_of(cutoff)?,
            };

            println!("Balances as of {}", settings.format_date(cutoff));
            println!(
                "{}",
                format_balance_list(&balances, &settings.currency_symbol, use_color())
            );
        }
    }

    Ok(())
}

fn parse_dates(values: &[String]) -> BookkeeperResult<Vec<NaiveDate>> {
    if values.is_empty() {
        return Ok(vec![today()]);
    }
    values
        .iter()
        .map(|value| parse_date_arg(Some(value.trim())))
        .collect()
}

fn parse_periods(values: &[String]) -> BookkeeperResult<Vec<ReportPeriod>> {
    if values.is_empty() {
        return Ok(vec![ReportPeriod::current_year()]);
    }
    values
        .iter()
        .map(|value| {
            ReportPeriod::parse(value).map_err(|e| BookkeeperError::Validation(e.to_string()))
        })
        .collect()
}

fn load_schema(path: Option<PathBuf>, configured: &ReportSchema) -> BookkeeperResult<ReportSchema> {
    match path {
        Some(path) => ReportSchema::from_file(path),
        None => {
            configured.check_labels()?;
            Ok(configured.clone())
        }
    }
}

fn render<S: Statement + serde::Serialize>(
    statements: &[S],
    schema: &ReportSchema,
    settings: &Settings,
    format: ReportFormat,
    output: Option<PathBuf>,
) -> BookkeeperResult<()> {
    let to_terminal = output.is_none();
    let mut writer = output_writer(output.as_deref())?;
    let headings: Vec<String> = statements.iter().map(|s| s.label()).collect();

    match format {
        ReportFormat::Table => {
            let rows = schema.build_rows(statements)?;
            let table = format_statement_table(
                &headings,
                &rows,
                &settings.currency_symbol,
                to_terminal && use_color(),
            );
            writeln!(writer, "{}", table)?;
        }
        ReportFormat::Csv => {
            let rows = schema.build_rows(statements)?;
            export_statement_csv(&headings, &rows, &mut writer)?;
        }
        ReportFormat::Json => export_value_json(statements, &mut writer)?,
        ReportFormat::Yaml => export_value_yaml(statements, &mut writer)?,
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_periods() {
        let periods = parse_periods(&["2024Q1".to_string(), " 2024/04 ".to_string()]).unwrap();
        assert_eq!(periods[0], ReportPeriod::Quarter { year: 2024, quarter: 1 });
        assert_eq!(periods[1], ReportPeriod::month(2024, 4));

        assert!(parse_periods(&["2024Q5".to_string()]).unwrap_err().is_validation());
        assert_eq!(parse_periods(&[]).unwrap(), vec![ReportPeriod::current_year()]);
    }

    #[test]
    fn test_parse_dates() {
        let dates = parse_dates(&["2024/03/01".to_string(), "2024-06-30".to_string()]).unwrap();
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        assert_eq!(parse_dates(&[]).unwrap(), vec![today()]);
    }
}
