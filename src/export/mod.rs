//! Export module for Bookkeeper
//!
//! - CSV: transactions, accounts and statement tables (spreadsheet-compatible)
//! - JSON: full ledger export and machine-readable reports
//! - YAML: human-readable ledger export and reports

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{decimal, export_accounts_csv, export_statement_csv, export_transactions_csv};
pub use json::{export_full_json, export_value_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, export_value_yaml, import_from_yaml};
