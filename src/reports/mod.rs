//! Reports module for Bookkeeper
//!
//! Financial statements (balance sheet and income statement), the named
//! field access used to address their amounts, and the schemas that lay
//! them out as tables.

pub mod balance_sheet;
pub mod fields;
pub mod group;
pub mod income_statement;
pub mod matching;
pub mod schema;

pub use balance_sheet::{BalanceSheet, BalanceSheetTags};
pub use fields::{Statement, StatementField, TOTAL, UNCLASSIFIED};
pub use group::ReportGroup;
pub use income_statement::{IncomeStatement, IncomeStatementTags};
pub use matching::{has_all_tags, matches_prefix};
pub use schema::{Formatter, ReportRow, ReportSchema, SEPARATOR};
