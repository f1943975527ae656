//! Display formatting for terminal output
//!
//! Tables and detail views for accounts, transactions and reports, built
//! with `tabled`.

pub mod account;
pub mod report;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use report::{format_balance_list, format_money_colored, format_statement_table, paint};
pub use transaction::{account_names, format_transaction_details, format_transaction_register};
