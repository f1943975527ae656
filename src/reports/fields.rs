//! Named access to statement amounts
//!
//! Report schemas address amounts as `Field/Subfield`, e.g. `Assets/cash`,
//! `Assets/TOTAL` or `Equities/TOTAL`. Each statement type exposes a fixed
//! table of fields.

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::Money;

use super::group::ReportGroup;

/// Subfield selecting a group's total, or a scalar's value
pub const TOTAL: &str = "TOTAL";

/// Subfield selecting the part of a group's total no pattern matched
pub const UNCLASSIFIED: &str = "UNCLASSIFIED";

/// A top-level statement field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementField<'a> {
    Group(&'a ReportGroup),
    Scalar(Money),
}

/// A financial statement whose amounts can be looked up by name
pub trait Statement {
    /// Column heading for this statement (its date or period)
    fn label(&self) -> String;

    /// Names accepted by `field`, in display order
    fn field_names(&self) -> &'static [&'static str];

    fn field(&self, name: &str) -> Option<StatementField<'_>>;

    /// Resolve a `Field/Subfield` path to an amount
    ///
    /// Only the first `/` separates field from subfield, so category
    /// patterns such as `Expenses/Food & Dining/` work as subfields.
    fn amount(&self, path: &str) -> BookkeeperResult<Money> {
        let not_found = || BookkeeperError::ReportFieldNotFound {
            field: path.to_string(),
        };

        let (name, sub) = path.split_once('/').ok_or_else(not_found)?;
        match self.field(name).ok_or_else(not_found)? {
            StatementField::Group(group) => match sub {
                TOTAL => Ok(group.total),
                UNCLASSIFIED => Ok(group.remainder()),
                pattern => group.subtotal(pattern).ok_or_else(not_found),
            },
            StatementField::Scalar(value) if sub == TOTAL => Ok(value),
            StatementField::Scalar(_) => Err(not_found()),
        }
    }
}
