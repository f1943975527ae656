//! Transaction filters and free-text query translation
//!
//! Stores take a structured `TransactionFilter`. Free text typed by the user
//! goes through a `QueryTranslator` first; `ShorthandQuery` understands a few
//! common phrases and is meant to be swapped for a richer grammar.

use chrono::{Duration, NaiveDate};

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{parse_date, AccountId, ReportPeriod, Transaction};

/// Criteria for listing transactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Earliest date, inclusive
    pub start: Option<NaiveDate>,
    /// Latest date, inclusive
    pub end: Option<NaiveDate>,
    pub account_id: Option<AccountId>,
    /// Resolved to an id by the store
    pub account_name: Option<String>,
    /// Keep at most this many of the most recent matches
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// A filter that matches every transaction
    pub fn all() -> Self {
        Self::default()
    }

    /// Transactions dated within `start..=end`
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    /// Transactions dated on or before `cutoff`
    pub fn up_to(cutoff: NaiveDate) -> Self {
        Self {
            end: Some(cutoff),
            ..Self::default()
        }
    }

    pub fn for_account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn for_account_name(mut self, name: impl Into<String>) -> Self {
        self.account_name = Some(name.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check the date and account id criteria (the name must already be resolved)
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.start.map_or(true, |start| txn.date >= start)
            && self.end.map_or(true, |end| txn.date <= end)
            && self.account_id.map_or(true, |id| txn.account_id == id)
    }
}

/// Turns free text into a structured filter
pub trait QueryTranslator {
    fn translate(&self, text: &str, today: NaiveDate) -> BookkeeperResult<TransactionFilter>;
}

/// Default translator for short phrases
///
/// Understood forms, each optionally followed by `on <account name>`:
/// - `past week` (the last seven days including today)
/// - `last week` (the seven days before that)
/// - `past N days`
/// - a report period such as `2024`, `2024Q1`, `2024H2`, `2024/03`
/// - `date>=YYYY/MM/DD AND date<=YYYY/MM/DD` (either bound may be left out)
#[derive(Debug, Clone, Copy, Default)]
pub struct ShorthandQuery;

impl ShorthandQuery {
    fn date_range(&self, text: &str, today: NaiveDate) -> BookkeeperResult<TransactionFilter> {
        let lower = text.to_ascii_lowercase();

        if lower.is_empty() {
            return Ok(TransactionFilter::all());
        }
        if lower == "past week" {
            return past_days(today, 7);
        }
        if lower == "last week" {
            let end = today - Duration::days(7);
            return Ok(TransactionFilter::between(end - Duration::days(6), end));
        }
        if let Some(days) = parse_past_days(&lower) {
            return past_days(today, days);
        }
        if lower.starts_with("date") {
            return parse_bounds(text);
        }
        if let Ok(period) = ReportPeriod::parse(text) {
            return Ok(TransactionFilter::between(period.start_date(), period.end_date()));
        }

        Err(BookkeeperError::Validation(format!(
            "Unrecognized query '{}'",
            text
        )))
    }
}

impl QueryTranslator for ShorthandQuery {
    fn translate(&self, text: &str, today: NaiveDate) -> BookkeeperResult<TransactionFilter> {
        let text = text.trim();
        let (range, account) = split_account(text);

        let filter = self.date_range(range.trim(), today)?;
        Ok(match account {
            Some(name) => filter.for_account_name(name),
            None => filter,
        })
    }
}

/// Split off a trailing ` on <account>` clause
fn split_account(text: &str) -> (&str, Option<&str>) {
    if let Some(name) = text.strip_prefix("on ") {
        return ("", Some(name.trim()).filter(|n| !n.is_empty()));
    }
    match text.split_once(" on ") {
        Some((range, name)) if !name.trim().is_empty() => (range, Some(name.trim())),
        _ => (text, None),
    }
}

fn past_days(today: NaiveDate, days: i64) -> BookkeeperResult<TransactionFilter> {
    let start = Duration::try_days(days - 1)
        .and_then(|span| today.checked_sub_signed(span))
        .ok_or_else(|| {
            BookkeeperError::Validation(format!(
                "'past {} days' reaches before the earliest supported date",
                days
            ))
        })?;
    Ok(TransactionFilter::between(start, today))
}

/// "past 10 days", "past 1 day", "past10days"
fn parse_past_days(lower: &str) -> Option<i64> {
    let rest = lower.strip_prefix("past")?.trim_start();
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let unit = rest[digits.len()..].trim();
    if digits.is_empty() || !(unit == "day" || unit == "days") {
        return None;
    }
    // Too many digits for an i64 is still a day count, just an unusable one
    Some(digits.parse().unwrap_or(i64::MAX)).filter(|n| *n > 0)
}

fn parse_bounds(text: &str) -> BookkeeperResult<TransactionFilter> {
    let invalid = |clause: &str| {
        BookkeeperError::Validation(format!("Invalid date clause '{}'", clause.trim()))
    };

    let mut filter = TransactionFilter::all();
    for clause in text.split(" AND ").flat_map(|c| c.split(" and ")) {
        let clause = clause.trim();
        if let Some(value) = clause.strip_prefix("date>=") {
            filter.start = Some(parse_date(value).ok_or_else(|| invalid(clause))?);
        } else if let Some(value) = clause.strip_prefix("date<=") {
            filter.end = Some(parse_date(value).ok_or_else(|| invalid(clause))?);
        } else {
            return Err(invalid(clause));
        }
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn translate(text: &str) -> TransactionFilter {
        ShorthandQuery.translate(text, date(2024, 3, 15)).unwrap()
    }

    #[test]
    fn test_past_and_last_week() {
        assert_eq!(
            translate("past week"),
            TransactionFilter::between(date(2024, 3, 9), date(2024, 3, 15))
        );
        assert_eq!(
            translate("last week"),
            TransactionFilter::between(date(2024, 3, 2), date(2024, 3, 8))
        );
    }

    #[test]
    fn test_past_n_days() {
        assert_eq!(
            translate("past 3 days"),
            TransactionFilter::between(date(2024, 3, 13), date(2024, 3, 15))
        );
        assert_eq!(
            translate("past 1 day"),
            TransactionFilter::between(date(2024, 3, 15), date(2024, 3, 15))
        );
    }

    #[test]
    fn test_oversized_day_count_is_rejected() {
        let oversized = [
            "past 100000000 days",
            "past 999999999999999 days",
            "past 99999999999999999999999 days",
        ];
        for text in oversized {
            let err = ShorthandQuery.translate(text, date(2024, 3, 15)).unwrap_err();
            assert!(err.is_validation(), "{}", text);
        }

        let far = translate("past 1000000 days");
        assert_eq!(far.end, Some(date(2024, 3, 15)));
        assert!(far.start.unwrap().year() < 0);
    }

    #[test]
    fn test_account_suffix() {
        let filter = translate("past week on Chase Checking");
        assert_eq!(filter.account_name.as_deref(), Some("Chase Checking"));
        assert_eq!(filter.start, Some(date(2024, 3, 9)));

        let only_account = translate("on Savings");
        assert_eq!(only_account.account_name.as_deref(), Some("Savings"));
        assert_eq!(only_account.start, None);
    }

    #[test]
    fn test_periods_and_bounds() {
        assert_eq!(
            translate("2024Q1"),
            TransactionFilter::between(date(2024, 1, 1), date(2024, 3, 31))
        );

        let bounded = translate("date>=2024/01/05 AND date<=2024/02/01");
        assert_eq!(bounded, TransactionFilter::between(date(2024, 1, 5), date(2024, 2, 1)));

        let open = translate("date>=2024-01-05");
        assert_eq!(open.start, Some(date(2024, 1, 5)));
        assert_eq!(open.end, None);
    }

    #[test]
    fn test_unrecognized_query_is_rejected() {
        let err = ShorthandQuery
            .translate("since forever", date(2024, 3, 15))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_filter_matches() {
        use crate::models::{Money, TransactionType};

        let txn = Transaction::new(
            TransactionType::BalanceChange,
            AccountId::new(3),
            date(2024, 3, 1),
            Money::from_cents(10),
        );
        assert!(TransactionFilter::up_to(date(2024, 3, 1)).matches(&txn));
        assert!(!TransactionFilter::up_to(date(2024, 2, 29)).matches(&txn));
        assert!(!TransactionFilter::all().for_account(AccountId::new(4)).matches(&txn));
    }
}
