//! Report period representation
//!
//! Income statements cover a closed date range. Ranges can be given as a
//! whole year, half, quarter or month, or as explicit start and end dates.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accepted calendar date layouts, tried in order
pub const DATE_FORMATS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];

/// Parse a calendar date written as `YYYY/MM/DD` or `YYYY-MM-DD`
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// A closed date range for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ReportPeriod {
    /// Calendar year (e.g., "2024")
    Year { year: i32 },

    /// Half year, 1 or 2 (e.g., "2024H1")
    Half { year: i32, half: u32 },

    /// Quarter, 1 to 4 (e.g., "2024Q3")
    Quarter { year: i32, quarter: u32 },

    /// Calendar month (e.g., "2024/03")
    Month { year: i32, month: u32 },

    /// Explicit range (e.g., "2024/01/01-2024/01/15")
    Custom { start: NaiveDate, end: NaiveDate },
}

impl ReportPeriod {
    pub fn year(year: i32) -> Self {
        Self::Year { year }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self::Month { year, month }
    }

    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self::Custom { start, end }
    }

    /// Current calendar year
    pub fn current_year() -> Self {
        Self::Year {
            year: chrono::Local::now().date_naive().year(),
        }
    }

    /// First month and number of months covered by a calendar-aligned period
    fn month_span(&self) -> Option<(i32, u32, u32)> {
        match *self {
            Self::Year { year } => Some((year, 1, 12)),
            Self::Half { year, half } => Some((year, (half - 1) * 6 + 1, 6)),
            Self::Quarter { year, quarter } => Some((year, (quarter - 1) * 3 + 1, 3)),
            Self::Month { year, month } => Some((year, month, 1)),
            Self::Custom { .. } => None,
        }
    }

    /// First day of the period
    pub fn start_date(&self) -> NaiveDate {
        match *self {
            Self::Custom { start, .. } => start,
            _ => {
                let (year, month, _) = self.month_span().unwrap_or((1970, 1, 1));
                NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
            }
        }
    }

    /// Last day of the period (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        match *self {
            Self::Custom { end, .. } => end,
            _ => {
                let (year, month, count) = self.month_span().unwrap_or((1970, 1, 1));
                let last = month + count - 1;
                let next_start = if last == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, last + 1, 1)
                };
                next_start
                    .map(|d| d - Duration::days(1))
                    .unwrap_or(NaiveDate::MAX)
            }
        }
    }

    /// Check if a date falls within this period, both ends included
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Year: "2024"
    /// - Half: "2024H1"
    /// - Quarter: "2024Q3"
    /// - Month: "2024/03" or "2024-03"
    /// - Custom: "2024/01/01-2024/03/31" or "2024-01-01..2024-03-31"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        if let Some((start, end)) = split_range(s) {
            let start = parse_date(start).ok_or_else(invalid)?;
            let end = parse_date(end).ok_or_else(invalid)?;
            if end < start {
                return Err(PeriodParseError::EndBeforeStart(s.to_string()));
            }
            return Ok(Self::Custom { start, end });
        }

        let upper = s.to_ascii_uppercase();
        for (marker, max) in [('Q', 4), ('H', 2)] {
            if let Some((year, n)) = upper.split_once(marker) {
                let year: i32 = parse_year(year).ok_or_else(invalid)?;
                let n: u32 = n.parse().map_err(|_| invalid())?;
                if n == 0 || n > max {
                    return Err(PeriodParseError::OutOfRange(s.to_string()));
                }
                return Ok(if marker == 'Q' {
                    Self::Quarter { year, quarter: n }
                } else {
                    Self::Half { year, half: n }
                });
            }
        }

        if let Some((year, month)) = s.split_once(['/', '-']) {
            let year = parse_year(year).ok_or_else(invalid)?;
            let month: u32 = month.parse().map_err(|_| invalid())?;
            if !(1..=12).contains(&month) {
                return Err(PeriodParseError::OutOfRange(s.to_string()));
            }
            return Ok(Self::Month { year, month });
        }

        parse_year(s).map(Self::year).ok_or_else(invalid)
    }
}

/// Split "A-B" (slash dates) or "A..B" into its two dates
fn split_range(s: &str) -> Option<(&str, &str)> {
    if let Some(parts) = s.split_once("..") {
        return Some(parts);
    }
    // A dash separates the two dates only when the dates themselves use slashes
    if s.contains('/') {
        return s.split_once('-');
    }
    None
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year { year } => write!(f, "{}", year),
            Self::Half { year, half } => write!(f, "{}H{}", year, half),
            Self::Quarter { year, quarter } => write!(f, "{}Q{}", year, quarter),
            Self::Month { year, month } => write!(f, "{}/{:02}", year, month),
            Self::Custom { start, end } => write!(
                f,
                "{}-{}",
                start.format("%Y/%m/%d"),
                end.format("%Y/%m/%d")
            ),
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    OutOfRange(String),
    EndBeforeStart(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            Self::OutOfRange(s) => write!(f, "Period component out of range: {}", s),
            Self::EndBeforeStart(s) => write!(f, "Period ends before it starts: {}", s),
        }
    }
}

impl std::error::Error for PeriodParseError {}
