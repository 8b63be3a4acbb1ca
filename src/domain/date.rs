//! Calendar arithmetic for lifecycle dates
//!
//! Month and year arithmetic normalizes overflowing days forward, so adding one
//! month to January 31st lands on March 3rd (or 2nd in leap years) rather than being
//! clamped to the end of February. Historic catalog dates were computed this way.

use crate::error::{PublishError, Result};
use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;
use std::fmt;

/// Textual date format used in metadata and by the catalog
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Grammar of a complete offset expression
pub const OFFSET_GRAMMAR: &str = r"^(\+\d+[yYmMdD])+$";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PublishError::date("Cannot parse an empty date"));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| PublishError::date(format!("Invalid date '{}': {}", value, e)))
}

pub fn is_date(value: &str) -> bool {
    parse_date(value).is_ok()
}

/// Shift a date by whole years, months and days, normalizing like the catalog does
pub fn add_date(date: NaiveDate, years: u32, months: u32, days: u32) -> Result<NaiveDate> {
    let total_months =
        i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(years) * 12 + i64::from(months);
    let year = i32::try_from(total_months.div_euclid(12))
        .map_err(|_| PublishError::date(format!("Date out of range: {} + {} months", date, months)))?;
    let month = total_months.rem_euclid(12) as u32 + 1;

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(date.day() - 1) + u64::from(days))))
        .ok_or_else(|| {
            PublishError::date(format!(
                "Date out of range: {} + {}y{}m{}d",
                date, years, months, days
            ))
        })
}

pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    add_date(date, 0, months, 0)
}

/// Last calendar day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> Result<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| PublishError::date(format!("Date out of range: end of month of {}", date)))
}

/// Relative date shift such as `+1y+2m+3d`
///
/// Each unit is read independently (first occurrence, case-insensitive) and the
/// three offsets are applied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetExpression {
    raw: String,
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl OffsetExpression {
    /// True when `value` matches the offset grammar
    pub fn is_valid(value: &str) -> bool {
        Regex::new(OFFSET_GRAMMAR)
            .map(|re| re.is_match(value.trim()))
            .unwrap_or(false)
    }

    pub fn parse(value: &str) -> Result<Self> {
        let raw = value.trim();
        if !Self::is_valid(raw) {
            return Err(PublishError::date(format!(
                "'{}' is not a valid offset expression",
                value
            )));
        }

        Ok(OffsetExpression {
            raw: raw.to_string(),
            years: unit_offset(raw, 'y')?,
            months: unit_offset(raw, 'm')?,
            days: unit_offset(raw, 'd')?,
        })
    }

    pub fn apply(&self, base: NaiveDate) -> Result<NaiveDate> {
        add_date(base, self.years, self.months, self.days)
    }
}

fn unit_offset(expression: &str, unit: char) -> Result<u32> {
    let re = Regex::new(&format!(r"(?i)\+(\d+){}", unit))
        .map_err(|e| PublishError::date(format!("Invalid offset pattern: {}", e)))?;
    match re.captures(expression).and_then(|c| c.get(1)) {
        Some(amount) => amount.as_str().parse::<u32>().map_err(|_| {
            PublishError::date(format!(
                "Offset amount '{}' in '{}' is too large",
                amount.as_str(),
                expression
            ))
        }),
        None => Ok(0),
    }
}

impl fmt::Display for OffsetExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
