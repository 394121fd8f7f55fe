//! Calendar arithmetic for range inserts.
//!
//! Dates arrive as `YYYY-MM-DD` strings. Components are taken as plain
//! integers and normalised the way a calendar rolls over: month 13 is January
//! of the next year, day 32 of January is February 1st, day 0 is the last day
//! of the previous month. Nothing here depends on a timezone.

use chrono::{NaiveDate, TimeDelta};

use crate::errors::ServiceError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build a date from possibly out-of-range components, rolling over as needed.
/// Returns `None` when the result falls outside the supported calendar.
pub fn normalized_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let months_from_jan = month.checked_sub(1)?;
    let year = year.checked_add(months_from_jan.div_euclid(12))?;
    let month = u32::try_from(months_from_jan.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
    first.checked_add_signed(TimeDelta::try_days(day.checked_sub(1)?)?)
}

/// Parse a `YYYY-MM-DD` string, normalising overflowing month/day values.
pub fn parse_date(input: &str) -> Result<NaiveDate, ServiceError> {
    let invalid = || ServiceError::Validation(format!("invalid date {input:?}"));
    let mut parts = input.trim().splitn(3, '-');
    let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let component = |s: &str| s.trim().parse::<i64>().map_err(|_| invalid());
    normalized_date(component(y)?, component(m)?, component(d)?).ok_or_else(invalid)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Every day from `from` through `to`, ascending. Empty when `from > to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    from.iter_days().take_while(move |d| *d <= to)
}

/// Expand a `fromDate`/`toDate` pair into canonical day strings.
pub fn expand_range(from: &str, to: &str) -> Result<Vec<String>, ServiceError> {
    let from = parse_date(from)?;
    let to = parse_date(to)?;
    Ok(days_between(from, to).map(format_date).collect())
}
