//! Calendar-date helpers for expiry dates.
//!
//! Expiry dates carry no time component and are compared as local calendar
//! dates. The only accepted textual form is `YYYY-MM-DD`.

use chrono::{Datelike, Days, Months, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses `YYYY-MM-DD` with exactly four year digits and two month/day digits.
///
/// Returns `None` for any other shape (`2026-3-1`, `2026/03/01`, trailing time)
/// and for impossible dates such as `2026-02-30`.
pub fn parse_strict(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX)
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests;
