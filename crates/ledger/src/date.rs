//! Transaction date handling.
//!
//! The picker produces local wall-clock strings (`2024-03-09 18:30`); the
//! service takes local date-times with no offset, so [`NaiveDateTime`] is used
//! throughout.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::{LedgerError, ResultLedger};

const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parses a transaction date; a bare `YYYY-MM-DD` means midnight.
pub fn parse_transaction_date(input: &str) -> ResultLedger<NaiveDateTime> {
    let trimmed = input.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| LedgerError::InvalidDate(trimmed.to_string()))
}

/// Formats a date the way the picker displays it.
pub fn format_transaction_date(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

/// Splits a date-time into `[year, month, day, hour, minute, second]`.
pub fn date_parts(date: &NaiveDateTime) -> [i32; 6] {
    [
        date.year(),
        date.month() as i32,
        date.day() as i32,
        date.hour() as i32,
        date.minute() as i32,
        date.second() as i32,
    ]
}

/// First and last calendar day of `month` (1-12) in `year`.
pub fn month_range(year: i32, month: u32) -> ResultLedger<(NaiveDate, NaiveDate)> {
    let invalid = || LedgerError::InvalidDate(format!("{year}-{month:02}"));
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    let end = next.pred_opt().ok_or_else(invalid)?;
    Ok((start, end))
}
