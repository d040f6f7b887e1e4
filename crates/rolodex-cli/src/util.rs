use anyhow::Result;
use chrono::NaiveDate;
use rolodex_core::domain::{parse_birthday, BIRTHDAY_FORMAT};
use rolodex_core::rules::validate_window_days;

use crate::error::invalid_input;

/// Dates on the command line use the same `DD.MM.YYYY` form as birthdays.
pub fn parse_day(raw: &str) -> Result<NaiveDate> {
    parse_birthday(raw).map_err(|_| invalid_input("invalid date: expected DD.MM.YYYY"))
}

pub fn parse_window_days(raw: Option<i64>, fallback: u32) -> Result<u32> {
    match raw {
        Some(days) => Ok(validate_window_days(days)?),
        None => Ok(fallback),
    }
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(BIRTHDAY_FORMAT).to_string()
}
