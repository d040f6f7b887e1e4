use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Resolves `month`/`day` inside `year`. A Feb 29 birthday falls back to
/// Feb 28 when `year` is not a leap year.
pub fn anniversary_in(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if month == 2 && day == 29 && !is_leap_year(year) {
        return NaiveDate::from_ymd_opt(year, 2, 28);
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Next occurrence of `birthday` on or after `reference`. A birthday that
/// falls on `reference` itself is returned unchanged.
pub fn next_occurrence(birthday: NaiveDate, reference: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary_in(reference.year(), birthday.month(), birthday.day())?;
    if this_year >= reference {
        return Some(this_year);
    }
    anniversary_in(reference.year() + 1, birthday.month(), birthday.day())
}

/// Moves Saturday and Sunday onto the following Monday.
pub fn shift_off_weekend(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.checked_add_days(Days::new(2)),
        Weekday::Sun => date.checked_add_days(Days::new(1)),
        _ => Some(date),
    }
}

/// The day to congratulate on, if `next_birthday` lies within `window_days`
/// of `today` (both ends inclusive).
pub fn congratulation_date(
    next_birthday: NaiveDate,
    today: NaiveDate,
    window_days: u32,
) -> Option<NaiveDate> {
    let ahead = (next_birthday - today).num_days();
    if !(0..=i64::from(window_days)).contains(&ahead) {
        return None;
    }
    shift_off_weekend(next_birthday)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
