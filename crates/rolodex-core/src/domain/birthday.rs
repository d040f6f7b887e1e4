use crate::error::CoreError;
use crate::rules::birthdays::next_occurrence;
use chrono::NaiveDate;
use std::fmt;

pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Birthday(NaiveDate);

impl Birthday {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        parse_birthday(raw).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The first occurrence of this birthday on or after `reference`.
    pub fn next_after(&self, reference: NaiveDate) -> Option<NaiveDate> {
        next_occurrence(self.0, reference)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(BIRTHDAY_FORMAT))
    }
}

/// Parses a strict `DD.MM.YYYY` date.
pub fn parse_birthday(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim();
    if !has_birthday_shape(trimmed) {
        return Err(CoreError::InvalidBirthday);
    }
    NaiveDate::parse_from_str(trimmed, BIRTHDAY_FORMAT).map_err(|_| CoreError::InvalidBirthday)
}

fn has_birthday_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            2 | 5 => *byte == b'.',
            _ => byte.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::{parse_birthday, Birthday};
    use crate::error::CoreError;
    use chrono::NaiveDate;

    #[test]
    fn parse_birthday_accepts_day_month_year() {
        let date = parse_birthday("29.06.1990").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1990, 6, 29).unwrap());
    }

    #[test]
    fn parse_birthday_rejects_impossible_dates() {
        assert_eq!(parse_birthday("30.02.2001"), Err(CoreError::InvalidBirthday));
        assert_eq!(parse_birthday("29.02.2001"), Err(CoreError::InvalidBirthday));
        assert_eq!(parse_birthday("31.13.2001"), Err(CoreError::InvalidBirthday));
        assert!(parse_birthday("29.02.2000").is_ok());
    }

    #[test]
    fn parse_birthday_requires_exact_shape() {
        for raw in ["1.6.1990", "1990-06-29", "29/06/1990", "29.06.90", "", "29.06.1990x"] {
            assert_eq!(parse_birthday(raw), Err(CoreError::InvalidBirthday), "{raw}");
        }
    }

    #[test]
    fn birthday_renders_back_in_input_format() {
        let birthday = Birthday::parse(" 01.07.2002 ").unwrap();
        assert_eq!(birthday.to_string(), "01.07.2002");
        assert_eq!(birthday.date(), NaiveDate::from_ymd_opt(2002, 7, 1).unwrap());
    }
}
