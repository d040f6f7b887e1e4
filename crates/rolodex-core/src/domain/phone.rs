use crate::error::CoreError;
use std::fmt;

const PHONE_DIGITS: usize = 10;

/// A phone number kept exactly as entered, compared by its ten digits.
#[derive(Debug, Clone, Eq)]
pub struct Phone {
    raw: String,
    digits: String,
}

impl Phone {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let digits = normalize_phone(raw)?;
        Ok(Self {
            raw: raw.trim().to_string(),
            digits,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl PartialEq for Phone {
    fn eq(&self, other: &Self) -> bool {
        self.digits == other.digits
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Strips phone punctuation and returns the bare digits. Anything other than
/// digits, spaces, parentheses and hyphens is rejected rather than dropped.
pub fn normalize_phone(value: &str) -> Result<String, CoreError> {
    let mut out = String::with_capacity(PHONE_DIGITS);
    for ch in value.trim().chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
            continue;
        }
        if !matches!(ch, ' ' | '(' | ')' | '-') {
            return Err(CoreError::InvalidPhone);
        }
    }

    if out.len() != PHONE_DIGITS {
        return Err(CoreError::InvalidPhone);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{normalize_phone, Phone};
    use crate::error::CoreError;

    #[test]
    fn normalize_phone_strips_formatting() {
        assert_eq!(normalize_phone("(111) 222-3344").unwrap(), "1112223344");
        assert_eq!(normalize_phone("(111) 222 33-44").unwrap(), "1112223344");
        assert_eq!(normalize_phone("  1112223344 ").unwrap(), "1112223344");
    }

    #[test]
    fn normalize_phone_rejects_letters() {
        assert_eq!(normalize_phone("111222334a"), Err(CoreError::InvalidPhone));
        assert_eq!(normalize_phone("11122x33445"), Err(CoreError::InvalidPhone));
    }

    #[test]
    fn normalize_phone_rejects_other_punctuation() {
        assert_eq!(normalize_phone("+1112223344"), Err(CoreError::InvalidPhone));
        assert_eq!(normalize_phone("111.222.3344"), Err(CoreError::InvalidPhone));
    }

    #[test]
    fn normalize_phone_requires_ten_digits() {
        assert_eq!(normalize_phone("123456789"), Err(CoreError::InvalidPhone));
        assert_eq!(normalize_phone("12345678901"), Err(CoreError::InvalidPhone));
        assert_eq!(normalize_phone("   "), Err(CoreError::InvalidPhone));
    }

    #[test]
    fn phones_compare_by_digits() {
        let formatted = Phone::parse("(111) 222-3344").unwrap();
        let bare = Phone::parse("1112223344").unwrap();
        assert_eq!(formatted, bare);
        assert_eq!(formatted.as_str(), "(111) 222-3344");
        assert_eq!(bare.digits(), "1112223344");
    }
}
