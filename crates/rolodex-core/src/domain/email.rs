use crate::error::CoreError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Ok(Self(normalize_email(raw)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn normalize_email(value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if !EMAIL_PATTERN.is_match(trimmed) {
        return Err(CoreError::InvalidEmail);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::normalize_email;
    use crate::error::CoreError;

    #[test]
    fn normalize_email_trims() {
        let value = normalize_email("  john@test.com ").unwrap();
        assert_eq!(value, "john@test.com");
    }

    #[test]
    fn normalize_email_accepts_subdomains_and_tags() {
        assert!(normalize_email("john.john+work@mail.example.co.uk").is_ok());
    }

    #[test]
    fn normalize_email_requires_dotted_domain() {
        assert_eq!(normalize_email("john@localhost"), Err(CoreError::InvalidEmail));
    }

    #[test]
    fn normalize_email_rejects_malformed() {
        for raw in ["", "john", "@test.com", "john@", "john@@test.com", "jo hn@test.com"] {
            assert_eq!(normalize_email(raw), Err(CoreError::InvalidEmail), "{raw}");
        }
    }
}
