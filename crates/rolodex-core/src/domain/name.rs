use crate::error::CoreError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactName(String);

impl ContactName {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::NameRequired);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ContactName;
    use crate::error::CoreError;

    #[test]
    fn contact_name_trims() {
        let name = ContactName::new("  John ").unwrap();
        assert_eq!(name.as_str(), "John");
    }

    #[test]
    fn contact_name_rejects_blank() {
        assert_eq!(ContactName::new("   "), Err(CoreError::NameRequired));
        assert_eq!(ContactName::new(""), Err(CoreError::NameRequired));
    }
}
