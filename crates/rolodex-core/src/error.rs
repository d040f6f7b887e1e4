use std::fmt;
use thiserror::Error;

/// The kind of stored item a lookup or uniqueness failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Contact,
    Phone,
    Email,
    Birthday,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Contact => "contact",
            Field::Phone => "contact phone number",
            Field::Email => "contact email",
            Field::Birthday => "contact birthday",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("the {0} not found")]
    NotFound(Field),
    #[error("the {0} already exists")]
    AlreadyExists(Field),
    #[error("the contact name is required")]
    NameRequired,
    #[error(
        "the contact phone number must consist of exactly ten digits and must not contain \
         any letters or other characters, except for phone number formatting symbols"
    )]
    InvalidPhone,
    #[error("the contact email must be a valid email address")]
    InvalidEmail,
    #[error("the contact birthday must be in \"DD.MM.YYYY\" format")]
    InvalidBirthday,
    #[error("invalid congratulation window: {0} days")]
    InvalidWindowDays(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorKind {
    NotFound,
    AlreadyExists,
    Validation,
}

impl CoreError {
    pub fn kind(&self) -> CoreErrorKind {
        match self {
            CoreError::NotFound(_) => CoreErrorKind::NotFound,
            CoreError::AlreadyExists(_) => CoreErrorKind::AlreadyExists,
            CoreError::NameRequired
            | CoreError::InvalidPhone
            | CoreError::InvalidEmail
            | CoreError::InvalidBirthday
            | CoreError::InvalidWindowDays(_) => CoreErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreError, CoreErrorKind, Field};

    #[test]
    fn messages_name_the_field() {
        assert_eq!(
            CoreError::NotFound(Field::Contact).to_string(),
            "the contact not found"
        );
        assert_eq!(
            CoreError::AlreadyExists(Field::Phone).to_string(),
            "the contact phone number already exists"
        );
    }

    #[test]
    fn kinds_group_validation_failures() {
        assert_eq!(CoreError::InvalidEmail.kind(), CoreErrorKind::Validation);
        assert_eq!(CoreError::NameRequired.kind(), CoreErrorKind::Validation);
        assert_eq!(
            CoreError::NotFound(Field::Email).kind(),
            CoreErrorKind::NotFound
        );
        assert_eq!(
            CoreError::AlreadyExists(Field::Birthday).kind(),
            CoreErrorKind::AlreadyExists
        );
    }
}
