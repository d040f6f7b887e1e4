use crate::domain::{Birthday, ContactName, Email, Phone};
use crate::error::{CoreError, Field};
use chrono::NaiveDate;
use std::fmt;

/// Raw field values for a new record, validated by [`Record::create`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordNew {
    pub name: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: ContactName,
    phones: Vec<Phone>,
    emails: Vec<Email>,
    birthday: Option<Birthday>,
}

impl Record {
    pub fn new(name: &str) -> Result<Self, CoreError> {
        Ok(Self {
            name: ContactName::new(name)?,
            phones: Vec::new(),
            emails: Vec::new(),
            birthday: None,
        })
    }

    /// Builds a record from raw values. Repeated phones or emails collapse
    /// onto their first occurrence; malformed values fail.
    pub fn create(new: RecordNew) -> Result<Self, CoreError> {
        let mut record = Self::new(&new.name)?;
        for raw in &new.phones {
            let phone = Phone::parse(raw)?;
            if !record.phones.contains(&phone) {
                record.phones.push(phone);
            }
        }
        for raw in &new.emails {
            let email = Email::parse(raw)?;
            if !record.emails.contains(&email) {
                record.emails.push(email);
            }
        }
        if let Some(raw) = new.birthday.as_deref() {
            record.birthday = Some(Birthday::parse(raw)?);
        }
        Ok(record)
    }

    pub fn name(&self) -> &ContactName {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn add_phone(&mut self, raw: &str) -> Result<(), CoreError> {
        let phone = Phone::parse(raw)?;
        if self.phones.contains(&phone) {
            return Err(CoreError::AlreadyExists(Field::Phone));
        }
        self.phones.push(phone);
        Ok(())
    }

    pub fn edit_phone(&mut self, old_raw: &str, new_raw: &str) -> Result<(), CoreError> {
        let idx = self.phone_position(old_raw)?;
        let phone = Phone::parse(new_raw)?;
        if phone != self.phones[idx] && self.phones.contains(&phone) {
            return Err(CoreError::AlreadyExists(Field::Phone));
        }
        self.phones[idx] = phone;
        Ok(())
    }

    pub fn find_phone(&self, raw: &str) -> Result<&Phone, CoreError> {
        let idx = self.phone_position(raw)?;
        Ok(&self.phones[idx])
    }

    pub fn add_email(&mut self, raw: &str) -> Result<(), CoreError> {
        let email = Email::parse(raw)?;
        if self.emails.contains(&email) {
            return Err(CoreError::AlreadyExists(Field::Email));
        }
        self.emails.push(email);
        Ok(())
    }

    pub fn edit_email(&mut self, old_raw: &str, new_raw: &str) -> Result<(), CoreError> {
        let idx = self.email_position(old_raw)?;
        let email = Email::parse(new_raw)?;
        if email != self.emails[idx] && self.emails.contains(&email) {
            return Err(CoreError::AlreadyExists(Field::Email));
        }
        self.emails[idx] = email;
        Ok(())
    }

    pub fn find_email(&self, raw: &str) -> Result<&Email, CoreError> {
        let idx = self.email_position(raw)?;
        Ok(&self.emails[idx])
    }

    pub fn add_birthday(&mut self, raw: &str) -> Result<(), CoreError> {
        let birthday = Birthday::parse(raw)?;
        if self.birthday.is_some() {
            return Err(CoreError::AlreadyExists(Field::Birthday));
        }
        self.birthday = Some(birthday);
        Ok(())
    }

    /// Sets the birthday whether or not one was already present.
    pub fn edit_birthday(&mut self, raw: &str) -> Result<(), CoreError> {
        self.birthday = Some(Birthday::parse(raw)?);
        Ok(())
    }

    pub fn next_birthday(&self, reference: NaiveDate) -> Option<NaiveDate> {
        self.birthday?.next_after(reference)
    }

    // A value that fails validation cannot be stored, so it is reported as
    // missing rather than malformed.
    fn phone_position(&self, raw: &str) -> Result<usize, CoreError> {
        let missing = CoreError::NotFound(Field::Phone);
        let phone = Phone::parse(raw).map_err(|_| missing.clone())?;
        self.phones
            .iter()
            .position(|stored| *stored == phone)
            .ok_or(missing)
    }

    fn email_position(&self, raw: &str) -> Result<usize, CoreError> {
        let missing = CoreError::NotFound(Field::Email);
        let email = Email::parse(raw).map_err(|_| missing.clone())?;
        self.emails
            .iter()
            .position(|stored| *stored == email)
            .ok_or(missing)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phones = join_or_none(self.phones.iter().map(Phone::as_str));
        let emails = join_or_none(self.emails.iter().map(Email::as_str));
        let birthday = self
            .birthday
            .map(|value| value.to_string())
            .unwrap_or_else(|| "not set".to_string());
        write!(
            f,
            "Contact name: {}, phones: {}, emails: {}, birthday: {}",
            self.name, phones, emails, birthday
        )
    }
}

fn join_or_none<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let joined = values.collect::<Vec<_>>().join("; ");
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined
    }
}
