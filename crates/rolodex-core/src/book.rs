use crate::domain::Record;
use crate::error::{CoreError, Field};
use crate::rules::{congratulation_date, validate_window_days, DEFAULT_WINDOW_DAYS};
use chrono::NaiveDate;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// A record whose birthday falls inside the congratulation window, with the
/// weekday it should be celebrated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingBirthday<'a> {
    pub record: &'a Record,
    pub congratulation_date: NaiveDate,
}

/// Records keyed by contact name, iterated in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBook {
    records: IndexMap<String, Record>,
    congratulation_days: u32,
}

impl Default for AddressBook {
    fn default() -> Self {
        Self {
            records: IndexMap::new(),
            congratulation_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a book; when two records share a name the first one is kept.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut book = Self::default();
        for record in records {
            let name = record.name().as_str().to_string();
            book.records.entry(name).or_insert(record);
        }
        book
    }

    pub fn congratulation_days(&self) -> u32 {
        self.congratulation_days
    }

    pub fn set_congratulation_days(&mut self, days: i64) -> Result<(), CoreError> {
        self.congratulation_days = validate_window_days(days)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name.trim())
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn add_record(&mut self, record: Record) -> Result<(), CoreError> {
        let name = record.name().as_str();
        if self.records.contains_key(name) {
            return Err(CoreError::AlreadyExists(Field::Contact));
        }
        self.records.insert(name.to_string(), record);
        Ok(())
    }

    pub fn find(&self, name: &str) -> Result<&Record, CoreError> {
        self.records
            .get(name.trim())
            .ok_or(CoreError::NotFound(Field::Contact))
    }

    pub fn find_mut(&mut self, name: &str) -> Result<&mut Record, CoreError> {
        self.records
            .get_mut(name.trim())
            .ok_or(CoreError::NotFound(Field::Contact))
    }

    pub fn delete_record(&mut self, name: &str) -> Result<Record, CoreError> {
        self.records
            .shift_remove(name.trim())
            .ok_or(CoreError::NotFound(Field::Contact))
    }

    pub fn upcoming_birthdays(
        &self,
        today: NaiveDate,
    ) -> impl Iterator<Item = UpcomingBirthday<'_>> + '_ {
        self.upcoming_birthdays_within(today, self.congratulation_days)
    }

    /// Like [`AddressBook::upcoming_birthdays`] with an explicit window.
    pub fn upcoming_birthdays_within(
        &self,
        today: NaiveDate,
        window_days: u32,
    ) -> impl Iterator<Item = UpcomingBirthday<'_>> + '_ {
        self.records.values().filter_map(move |record| {
            let next = record.next_birthday(today)?;
            let congratulation_date = congratulation_date(next, today, window_days)?;
            Some(UpcomingBirthday {
                record,
                congratulation_date,
            })
        })
    }

    pub fn upcoming_birthdays_by_days(
        &self,
        today: NaiveDate,
    ) -> BTreeMap<NaiveDate, Vec<&Record>> {
        self.upcoming_birthdays_by_days_within(today, self.congratulation_days)
    }

    pub fn upcoming_birthdays_by_days_within(
        &self,
        today: NaiveDate,
        window_days: u32,
    ) -> BTreeMap<NaiveDate, Vec<&Record>> {
        let mut grouped: BTreeMap<NaiveDate, Vec<&Record>> = BTreeMap::new();
        for upcoming in self.upcoming_birthdays_within(today, window_days) {
            grouped
                .entry(upcoming.congratulation_date)
                .or_default()
                .push(upcoming.record);
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::AddressBook;
    use crate::domain::{Record, RecordNew};
    use crate::error::{CoreError, Field};

    fn record(name: &str, phone: &str) -> Record {
        Record::create(RecordNew {
            name: name.to_string(),
            phones: vec![phone.to_string()],
            ..RecordNew::default()
        })
        .unwrap()
    }

    #[test]
    fn from_records_keeps_first_duplicate() {
        let book = AddressBook::from_records([
            record("John", "1111111111"),
            record("Jane", "2222222222"),
            record("John", "3333333333"),
        ]);
        assert_eq!(book.len(), 2);
        let john = book.find("John").unwrap();
        assert_eq!(john.phones()[0].as_str(), "1111111111");
    }

    #[test]
    fn add_record_rejects_duplicate_name() {
        let mut book = AddressBook::from_records([record("John", "1111111111")]);
        let err = book.add_record(record("John", "2222222222")).unwrap_err();
        assert_eq!(err, CoreError::AlreadyExists(Field::Contact));
    }

    #[test]
    fn delete_preserves_remaining_order() {
        let mut book = AddressBook::new();
        for (name, phone) in [("A", "1111111111"), ("B", "2222222222"), ("C", "3333333333")] {
            book.add_record(record(name, phone)).unwrap();
        }
        let removed = book.delete_record("B").unwrap();
        assert_eq!(removed.name().as_str(), "B");
        let names: Vec<&str> = book.records().map(|r| r.name().as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(
            book.delete_record("B").unwrap_err(),
            CoreError::NotFound(Field::Contact)
        );
    }

    #[test]
    fn find_mut_updates_in_place() {
        let mut book = AddressBook::from_records([record("John", "1111111111")]);
        book.find_mut("John").unwrap().add_phone("2222222222").unwrap();
        assert_eq!(book.find("John").unwrap().phones().len(), 2);
        assert_eq!(
            book.find_mut("Jane").unwrap_err(),
            CoreError::NotFound(Field::Contact)
        );
    }

    #[test]
    fn congratulation_days_default_and_validation() {
        let mut book = AddressBook::new();
        assert_eq!(book.congratulation_days(), 7);
        book.set_congratulation_days(14).unwrap();
        assert_eq!(book.congratulation_days(), 14);
        assert_eq!(
            book.set_congratulation_days(0),
            Err(CoreError::InvalidWindowDays(0))
        );
        assert_eq!(book.congratulation_days(), 14);
    }
}
