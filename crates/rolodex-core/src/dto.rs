use crate::domain::{Record, RecordNew};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDto {
    pub name: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub birthday: Option<String>,
}

impl From<&Record> for RecordDto {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name().to_string(),
            phones: record.phones().iter().map(ToString::to_string).collect(),
            emails: record.emails().iter().map(ToString::to_string).collect(),
            birthday: record.birthday().map(ToString::to_string),
        }
    }
}

impl From<RecordDto> for RecordNew {
    fn from(dto: RecordDto) -> Self {
        Self {
            name: dto.name,
            phones: dto.phones,
            emails: dto.emails,
            birthday: dto.birthday,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingBirthdayDto {
    pub congratulation_date: String,
    pub records: Vec<RecordDto>,
}
