//! On-disk layout of the address book.
//!
//! ```json
//! {
//!   "version": 1,
//!   "congratulation_days": 7,
//!   "records": [
//!     { "name": "John", "phones": ["(111) 222-3344"], "emails": [], "birthday": "29.06.1990" }
//!   ]
//! }
//! ```
//!
//! The data file location is never part of the document.

use rolodex_core::{AddressBook, CoreError, Record, RecordDto, RecordNew};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("path is not a regular file")]
    NotAFile,
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
    #[error("invalid record {name:?}: {source}")]
    InvalidRecord {
        name: String,
        #[source]
        source: CoreError,
    },
    #[error("invalid congratulation window: {0}")]
    InvalidWindow(#[source] CoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub congratulation_days: u32,
    pub records: Vec<RecordDto>,
}

impl Snapshot {
    pub fn from_book(book: &AddressBook) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            congratulation_days: book.congratulation_days(),
            records: book.records().map(RecordDto::from).collect(),
        }
    }

    pub fn into_book(self) -> Result<AddressBook, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version));
        }

        let mut book = AddressBook::new();
        book.set_congratulation_days(i64::from(self.congratulation_days))
            .map_err(SnapshotError::InvalidWindow)?;
        for dto in self.records {
            let name = dto.name.clone();
            let record = Record::create(RecordNew::from(dto))
                .map_err(|source| SnapshotError::InvalidRecord {
                    name: name.clone(),
                    source,
                })?;
            book.add_record(record)
                .map_err(|source| SnapshotError::InvalidRecord { name, source })?;
        }
        Ok(book)
    }
}

pub fn encode(book: &AddressBook) -> Result<Vec<u8>, SnapshotError> {
    let mut bytes = serde_json::to_vec_pretty(&Snapshot::from_book(book))?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn decode(bytes: &[u8]) -> Result<AddressBook, SnapshotError> {
    let snapshot: Snapshot = serde_json::from_slice(bytes)?;
    snapshot.into_book()
}
