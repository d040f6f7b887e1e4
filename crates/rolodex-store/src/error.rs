use crate::snapshot::SnapshotError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("the address book data file \"{0}\" not found")]
    NotFound(PathBuf),
    #[error("the address book data file \"{path}\" is not a file or is corrupted")]
    WrongFormat {
        path: PathBuf,
        #[source]
        source: SnapshotError,
    },
    #[error("invalid backup path (matches data file): {0}")]
    InvalidBackupPath(PathBuf),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    MissingHomeDir,
    InvalidDataPath,
    NotFound,
    WrongFormat,
    InvalidBackupPath,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::InvalidDataPath(_) => StoreErrorKind::InvalidDataPath,
            StoreError::NotFound(_) => StoreErrorKind::NotFound,
            StoreError::WrongFormat { .. } => StoreErrorKind::WrongFormat,
            StoreError::InvalidBackupPath(_) => StoreErrorKind::InvalidBackupPath,
        }
    }

    pub(crate) fn wrong_format(path: &std::path::Path, source: SnapshotError) -> Self {
        StoreError::WrongFormat {
            path: path.to_path_buf(),
            source,
        }
    }
}
