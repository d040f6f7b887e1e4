pub mod error;
pub mod paths;
pub mod snapshot;

use crate::error::{Result, StoreError};
use crate::snapshot::SnapshotError;
use rolodex_core::AddressBook;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An address book together with the data file it was loaded from.
#[derive(Debug)]
pub struct Store {
    book: AddressBook,
    path: Option<PathBuf>,
}

impl Store {
    /// Loads the book stored at `path`, or starts an empty one bound to
    /// `path` when the file does not exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "data file missing, starting empty");
            return Ok(Self {
                book: AddressBook::new(),
                path: Some(path.to_path_buf()),
            });
        }
        Self::open_existing(path)
    }

    pub fn open_existing(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(StoreError::wrong_format(path, SnapshotError::NotAFile));
        }

        let bytes = fs::read(path)?;
        let book = snapshot::decode(&bytes).map_err(|err| StoreError::wrong_format(path, err))?;
        debug!(path = %path.display(), records = book.len(), "address book loaded");
        Ok(Self {
            book,
            path: Some(path.to_path_buf()),
        })
    }

    /// A store with no data file; [`Store::save`] is a no-op for it.
    pub fn detached(book: AddressBook) -> Self {
        Self { book, path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut AddressBook {
        &mut self.book
    }

    pub fn into_book(self) -> AddressBook {
        self.book
    }

    /// Writes the book to its data file. Returns `false` when the store has
    /// no data file.
    pub fn save(&self) -> Result<bool> {
        let Some(path) = self.path.as_deref() else {
            return Ok(false);
        };
        write_book(&self.book, path)?;
        debug!(path = %path.display(), records = self.book.len(), "address book saved");
        Ok(true)
    }

    pub fn backup_to(&self, path: &Path) -> Result<()> {
        if let Some(own) = self.path.as_deref() {
            if same_location(own, path)? {
                return Err(StoreError::InvalidBackupPath(path.to_path_buf()));
            }
        }
        write_book(&self.book, path)?;
        debug!(path = %path.display(), "backup written");
        Ok(())
    }
}

fn write_book(book: &AddressBook, path: &Path) -> Result<()> {
    if path.exists() && !path.is_file() {
        return Err(StoreError::wrong_format(path, SnapshotError::NotAFile));
    }
    paths::ensure_parent_dir(path)?;

    let bytes = snapshot::encode(book).map_err(|err| StoreError::wrong_format(path, err))?;
    let tmp = temp_path(path)?;
    fs::write(&tmp, bytes)?;
    restrict_file_permissions(&tmp)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::InvalidDataPath(path.to_path_buf()))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

fn same_location(a: &Path, b: &Path) -> Result<bool> {
    if a == b {
        return Ok(true);
    }
    if !a.exists() || !b.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}

#[cfg(unix)]
fn restrict_file_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_file_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
