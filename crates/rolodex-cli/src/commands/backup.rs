use anyhow::{Context as _, Result};
use clap::Args;
use rolodex_store::error::StoreError;
use rolodex_store::{paths, Store};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct BackupArgs {
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Another rolodex data file to merge into this book
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
struct BackupReport {
    output: String,
    size_bytes: u64,
}

#[derive(Debug, Serialize)]
struct ImportReport {
    added: usize,
    skipped: Vec<String>,
}

pub fn backup(store: &Store, json: bool, args: BackupArgs) -> Result<String> {
    let out = match args.out {
        Some(path) => path,
        None => paths::backup_path()?,
    };

    if let Err(err) = store.backup_to(&out) {
        if matches!(err, StoreError::InvalidBackupPath(_)) {
            return Err(err)
                .with_context(|| format!("backup path matches data file: {}", out.display()));
        }
        return Err(err).with_context(|| format!("back up address book to {}", out.display()));
    }

    let size = fs::metadata(&out)
        .with_context(|| format!("stat backup file {}", out.display()))?
        .len();

    if json {
        let report = BackupReport {
            output: out.display().to_string(),
            size_bytes: size,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(format!("Backup written to {}", out.display()))
}

/// Copies records from another data file. Names already in the book are
/// left untouched and reported as skipped.
pub fn import(store: &mut Store, json: bool, args: ImportArgs) -> Result<String> {
    let source = Store::open_existing(&args.path)
        .with_context(|| format!("open import file {}", args.path.display()))?;

    let book = store.book_mut();
    let mut added = 0;
    let mut skipped = Vec::new();
    for record in source.into_book().records().cloned() {
        let name = record.name().to_string();
        if book.contains(&name) {
            skipped.push(name);
            continue;
        }
        book.add_record(record)?;
        added += 1;
    }
    debug!(added, skipped = skipped.len(), "import finished");

    if json {
        let report = ImportReport { added, skipped };
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(format!(
        "Imported {added} contact(s), skipped {} already present.",
        skipped.len()
    ))
}
