//! Repository layer: JSON file persistence of the lending ledger

pub mod records;

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    error::AppResult,
    models::{Book, Loan},
};

use records::LedgerFile;

/// Full ledger state as written to and read from disk
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSnapshot {
    pub books: Vec<Book>,
    pub loans: Vec<Loan>,
    pub next_book_id: i32,
    /// Absent in files written before loans had their own counter
    pub next_loan_id: Option<i32>,
}

/// Whole-file JSON store. Each save rewrites the file in place.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot as pretty-printed UTF-8 JSON
    pub fn save(&self, snapshot: &LedgerSnapshot) -> AppResult<()> {
        let file = LedgerFile::from(snapshot);
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)?;

        tracing::debug!(
            path = %self.path.display(),
            books = snapshot.books.len(),
            loans = snapshot.loans.len(),
            "Ledger saved"
        );
        Ok(())
    }

    /// Read the snapshot; `Ok(None)` when the file does not exist
    pub fn load(&self) -> AppResult<Option<LedgerSnapshot>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let file: LedgerFile = serde_json::from_str(&raw)?;
        Ok(Some(file.into()))
    }
}
