//! Shared access to the lending ledger for request handlers

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::StorageConfig,
    error::AppResult,
    models::{Book, BookStatistics, Loan, Report, SearchField},
    services::{
        ledger::{Ledger, LoadOutcome},
        stats,
    },
};

/// Ledger behind a single lock, plus its save file
#[derive(Clone)]
pub struct LibraryService {
    ledger: Arc<RwLock<Ledger>>,
    storage: StorageConfig,
}

impl LibraryService {
    pub fn new(ledger: Ledger, storage: StorageConfig) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            storage,
        }
    }

    pub async fn list_books(&self) -> Vec<Book> {
        self.ledger.read().await.books().to_vec()
    }

    pub async fn book_count(&self) -> usize {
        self.ledger.read().await.books().len()
    }

    pub async fn active_loan_count(&self) -> usize {
        self.ledger.read().await.active_loans().count()
    }

    /// Titles of every registered book, in registration order
    pub async fn titles(&self) -> Vec<String> {
        stats::book_titles(self.ledger.read().await.books())
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.ledger.read().await.get_book(id).cloned()
    }

    pub async fn search_books(&self, field: SearchField, value: &str) -> Vec<Book> {
        self.ledger.read().await.search_books(field, value)
    }

    pub async fn filter_by_category(&self, category: &str) -> Vec<Book> {
        self.ledger.read().await.filter_by_category(category)
    }

    pub async fn register_book(&self, title: &str, author: &str, year: i32, category: &str) -> AppResult<Book> {
        let mut ledger = self.ledger.write().await;
        self.commit(&mut ledger, |ledger| ledger.register_book(title, author, year, category))
    }

    pub async fn list_loans(&self, active_only: bool) -> Vec<Loan> {
        let ledger = self.ledger.read().await;
        if active_only {
            ledger.active_loans().cloned().collect()
        } else {
            ledger.loans().to_vec()
        }
    }

    pub async fn get_loan(&self, id: i32) -> AppResult<Loan> {
        self.ledger.read().await.get_loan(id).cloned()
    }

    pub async fn lend_book(&self, book_id: i32, borrower: &str) -> AppResult<Loan> {
        let mut ledger = self.ledger.write().await;
        self.commit(&mut ledger, |ledger| ledger.lend_book(book_id, borrower))
    }

    pub async fn return_book(&self, loan_id: i32) -> AppResult<Loan> {
        let mut ledger = self.ledger.write().await;
        self.commit(&mut ledger, |ledger| ledger.return_book(loan_id))
    }

    pub async fn report(&self) -> Report {
        self.ledger.read().await.generate_report()
    }

    pub async fn statistics(&self) -> BookStatistics {
        stats::calculate_statistics(self.ledger.read().await.books())
    }

    /// Write the ledger to the configured save file
    pub async fn save(&self) -> AppResult<()> {
        let ledger = self.ledger.read().await;
        ledger.save(&self.storage.data_file)?;
        tracing::info!(path = %self.storage.data_file.display(), "Ledger saved");
        Ok(())
    }

    /// Replace the ledger with the configured save file's content
    pub async fn load(&self) -> AppResult<LoadOutcome> {
        let mut ledger = self.ledger.write().await;
        ledger.load(&self.storage.data_file)
    }

    /// Apply `change`, then autosave if enabled. A failed save undoes the change.
    fn commit<T>(&self, ledger: &mut Ledger, change: impl FnOnce(&mut Ledger) -> AppResult<T>) -> AppResult<T> {
        if !self.storage.autosave {
            return change(ledger);
        }

        let before = ledger.snapshot();
        let value = change(ledger)?;
        if let Err(e) = ledger.save(&self.storage.data_file) {
            tracing::error!(
                path = %self.storage.data_file.display(),
                error = %e,
                "Autosave failed, change rolled back"
            );
            ledger.restore(before)?;
            return Err(e);
        }
        Ok(value)
    }
}
