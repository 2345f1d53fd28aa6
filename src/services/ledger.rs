//! Catalog & lending ledger
//!
//! Holds the registered books and their loans. A book is `Available` until it
//! is lent, `OnLoan` until its active loan is returned, and never leaves the
//! ledger. Operations that depend on the clock have an `*_at` variant taking
//! the current instant explicitly.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;

use crate::{
    config::LendingConfig,
    error::{AppError, AppResult},
    models::{Book, Loan, Report, SearchField},
    repository::{LedgerSnapshot, LedgerStore},
    services::stats,
};

/// Result of [`Ledger::load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// No save file; the ledger was reset to its empty initial state
    Missing,
}

#[derive(Debug, Clone)]
pub struct Ledger {
    books: Vec<Book>,
    loans: Vec<Loan>,
    next_book_id: i32,
    next_loan_id: i32,
    policy: LendingConfig,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LendingConfig::default())
    }
}

impl Ledger {
    pub fn new(policy: LendingConfig) -> Self {
        Self {
            books: Vec::new(),
            loans: Vec::new(),
            next_book_id: 1,
            next_loan_id: 1,
            policy,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn active_loans(&self) -> impl Iterator<Item = &Loan> {
        self.loans.iter().filter(|loan| !loan.returned)
    }

    pub fn get_book(&self, id: i32) -> AppResult<&Book> {
        self.books
            .iter()
            .find(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub fn get_loan(&self, id: i32) -> AppResult<&Loan> {
        self.loans
            .iter()
            .find(|loan| loan.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Register a new book. No validation: empty strings are accepted.
    /// Fails with `Conflict` once the id counter reaches `i32::MAX`.
    pub fn register_book(&mut self, title: &str, author: &str, year: i32, category: &str) -> AppResult<Book> {
        self.register_book_at(title, author, year, category, Utc::now())
    }

    pub fn register_book_at(
        &mut self,
        title: &str,
        author: &str,
        year: i32,
        category: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Book> {
        let next_book_id = self
            .next_book_id
            .checked_add(1)
            .ok_or_else(|| AppError::Conflict("No book ids left to assign".to_string()))?;

        let book = Book {
            id: self.next_book_id,
            title: title.to_string(),
            author: author.to_string(),
            year,
            category: category.to_string(),
            available: true,
            registered_at: now,
        };

        self.books.push(book.clone());
        self.next_book_id = next_book_id;

        tracing::debug!(book_id = book.id, title = %book.title, "Book registered");
        Ok(book)
    }

    /// Case-insensitive substring search on one field. An empty value matches every book.
    pub fn search_books(&self, field: SearchField, value: &str) -> Vec<Book> {
        let needle = value.to_lowercase();
        stats::process_books(
            &self.books,
            |book| field.value_of(book).to_lowercase().contains(&needle),
            Book::clone,
        )
    }

    /// Exact, case-sensitive category match
    pub fn filter_by_category(&self, category: &str) -> Vec<Book> {
        stats::process_books(&self.books, |book| book.category == category, Book::clone)
    }

    pub fn lend_book(&mut self, book_id: i32, borrower: &str) -> AppResult<Loan> {
        self.lend_book_at(book_id, borrower, Utc::now())
    }

    pub fn lend_book_at(&mut self, book_id: i32, borrower: &str, now: DateTime<Utc>) -> AppResult<Loan> {
        let loan_id = self.next_loan_id;
        let next_loan_id = loan_id
            .checked_add(1)
            .ok_or_else(|| AppError::Conflict("No loan ids left to assign".to_string()))?;
        let due_at = now + Duration::days(self.policy.loan_days);

        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        if !book.available {
            return Err(AppError::Conflict(format!(
                "Book with id {} is not available",
                book_id
            )));
        }

        book.available = false;

        let loan = Loan {
            id: loan_id,
            book_id,
            borrower: borrower.to_string(),
            loaned_at: now,
            due_at,
            returned: false,
            returned_at: None,
            fine: None,
        };
        self.loans.push(loan.clone());
        self.next_loan_id = next_loan_id;

        tracing::info!(loan_id, book_id, borrower, due_at = %due_at, "Book lent");
        Ok(loan)
    }

    pub fn return_book(&mut self, loan_id: i32) -> AppResult<Loan> {
        self.return_book_at(loan_id, Utc::now())
    }

    pub fn return_book_at(&mut self, loan_id: i32, now: DateTime<Utc>) -> AppResult<Loan> {
        let daily_fine = self.policy.daily_fine;

        let loan = self
            .loans
            .iter_mut()
            .find(|loan| loan.id == loan_id)
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", loan_id)))?;

        if loan.returned {
            return Err(AppError::Conflict(format!(
                "Loan with id {} was already returned",
                loan_id
            )));
        }

        let fine = compute_fine(loan.due_at, now, daily_fine);
        loan.returned = true;
        loan.returned_at = Some(now);
        loan.fine = Some(fine);
        let loan = loan.clone();

        // A dangling book reference is tolerated
        if let Some(book) = self.books.iter_mut().find(|book| book.id == loan.book_id) {
            book.available = true;
        }

        tracing::info!(loan_id, book_id = loan.book_id, fine, "Book returned");
        Ok(loan)
    }

    pub fn generate_report(&self) -> Report {
        self.generate_report_at(Utc::now())
    }

    pub fn generate_report_at(&self, now: DateTime<Utc>) -> Report {
        let total_books = self.books.len();
        let available_books = self.books.iter().filter(|book| book.available).count();

        let mut books_by_category: IndexMap<String, Vec<String>> = IndexMap::new();
        for book in &self.books {
            books_by_category
                .entry(book.category.clone())
                .or_default()
                .push(book.title.clone());
        }

        let overdue_loans = self.loans.iter().filter(|loan| loan.is_overdue_at(now)).count();

        Report {
            total_books,
            available_books,
            on_loan_books: total_books - available_books,
            books_by_category,
            overdue_loans,
            generated_at: now,
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            books: self.books.clone(),
            loans: self.loans.clone(),
            next_book_id: self.next_book_id,
            next_loan_id: Some(self.next_loan_id),
        }
    }

    /// Replace the whole state with `snapshot`. Counters never fall at or
    /// below an id already in use. A snapshot holding an id of `i32::MAX` is
    /// rejected and the current state is kept.
    pub fn restore(&mut self, snapshot: LedgerSnapshot) -> AppResult<()> {
        let max_book_id = snapshot.books.iter().map(|book| book.id).max().unwrap_or(0);
        let max_loan_id = snapshot.loans.iter().map(|loan| loan.id).max().unwrap_or(0);
        let book_floor = id_after(max_book_id, "book")?;
        let loan_floor = id_after(max_loan_id, "loan")?;

        self.next_book_id = snapshot.next_book_id.max(book_floor);
        self.next_loan_id = snapshot.next_loan_id.unwrap_or(loan_floor).max(loan_floor);
        self.books = snapshot.books;
        self.loans = snapshot.loans;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.books.clear();
        self.loans.clear();
        self.next_book_id = 1;
        self.next_loan_id = 1;
    }

    pub fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        LedgerStore::new(path.as_ref()).save(&self.snapshot())
    }

    /// Load from `path`. A missing file leaves the ledger empty and is
    /// reported as [`LoadOutcome::Missing`] rather than an error.
    pub fn load(&mut self, path: impl AsRef<Path>) -> AppResult<LoadOutcome> {
        let store = LedgerStore::new(path.as_ref());
        match store.load()? {
            Some(snapshot) => {
                self.restore(snapshot)?;
                tracing::info!(
                    path = %store.path().display(),
                    books = self.books.len(),
                    loans = self.loans.len(),
                    "Ledger loaded"
                );
                Ok(LoadOutcome::Loaded)
            }
            None => {
                self.clear();
                tracing::warn!(
                    path = %store.path().display(),
                    "Save file not found, starting with an empty ledger"
                );
                Ok(LoadOutcome::Missing)
            }
        }
    }
}

fn id_after(id: i32, kind: &str) -> AppResult<i32> {
    id.checked_add(1)
        .ok_or_else(|| AppError::InvalidInput(format!("{} id {} is out of range", kind, id)))
}

/// Whole days past `due_at` times `daily_fine`; zero when returned on time
pub fn compute_fine(due_at: DateTime<Utc>, returned_at: DateTime<Utc>, daily_fine: f64) -> f64 {
    if returned_at <= due_at {
        return 0.0;
    }
    (returned_at - due_at).num_days() as f64 * daily_fine
}
