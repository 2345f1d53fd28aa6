//! Data models for Bookshelf

pub mod book;
pub mod catalog;
pub mod loan;
pub mod report;
pub mod timestamp;

// Re-export commonly used types
pub use book::{Book, BookStatistics, RegisterBook, SearchField};
pub use catalog::{CatalogBook, CreateCatalogBook, UpdateCatalogBook};
pub use loan::Loan;
pub use report::Report;
