//! Collection report model

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Snapshot of the collection and its loans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Report {
    pub total_books: usize,
    pub available_books: usize,
    pub on_loan_books: usize,
    /// Category -> titles, both in registration order
    #[schema(value_type = Object)]
    pub books_by_category: IndexMap<String, Vec<String>>,
    pub overdue_loans: usize,
    pub generated_at: DateTime<Utc>,
}
