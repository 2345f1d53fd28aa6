//! Loan model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Loan of a single book to a borrower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub borrower: String,
    pub loaned_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned: bool,
    pub returned_at: Option<DateTime<Utc>>,
    /// Set once, when the book comes back
    pub fine: Option<f64>,
}

impl Loan {
    /// Unreturned and past its due date
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.returned && self.due_at < now
    }
}
