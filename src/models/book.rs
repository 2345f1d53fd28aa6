//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Book registered in the lending ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub category: String,
    pub available: bool,
    pub registered_at: DateTime<Utc>,
}

/// Register book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterBook {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
    pub year: i32,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
}

impl RegisterBook {
    /// Same request with surrounding whitespace stripped from the text fields
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            year: self.year,
            category: self.category.trim().to_string(),
        }
    }
}

/// Book field a text search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Author,
    Category,
}

impl SearchField {
    /// Text of this field on the given book
    pub fn value_of<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            SearchField::Title => &book.title,
            SearchField::Author => &book.author,
            SearchField::Category => &book.category,
        }
    }
}

impl FromStr for SearchField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" | "titulo" => Ok(SearchField::Title),
            "author" | "autor" => Ok(SearchField::Author),
            "category" | "categoria" => Ok(SearchField::Category),
            other => Err(AppError::InvalidInput(format!(
                "Unknown search field '{}' (expected title, author or category)",
                other
            ))),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Category => "category",
        };
        write!(f, "{}", label)
    }
}

/// Aggregate figures over a set of books
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookStatistics {
    pub total: usize,
    pub average_year: f64,
    pub unique_categories: usize,
    pub oldest_year: Option<i32>,
    pub newest_year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            id: 1,
            title: "Dom Casmurro".into(),
            author: "Machado de Assis".into(),
            year: 1899,
            category: "Literatura Brasileira".into(),
            available: true,
            registered_at: Utc::now(),
        }
    }

    #[test]
    fn test_search_field_from_str() {
        assert_eq!("title".parse::<SearchField>().unwrap(), SearchField::Title);
        assert_eq!("Autor".parse::<SearchField>().unwrap(), SearchField::Author);
        assert_eq!("categoria".parse::<SearchField>().unwrap(), SearchField::Category);
        assert!(matches!("isbn".parse::<SearchField>(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_search_field_value_of() {
        let book = book();
        assert_eq!(SearchField::Title.value_of(&book), "Dom Casmurro");
        assert_eq!(SearchField::Author.value_of(&book), "Machado de Assis");
        assert_eq!(SearchField::Category.value_of(&book), "Literatura Brasileira");
    }

    #[test]
    fn test_register_book_requires_fields() {
        let request = RegisterBook {
            title: String::new(),
            author: "Frank Herbert".into(),
            year: 1965,
            category: String::new(),
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("category"));
        assert!(!fields.contains_key("author"));
    }

    #[test]
    fn test_blank_fields_fail_once_trimmed() {
        let request = RegisterBook {
            title: "   ".into(),
            author: " Frank Herbert ".into(),
            year: 1965,
            category: "\t".into(),
        }
        .trimmed();

        assert_eq!(request.author, "Frank Herbert");
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("category"));
    }
}
