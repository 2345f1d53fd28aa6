//! Statistics helpers over book collections

use std::collections::HashSet;

use crate::models::{Book, BookStatistics};

/// Titles of `books`, in order
pub fn book_titles(books: &[Book]) -> Vec<String> {
    books.iter().map(|book| book.title.clone()).collect()
}

/// Keep the books matching `filter` and map each through `transform`
pub fn process_books<T, F, M>(books: &[Book], filter: F, transform: M) -> Vec<T>
where
    F: Fn(&Book) -> bool,
    M: Fn(&Book) -> T,
{
    books.iter().filter(|book| filter(book)).map(transform).collect()
}

pub fn calculate_statistics(books: &[Book]) -> BookStatistics {
    if books.is_empty() {
        return BookStatistics {
            total: 0,
            average_year: 0.0,
            unique_categories: 0,
            oldest_year: None,
            newest_year: None,
        };
    }

    let years = books.iter().map(|book| book.year);
    let year_sum: i64 = years.clone().map(i64::from).sum();
    let unique_categories = books
        .iter()
        .map(|book| book.category.as_str())
        .collect::<HashSet<_>>()
        .len();

    BookStatistics {
        total: books.len(),
        average_year: year_sum as f64 / books.len() as f64,
        unique_categories,
        oldest_year: years.clone().min(),
        newest_year: years.max(),
    }
}
