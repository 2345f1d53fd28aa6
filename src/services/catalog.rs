//! In-memory CRUD catalog served under `/books`

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogBook, CreateCatalogBook, UpdateCatalogBook},
};

#[derive(Debug, Default)]
struct CatalogState {
    books: Vec<CatalogBook>,
}

impl CatalogState {
    fn next_id(&self) -> AppResult<i32> {
        let max_id = self.books.iter().map(|book| book.id).max().unwrap_or(0);
        max_id
            .checked_add(1)
            .ok_or_else(|| AppError::Conflict(format!("No catalog id left after {}", max_id)))
    }

    fn position(&self, id: i32) -> AppResult<usize> {
        self.books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Catalog book with id {} not found", id)))
    }
}

#[derive(Clone, Default)]
pub struct CatalogService {
    state: Arc<RwLock<CatalogState>>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<CatalogBook> {
        self.state.read().await.books.clone()
    }

    pub async fn get(&self, id: i32) -> AppResult<CatalogBook> {
        let state = self.state.read().await;
        let index = state.position(id)?;
        Ok(state.books[index].clone())
    }

    pub async fn create(&self, book: CreateCatalogBook) -> AppResult<CatalogBook> {
        let mut state = self.state.write().await;

        let id = match book.id {
            Some(id) if state.books.iter().any(|existing| existing.id == id) => {
                return Err(AppError::Conflict(format!(
                    "Catalog book with id {} already exists",
                    id
                )));
            }
            Some(id) => id,
            None => state.next_id()?,
        };

        let created = CatalogBook {
            id,
            title: book.title,
            author: book.author,
        };
        state.books.push(created.clone());

        tracing::info!(id, "Catalog book created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, update: UpdateCatalogBook) -> AppResult<CatalogBook> {
        let mut state = self.state.write().await;
        let index = state.position(id)?;
        let book = &mut state.books[index];
        book.merge(update);
        Ok(book.clone())
    }

    /// Remove a record; unknown ids are reported as not found
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.write().await;
        let index = state.position(id)?;
        state.books.remove(index);

        tracing::info!(id, "Catalog book deleted");
        Ok(())
    }
}
