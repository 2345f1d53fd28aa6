//! Lending ledger endpoints: books, report, statistics and persistence

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookStatistics, RegisterBook, Report, SearchField},
    services::ledger::LoadOutcome,
    AppState,
};

/// Book listing filters. `category` takes precedence over `field`/`value`.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Field to search: title, author or category
    pub field: Option<String>,
    /// Case-insensitive substring to look for (empty matches everything)
    pub value: Option<String>,
    /// Exact category
    pub category: Option<String>,
}

/// Persistence operation result
#[derive(Serialize, ToSchema)]
pub struct StorageResponse {
    /// `saved`, `loaded` or `missing`
    pub status: String,
    /// Save file path
    pub path: String,
}

/// List, search or filter books
#[utoipa::path(
    get,
    path = "/library/books",
    tag = "library",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 400, description = "Unknown search field")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let library = &state.services.library;

    let books = match (query.category, query.field, query.value) {
        (Some(category), _, _) => library.filter_by_category(&category).await,
        (None, Some(field), value) => {
            let field: SearchField = field.parse()?;
            library.search_books(field, value.as_deref().unwrap_or("")).await
        }
        (None, None, Some(_)) => {
            return Err(AppError::InvalidInput(
                "'value' requires a 'field' to search".to_string(),
            ))
        }
        (None, None, None) => library.list_books().await,
    };

    Ok(Json(books))
}

/// Titles of all registered books, in registration order
#[utoipa::path(
    get,
    path = "/library/titles",
    tag = "library",
    responses(
        (status = 200, description = "Book titles", body = Vec<String>)
    )
)]
pub async fn list_titles(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.services.library.titles().await)
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/library/books/{id}",
    tag = "library",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Book>> {
    let book = state.services.library.get_book(id).await?;
    Ok(Json(book))
}

/// Register a new book
#[utoipa::path(
    post,
    path = "/library/books",
    tag = "library",
    request_body = RegisterBook,
    responses(
        (status = 201, description = "Book registered", body = Book),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn register_book(
    State(state): State<AppState>,
    Json(request): Json<RegisterBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let request = request.trimmed();
    request.validate()?;

    let book = state
        .services
        .library
        .register_book(&request.title, &request.author, request.year, &request.category)
        .await?;

    Ok((StatusCode::CREATED, Json(book)))
}

/// Collection report
#[utoipa::path(
    get,
    path = "/library/report",
    tag = "library",
    responses(
        (status = 200, description = "Collection report", body = Report)
    )
)]
pub async fn get_report(State(state): State<AppState>) -> Json<Report> {
    Json(state.services.library.report().await)
}

/// Statistics over all registered books
#[utoipa::path(
    get,
    path = "/library/stats",
    tag = "library",
    responses(
        (status = 200, description = "Book statistics", body = BookStatistics)
    )
)]
pub async fn get_stats(State(state): State<AppState>) -> Json<BookStatistics> {
    Json(state.services.library.statistics().await)
}

/// Save the ledger to the configured file
#[utoipa::path(
    post,
    path = "/library/save",
    tag = "library",
    responses(
        (status = 200, description = "Ledger saved", body = StorageResponse),
        (status = 500, description = "Save file could not be written")
    )
)]
pub async fn save(State(state): State<AppState>) -> AppResult<Json<StorageResponse>> {
    state.services.library.save().await?;

    Ok(Json(StorageResponse {
        status: "saved".to_string(),
        path: state.config.storage.data_file.display().to_string(),
    }))
}

/// Reload the ledger from the configured file
#[utoipa::path(
    post,
    path = "/library/load",
    tag = "library",
    responses(
        (status = 200, description = "Ledger loaded, or reset when the file is missing", body = StorageResponse),
        (status = 500, description = "Save file could not be read")
    )
)]
pub async fn load(State(state): State<AppState>) -> AppResult<Json<StorageResponse>> {
    let status = match state.services.library.load().await? {
        LoadOutcome::Loaded => "loaded",
        LoadOutcome::Missing => "missing",
    };

    Ok(Json(StorageResponse {
        status: status.to_string(),
        path: state.config.storage.data_file.display().to_string(),
    }))
}
