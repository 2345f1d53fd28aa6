//! Plain CRUD catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{CatalogBook, CreateCatalogBook, UpdateCatalogBook},
    AppState,
};

/// List catalog books
#[utoipa::path(
    get,
    path = "/books",
    tag = "catalog",
    responses(
        (status = 200, description = "All catalog books", body = Vec<CatalogBook>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<CatalogBook>> {
    Json(state.services.catalog.list().await)
}

/// Get catalog book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Catalog book ID")
    ),
    responses(
        (status = 200, description = "Catalog book", body = CatalogBook),
        (status = 404, description = "Catalog book not found")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<CatalogBook>> {
    let book = state.services.catalog.get(id).await?;
    Ok(Json(book))
}

/// Create a catalog book
#[utoipa::path(
    post,
    path = "/books",
    tag = "catalog",
    request_body = CreateCatalogBook,
    responses(
        (status = 201, description = "Catalog book created", body = CatalogBook),
        (status = 400, description = "Missing required field"),
        (status = 409, description = "ID already in use")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(book): Json<CreateCatalogBook>,
) -> AppResult<(StatusCode, Json<CatalogBook>)> {
    book.validate()?;

    let created = state.services.catalog.create(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a catalog book (fields present in the body replace the stored ones)
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Catalog book ID")
    ),
    request_body = UpdateCatalogBook,
    responses(
        (status = 200, description = "Catalog book updated", body = CatalogBook),
        (status = 404, description = "Catalog book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<UpdateCatalogBook>,
) -> AppResult<Json<CatalogBook>> {
    let updated = state.services.catalog.update(id, update).await?;
    Ok(Json(updated))
}

/// Delete a catalog book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Catalog book ID")
    ),
    responses(
        (status = 204, description = "Catalog book deleted"),
        (status = 404, description = "Catalog book not found")
    )
)]
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    state.services.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
