//! API handlers for Bookshelf REST endpoints

pub mod catalog;
pub mod health;
pub mod library;
pub mod loans;
pub mod openapi;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Lending ledger
        .route(
            "/library/books",
            get(library::list_books).post(library::register_book),
        )
        .route("/library/books/:id", get(library::get_book))
        .route("/library/titles", get(library::list_titles))
        .route("/library/loans", get(loans::list_loans).post(loans::lend_book))
        .route("/library/loans/:id", get(loans::get_loan))
        .route("/library/loans/:id/return", post(loans::return_book))
        .route("/library/report", get(library::get_report))
        .route("/library/stats", get(library::get_stats))
        .route("/library/save", post(library::save))
        .route("/library/load", post(library::load))
        // CRUD catalog
        .route("/books", get(catalog::list_books).post(catalog::create_book))
        .route(
            "/books/:id",
            get(catalog::get_book)
                .put(catalog::update_book)
                .delete(catalog::delete_book),
        )
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
