//! Liveness and readiness endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy` while the process answers
    pub status: String,
    pub version: String,
}

/// Readiness, with the size of the ledger behind it
#[derive(Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    /// Registered books
    pub books: usize,
    /// Loans not yet returned
    pub active_loans: usize,
    /// Configured save file
    pub data_file: String,
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Process is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
    })
}

/// Readiness check: answers once the ledger lock can be taken
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ledger is reachable", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let library = &state.services.library;
    let books = library.book_count().await;
    let active_loans = library.active_loan_count().await;
    tracing::debug!(books, active_loans, "Readiness check");

    Json(ReadinessResponse {
        status: "ready".to_string(),
        books,
        active_loans,
        data_file: state.config.storage.data_file.display().to_string(),
    })
}
