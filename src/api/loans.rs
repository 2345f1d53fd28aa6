//! Loan management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{error::AppResult, models::Loan, AppState};

/// Lend book request
#[derive(Deserialize, Validate, ToSchema)]
pub struct LendRequest {
    /// Book ID
    pub book_id: i32,
    /// Borrower name
    #[validate(length(min = 1, message = "borrower is required"))]
    pub borrower: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoanQuery {
    /// Only loans not yet returned
    pub active: Option<bool>,
}

/// Return response with the closed loan
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Return status
    pub status: String,
    /// Fine charged for the late days
    pub fine: f64,
    /// Loan details
    pub loan: Loan,
}

/// List loans
#[utoipa::path(
    get,
    path = "/library/loans",
    tag = "loans",
    params(LoanQuery),
    responses(
        (status = 200, description = "Loans in creation order", body = Vec<Loan>)
    )
)]
pub async fn list_loans(
    State(state): State<AppState>,
    Query(query): Query<LoanQuery>,
) -> Json<Vec<Loan>> {
    let loans = state
        .services
        .library
        .list_loans(query.active.unwrap_or(false))
        .await;
    Json(loans)
}

/// Get loan by ID
#[utoipa::path(
    get,
    path = "/library/loans/{id}",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan details", body = Loan),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Loan>> {
    let loan = state.services.library.get_loan(id).await?;
    Ok(Json(loan))
}

/// Lend a book
#[utoipa::path(
    post,
    path = "/library/loans",
    tag = "loans",
    request_body = LendRequest,
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 400, description = "Missing borrower"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book already on loan")
    )
)]
pub async fn lend_book(
    State(state): State<AppState>,
    Json(request): Json<LendRequest>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let request = LendRequest {
        borrower: request.borrower.trim().to_string(),
        ..request
    };
    request.validate()?;

    let loan = state
        .services
        .library
        .lend_book(request.book_id, &request.borrower)
        .await?;

    Ok((StatusCode::CREATED, Json(loan)))
}

/// Return a lent book
#[utoipa::path(
    post,
    path = "/library/loans/{id}/return",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 404, description = "Loan not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    Path(loan_id): Path<i32>,
) -> AppResult<Json<ReturnResponse>> {
    let loan = state.services.library.return_book(loan_id).await?;

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        fine: loan.fine.unwrap_or(0.0),
        loan,
    }))
}
