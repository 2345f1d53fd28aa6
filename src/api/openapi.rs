//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{catalog, health, library, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "0.1.0",
        description = "Book catalog and lending ledger REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Library
        library::list_books,
        library::get_book,
        library::list_titles,
        library::register_book,
        library::get_report,
        library::get_stats,
        library::save,
        library::load,
        // Loans
        loans::list_loans,
        loans::get_loan,
        loans::lend_book,
        loans::return_book,
        // Catalog
        catalog::list_books,
        catalog::get_book,
        catalog::create_book,
        catalog::update_book,
        catalog::delete_book,
    ),
    components(
        schemas(
            // Library
            crate::models::Book,
            crate::models::RegisterBook,
            crate::models::SearchField,
            crate::models::BookStatistics,
            crate::models::Report,
            library::BookQuery,
            library::StorageResponse,
            // Loans
            crate::models::Loan,
            loans::LendRequest,
            loans::ReturnResponse,
            // Catalog
            crate::models::CatalogBook,
            crate::models::CreateCatalogBook,
            crate::models::UpdateCatalogBook,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "library", description = "Lending ledger books, report and persistence"),
        (name = "loans", description = "Loan management"),
        (name = "catalog", description = "Plain CRUD book catalog")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
