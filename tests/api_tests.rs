//! API integration tests, driving the router in-process

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf::{api, config::AppConfig, AppState};

fn test_app(dir: &tempfile::TempDir) -> Router {
    let mut config = AppConfig::default();
    config.storage.data_file = dir.path().join("biblioteca.json");
    config.storage.load_on_start = false;

    api::create_router(AppState::new(config).expect("Failed to build state"))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, body)
}

async fn register_sample_books(app: &Router) {
    let books = [
        ("O Senhor dos Anéis", "J.R.R. Tolkien", 1954, "Fantasia"),
        ("1984", "George Orwell", 1949, "Ficção Científica"),
        ("Dom Casmurro", "Machado de Assis", 1899, "Literatura Brasileira"),
        ("Duna", "Frank Herbert", 1965, "Ficção Científica"),
    ];
    for (title, author, year, category) in books {
        let (status, _) = send(
            app,
            "POST",
            "/api/v1/library/books",
            Some(json!({ "title": title, "author": author, "year": year, "category": category })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_health_check() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_ledger_size() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    register_sample_books(&app).await;
    send(
        &app,
        "POST",
        "/api/v1/library/loans",
        Some(json!({ "book_id": 2, "borrower": "Maria" })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/v1/ready", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["books"], 4);
    assert_eq!(body["active_loans"], 1);
}

#[tokio::test]
async fn test_list_titles() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    register_sample_books(&app).await;

    let (status, body) = send(&app, "GET", "/api/v1/library/titles", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["O Senhor dos Anéis", "1984", "Dom Casmurro", "Duna"]));
}

#[tokio::test]
async fn test_register_and_search_books() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    register_sample_books(&app).await;

    let (status, body) = send(&app, "GET", "/api/v1/library/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body[0]["available"], true);

    let (_, body) = send(&app, "GET", "/api/v1/library/books?field=author&value=orwell", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "1984");

    let (_, body) = send(&app, "GET", "/api/v1/library/books?field=title&value=", None).await;
    assert_eq!(body.as_array().unwrap().len(), 4);

    let (_, body) = send(&app, "GET", "/api/v1/library/books?category=Fantasia", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/api/v1/library/books?field=isbn&value=1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_register_requires_fields() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/library/books",
        Some(json!({ "title": "", "author": "Anon", "year": 2000, "category": "Misc" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/library/books",
        Some(json!({ "title": "   ", "author": "Anon", "year": 2000, "category": "Misc" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, books) = send(&app, "GET", "/api/v1/library/books", None).await;
    assert!(books.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_lend_requires_borrower() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    register_sample_books(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/library/loans",
        Some(json!({ "book_id": 1, "borrower": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, book) = send(&app, "GET", "/api/v1/library/books/1", None).await;
    assert_eq!(book["available"], true);
}

#[tokio::test]
async fn test_lend_and_return() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    register_sample_books(&app).await;

    let (status, loan) = send(
        &app,
        "POST",
        "/api/v1/library/loans",
        Some(json!({ "book_id": 1, "borrower": "João" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["id"], 1);
    assert_eq!(loan["returned"], false);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/library/loans",
        Some(json!({ "book_id": 1, "borrower": "Maria" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/library/loans",
        Some(json!({ "book_id": 99, "borrower": "Maria" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, report) = send(&app, "GET", "/api/v1/library/report", None).await;
    assert_eq!(report["total_books"], 4);
    assert_eq!(report["available_books"], 3);
    assert_eq!(report["on_loan_books"], 1);
    assert_eq!(report["overdue_loans"], 0);

    let (_, active) = send(&app, "GET", "/api/v1/library/loans?active=true", None).await;
    assert_eq!(active.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "POST", "/api/v1/library/loans/1/return", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "returned");
    assert_eq!(body["fine"], 0.0);
    assert_eq!(body["loan"]["returned"], true);

    let (status, _) = send(&app, "POST", "/api/v1/library/loans/1/return", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, book) = send(&app, "GET", "/api/v1/library/books/1", None).await;
    assert_eq!(book["available"], true);
}

#[tokio::test]
async fn test_report_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    register_sample_books(&app).await;

    let (_, report) = send(&app, "GET", "/api/v1/library/report", None).await;
    assert_eq!(report["available_books"], 4);
    assert_eq!(report["books_by_category"]["Ficção Científica"], json!(["1984", "Duna"]));

    let (status, stats) = send(&app, "GET", "/api/v1/library/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total"], 4);
    assert_eq!(stats["unique_categories"], 3);
    assert_eq!(stats["oldest_year"], 1899);
    assert_eq!(stats["newest_year"], 1965);
}

#[tokio::test]
async fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, "POST", "/api/v1/library/load", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "missing");

    register_sample_books(&app).await;
    let (status, body) = send(&app, "POST", "/api/v1/library/save", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "saved");

    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("biblioteca.json")).unwrap()).unwrap();
    assert_eq!(saved["books"].as_array().unwrap().len(), 4);
    assert_eq!(saved["books"][0]["titulo"], "O Senhor dos Anéis");
    assert_eq!(saved["contador_id"], 5);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/library/books",
        Some(json!({ "title": "Extra", "author": "Anon", "year": 2000, "category": "Misc" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, "POST", "/api/v1/library/load", None).await;
    assert_eq!(body["status"], "loaded");
    let (_, books) = send(&app, "GET", "/api/v1/library/books", None).await;
    assert_eq!(books.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_catalog_crud() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, created) = send(
        &app,
        "POST",
        "/api/v1/books",
        Some(json!({ "title": "O Senhor dos Anéis - A Sociedade do Anel", "author": "J.R.R Tolkien" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);

    let (status, updated) = send(
        &app,
        "PUT",
        "/api/v1/books/1",
        Some(json!({ "title": "A Sociedade do Anel" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "A Sociedade do Anel");
    assert_eq!(updated["author"], "J.R.R Tolkien");

    let (status, _) = send(&app, "GET", "/api/v1/books/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", "/api/v1/books/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", "/api/v1/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, books) = send(&app, "GET", "/api/v1/books", None).await;
    assert!(books.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, _) = send(&app, "GET", "/api/v1/library/books/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
