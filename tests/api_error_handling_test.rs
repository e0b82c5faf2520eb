use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use bookshelf::api::error::ErrorBody;
use bookshelf::domain::{
    AuthorCreate, AuthorPatch, AuthorRead, AuthorRepository, BookCreate, BookPatch, BookRead,
    BookRepository, DomainError,
};
use bookshelf::infrastructure::AppState;
use bookshelf::server;
use tower::util::ServiceExt; // for `oneshot`

/// Repository whose storage is always unavailable
struct BrokenStorage;

fn unavailable() -> DomainError {
    DomainError::Database("database is locked".to_string())
}

#[async_trait]
impl AuthorRepository for BrokenStorage {
    async fn find_all(&self) -> Result<Vec<AuthorRead>, DomainError> {
        Err(unavailable())
    }
    async fn find_by_id(&self, _id: i32) -> Result<Option<AuthorRead>, DomainError> {
        Err(unavailable())
    }
    async fn create(&self, _input: AuthorCreate) -> Result<AuthorRead, DomainError> {
        Err(unavailable())
    }
    async fn replace(&self, _id: i32, _input: AuthorCreate) -> Result<AuthorRead, DomainError> {
        Err(unavailable())
    }
    async fn patch(&self, _id: i32, _input: AuthorPatch) -> Result<AuthorRead, DomainError> {
        Err(unavailable())
    }
    async fn delete(&self, _id: i32) -> Result<(), DomainError> {
        Err(unavailable())
    }
}

#[async_trait]
impl BookRepository for BrokenStorage {
    async fn find_all(&self) -> Result<Vec<BookRead>, DomainError> {
        Err(unavailable())
    }
    async fn find_by_id(&self, _id: i32) -> Result<Option<BookRead>, DomainError> {
        Err(unavailable())
    }
    async fn find_by_author(&self, _author_id: i32) -> Result<Vec<BookRead>, DomainError> {
        Err(unavailable())
    }
    async fn create(&self, _input: BookCreate) -> Result<BookRead, DomainError> {
        Err(unavailable())
    }
    async fn patch(&self, _id: i32, _input: BookPatch) -> Result<BookRead, DomainError> {
        Err(unavailable())
    }
    async fn delete(&self, _id: i32) -> Result<(), DomainError> {
        Err(unavailable())
    }
}

fn broken_app() -> Router {
    let storage = Arc::new(BrokenStorage);
    let state = AppState::from_parts(storage.clone(), storage);
    server::build_router_with_state(state, &[])
}

async fn error_body(response: axum::response::Response) -> ErrorBody {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let app = broken_app();

    for uri in ["/api/authors", "/api/authors/1", "/api/books", "/api/books/1"] {
        let req = Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(error_body(response).await.error.code, "internal_error");
    }
}

#[tokio::test]
async fn test_validation_runs_before_storage() {
    let app = broken_app();

    // Storage would fail, but the payload is rejected first
    let payload = serde_json::json!({"name": "Ada", "email": "nope", "year_started": 1950});
    let req = Request::builder()
        .uri("/api/authors")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = error_body(response).await;
    assert_eq!(body.error.code, "validation_error");
    assert_eq!(body.error.details[0].field, "email");
}

#[tokio::test]
async fn test_missing_content_type_is_rejected() {
    let app = broken_app();

    let req = Request::builder()
        .uri("/api/books")
        .method("POST")
        .body(Body::from(r#"{"title":"Notes","pages":1,"author_id":1}"#))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_body(response).await.error.details[0].field, "body");
}
