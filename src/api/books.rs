use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::error::ApiError;
use super::extract::ValidatedJson;
use crate::domain::{BookCreate, BookPatch, BookRead, DomainError};
use crate::infrastructure::AppState;

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = BookCreate,
    responses(
        (status = 201, description = "Book created", body = BookRead),
        (status = 404, description = "Author not found", body = ErrorBody),
        (status = 409, description = "Storage conflict", body = ErrorBody),
        (status = 422, description = "Invalid payload", body = ErrorBody)
    ),
    tag = "books"
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BookCreate>,
) -> Result<(StatusCode, Json<BookRead>), ApiError> {
    let book = state.book_repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "All books by ascending id", body = [BookRead])
    ),
    tag = "books"
)]
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookRead>>, ApiError> {
    Ok(Json(state.book_repo.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book found", body = BookRead),
        (status = 404, description = "Book not found", body = ErrorBody)
    ),
    tag = "books"
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BookRead>, ApiError> {
    match state.book_repo.find_by_id(id).await? {
        Some(book) => Ok(Json(book)),
        None => Err(DomainError::not_found("Book", id).into()),
    }
}

#[utoipa::path(
    get,
    path = "/api/authors/{id}/books",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Books of the author by ascending id", body = [BookRead]),
        (status = 404, description = "Author not found", body = ErrorBody)
    ),
    tag = "books"
)]
pub async fn list_author_books(
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
) -> Result<Json<Vec<BookRead>>, ApiError> {
    Ok(Json(state.book_repo.find_by_author(author_id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    request_body = BookPatch,
    responses(
        (status = 200, description = "Book updated", body = BookRead),
        (status = 404, description = "Book or author not found", body = ErrorBody),
        (status = 422, description = "Invalid payload", body = ErrorBody)
    ),
    tag = "books"
)]
pub async fn patch_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<BookPatch>,
) -> Result<Json<BookRead>, ApiError> {
    Ok(Json(state.book_repo.patch(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = ErrorBody)
    ),
    tag = "books"
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.book_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
