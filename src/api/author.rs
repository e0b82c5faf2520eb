//! Author API handlers using repository pattern

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::error::ApiError;
use super::extract::ValidatedJson;
use crate::domain::{AuthorCreate, AuthorPatch, AuthorRead, DomainError};
use crate::infrastructure::AppState;

#[utoipa::path(
    post,
    path = "/api/authors",
    request_body = AuthorCreate,
    responses(
        (status = 201, description = "Author created", body = AuthorRead),
        (status = 409, description = "Email already in use", body = ErrorBody),
        (status = 422, description = "Invalid payload", body = ErrorBody)
    ),
    tag = "authors"
)]
pub async fn create_author(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AuthorCreate>,
) -> Result<(StatusCode, Json<AuthorRead>), ApiError> {
    let author = state.author_repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

#[utoipa::path(
    get,
    path = "/api/authors",
    responses(
        (status = 200, description = "All authors by ascending id", body = [AuthorRead])
    ),
    tag = "authors"
)]
pub async fn list_authors(State(state): State<AppState>) -> Result<Json<Vec<AuthorRead>>, ApiError> {
    Ok(Json(state.author_repo.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author found", body = AuthorRead),
        (status = 404, description = "Author not found", body = ErrorBody)
    ),
    tag = "authors"
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AuthorRead>, ApiError> {
    match state.author_repo.find_by_id(id).await? {
        Some(author) => Ok(Json(author)),
        None => Err(DomainError::not_found("Author", id).into()),
    }
}

/// Full replace: every field is required
#[utoipa::path(
    put,
    path = "/api/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    request_body = AuthorCreate,
    responses(
        (status = 202, description = "Author replaced", body = AuthorRead),
        (status = 404, description = "Author not found", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody),
        (status = 422, description = "Invalid payload", body = ErrorBody)
    ),
    tag = "authors"
)]
pub async fn replace_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<AuthorCreate>,
) -> Result<(StatusCode, Json<AuthorRead>), ApiError> {
    let author = state.author_repo.replace(id, payload).await?;
    Ok((StatusCode::ACCEPTED, Json(author)))
}

/// Partial update: absent fields keep their stored value
#[utoipa::path(
    patch,
    path = "/api/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    request_body = AuthorPatch,
    responses(
        (status = 200, description = "Author updated", body = AuthorRead),
        (status = 404, description = "Author not found", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody),
        (status = 422, description = "Invalid payload", body = ErrorBody)
    ),
    tag = "authors"
)]
pub async fn patch_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<AuthorPatch>,
) -> Result<Json<AuthorRead>, ApiError> {
    Ok(Json(state.author_repo.patch(id, payload).await?))
}

/// Deleting an author also deletes all of its books
#[utoipa::path(
    delete,
    path = "/api/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 204, description = "Author and its books deleted"),
        (status = 404, description = "Author not found", body = ErrorBody)
    ),
    tag = "authors"
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.author_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
