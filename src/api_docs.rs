use crate::api;
use crate::api::error::{ErrorBody, ErrorDetail};
use crate::domain::{
    AuthorCreate, AuthorPatch, AuthorRead, BookCreate, BookPatch, BookRead, FieldError,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::author::create_author,
        api::author::list_authors,
        api::author::get_author,
        api::author::replace_author,
        api::author::patch_author,
        api::author::delete_author,
        api::books::create_book,
        api::books::list_books,
        api::books::get_book,
        api::books::list_author_books,
        api::books::patch_book,
        api::books::delete_book,
    ),
    components(
        schemas(
            AuthorCreate,
            AuthorPatch,
            AuthorRead,
            BookCreate,
            BookPatch,
            BookRead,
            ErrorBody,
            ErrorDetail,
            FieldError,
        )
    ),
    tags(
        (name = "authors", description = "Authors and their lifecycle"),
        (name = "books", description = "Books owned by authors"),
        (name = "health", description = "Liveness check")
    )
)]
pub struct ApiDoc;
