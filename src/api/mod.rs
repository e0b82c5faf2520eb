pub mod author;
pub mod books;
pub mod error;
pub mod extract;
pub mod health;

use axum::{Router, routing::get};

use crate::infrastructure::AppState;

/// Routes mounted under `/api`
pub fn api_router_with_state(state: AppState) -> Router {
    Router::new()
        // Authors
        .route(
            "/authors",
            get(author::list_authors).post(author::create_author),
        )
        .route(
            "/authors/:id",
            get(author::get_author)
                .put(author::replace_author)
                .patch(author::patch_author)
                .delete(author::delete_author),
        )
        .route("/authors/:id/books", get(books::list_author_books))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .patch(books::patch_book)
                .delete(books::delete_book),
        )
        .with_state(state)
}
