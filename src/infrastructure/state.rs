//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{AuthorRepository, BookRepository};
use crate::infrastructure::{SeaOrmAuthorRepository, SeaOrmBookRepository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Author repository
    pub author_repo: Arc<dyn AuthorRepository>,
    /// Book repository
    pub book_repo: Arc<dyn BookRepository>,
}

impl AppState {
    /// Create a new AppState with SeaORM repositories sharing one pool
    pub fn new(db: DatabaseConnection) -> Self {
        let author_repo = Arc::new(SeaOrmAuthorRepository::new(db.clone()));
        let book_repo = Arc::new(SeaOrmBookRepository::new(db));

        Self::from_parts(author_repo, book_repo)
    }

    pub fn from_parts(
        author_repo: Arc<dyn AuthorRepository>,
        book_repo: Arc<dyn BookRepository>,
    ) -> Self {
        Self {
            author_repo,
            book_repo,
        }
    }
}
