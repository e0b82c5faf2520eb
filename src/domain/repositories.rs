//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.
//!
//! Every method is one unit of work: it either commits all of its writes or
//! none of them.

use async_trait::async_trait;

use super::DomainError;
use super::schemas::{AuthorCreate, AuthorPatch, AuthorRead, BookCreate, BookPatch, BookRead};

/// Repository trait for Author entity
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find all authors, ordered by id ascending
    async fn find_all(&self) -> Result<Vec<AuthorRead>, DomainError>;

    /// Find an author by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<AuthorRead>, DomainError>;

    /// Create a new author; a duplicate email is a conflict
    async fn create(&self, input: AuthorCreate) -> Result<AuthorRead, DomainError>;

    /// Overwrite every field of an existing author
    async fn replace(&self, id: i32, input: AuthorCreate) -> Result<AuthorRead, DomainError>;

    /// Overwrite only the fields present in the patch
    async fn patch(&self, id: i32, input: AuthorPatch) -> Result<AuthorRead, DomainError>;

    /// Delete an author and, through the foreign key, all of its books
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books, ordered by id ascending
    async fn find_all(&self) -> Result<Vec<BookRead>, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<BookRead>, DomainError>;

    /// Books owned by an author; fails with `NotFound` if the author does not exist
    async fn find_by_author(&self, author_id: i32) -> Result<Vec<BookRead>, DomainError>;

    /// Create a new book for an existing author
    async fn create(&self, input: BookCreate) -> Result<BookRead, DomainError>;

    /// Overwrite only the fields present in the patch
    async fn patch(&self, id: i32, input: BookPatch) -> Result<BookRead, DomainError>;

    /// Delete a book by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
