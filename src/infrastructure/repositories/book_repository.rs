//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::abort;
use crate::domain::{BookCreate, BookPatch, BookRead, BookRepository, DomainError};
use crate::models::author::Entity as AuthorEntity;
use crate::models::book::{ActiveModel, Column, Entity as BookEntity};

const BOOK_CONFLICT: &str = "Book could not be stored";

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn ensure_author<C: ConnectionTrait>(conn: &C, author_id: i32) -> Result<(), DomainError> {
    match AuthorEntity::find_by_id(author_id).one(conn).await? {
        Some(_) => Ok(()),
        None => Err(DomainError::not_found("Author", author_id)),
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<BookRead>, DomainError> {
        let books = BookEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(books.into_iter().map(BookRead::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<BookRead>, DomainError> {
        let book = BookEntity::find_by_id(id).one(&self.db).await?;
        Ok(book.map(BookRead::from))
    }

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<BookRead>, DomainError> {
        ensure_author(&self.db, author_id).await?;

        let books = BookEntity::find()
            .filter(Column::AuthorId.eq(author_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(books.into_iter().map(BookRead::from).collect())
    }

    async fn create(&self, input: BookCreate) -> Result<BookRead, DomainError> {
        let txn = self.db.begin().await?;

        ensure_author(&txn, input.author_id).await?;

        let book = ActiveModel {
            title: Set(input.title),
            pages: Set(input.pages),
            author_id: Set(input.author_id),
            ..Default::default()
        };

        let model = match book.insert(&txn).await {
            Ok(model) => model,
            Err(e) => return Err(abort(txn, e, BOOK_CONFLICT).await),
        };
        txn.commit().await?;

        tracing::info!(book_id = model.id, author_id = model.author_id, "Book created");
        Ok(BookRead::from(model))
    }

    async fn patch(&self, id: i32, input: BookPatch) -> Result<BookRead, DomainError> {
        let txn = self.db.begin().await?;

        let existing = BookEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("Book", id))?;

        if input.is_empty() {
            txn.commit().await?;
            return Ok(BookRead::from(existing));
        }

        let mut active: ActiveModel = existing.into();
        if let Some(Some(title)) = input.title {
            active.title = Set(title);
        }
        if let Some(Some(pages)) = input.pages {
            active.pages = Set(pages);
        }
        if let Some(Some(author_id)) = input.author_id {
            ensure_author(&txn, author_id).await?;
            active.author_id = Set(author_id);
        }

        let model = match active.update(&txn).await {
            Ok(model) => model,
            Err(e) => return Err(abort(txn, e, BOOK_CONFLICT).await),
        };
        txn.commit().await?;

        tracing::info!(book_id = id, "Book patched");
        Ok(BookRead::from(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let result = BookEntity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Book", id));
        }
        txn.commit().await?;

        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }
}
