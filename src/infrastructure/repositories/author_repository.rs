//! SeaORM implementation of AuthorRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::abort;
use crate::domain::validation::normalize_email;
use crate::domain::{AuthorCreate, AuthorPatch, AuthorRead, AuthorRepository, DomainError};
use crate::models::author::{ActiveModel, Column, Entity as AuthorEntity};
use crate::models::book::{self, Entity as BookEntity};

const DUPLICATE_EMAIL: &str = "An author with this email already exists";

/// SeaORM-based implementation of AuthorRepository
pub struct SeaOrmAuthorRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn find_all(&self) -> Result<Vec<AuthorRead>, DomainError> {
        let authors = AuthorEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(authors.into_iter().map(AuthorRead::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<AuthorRead>, DomainError> {
        let author = AuthorEntity::find_by_id(id).one(&self.db).await?;
        Ok(author.map(AuthorRead::from))
    }

    async fn create(&self, input: AuthorCreate) -> Result<AuthorRead, DomainError> {
        let txn = self.db.begin().await?;

        let author = ActiveModel {
            name: Set(input.name),
            email: Set(normalize_email(&input.email)),
            year_started: Set(input.year_started),
            ..Default::default()
        };

        let model = match author.insert(&txn).await {
            Ok(model) => model,
            Err(e) => return Err(abort(txn, e, DUPLICATE_EMAIL).await),
        };
        txn.commit().await?;

        tracing::info!(author_id = model.id, "Author created");
        Ok(AuthorRead::from(model))
    }

    async fn replace(&self, id: i32, input: AuthorCreate) -> Result<AuthorRead, DomainError> {
        let txn = self.db.begin().await?;

        // Dropping an uncommitted transaction rolls it back
        let existing = AuthorEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("Author", id))?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(input.name);
        active.email = Set(normalize_email(&input.email));
        active.year_started = Set(input.year_started);

        let model = match active.update(&txn).await {
            Ok(model) => model,
            Err(e) => return Err(abort(txn, e, DUPLICATE_EMAIL).await),
        };
        txn.commit().await?;

        tracing::info!(author_id = id, "Author replaced");
        Ok(AuthorRead::from(model))
    }

    async fn patch(&self, id: i32, input: AuthorPatch) -> Result<AuthorRead, DomainError> {
        let txn = self.db.begin().await?;

        let existing = AuthorEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("Author", id))?;

        if input.is_empty() {
            txn.commit().await?;
            return Ok(AuthorRead::from(existing));
        }

        let mut active: ActiveModel = existing.into();
        if let Some(Some(name)) = input.name {
            active.name = Set(name);
        }
        if let Some(Some(email)) = input.email {
            active.email = Set(normalize_email(&email));
        }
        if let Some(Some(year_started)) = input.year_started {
            active.year_started = Set(year_started);
        }

        let model = match active.update(&txn).await {
            Ok(model) => model,
            Err(e) => return Err(abort(txn, e, DUPLICATE_EMAIL).await),
        };
        txn.commit().await?;

        tracing::info!(author_id = id, "Author patched");
        Ok(AuthorRead::from(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let owned_books = BookEntity::find()
            .filter(book::Column::AuthorId.eq(id))
            .count(&txn)
            .await?;

        let result = AuthorEntity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Author", id));
        }
        txn.commit().await?;

        tracing::info!(author_id = id, cascaded_books = owned_books, "Author deleted");
        Ok(())
    }
}
