//! Repository implementations using SeaORM

pub mod author_repository;
pub mod book_repository;

pub use author_repository::SeaOrmAuthorRepository;
pub use book_repository::SeaOrmBookRepository;

use sea_orm::{DatabaseTransaction, DbErr};

use crate::domain::DomainError;

/// Roll back a unit of work after a failed write.
///
/// Constraint violations are reported as a conflict carrying `conflict_message`
/// instead of the raw driver text.
pub(crate) async fn abort(
    txn: DatabaseTransaction,
    err: DbErr,
    conflict_message: &str,
) -> DomainError {
    let err = DomainError::from(err);

    if let Err(e) = txn.rollback().await {
        tracing::error!("Failed to roll back transaction: {}", e);
    }

    match err {
        DomainError::Conflict(detail) => {
            tracing::warn!(%detail, "{}", conflict_message);
            DomainError::Conflict(conflict_message.to_string())
        }
        other => other,
    }
}
