//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use sea_orm::{DbErr, SqlErr};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub enum DomainError {
    /// Referenced row does not exist
    NotFound(String),
    /// Input rejected before reaching storage
    Validation(Vec<FieldError>),
    /// Write rejected by a storage constraint
    Conflict(String),
    /// Database/persistence error
    Database(String),
}

impl DomainError {
    pub fn not_found(what: &str, id: i32) -> Self {
        DomainError::NotFound(format!("{} {} not found", what, id))
    }

    /// Whether this error was produced by a storage constraint
    pub fn is_conflict(&self) -> bool {
        matches!(self, DomainError::Conflict(_))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "{}", msg),
            DomainError::Validation(fields) => {
                let names: Vec<&str> = fields.iter().map(|e| e.field.as_str()).collect();
                write!(f, "Validation failed for: {}", names.join(", "))
            }
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Constraint violations become conflicts, everything else stays a database error
impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => DomainError::Conflict(msg),
            _ => DomainError::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_db_error_is_not_a_conflict() {
        let err = DomainError::from(DbErr::Custom("disk I/O error".to_string()));
        assert!(!err.is_conflict());
        assert!(matches!(err, DomainError::Database(_)));
    }

    #[test]
    fn test_validation_display_lists_fields() {
        let err = DomainError::Validation(vec![
            FieldError::new("name", "must not be empty"),
            FieldError::new("email", "is not a valid email address"),
        ]);
        assert_eq!(err.to_string(), "Validation failed for: name, email");
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            DomainError::not_found("Author", 7).to_string(),
            "Author 7 not found"
        );
    }
}
