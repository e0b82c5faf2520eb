//! Domain layer - Pure business abstractions
//!
//! This layer contains NO HTTP framework dependencies (no Axum).
//! Only schemas, validation rules, repository traits and domain error types.

pub mod errors;
pub mod repositories;
pub mod schemas;
pub mod validation;

pub use errors::{DomainError, FieldError};
pub use repositories::*;
pub use schemas::*;
pub use validation::Validate;
