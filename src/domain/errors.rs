//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use crate::models::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Resource not found
    #[error("Resource not found")]
    NotFound,
    /// Validation error with message
    #[error("{0}")]
    Validation(String),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

impl From<ValidationError> for DomainError {
    fn from(e: ValidationError) -> Self {
        DomainError::Validation(e.to_string())
    }
}
