//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::{Book, BookInput};

/// One page of books with the size of the whole collection
#[derive(Debug)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total: u64,
}

/// Repository trait for Book entity
///
/// Inputs are validated by the implementation; a rejected payload yields
/// `DomainError::Validation` and leaves the collection untouched.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert a new book, assigning its id and timestamps
    async fn insert(&self, input: BookInput) -> Result<Book, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, DomainError>;

    /// Books in insertion order, skipping `skip` and returning at most `limit`
    async fn find_page(&self, skip: u64, limit: u64) -> Result<BookPage, DomainError>;

    /// Replace every field of an existing book
    async fn update_by_id(&self, id: &str, input: BookInput) -> Result<Book, DomainError>;

    /// Delete a book by ID
    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError>;
}
