//! Book Service - Pure business logic without HTTP layer
//!
//! Handlers call into these functions; they only know about the
//! repository trait, never about the storage engine behind it.

use crate::domain::{BookRepository, DomainError};
use crate::models::{Book, BookInput, BookListResponse, Pagination};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

// Keeps `skip` well inside SQLite's signed 64-bit OFFSET
const MAX_PAGE: u64 = u32::MAX as u64;

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Interpret raw `page`/`limit` query values.
    ///
    /// Values are read like a leading-integer parse (`"3abc"` is 3); anything
    /// missing, non-numeric, zero or negative falls back to the default.
    /// `limit` is capped at `max_limit`.
    pub fn from_query(page: Option<&str>, limit: Option<&str>, max_limit: u64) -> Self {
        let page = parse_positive(page).unwrap_or(DEFAULT_PAGE).min(MAX_PAGE);
        let limit = parse_positive(limit)
            .unwrap_or(DEFAULT_LIMIT)
            .min(max_limit.max(1));

        Self { page, limit }
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim_start();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<u64>().ok().filter(|&n| n > 0)
}

/// List one page of books with pagination metadata
pub async fn list_books(
    repo: &dyn BookRepository,
    request: PageRequest,
) -> Result<BookListResponse, DomainError> {
    tracing::info!("List books - page={}, limit={}", request.page, request.limit);

    let page = repo.find_page(request.skip(), request.limit).await?;

    Ok(BookListResponse {
        pagination: Pagination::new(request.page, request.limit, page.total),
        books: page.books,
    })
}

/// Get a single book by ID
pub async fn get_book(repo: &dyn BookRepository, id: &str) -> Result<Book, DomainError> {
    repo.find_by_id(id).await?.ok_or(DomainError::NotFound)
}

/// Create a new book
pub async fn create_book(repo: &dyn BookRepository, input: BookInput) -> Result<Book, DomainError> {
    let book = repo.insert(input).await?;
    tracing::info!("Created book {} ({})", book.id, book.title);
    Ok(book)
}

/// Replace an existing book with the given representation
pub async fn update_book(
    repo: &dyn BookRepository,
    id: &str,
    input: BookInput,
) -> Result<Book, DomainError> {
    let book = repo.update_by_id(id, input).await?;
    tracing::info!("Updated book {}", book.id);
    Ok(book)
}

/// Delete a book by ID
pub async fn delete_book(repo: &dyn BookRepository, id: &str) -> Result<(), DomainError> {
    repo.delete_by_id(id).await?;
    tracing::info!("Deleted book {}", id);
    Ok(())
}
