use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::book::Book;

/// Pagination metadata attached to every list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_books: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// `limit` must be non-zero.
    pub fn new(page: u64, limit: u64, total_books: u64) -> Self {
        let total_pages = total_books.div_ceil(limit);

        Self {
            current_page: page,
            total_pages,
            total_books,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_books: 0,
            has_next_page: false,
            has_prev_page: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<Book>,
    pub pagination: Pagination,
}
