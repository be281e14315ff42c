//! Front-end state for the current page of the collection
//!
//! Every network operation takes `&mut self`, so a state object never has
//! more than one request in flight. Mutations are followed by a re-fetch of
//! the current page; nothing is patched locally.

use super::api::BooksApi;
use super::error::ClientError;
use crate::models::{Book, BookInput, Pagination};

pub const PAGE_SIZES: [u64; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: u64 = 10;

pub const LOAD_FAILED: &str = "Failed to load books. Please try again later.";
pub const DELETE_FAILED: &str = "Failed to delete book. Please try again.";

#[derive(Debug, Clone)]
pub struct LibraryState {
    books: Vec<Book>,
    search_term: String,
    genre_filter: Option<String>,
    limit: u64,
    pagination: Pagination,
    is_loading: bool,
    error: Option<String>,
}

impl Default for LibraryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl LibraryState {
    pub fn new(limit: u64) -> Self {
        Self {
            books: Vec::new(),
            search_term: String::new(),
            genre_filter: None,
            limit: limit.max(1),
            pagination: Pagination::default(),
            is_loading: false,
            error: None,
        }
    }

    /// Books of the current page, unfiltered
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn genre_filter(&self) -> Option<&str> {
        self.genre_filter.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// An empty genre clears the filter ("All Genres")
    pub fn set_genre_filter(&mut self, genre: Option<String>) {
        self.genre_filter = genre.filter(|g| !g.is_empty());
    }

    /// Loaded books matching the search term (title or author,
    /// case-insensitive) and the genre filter (exact)
    pub fn filtered_books(&self) -> Vec<&Book> {
        let term = self.search_term.to_lowercase();

        self.books
            .iter()
            .filter(|book| {
                book.title.to_lowercase().contains(&term)
                    || book.author.to_lowercase().contains(&term)
            })
            .filter(|book| match &self.genre_filter {
                Some(genre) => &book.genre == genre,
                None => true,
            })
            .collect()
    }

    /// Genre options, taken from the loaded page only
    pub fn genres(&self) -> Vec<&str> {
        distinct_genres(&self.books)
    }

    /// Fetch `page` with the current page size and replace local state.
    ///
    /// On failure the previous books stay in place and `error()` is set.
    pub async fn load_page(&mut self, api: &BooksApi, page: u64) -> Result<(), ClientError> {
        self.is_loading = true;
        self.error = None;

        let result = api.list(page.max(1), self.limit).await;
        self.is_loading = false;

        match result {
            Ok(response) => {
                self.books = response.books;
                self.pagination = response.pagination;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Error fetching books: {}", e);
                self.error = Some(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Re-fetch the page currently shown
    pub async fn refresh(&mut self, api: &BooksApi) -> Result<(), ClientError> {
        let page = self.pagination.current_page;
        self.load_page(api, page).await
    }

    /// Change the page size and re-fetch the current page number
    pub async fn set_limit(&mut self, api: &BooksApi, limit: u64) -> Result<(), ClientError> {
        self.limit = limit.max(1);
        self.refresh(api).await
    }

    /// Returns whether a move happened; does nothing on the last page
    pub async fn next_page(&mut self, api: &BooksApi) -> Result<bool, ClientError> {
        if !self.pagination.has_next_page {
            return Ok(false);
        }
        let page = self.pagination.current_page + 1;
        self.load_page(api, page).await?;
        Ok(true)
    }

    /// Returns whether a move happened; does nothing on the first page
    pub async fn prev_page(&mut self, api: &BooksApi) -> Result<bool, ClientError> {
        if !self.pagination.has_prev_page {
            return Ok(false);
        }
        let page = self.pagination.current_page - 1;
        self.load_page(api, page).await?;
        Ok(true)
    }

    /// Create a book, then refresh the current page.
    ///
    /// A failed refresh does not undo the creation; it only sets `error()`.
    pub async fn create_book(
        &mut self,
        api: &BooksApi,
        input: &BookInput,
    ) -> Result<Book, ClientError> {
        self.is_loading = true;
        let result = api.create(input).await;
        self.is_loading = false;

        let book = result?;
        let _ = self.refresh(api).await;
        Ok(book)
    }

    pub async fn update_book(
        &mut self,
        api: &BooksApi,
        id: &str,
        input: &BookInput,
    ) -> Result<Book, ClientError> {
        self.is_loading = true;
        let result = api.update(id, input).await;
        self.is_loading = false;

        let book = result?;
        let _ = self.refresh(api).await;
        Ok(book)
    }

    pub async fn delete_book(&mut self, api: &BooksApi, id: &str) -> Result<(), ClientError> {
        self.is_loading = true;
        let result = api.delete(id).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                let _ = self.refresh(api).await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Error deleting book {}: {}", id, e);
                self.error = Some(DELETE_FAILED.to_string());
                Err(e)
            }
        }
    }
}

/// Distinct non-empty genres in first-seen order
pub fn distinct_genres(books: &[Book]) -> Vec<&str> {
    let mut genres: Vec<&str> = Vec::new();
    for book in books {
        if !book.genre.is_empty() && !genres.contains(&book.genre.as_str()) {
            genres.push(&book.genre);
        }
    }
    genres
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::ReadingStatus;

    pub(crate) fn book(id: &str, title: &str, author: &str, genre: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            published_year: 2000,
            description: String::new(),
            cover_url: String::new(),
            reading_status: ReadingStatus::Unread,
            tags: Vec::new(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn loaded(books: Vec<Book>) -> LibraryState {
        LibraryState {
            books,
            ..LibraryState::default()
        }
    }

    #[test]
    fn search_matches_title_or_author_ignoring_case() {
        let mut state = loaded(vec![
            book("1", "Dune", "Frank Herbert", "Sci-Fi"),
            book("2", "Emma", "Jane Austen", "Classic"),
            book("3", "Persuasion", "Jane Austen", "Classic"),
        ]);

        state.set_search_term("AUSTEN");
        let ids: Vec<&str> = state.filtered_books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);

        state.set_search_term("dun");
        let ids: Vec<&str> = state.filtered_books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn genre_filter_intersects_with_search() {
        let mut state = loaded(vec![
            book("1", "Dune", "Frank Herbert", "Sci-Fi"),
            book("2", "Dune Messiah", "Frank Herbert", "Sequel"),
        ]);

        state.set_search_term("dune");
        state.set_genre_filter(Some("Sequel".to_string()));
        let ids: Vec<&str> = state.filtered_books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);

        state.set_genre_filter(Some(String::new()));
        assert_eq!(state.genre_filter(), None);
        assert_eq!(state.filtered_books().len(), 2);
    }

    #[test]
    fn genres_are_distinct_and_skip_blanks() {
        let state = loaded(vec![
            book("1", "A", "X", "Fantasy"),
            book("2", "B", "Y", ""),
            book("3", "C", "Z", "Horror"),
            book("4", "D", "W", "Fantasy"),
        ]);
        assert_eq!(state.genres(), vec!["Fantasy", "Horror"]);
    }

    #[test]
    fn fresh_state_has_no_navigation() {
        let state = LibraryState::default();
        assert_eq!(state.limit(), 10);
        assert_eq!(state.pagination().current_page, 1);
        assert!(!state.pagination().has_next_page);
        assert!(!state.pagination().has_prev_page);
        assert!(state.filtered_books().is_empty());
    }
}
