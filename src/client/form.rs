//! Add/edit form model with ISBN pre-fill

use super::api::BooksApi;
use super::error::ClientError;
use super::state::LibraryState;
use crate::google_books::{GoogleBooksClient, VolumeInfo};
use crate::models::{Book, BookInput, ReadingStatus, YearValue};

pub const MISSING_ISBN: &str = "Please enter an ISBN";
pub const NO_MATCH: &str = "No book found with that ISBN. Please enter details manually.";
pub const LOOKUP_FAILED: &str = "Failed to fetch book metadata. Please enter details manually.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Author is required")]
    MissingAuthor,
    #[error("Published year must be a whole number")]
    InvalidYear,
    #[error("Failed to save book. Please try again later.")]
    Save(#[source] ClientError),
}

/// What an ISBN lookup did to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Filled,
    MissingIsbn,
    NoMatch,
    Failed,
}

/// Editable form fields; everything is kept as text until submit
#[derive(Debug, Clone)]
pub struct BookForm {
    mode: FormMode,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: String,
    pub description: String,
    pub cover_url: String,
    pub reading_status: ReadingStatus,
    pub tags: Vec<String>,
    error: Option<String>,
}

impl BookForm {
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            isbn: String::new(),
            title: String::new(),
            author: String::new(),
            genre: String::new(),
            published_year: String::new(),
            description: String::new(),
            cover_url: String::new(),
            reading_status: ReadingStatus::Unread,
            tags: Vec::new(),
            error: None,
        }
    }

    pub fn edit(book: &Book) -> Self {
        Self {
            mode: FormMode::Edit(book.id.clone()),
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            published_year: book.published_year.to_string(),
            description: book.description.clone(),
            cover_url: book.cover_url.clone(),
            reading_status: book.reading_status,
            tags: book.tags.clone(),
            ..Self::add()
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Comma-separated tags, blanks dropped
    pub fn set_tags(&mut self, raw: &str) {
        self.tags = raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
    }

    /// Overwrite the metadata fields with a looked-up volume.
    ///
    /// Missing values clear the field; status, tags and ISBN are untouched.
    pub fn apply_volume(&mut self, volume: &VolumeInfo) {
        self.title = volume.title.clone().unwrap_or_default();
        self.author = volume.authors.join(", ");
        self.genre = volume.categories.first().cloned().unwrap_or_default();
        self.published_year = volume
            .published_date
            .as_deref()
            .map(|date| date.chars().take(4).collect())
            .unwrap_or_default();
        self.description = volume.description.clone().unwrap_or_default();
        self.cover_url = volume.thumbnail().unwrap_or_default();
    }

    /// Pre-fill from the metadata service. On anything but a match the
    /// fields are left as they were and `error()` explains why.
    pub async fn lookup_isbn(&mut self, client: &GoogleBooksClient) -> LookupOutcome {
        if self.isbn.trim().is_empty() {
            self.error = Some(MISSING_ISBN.to_string());
            return LookupOutcome::MissingIsbn;
        }

        self.error = None;
        match client.lookup_isbn(&self.isbn).await {
            Ok(Some(volume)) => {
                self.apply_volume(&volume);
                LookupOutcome::Filled
            }
            Ok(None) => {
                self.error = Some(NO_MATCH.to_string());
                LookupOutcome::NoMatch
            }
            Err(e) => {
                tracing::warn!("Error fetching book metadata: {}", e);
                self.error = Some(LOOKUP_FAILED.to_string());
                LookupOutcome::Failed
            }
        }
    }

    /// Local checks mirroring the server's required fields
    pub fn validate(&self) -> Result<BookInput, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        if self.author.trim().is_empty() {
            return Err(FormError::MissingAuthor);
        }

        let year = self.published_year.trim();
        if !year.is_empty() && year.parse::<i32>().is_err() {
            return Err(FormError::InvalidYear);
        }

        Ok(BookInput {
            title: Some(self.title.clone()),
            author: Some(self.author.clone()),
            genre: Some(self.genre.clone()),
            published_year: Some(YearValue::Text(year.to_string())),
            description: Some(self.description.clone()),
            cover_url: Some(self.cover_url.clone()),
            reading_status: Some(self.reading_status.as_str().to_string()),
            tags: Some(self.tags.clone()),
        })
    }

    /// Create or update depending on the mode, then refresh `state`
    pub async fn submit(
        &mut self,
        state: &mut LibraryState,
        api: &BooksApi,
    ) -> Result<Book, FormError> {
        let input = match self.validate() {
            Ok(input) => input,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e);
            }
        };
        self.error = None;

        let saved = match &self.mode {
            FormMode::Add => state.create_book(api, &input).await,
            FormMode::Edit(id) => state.update_book(api, id, &input).await,
        };

        saved.map_err(|e| {
            tracing::warn!("Error saving book: {}", e);
            let err = FormError::Save(e);
            self.error = Some(err.to_string());
            err
        })
    }
}

impl Default for BookForm {
    fn default() -> Self {
        Self::add()
    }
}
