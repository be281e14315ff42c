use std::env;

use crate::google_books;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api/books";

/// Where the front end finds its collaborators
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub google_books_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_url: non_empty("BOOKS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            google_books_url: non_empty("GOOGLE_BOOKS_API_URL")
                .unwrap_or_else(|| google_books::DEFAULT_BASE_URL.to_string()),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
