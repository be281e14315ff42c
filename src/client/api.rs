//! HTTP client for the `/api/books` endpoints

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::error::ClientError;
use crate::models::{Book, BookInput, BookListResponse};

#[derive(Debug, Clone)]
pub struct BooksApi {
    http: reqwest::Client,
    base_url: String,
}

impl BooksApi {
    /// `base_url` is the collection URL, e.g. `http://localhost:3001/api/books`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();

        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn book_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(id))
    }

    pub async fn list(&self, page: u64, limit: u64) -> Result<BookListResponse, ClientError> {
        let url = format!("{}?page={}&limit={}", self.base_url, page, limit);
        let resp = self.http.get(&url).send().await?;
        decode(resp).await
    }

    pub async fn get(&self, id: &str) -> Result<Book, ClientError> {
        let resp = self.http.get(self.book_url(id)).send().await?;
        decode(resp).await
    }

    pub async fn create(&self, input: &BookInput) -> Result<Book, ClientError> {
        let resp = self.http.post(&self.base_url).json(input).send().await?;
        decode(resp).await
    }

    pub async fn update(&self, id: &str, input: &BookInput) -> Result<Book, ClientError> {
        let resp = self.http.put(self.book_url(id)).json(input).send().await?;
        decode(resp).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let resp = self.http.delete(self.book_url(id)).send().await?;
        ensure_success(resp).await?;
        Ok(())
    }
}

async fn ensure_success(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    tracing::debug!("Book API returned {}: {}", status, body);
    Err(ClientError::from_status(status, &body))
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let resp = ensure_success(resp).await?;
    if resp.status() == StatusCode::NO_CONTENT {
        return Err(ClientError::Decode("empty response body".to_string()));
    }
    Ok(resp.json::<T>().await?)
}
