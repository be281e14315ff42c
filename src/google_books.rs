//! Google Books volume lookup used to pre-fill the book form by ISBN

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";

#[derive(Debug, Deserialize)]
struct GoogleBooksResponse {
    items: Option<Vec<GoogleBookItem>>,
}

#[derive(Debug, Deserialize)]
struct GoogleBookItem {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

/// The subset of `volumeInfo` the form knows how to use
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub image_links: Option<ImageLinks>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
    // smallThumbnail is also available but often too small
}

impl VolumeInfo {
    /// Thumbnail URL, upgraded to https
    pub fn thumbnail(&self) -> Option<String> {
        self.image_links
            .as_ref()
            .and_then(|links| links.thumbnail.as_ref())
            // Google Books returns http links often, upgrade to https
            .map(|thumb| thumb.replacen("http://", "https://", 1))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("metadata request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("metadata service returned status {0}")]
    Status(u16),
}

#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    http: reqwest::Client,
    base_url: String,
}

impl GoogleBooksClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// First matching volume for an ISBN, `None` when nothing matches
    pub async fn lookup_isbn(&self, isbn: &str) -> Result<Option<VolumeInfo>, LookupError> {
        let url = format!(
            "{}?q=isbn:{}",
            self.base_url,
            urlencoding::encode(isbn.trim())
        );
        tracing::debug!("Looking up ISBN via {}", url);

        let resp = self.http.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(LookupError::Status(resp.status().as_u16()));
        }

        let parsed: GoogleBooksResponse = resp.json().await?;

        Ok(parsed
            .items
            .and_then(|items| items.into_iter().next())
            .map(|item| item.volume_info))
    }
}
