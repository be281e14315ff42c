use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_GENRE: &str = "Unknown";

const NOT_A_WHOLE_YEAR: &str = "publishedYear must be a whole number";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
    pub description: String,
    pub cover_url: String,
    #[sea_orm(default_value = "unread")]
    pub reading_status: String,
    pub tags: String, // JSON array
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Where a reader is with a book.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    #[default]
    Unread,
    Reading,
    Completed,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 3] = [
        ReadingStatus::Unread,
        ReadingStatus::Reading,
        ReadingStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::Unread => "unread",
            ReadingStatus::Reading => "reading",
            ReadingStatus::Completed => "completed",
        }
    }

    /// Human label used by the form's status selector
    pub fn label(&self) -> &'static str {
        match self {
            ReadingStatus::Unread => "Unread",
            ReadingStatus::Reading => "Currently Reading",
            ReadingStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a valid reading status")]
pub struct InvalidReadingStatus(pub String);

impl FromStr for ReadingStatus {
    type Err = InvalidReadingStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReadingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidReadingStatus(s.to_string()))
    }
}

// DTO for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
    pub description: String,
    pub cover_url: String,
    pub reading_status: ReadingStatus,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        let tags: Vec<String> = serde_json::from_str(&model.tags).unwrap_or_default();

        Self {
            id: model.id,
            title: model.title,
            author: model.author,
            genre: model.genre,
            published_year: model.published_year,
            description: model.description,
            cover_url: model.cover_url,
            reading_status: model.reading_status.parse().unwrap_or_default(),
            tags,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// A year as sent by clients: forms post strings, API callers post numbers.
///
/// `Other` catches any remaining JSON so a bad year is reported by
/// validation rather than by the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    Number(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Request body for create and full-document update.
///
/// Every field is optional on the wire so that missing required fields
/// surface as validation errors rather than decode failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i32>)]
    pub published_year: Option<YearValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<ReadingStatus>)]
    pub reading_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl BookInput {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            ..Default::default()
        }
    }

    /// Check required fields and fill in defaults for everything omitted.
    pub fn validate(self, current_year: i32) -> Result<BookRecord, ValidationError> {
        let mut problems = Vec::new();

        let title = trimmed(self.title);
        if title.is_empty() {
            problems.push("Title is required".to_string());
        }

        let author = trimmed(self.author);
        if author.is_empty() {
            problems.push("Author is required".to_string());
        }

        let reading_status = match self.reading_status {
            None => ReadingStatus::default(),
            Some(raw) => raw.parse::<ReadingStatus>().unwrap_or_else(|e: InvalidReadingStatus| {
                problems.push(e.to_string());
                ReadingStatus::default()
            }),
        };

        let published_year = match self.published_year {
            None => current_year,
            Some(YearValue::Number(n)) => i32::try_from(n).unwrap_or_else(|_| {
                problems.push("publishedYear is out of range".to_string());
                current_year
            }),
            Some(YearValue::Float(n)) if n.fract() == 0.0 => {
                if (i32::MIN as f64..=i32::MAX as f64).contains(&n) {
                    n as i32
                } else {
                    problems.push("publishedYear is out of range".to_string());
                    current_year
                }
            }
            Some(YearValue::Text(text)) if text.trim().is_empty() => current_year,
            Some(YearValue::Text(text)) => text.trim().parse::<i32>().unwrap_or_else(|_| {
                problems.push(NOT_A_WHOLE_YEAR.to_string());
                current_year
            }),
            Some(YearValue::Float(_)) | Some(YearValue::Other(_)) => {
                problems.push(NOT_A_WHOLE_YEAR.to_string());
                current_year
            }
        };

        if !problems.is_empty() {
            return Err(ValidationError(problems));
        }

        let genre = match trimmed(self.genre) {
            g if g.is_empty() => DEFAULT_GENRE.to_string(),
            g => g,
        };

        Ok(BookRecord {
            title,
            author,
            genre,
            published_year,
            description: trimmed(self.description),
            cover_url: trimmed(self.cover_url),
            reading_status,
            tags: self.tags.unwrap_or_default(),
        })
    }
}

impl From<&Book> for BookInput {
    fn from(book: &Book) -> Self {
        Self {
            title: Some(book.title.clone()),
            author: Some(book.author.clone()),
            genre: Some(book.genre.clone()),
            published_year: Some(YearValue::Number(book.published_year.into())),
            description: Some(book.description.clone()),
            cover_url: Some(book.cover_url.clone()),
            reading_status: Some(book.reading_status.as_str().to_string()),
            tags: Some(book.tags.clone()),
        }
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

/// A fully validated book, ready to be written to the store
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
    pub description: String,
    pub cover_url: String,
    pub reading_status: ReadingStatus,
    pub tags: Vec<String>,
}

impl BookRecord {
    pub fn tags_json(&self) -> String {
        serde_json::to_string(&self.tags).unwrap_or_else(|_| "[]".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Book validation failed: {}", .0.join(", "))]
pub struct ValidationError(pub Vec<String>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_fields_take_defaults() {
        let record = BookInput::new("Dune", "Herbert").validate(2024).unwrap();

        assert_eq!(record.title, "Dune");
        assert_eq!(record.author, "Herbert");
        assert_eq!(record.genre, "Unknown");
        assert_eq!(record.published_year, 2024);
        assert_eq!(record.description, "");
        assert_eq!(record.cover_url, "");
        assert_eq!(record.reading_status, ReadingStatus::Unread);
        assert!(record.tags.is_empty());
    }

    #[test]
    fn strings_are_trimmed() {
        let input = BookInput {
            genre: Some("  Sci-Fi ".to_string()),
            description: Some(" desert planet\n".to_string()),
            ..BookInput::new("  Dune ", "\tHerbert")
        };
        let record = input.validate(2024).unwrap();

        assert_eq!(record.title, "Dune");
        assert_eq!(record.author, "Herbert");
        assert_eq!(record.genre, "Sci-Fi");
        assert_eq!(record.description, "desert planet");
    }

    #[test]
    fn blank_required_fields_are_reported_together() {
        let err = BookInput::new("   ", "").validate(2024).unwrap_err();
        assert_eq!(
            err.0,
            vec!["Title is required".to_string(), "Author is required".to_string()]
        );
        assert_eq!(
            err.to_string(),
            "Book validation failed: Title is required, Author is required"
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let input = BookInput {
            reading_status: Some("abandoned".to_string()),
            ..BookInput::new("Dune", "Herbert")
        };
        let err = input.validate(2024).unwrap_err();
        assert_eq!(err.0, vec!["`abandoned` is not a valid reading status"]);
    }

    #[test]
    fn year_accepts_numbers_and_numeric_strings() {
        let from_text = BookInput {
            published_year: Some(YearValue::Text(" 1965 ".to_string())),
            ..BookInput::new("Dune", "Herbert")
        };
        assert_eq!(from_text.validate(2024).unwrap().published_year, 1965);

        let blank = BookInput {
            published_year: Some(YearValue::Text(String::new())),
            ..BookInput::new("Dune", "Herbert")
        };
        assert_eq!(blank.validate(2024).unwrap().published_year, 2024);

        let garbage = BookInput {
            published_year: Some(YearValue::Text("sixties".to_string())),
            ..BookInput::new("Dune", "Herbert")
        };
        assert!(garbage.validate(2024).is_err());
    }

    #[test]
    fn year_accepts_whole_floats_only() {
        let input: BookInput =
            serde_json::from_str(r#"{"title":"Dune","author":"Herbert","publishedYear":1965.0}"#)
                .unwrap();
        assert_eq!(input.validate(2024).unwrap().published_year, 1965);

        for raw in ["1965.5", "true", "[1965]", r#"{"year":1965}"#] {
            let body = format!(r#"{{"title":"Dune","author":"Herbert","publishedYear":{}}}"#, raw);
            let input: BookInput = serde_json::from_str(&body).unwrap();
            let err = input.validate(2024).unwrap_err();
            assert_eq!(err.0, vec!["publishedYear must be a whole number"], "{}", raw);
        }
    }

    #[test]
    fn input_decodes_camel_case_and_loose_year() {
        let input: BookInput = serde_json::from_str(
            r#"{"title":"Dune","author":"Herbert","publishedYear":"1965","readingStatus":"reading","coverUrl":null}"#,
        )
        .unwrap();

        assert_eq!(input.published_year, Some(YearValue::Text("1965".into())));
        assert_eq!(input.reading_status.as_deref(), Some("reading"));
        assert_eq!(input.cover_url, None);
    }

    #[test]
    fn model_with_bad_tags_json_yields_empty_tags() {
        let model = Model {
            id: "abc".into(),
            title: "Dune".into(),
            author: "Herbert".into(),
            genre: "Unknown".into(),
            published_year: 1965,
            description: String::new(),
            cover_url: String::new(),
            reading_status: "completed".into(),
            tags: "not json".into(),
            created_at: "2024-01-01T00:00:00.000Z".into(),
            updated_at: "2024-01-01T00:00:00.000Z".into(),
        };
        let book = Book::from(model);
        assert!(book.tags.is_empty());
        assert_eq!(book.reading_status, ReadingStatus::Completed);
    }
}
