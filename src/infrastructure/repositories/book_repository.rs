//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use chrono::{Datelike, SecondsFormat, Utc};
use sea_orm::sea_query::{Expr, Order};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};
use uuid::Uuid;

use crate::domain::{BookPage, BookRepository, DomainError};
use crate::models::book::{ActiveModel, Entity as BookEntity};
use crate::models::{Book, BookInput};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// Millisecond RFC 3339 in UTC, e.g. 2024-05-01T09:30:00.123Z
fn timestamp(now: chrono::DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn insert(&self, input: BookInput) -> Result<Book, DomainError> {
        let now = Utc::now();
        let record = input.validate(now.year())?;
        let stamp = timestamp(now);

        let new_book = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            tags: Set(record.tags_json()),
            title: Set(record.title),
            author: Set(record.author),
            genre: Set(record.genre),
            published_year: Set(record.published_year),
            description: Set(record.description),
            cover_url: Set(record.cover_url),
            reading_status: Set(record.reading_status.as_str().to_string()),
            created_at: Set(stamp.clone()),
            updated_at: Set(stamp),
        };

        let model = new_book.insert(&self.db).await?;
        tracing::debug!("Inserted book {}", model.id);
        Ok(Book::from(model))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, DomainError> {
        let model = BookEntity::find_by_id(id.to_string()).one(&self.db).await?;
        Ok(model.map(Book::from))
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<BookPage, DomainError> {
        let total = BookEntity::find().count(&self.db).await?;

        // rowid follows insertion order
        let models = BookEntity::find()
            .order_by(Expr::cust("rowid"), Order::Asc)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;

        tracing::debug!(
            "find_page skip={} limit={} returned {} of {}",
            skip,
            limit,
            models.len(),
            total
        );

        Ok(BookPage {
            books: models.into_iter().map(Book::from).collect(),
            total,
        })
    }

    async fn update_by_id(&self, id: &str, input: BookInput) -> Result<Book, DomainError> {
        let now = Utc::now();
        let record = input.validate(now.year())?;

        let existing = BookEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.tags = Set(record.tags_json());
        active.title = Set(record.title);
        active.author = Set(record.author);
        active.genre = Set(record.genre);
        active.published_year = Set(record.published_year);
        active.description = Set(record.description);
        active.cover_url = Set(record.cover_url);
        active.reading_status = Set(record.reading_status.as_str().to_string());
        active.updated_at = Set(timestamp(now));

        let model = active.update(&self.db).await?;
        Ok(Book::from(model))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        let result = BookEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
