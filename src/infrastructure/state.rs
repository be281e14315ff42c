//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::BookRepository;
use crate::infrastructure::SeaOrmBookRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection (health checks)
    db: DatabaseConnection,
    /// Book repository
    pub book_repo: Arc<dyn BookRepository>,
    /// Largest page size the list endpoint will serve
    pub max_page_limit: u64,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection, max_page_limit: u64) -> Self {
        let book_repo = Arc::new(SeaOrmBookRepository::new(db.clone()));

        Self {
            db,
            book_repo,
            max_page_limit,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
