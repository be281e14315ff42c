//! Collection summary over the books currently loaded

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::{book_card, control};
use crate::client::distinct_genres;
use crate::models::{Book, ReadingStatus};

const SECTION_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_books: usize,
    pub currently_reading: usize,
    pub completed: usize,
    pub genres: usize,
}

impl DashboardStats {
    pub fn from_books(books: &[Book]) -> Self {
        let count = |status: ReadingStatus| {
            books.iter().filter(|b| b.reading_status == status).count()
        };

        Self {
            total_books: books.len(),
            currently_reading: count(ReadingStatus::Reading),
            completed: count(ReadingStatus::Completed),
            genres: distinct_genres(books).len(),
        }
    }
}

/// Newest first by `createdAt`; unparsable timestamps sort last
pub fn recently_added(books: &[Book]) -> Vec<&Book> {
    let mut sorted: Vec<&Book> = books.iter().collect();
    sorted.sort_by_key(|b| std::cmp::Reverse(created_at(b)));
    sorted.truncate(SECTION_SIZE);
    sorted
}

pub fn currently_reading(books: &[Book]) -> Vec<&Book> {
    books
        .iter()
        .filter(|b| b.reading_status == ReadingStatus::Reading)
        .take(SECTION_SIZE)
        .collect()
}

fn created_at(book: &Book) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(&book.created_at).ok()
}

pub fn render_dashboard(books: &[Book]) -> String {
    let stats = DashboardStats::from_books(books);
    let mut lines = vec![
        "Dashboard".to_string(),
        String::new(),
        format!("Total Books:       {}", stats.total_books),
        format!("Currently Reading: {}", stats.currently_reading),
        format!("Completed Books:   {}", stats.completed),
        format!("Genres:            {}", stats.genres),
        String::new(),
        format!("Recently Added  {}", control("View All", true)),
    ];

    let recent = recently_added(books);
    if recent.is_empty() {
        lines.push("No books added yet. Add some books to your collection!".to_string());
    }
    for book in recent {
        lines.extend(book_card(book, false));
    }

    lines.push(String::new());
    lines.push(format!("Currently Reading  {}", control("View All", true)));
    let reading = currently_reading(books);
    if reading.is_empty() {
        lines.push("No books currently being read.".to_string());
    }
    for book in reading {
        lines.extend(book_card(book, false));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::state::tests::book;

    fn with(id: &str, status: ReadingStatus, created_at: &str, genre: &str) -> Book {
        let mut b = book(id, id, "Author", genre);
        b.reading_status = status;
        b.created_at = created_at.to_string();
        b
    }

    fn sample() -> Vec<Book> {
        vec![
            with("a", ReadingStatus::Reading, "2024-01-01T00:00:00.000Z", "Fantasy"),
            with("b", ReadingStatus::Completed, "2024-03-01T00:00:00.000Z", ""),
            with("c", ReadingStatus::Reading, "2024-02-01T00:00:00.000Z", "Fantasy"),
            with("d", ReadingStatus::Unread, "2024-05-01T00:00:00.000Z", "Horror"),
            with("e", ReadingStatus::Reading, "2024-04-01T00:00:00.000Z", "Poetry"),
            with("f", ReadingStatus::Reading, "not a date", "Poetry"),
        ]
    }

    #[test]
    fn stats_count_statuses_and_genres() {
        let stats = DashboardStats::from_books(&sample());
        assert_eq!(
            stats,
            DashboardStats {
                total_books: 6,
                currently_reading: 4,
                completed: 1,
                genres: 3,
            }
        );
    }

    #[test]
    fn recent_books_are_newest_three() {
        let books = sample();
        let ids: Vec<&str> = recently_added(&books).iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "e", "b"]);
    }

    #[test]
    fn currently_reading_keeps_order() {
        let books = sample();
        let ids: Vec<&str> = currently_reading(&books).iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "e"]);
    }

    #[test]
    fn empty_dashboard() {
        let text = render_dashboard(&[]);
        assert!(text.contains("Total Books:       0"));
        assert!(text.contains("No books currently being read."));
    }
}
