use std::fmt;
use std::str::FromStr;

use super::book_card;
use crate::models::{Book, ReadingStatus};

pub const EMPTY: &str = "No books found with the selected status.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReadingStatus),
}

impl StatusFilter {
    pub const OPTIONS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(ReadingStatus::Unread),
        StatusFilter::Only(ReadingStatus::Reading),
        StatusFilter::Only(ReadingStatus::Completed),
    ];

    pub fn matches(&self, book: &Book) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => book.reading_status == *status,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(ReadingStatus::Unread) => "Unread",
            StatusFilter::Only(ReadingStatus::Reading) => "Reading",
            StatusFilter::Only(ReadingStatus::Completed) => "Completed",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(StatusFilter::All);
        }
        s.parse::<ReadingStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| format!("unknown status filter `{}` (all, unread, reading, completed)", s))
    }
}

/// Books matching `filter`, in their original order
pub fn filter_by_status(books: &[Book], filter: StatusFilter) -> Vec<&Book> {
    books.iter().filter(|b| filter.matches(b)).collect()
}

pub fn render_reading_list(books: &[Book], filter: StatusFilter) -> String {
    let options: Vec<String> = StatusFilter::OPTIONS
        .iter()
        .map(|option| {
            if *option == filter {
                format!("*{}*", option.label())
            } else {
                option.label().to_string()
            }
        })
        .collect();

    let mut lines = vec![
        "Reading List".to_string(),
        options.join(" | "),
        String::new(),
    ];

    let matching = filter_by_status(books, filter);
    if matching.is_empty() {
        lines.push(EMPTY.to_string());
    }
    for book in matching {
        lines.extend(book_card(book, true));
        lines.push(String::new());
    }

    lines.join("\n")
}
