//! Plain-text rendering of the front-end screens
//!
//! Every function here is pure: it takes loaded data and returns the text
//! to show. Fetching and mutation live in `crate::client`.

pub mod dashboard;
pub mod detail;
pub mod form;
pub mod list;
pub mod reading_list;

pub use dashboard::{DashboardStats, render_dashboard};
pub use detail::{render_detail, render_detail_error};
pub use form::render_form;
pub use list::render_list;
pub use reading_list::{StatusFilter, filter_by_status, render_reading_list};

use crate::models::Book;

/// A button; disabled ones are still shown so the layout stays stable
pub fn control(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{}]", label)
    } else {
        format!("[{}] (disabled)", label)
    }
}

/// Compact card: title, author and an id line for follow-up commands
pub(crate) fn book_card(book: &Book, with_details: bool) -> Vec<String> {
    let mut lines = vec![
        truncate(&book.title, 60),
        format!("  by {}", book.author),
    ];

    if with_details {
        if !book.genre.is_empty() {
            lines.push(format!("  Genre:     {}", book.genre));
        }
        lines.push(format!("  Published: {}", book.published_year));
        lines.push(format!("  Status:    {}", book.reading_status));
    }
    if !book.cover_url.is_empty() {
        lines.push(format!("  Cover:     {}", book.cover_url));
    }
    lines.push(format!("  ID:        {}", book.id));
    lines
}

/// Truncate a string to a max length, adding "..." if truncated
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_controls_are_marked() {
        assert_eq!(control("Next", true), "[Next]");
        assert_eq!(control("Next", false), "[Next] (disabled)");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Cien años de soledad", 10), "Cien añ...");
    }
}
