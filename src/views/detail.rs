use super::control;
use crate::models::Book;

pub const LOADING: &str = "Loading book details...";

pub fn render_detail(book: &Book) -> String {
    let mut lines = vec![
        format!("Book Details  {}", control("Back to Books", true)),
        String::new(),
        book.title.clone(),
        format!("Author:    {}", book.author),
    ];

    if !book.genre.is_empty() {
        lines.push(format!("Genre:     {}", book.genre));
    }
    lines.push(format!("Published: {}", book.published_year));
    lines.push(format!("Status:    {}", book.reading_status.label()));
    if book.cover_url.is_empty() {
        lines.push("Cover:     No Cover Available".to_string());
    } else {
        lines.push(format!("Cover:     {}", book.cover_url));
    }
    if !book.tags.is_empty() {
        lines.push(format!("Tags:      {}", book.tags.join(", ")));
    }
    lines.push(format!("Added:     {}", book.created_at));
    lines.push(format!("Updated:   {}", book.updated_at));
    lines.push(format!("ID:        {}", book.id));

    if !book.description.is_empty() {
        lines.push(String::new());
        lines.push("Description".to_string());
        lines.push(book.description.clone());
    }

    lines.push(String::new());
    lines.push(format!(
        "{} {}",
        control("Edit Book", true),
        control("Delete Book", true)
    ));
    lines.join("\n")
}

/// Error state with the only retry path the front end offers
pub fn render_detail_error(message: &str) -> String {
    [
        "Error".to_string(),
        message.to_string(),
        String::new(),
        format!("{} {}", control("Retry", true), control("Back to Books", true)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::state::tests::book;

    #[test]
    fn detail_shows_fields_and_actions() {
        let mut b = book("b1", "Dune", "Frank Herbert", "Sci-Fi");
        b.description = "Spice.".into();
        let text = render_detail(&b);

        assert!(text.contains("Author:    Frank Herbert"));
        assert!(text.contains("Status:    Unread"));
        assert!(text.contains("No Cover Available"));
        assert!(text.contains("Description\nSpice."));
        assert!(text.ends_with("[Edit Book] [Delete Book]"));
    }

    #[test]
    fn error_view_offers_retry() {
        let text = render_detail_error("Unable to connect to the server.");
        assert!(text.starts_with("Error\nUnable to connect"));
        assert!(text.contains("[Retry] [Back to Books]"));
    }
}
