use super::{book_card, control};
use crate::client::LibraryState;
use crate::client::state::PAGE_SIZES;

pub const ALL_GENRES: &str = "All Genres";
pub const LOADING: &str = "Loading books...";
pub const EMPTY: &str = "No books found. Add some books to your collection!";

/// The collection screen for the current page
pub fn render_list(state: &LibraryState) -> String {
    let mut lines = vec![
        format!("Book Collection  {}", control("Add New Book", true)),
        format!("Search: {}", state.search_term()),
        genre_selector(state),
    ];
    lines.push(String::new());

    if state.is_loading() {
        lines.push(LOADING.to_string());
        return lines.join("\n");
    }

    if let Some(error) = state.error() {
        lines.push(format!("Error: {}", error));
        lines.push(String::new());
    }

    let books = state.filtered_books();
    if books.is_empty() {
        lines.push(EMPTY.to_string());
        return lines.join("\n");
    }

    for book in &books {
        lines.extend(book_card(book, true));
        lines.push(String::new());
    }

    let pagination = state.pagination();
    lines.push(format!(
        "Showing {} of {} books",
        books.len(),
        pagination.total_books
    ));
    lines.push(page_size_selector(state.limit()));
    lines.push(format!(
        "{}  Page {} of {}  {}",
        control("Previous", pagination.has_prev_page),
        pagination.current_page,
        pagination.total_pages,
        control("Next", pagination.has_next_page)
    ));

    lines.join("\n")
}

fn genre_selector(state: &LibraryState) -> String {
    let selected = state.genre_filter();
    let mut options = vec![mark(ALL_GENRES, selected.is_none())];
    options.extend(
        state
            .genres()
            .into_iter()
            .map(|genre| mark(genre, selected == Some(genre))),
    );
    format!("Genre: {}", options.join(" | "))
}

fn page_size_selector(limit: u64) -> String {
    let options: Vec<String> = PAGE_SIZES
        .iter()
        .map(|size| mark(&format!("{} per page", size), *size == limit))
        .collect();
    options.join(" | ")
}

fn mark(option: &str, selected: bool) -> String {
    if selected {
        format!("*{}*", option)
    } else {
        option.to_string()
    }
}
