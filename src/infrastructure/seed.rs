use crate::domain::{BookRepository, DomainError};
use crate::models::{BookInput, YearValue};

struct DemoBook {
    title: &'static str,
    author: &'static str,
    genre: &'static str,
    year: i64,
    status: &'static str,
    tags: &'static [&'static str],
}

const fn demo(
    title: &'static str,
    author: &'static str,
    genre: &'static str,
    year: i64,
    status: &'static str,
    tags: &'static [&'static str],
) -> DemoBook {
    DemoBook { title, author, genre, year, status, tags }
}

const DEMO_BOOKS: &[DemoBook] = &[
    demo("Dune", "Frank Herbert", "Science Fiction", 1965, "completed", &["classic", "desert"]),
    demo("Foundation", "Isaac Asimov", "Science Fiction", 1951, "reading", &["classic"]),
    demo("The Hobbit", "J.R.R. Tolkien", "Fantasy", 1937, "completed", &["adventure"]),
    demo("The Left Hand of Darkness", "Ursula K. Le Guin", "Science Fiction", 1969, "unread", &[]),
    demo("Middlemarch", "George Eliot", "Literary Fiction", 1871, "unread", &["victorian"]),
    demo("A Brief History of Time", "Stephen Hawking", "Non-Fiction", 1988, "reading", &["physics"]),
];

/// Insert the demo books into an empty collection.
///
/// Returns how many books were inserted; a non-empty collection is left alone.
pub async fn seed_demo_data(repo: &dyn BookRepository) -> Result<usize, DomainError> {
    if repo.find_page(0, 1).await?.total > 0 {
        tracing::info!("Collection already has books, skipping demo seed");
        return Ok(0);
    }

    for book in DEMO_BOOKS {
        let input = BookInput {
            genre: Some(book.genre.to_string()),
            published_year: Some(YearValue::Number(book.year)),
            reading_status: Some(book.status.to_string()),
            tags: Some(book.tags.iter().map(|t| t.to_string()).collect()),
            ..BookInput::new(book.title, book.author)
        };
        repo.insert(input).await?;
    }

    Ok(DEMO_BOOKS.len())
}
