//! shelf
//!
//! Terminal front end for the book collection API.

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf::client::form::LookupOutcome;
use bookshelf::client::state::{DELETE_FAILED, LOAD_FAILED};
use bookshelf::client::{BookForm, BooksApi, ClientConfig, LibraryState};
use bookshelf::google_books::GoogleBooksClient;
use bookshelf::models::ReadingStatus;
use bookshelf::views::{self, DashboardStats, StatusFilter};

/// Books fetched for the dashboard and reading list
const OVERVIEW_LIMIT: u64 = 100;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Browse and edit your book collection")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Books collection URL (overrides BOOKS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Google Books volumes URL (overrides GOOGLE_BOOKS_API_URL)
    #[arg(long, global = true)]
    google_books_url: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of the collection
    #[command(alias = "ls")]
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u64,
        /// Page size (5, 10, 20 or 50 in the UI; any positive value works)
        #[arg(short, long, default_value_t = 10)]
        limit: u64,
        /// Case-insensitive match on title or author
        #[arg(short, long)]
        search: Option<String>,
        /// Exact genre
        #[arg(short, long)]
        genre: Option<String>,
    },
    /// Show book details
    Show { id: String },
    /// Add a book, optionally pre-filled from an ISBN
    Add {
        /// Look up metadata before applying the flags below
        #[arg(long)]
        isbn: Option<String>,
        #[command(flatten)]
        fields: BookFields,
    },
    /// Edit a book; only the given fields change
    Edit {
        id: String,
        /// Re-fill metadata from an ISBN before applying the flags below
        #[arg(long)]
        isbn: Option<String>,
        #[command(flatten)]
        fields: BookFields,
    },
    /// Delete a book
    #[command(alias = "rm")]
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Look up book metadata by ISBN without saving
    Lookup { isbn: String },
    /// Collection statistics
    Dashboard,
    /// Books grouped by reading status
    ReadingList {
        /// all, unread, reading or completed
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },
}

#[derive(Args)]
struct BookFields {
    #[arg(short = 'T', long)]
    title: Option<String>,
    #[arg(short, long)]
    author: Option<String>,
    #[arg(short, long)]
    genre: Option<String>,
    #[arg(short, long)]
    year: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    #[arg(long)]
    cover_url: Option<String>,
    /// unread, reading or completed
    #[arg(short, long)]
    status: Option<ReadingStatus>,
    /// Comma-separated
    #[arg(long)]
    tags: Option<String>,
}

impl BookFields {
    fn apply(self, form: &mut BookForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(author) = self.author {
            form.author = author;
        }
        if let Some(genre) = self.genre {
            form.genre = genre;
        }
        if let Some(year) = self.year {
            form.published_year = year;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(cover_url) = self.cover_url {
            form.cover_url = cover_url;
        }
        if let Some(status) = self.status {
            form.reading_status = status;
        }
        if let Some(tags) = self.tags {
            form.set_tags(&tags);
        }
    }
}

struct Shelf {
    api: BooksApi,
    google_books_url: String,
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf=warn,bookshelf=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    let shelf = Shelf {
        api: BooksApi::new(cli.api_url.unwrap_or(config.api_url)),
        google_books_url: cli.google_books_url.unwrap_or(config.google_books_url),
        json: cli.json,
    };

    match cli.command {
        Commands::List {
            page,
            limit,
            search,
            genre,
        } => shelf.list(page, limit, search, genre).await,
        Commands::Show { id } => shelf.show(&id).await,
        Commands::Add { isbn, fields } => shelf.add(isbn, fields).await,
        Commands::Edit { id, isbn, fields } => shelf.edit(&id, isbn, fields).await,
        Commands::Delete { id, yes } => shelf.delete(&id, yes).await,
        Commands::Lookup { isbn } => shelf.lookup(isbn).await,
        Commands::Dashboard => shelf.dashboard().await,
        Commands::ReadingList { status } => shelf.reading_list(status).await,
    }
}

impl Shelf {
    async fn list(
        &self,
        page: u64,
        limit: u64,
        search: Option<String>,
        genre: Option<String>,
    ) -> Result<()> {
        let mut state = LibraryState::new(limit);
        state.set_search_term(search.unwrap_or_default());
        state.set_genre_filter(genre);
        state
            .load_page(&self.api, page)
            .await
            .map_err(|e| anyhow!("{} ({})", LOAD_FAILED, e))?;

        if self.json {
            #[derive(Serialize)]
            struct Listing<'a> {
                books: Vec<&'a bookshelf::models::Book>,
                pagination: &'a bookshelf::models::Pagination,
            }
            return print_json(&Listing {
                books: state.filtered_books(),
                pagination: state.pagination(),
            });
        }

        println!("{}", views::render_list(&state));
        Ok(())
    }

    async fn show(&self, id: &str) -> Result<()> {
        let book = self
            .api
            .get(id)
            .await
            .map_err(|e| anyhow!(e.detail_message(id)))?;

        if self.json {
            return print_json(&book);
        }
        println!("{}", views::render_detail(&book));
        Ok(())
    }

    async fn add(&self, isbn: Option<String>, fields: BookFields) -> Result<()> {
        let mut form = BookForm::add();

        self.prefill(&mut form, isbn).await?;
        fields.apply(&mut form);
        self.save(form).await
    }

    async fn edit(&self, id: &str, isbn: Option<String>, fields: BookFields) -> Result<()> {
        let book = self
            .api
            .get(id)
            .await
            .map_err(|e| anyhow!(e.detail_message(id)))?;

        let mut form = BookForm::edit(&book);
        self.prefill(&mut form, isbn).await?;
        fields.apply(&mut form);
        self.save(form).await
    }

    /// A failed lookup is reported and the form keeps its values
    async fn prefill(&self, form: &mut BookForm, isbn: Option<String>) -> Result<()> {
        let Some(isbn) = isbn else {
            return Ok(());
        };

        form.isbn = isbn;
        if form.lookup_isbn(&self.google_books()?).await != LookupOutcome::Filled
            && let Some(message) = form.error()
        {
            eprintln!("{}", message);
        }
        Ok(())
    }

    async fn save(&self, mut form: BookForm) -> Result<()> {
        let mut state = LibraryState::default();
        let book = match form.submit(&mut state, &self.api).await {
            Ok(book) => book,
            Err(e) => {
                if !self.json {
                    eprintln!("{}", views::render_form(&form));
                }
                return Err(anyhow::Error::new(e));
            }
        };

        if self.json {
            return print_json(&book);
        }
        println!("{}", views::render_detail(&book));
        Ok(())
    }

    async fn delete(&self, id: &str, yes: bool) -> Result<()> {
        if !yes && !confirm("Are you sure you want to delete this book?")? {
            println!("Cancelled.");
            return Ok(());
        }

        let mut state = LibraryState::default();
        state
            .delete_book(&self.api, id)
            .await
            .map_err(|e| anyhow!("{} ({})", DELETE_FAILED, e))?;

        if self.json {
            return print_json(&serde_json::json!({ "deleted": id }));
        }
        println!("Deleted {}", id);
        Ok(())
    }

    async fn lookup(&self, isbn: String) -> Result<()> {
        let mut form = BookForm::add();
        form.isbn = isbn;

        if form.lookup_isbn(&self.google_books()?).await != LookupOutcome::Filled {
            bail!(form.error().unwrap_or("Lookup failed").to_string());
        }

        if self.json {
            return print_json(&form.validate().ok());
        }
        println!("{}", views::render_form(&form));
        Ok(())
    }

    async fn dashboard(&self) -> Result<()> {
        let state = self.overview().await?;

        if self.json {
            return print_json(&DashboardStats::from_books(state.books()));
        }
        println!("{}", views::render_dashboard(state.books()));
        Ok(())
    }

    async fn reading_list(&self, status: StatusFilter) -> Result<()> {
        let state = self.overview().await?;

        if self.json {
            return print_json(&views::filter_by_status(state.books(), status));
        }
        println!("{}", views::render_reading_list(state.books(), status));
        Ok(())
    }

    /// First page at a size large enough for a personal collection
    async fn overview(&self) -> Result<LibraryState> {
        let mut state = LibraryState::new(OVERVIEW_LIMIT);
        state
            .load_page(&self.api, 1)
            .await
            .map_err(|e| anyhow!("{} ({})", LOAD_FAILED, e))?;
        Ok(state)
    }

    fn google_books(&self) -> Result<GoogleBooksClient> {
        GoogleBooksClient::new(self.google_books_url.clone())
            .context("Failed to build metadata client")
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Returns false without asking when stdin is not a terminal
fn confirm(prompt: &str) -> Result<bool> {
    if !io::stdin().is_terminal() {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
