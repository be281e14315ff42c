//! Front-end data layer: API client, page state and the book form

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod state;

pub use api::BooksApi;
pub use config::ClientConfig;
pub use error::ClientError;
pub use form::{BookForm, FormError, FormMode, LookupOutcome};
pub use state::{LibraryState, distinct_genres};
