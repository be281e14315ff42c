pub mod book;
pub mod page;

pub use book::{Book, BookInput, BookRecord, ReadingStatus, ValidationError, YearValue};
pub use page::{BookListResponse, Pagination};
