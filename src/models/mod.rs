//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookDetail, BookDraft, BookFields, BookSubmission, BookSummary, FieldError};
pub use book_instance::{BookInstance, BookInstanceStatus};
pub use genre::{Genre, GenreOption};
