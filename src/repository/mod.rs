//! Repository layer for database operations

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Author, Book, BookDetail, BookFields, BookInstance, BookInstanceStatus, BookSummary, Genre,
    },
};

/// Store operations used by the catalog services.
///
/// Lookups by id return `None` for a missing record; only store failures
/// are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn ping(&self) -> AppResult<()>;

    async fn count_books(&self) -> AppResult<i64>;
    /// Counts all copies, or only those in `status`
    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64>;
    async fn count_authors(&self) -> AppResult<i64>;
    async fn count_genres(&self) -> AppResult<i64>;

    /// All books, title and author only, ordered by title
    async fn list_books(&self) -> AppResult<Vec<BookSummary>>;
    async fn get_book(&self, id: Uuid) -> AppResult<Option<BookDetail>>;
    async fn create_book(&self, fields: &BookFields) -> AppResult<Book>;
    async fn update_book(&self, id: Uuid, fields: &BookFields) -> AppResult<Option<Book>>;
    /// Deletes the book unless a copy references it. Returns whether a row
    /// was removed.
    async fn delete_book_if_unreferenced(&self, id: Uuid) -> AppResult<bool>;

    async fn list_book_instances(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub book_instances: book_instances::BookInstancesRepository,
    pub authors: authors::AuthorsRepository,
    pub genres: genres::GenresRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            book_instances: book_instances::BookInstancesRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn count_books(&self) -> AppResult<i64> {
        self.books.count().await
    }

    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        self.book_instances.count(status).await
    }

    async fn count_authors(&self) -> AppResult<i64> {
        self.authors.count().await
    }

    async fn count_genres(&self) -> AppResult<i64> {
        self.genres.count().await
    }

    async fn list_books(&self) -> AppResult<Vec<BookSummary>> {
        self.books.list().await
    }

    async fn get_book(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        self.books.get_by_id(id).await
    }

    async fn create_book(&self, fields: &BookFields) -> AppResult<Book> {
        self.books.create(fields).await
    }

    async fn update_book(&self, id: Uuid, fields: &BookFields) -> AppResult<Option<Book>> {
        self.books.update(id, fields).await
    }

    async fn delete_book_if_unreferenced(&self, id: Uuid) -> AppResult<bool> {
        self.books.delete_if_unreferenced(id).await
    }

    async fn list_book_instances(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        self.book_instances.list_for_book(book_id).await
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.genres.list().await
    }
}
