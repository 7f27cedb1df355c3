//! Books repository.
//!
//! Genres are kept in the `book_genres` junction table with a `position`
//! column so a book's genre list reads back in the order it was saved.

use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookDetail, BookFields, BookSummary, Genre},
};

fn author_from_row(row: &PgRow) -> AppResult<Author> {
    Ok(Author {
        id: row.try_get("author_id")?,
        first_name: row.try_get("first_name")?,
        family_name: row.try_get("family_name")?,
        date_of_birth: row.try_get("date_of_birth")?,
        date_of_death: row.try_get("date_of_death")?,
    })
}

/// Foreign key failures mean the submitted author or genre no longer
/// exists; report them as a bad submission rather than a store failure.
fn missing_reference(e: sqlx::Error) -> AppError {
    let message = e
        .as_database_error()
        .filter(|db| db.is_foreign_key_violation())
        .map(|db| match db.constraint() {
            Some("books_author_id_fkey") => "Selected author does not exist",
            Some("book_genres_genre_id_fkey") => "Selected genre does not exist",
            _ => "Referenced record does not exist",
        });

    match message {
        Some(message) => {
            tracing::debug!("Book write rejected: {}", message);
            AppError::BadRequest(message.to_string())
        }
        None => AppError::Database(e),
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// List all books with their author, ordered by title (byte order)
    pub async fn list(&self) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.title,
                   a.id AS author_id, a.first_name, a.family_name,
                   a.date_of_birth, a.date_of_death
            FROM books b
            JOIN authors a ON a.id = b.author_id
            ORDER BY b.title COLLATE "C"
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| -> AppResult<BookSummary> {
                Ok(BookSummary {
                    id: r.try_get("id")?,
                    title: r.try_get("title")?,
                    author: author_from_row(r)?,
                })
            })
            .collect()
    }

    /// Get a book with its author and genres
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        let book_query = sqlx::query(
            r#"
            SELECT b.id, b.title, b.author_id, b.summary, b.isbn,
                   a.first_name, a.family_name, a.date_of_birth, a.date_of_death
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool);

        let genres_query = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = $1
            ORDER BY bg.position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool);

        let (row, genres) = tokio::try_join!(book_query, genres_query)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let book = Book {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            author_id: row.try_get("author_id")?,
            summary: row.try_get("summary")?,
            isbn: row.try_get("isbn")?,
        };
        let author = author_from_row(&row)?;

        Ok(Some(BookDetail {
            book,
            author,
            genres,
        }))
    }

    // =========================================================================
    // CREATE / UPDATE
    // =========================================================================

    /// Insert a new book and its genre links in one transaction
    pub async fn create(&self, fields: &BookFields) -> AppResult<Book> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, author_id, summary, isbn
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(fields.author_id)
        .bind(&fields.summary)
        .bind(&fields.isbn)
        .fetch_one(&mut *tx)
        .await
        .map_err(missing_reference)?;

        sqlx::query(INSERT_GENRES)
            .bind(id)
            .bind(&fields.genre_ids)
            .execute(&mut *tx)
            .await
            .map_err(missing_reference)?;

        tx.commit().await?;
        Ok(book)
    }

    /// Overwrite an existing book in place, keeping its id. Returns `None`
    /// when no book has this id.
    pub async fn update(&self, id: Uuid, fields: &BookFields) -> AppResult<Option<Book>> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = $1,
                author_id = $2,
                summary = $3,
                isbn = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING id, title, author_id, summary, isbn
            "#,
        )
        .bind(&fields.title)
        .bind(fields.author_id)
        .bind(&fields.summary)
        .bind(&fields.isbn)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(missing_reference)?;

        let Some(book) = book else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(INSERT_GENRES)
            .bind(id)
            .bind(&fields.genre_ids)
            .execute(&mut *tx)
            .await
            .map_err(missing_reference)?;

        tx.commit().await?;
        Ok(Some(book))
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Delete a book only if no book instance references it. The check and
    /// the delete are a single statement.
    pub async fn delete_if_unreferenced(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM books b
            WHERE b.id = $1
              AND NOT EXISTS (SELECT 1 FROM book_instances bi WHERE bi.book_id = b.id)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Links a book to an ordered list of genres ($1 = book id, $2 = genre ids)
const INSERT_GENRES: &str = r#"
    INSERT INTO book_genres (book_id, genre_id, position)
    SELECT $1, g.genre_id, (g.ord - 1)::smallint
    FROM UNNEST($2::uuid[]) WITH ORDINALITY AS g(genre_id, ord)
"#;
