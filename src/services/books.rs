//! Book catalog service: list, detail, create, update and delete.
//!
//! Create and update share one flow: build the candidate from the
//! submission, validate, then either persist it or hand the candidate back
//! with its errors so the form can be shown again.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Author, Book, BookDetail, BookDraft, BookFields, BookInstance, BookSubmission,
        BookSummary, FieldError, Genre, GenreOption,
    },
    repository::CatalogStore,
};

pub const CREATE_FORM_TITLE: &str = "Create Book";
pub const UPDATE_FORM_TITLE: &str = "Update Book";

/// A book together with the copies that reference it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookWithCopies {
    pub book: BookDetail,
    pub instances: Vec<BookInstance>,
}

/// Everything the book form needs to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookFormView {
    pub title: &'static str,
    pub book: BookDraft,
    pub authors: Vec<Author>,
    pub genres: Vec<GenreOption>,
    pub errors: Vec<FieldError>,
}

impl BookFormView {
    fn new(
        title: &'static str,
        book: BookDraft,
        authors: Vec<Author>,
        genres: Vec<Genre>,
        errors: Vec<FieldError>,
    ) -> Self {
        let genres = genres
            .into_iter()
            .map(|genre| GenreOption {
                checked: book.has_genre(&genre),
                genre,
            })
            .collect();
        Self {
            title,
            book,
            authors,
            genres,
            errors,
        }
    }
}

/// Result of a create or update submission
#[derive(Debug)]
pub enum BookFormOutcome {
    /// Validation failed; show the form again
    Invalid(BookFormView),
    Saved(Book),
}

/// Result of a delete submission
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The book is gone
    Deleted,
    /// Copies still reference the book; show the confirmation again
    Blocked(BookWithCopies),
}

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn CatalogStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All books, ordered by title
    pub async fn list(&self) -> AppResult<Vec<BookSummary>> {
        self.store.list_books().await
    }

    /// A book and its copies; not found if the book does not exist
    pub async fn detail(&self, id: Uuid) -> AppResult<BookWithCopies> {
        self.with_copies(id)
            .await?
            .ok_or_else(AppError::book_not_found)
    }

    async fn with_copies(&self, id: Uuid) -> AppResult<Option<BookWithCopies>> {
        let (book, instances) = tokio::try_join!(
            self.store.get_book(id),
            self.store.list_book_instances(id),
        )?;
        Ok(book.map(|book| BookWithCopies { book, instances }))
    }

    async fn form(
        &self,
        title: &'static str,
        book: BookDraft,
        errors: Vec<FieldError>,
    ) -> AppResult<BookFormView> {
        let (authors, genres) =
            tokio::try_join!(self.store.list_authors(), self.store.list_genres())?;
        Ok(BookFormView::new(title, book, authors, genres, errors))
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    pub async fn create_form(&self) -> AppResult<BookFormView> {
        self.form(CREATE_FORM_TITLE, BookDraft::default(), Vec::new())
            .await
    }

    pub async fn create(&self, submission: BookSubmission) -> AppResult<BookFormOutcome> {
        let (draft, errors) = submission.into_candidate(None);

        if !errors.is_empty() {
            tracing::debug!("Book create rejected: {} invalid field(s)", errors.len());
            let view = self.form(CREATE_FORM_TITLE, draft, errors).await?;
            return Ok(BookFormOutcome::Invalid(view));
        }

        let fields = BookFields::try_from(&draft)?;
        let book = self.store.create_book(&fields).await?;
        tracing::info!("Book created: id={} title={:?}", book.id, book.title);
        Ok(BookFormOutcome::Saved(book))
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    /// Form pre-populated with the stored book, its genres checked
    pub async fn update_form(&self, id: Uuid) -> AppResult<BookFormView> {
        let (book, authors, genres) = tokio::try_join!(
            self.store.get_book(id),
            self.store.list_authors(),
            self.store.list_genres(),
        )?;
        let book = book.ok_or_else(AppError::book_not_found)?;

        Ok(BookFormView::new(
            UPDATE_FORM_TITLE,
            BookDraft::from_detail(&book),
            authors,
            genres,
            Vec::new(),
        ))
    }

    /// Overwrite the book `id` in place. The stored record keeps `id`.
    pub async fn update(&self, id: Uuid, submission: BookSubmission) -> AppResult<BookFormOutcome> {
        let (draft, errors) = submission.into_candidate(Some(id));

        if !errors.is_empty() {
            tracing::debug!(
                "Book update rejected: id={} {} invalid field(s)",
                id,
                errors.len()
            );
            let view = self.form(UPDATE_FORM_TITLE, draft, errors).await?;
            return Ok(BookFormOutcome::Invalid(view));
        }

        let fields = BookFields::try_from(&draft)?;
        let book = self
            .store
            .update_book(id, &fields)
            .await?
            .ok_or_else(AppError::book_not_found)?;
        tracing::info!("Book updated: id={}", book.id);
        Ok(BookFormOutcome::Saved(book))
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Book and its copies for the confirmation page, `None` if the book
    /// does not exist
    pub async fn delete_confirmation(&self, id: Uuid) -> AppResult<Option<BookWithCopies>> {
        self.with_copies(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome> {
        let Some(current) = self.with_copies(id).await? else {
            return Ok(DeleteOutcome::Deleted);
        };

        if !current.instances.is_empty() {
            tracing::debug!(
                "Book delete refused: id={} has {} copies",
                id,
                current.instances.len()
            );
            return Ok(DeleteOutcome::Blocked(current));
        }

        if self.store.delete_book_if_unreferenced(id).await? {
            tracing::info!("Book deleted: id={}", id);
            return Ok(DeleteOutcome::Deleted);
        }

        // A copy was added between the check and the delete
        match self.with_copies(id).await? {
            Some(current) => {
                tracing::debug!("Book delete refused: id={} gained copies", id);
                Ok(DeleteOutcome::Blocked(current))
            }
            None => Ok(DeleteOutcome::Deleted),
        }
    }
}
