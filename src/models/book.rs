//! Book model, form submission and the shared form rule set.
//!
//! A submission goes through three shapes:
//!
//! - [`BookSubmission`]: the decoded form body, trimmed and validated;
//! - [`BookDraft`]: the escaped candidate, built whether or not validation
//!   passed so it can be redisplayed;
//! - [`BookFields`]: the typed values written to the store.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::{author::Author, genre::Genre};
use crate::error::{AppError, AppResult};

/// Canonical URL of a book
pub fn book_url(id: Uuid) -> String {
    format!("/catalog/book/{}", id)
}

/// Book row as stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
}

impl Book {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Book list entry: title with the author resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub author: Author,
}

impl BookSummary {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Book with author and genres resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookDetail {
    pub book: Book,
    pub author: Author,
    pub genres: Vec<Genre>,
}

/// Book form body. `genre` is absent, a single value or a repeated key;
/// the form extractor collects all three shapes into a list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookSubmission {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title of the book must be specified"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Author must not be empty."))]
    pub author: String,
    /// Reads "at least 10 characters long". The misspelled
    /// "atleast 10 chacacter long" wording seen elsewhere is not used.
    #[serde(default)]
    #[validate(length(min = 10, message = "Summary must be at least 10 characters long"))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<String>,
}

/// One failed rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Order in which field errors are reported
const FIELD_ORDER: [&str; 4] = ["title", "author", "summary", "isbn"];

impl BookSubmission {
    fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            summary: self.summary.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            genre: self.genre,
        }
    }

    /// Applies the book rule set and returns the candidate together with
    /// the failed rules. Lengths are checked on the trimmed text, before
    /// escaping.
    pub fn into_candidate(self, id: Option<Uuid>) -> (BookDraft, Vec<FieldError>) {
        let trimmed = self.trimmed();
        let draft = BookDraft::sanitized(id, &trimmed);
        let errors = match trimmed.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => ordered_errors(&errors),
        };
        (draft, errors)
    }
}

fn ordered_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut out = Vec::new();
    for field in FIELD_ORDER {
        let Some(field_errors) = by_field.get(field) else {
            continue;
        };
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {}", field));
            out.push(FieldError { field, message });
        }
    }
    out
}

fn escape(s: &str) -> String {
    html_escape::encode_safe(s).into_owned()
}

/// Book candidate holding escaped form values. References are kept as the
/// submitted identifier strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookDraft {
    pub id: Option<Uuid>,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

impl BookDraft {
    fn sanitized(id: Option<Uuid>, submission: &BookSubmission) -> Self {
        Self {
            id,
            title: escape(&submission.title),
            author: escape(&submission.author),
            summary: escape(&submission.summary),
            isbn: escape(&submission.isbn),
            genre: submission.genre.iter().map(|g| escape(g)).collect(),
        }
    }

    /// Pre-populates the form from a stored book
    pub fn from_detail(detail: &BookDetail) -> Self {
        Self {
            id: Some(detail.book.id),
            title: detail.book.title.clone(),
            author: detail.book.author_id.to_string(),
            summary: detail.book.summary.clone(),
            isbn: detail.book.isbn.clone(),
            genre: detail.genres.iter().map(|g| g.id.to_string()).collect(),
        }
    }

    pub fn has_genre(&self, genre: &Genre) -> bool {
        let id = genre.id.to_string();
        self.genre.iter().any(|g| *g == id)
    }

    pub fn has_author(&self, author: &Author) -> bool {
        self.author == author.id.to_string()
    }
}

/// Typed values written to the store on create and update
#[derive(Debug, Clone, PartialEq)]
pub struct BookFields {
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

fn parse_reference(value: &str, what: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| AppError::BadRequest(format!("Invalid {} identifier: {}", what, value)))
}

impl TryFrom<&BookDraft> for BookFields {
    type Error = AppError;

    fn try_from(draft: &BookDraft) -> AppResult<Self> {
        let author_id = parse_reference(&draft.author, "author")?;
        let mut genre_ids: Vec<Uuid> = Vec::with_capacity(draft.genre.len());
        for value in &draft.genre {
            let id = parse_reference(value, "genre")?;
            if !genre_ids.contains(&id) {
                genre_ids.push(id);
            }
        }
        Ok(Self {
            title: draft.title.clone(),
            author_id,
            summary: draft.summary.clone(),
            isbn: draft.isbn.clone(),
            genre_ids,
        })
    }
}
