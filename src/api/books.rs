//! Book pages and form submissions

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use maud::Markup;

use super::parse_id;
use crate::{
    error::{AppError, AppResult},
    models::BookSubmission,
    services::books::{BookFormOutcome, DeleteOutcome},
    views, AppState,
};

const BOOK_LIST_URL: &str = "/catalog/books";

fn form_response(outcome: BookFormOutcome) -> Response {
    match outcome {
        BookFormOutcome::Invalid(view) => views::books::form(&view).into_response(),
        BookFormOutcome::Saved(book) => Redirect::to(&book.url()).into_response(),
    }
}

/// List all books with their author
pub async fn list_books(State(state): State<AppState>) -> AppResult<Markup> {
    let books = state.services.books.list().await?;
    Ok(views::books::list(&books))
}

/// Book details with its copies
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let id = parse_id(&id).ok_or_else(AppError::book_not_found)?;
    let book = state.services.books.detail(id).await?;
    Ok(views::books::detail(&book))
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Markup> {
    let view = state.services.books.create_form().await?;
    Ok(views::books::form(&view))
}

/// Create a book, or show the form again with the errors
pub async fn create_book(
    State(state): State<AppState>,
    Form(submission): Form<BookSubmission>,
) -> AppResult<Response> {
    let outcome = state.services.books.create(submission).await?;
    Ok(form_response(outcome))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let id = parse_id(&id).ok_or_else(AppError::book_not_found)?;
    let view = state.services.books.update_form(id).await?;
    Ok(views::books::form(&view))
}

/// Update a book in place, or show the form again with the errors
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(submission): Form<BookSubmission>,
) -> AppResult<Response> {
    let id = parse_id(&id).ok_or_else(AppError::book_not_found)?;
    let outcome = state.services.books.update(id, submission).await?;
    Ok(form_response(outcome))
}

/// Delete confirmation; a missing book sends the user back to the list
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(Redirect::to(BOOK_LIST_URL).into_response());
    };

    match state.services.books.delete_confirmation(id).await? {
        Some(view) => Ok(views::books::delete(&view).into_response()),
        None => Ok(Redirect::to(BOOK_LIST_URL).into_response()),
    }
}

/// Delete a book that no copy references
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(Redirect::to(BOOK_LIST_URL).into_response());
    };

    match state.services.books.delete(id).await? {
        DeleteOutcome::Deleted => Ok(Redirect::to(BOOK_LIST_URL).into_response()),
        DeleteOutcome::Blocked(view) => Ok(views::books::delete(&view).into_response()),
    }
}
