//! HTTP handlers for the catalog site

pub mod books;
pub mod catalog;
pub mod health;

use axum::{
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::{error::AppError, AppState};

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Catalog
        .route("/", get(catalog::root))
        .route("/catalog", get(catalog::index))
        // Books
        .route("/catalog/books", get(books::list_books))
        .route(
            "/catalog/book/create",
            get(books::create_form).post(books::create_book),
        )
        .route("/catalog/book/:id", get(books::get_book))
        .route(
            "/catalog/book/:id/update",
            get(books::update_form).post(books::update_book),
        )
        .route(
            "/catalog/book/:id/delete",
            get(books::delete_form).post(books::delete_book),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}

/// Path ids that are not UUIDs cannot name a stored record
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}
