//! LocalLibrary catalog server
//!
//! Server-rendered pages for browsing and maintaining a small library
//! catalog: books, their authors, genres and physical copies.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

#[cfg(test)]
mod testing;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
