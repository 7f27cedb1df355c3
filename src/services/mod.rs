//! Business logic services

pub mod books;
pub mod catalog;

use std::sync::Arc;

use crate::repository::CatalogStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub books: books::BooksService,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store.clone()),
            books: books::BooksService::new(store),
        }
    }
}
