//! Catalog dashboard service

use std::sync::Arc;

use serde::Serialize;

use crate::{error::AppResult, models::BookInstanceStatus, repository::CatalogStore};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Run the five counts concurrently. The first failing count fails the
    /// whole dashboard.
    pub async fn dashboard(&self) -> AppResult<DashboardCounts> {
        let (
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        ) = tokio::try_join!(
            self.store.count_books(),
            self.store.count_book_instances(None),
            self.store
                .count_book_instances(Some(BookInstanceStatus::Available)),
            self.store.count_authors(),
            self.store.count_genres(),
        )?;

        Ok(DashboardCounts {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }

    /// Check the store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, repository::MockCatalogStore};
    use mockall::predicate::eq;

    fn store_with_counts(books: i64, instances: i64, available: i64, authors: i64, genres: i64) -> MockCatalogStore {
        let mut store = MockCatalogStore::new();
        store.expect_count_books().returning(move || Ok(books));
        store
            .expect_count_book_instances()
            .with(eq(None))
            .returning(move |_| Ok(instances));
        store
            .expect_count_book_instances()
            .with(eq(Some(BookInstanceStatus::Available)))
            .returning(move |_| Ok(available));
        store.expect_count_authors().returning(move || Ok(authors));
        store.expect_count_genres().returning(move || Ok(genres));
        store
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let service = CatalogService::new(Arc::new(store_with_counts(3, 5, 2, 2, 4)));

        let counts = service.dashboard().await.unwrap();

        assert_eq!(
            counts,
            DashboardCounts {
                book_count: 3,
                book_instance_count: 5,
                book_instance_available_count: 2,
                author_count: 2,
                genre_count: 4,
            }
        );
    }

    #[tokio::test]
    async fn test_dashboard_empty_store() {
        let service = CatalogService::new(Arc::new(store_with_counts(0, 0, 0, 0, 0)));
        let counts = service.dashboard().await.unwrap();
        assert_eq!(counts.book_count, 0);
        assert_eq!(counts.genre_count, 0);
    }

    #[tokio::test]
    async fn test_dashboard_fails_when_any_count_fails() {
        let mut store = MockCatalogStore::new();
        store.expect_count_books().returning(|| Ok(3));
        store
            .expect_count_book_instances()
            .returning(|_| Ok(1));
        store
            .expect_count_authors()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        store.expect_count_genres().returning(|| Ok(4));
        let service = CatalogService::new(Arc::new(store));

        let result = service.dashboard().await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
