//! Catalog home page

use axum::{extract::State, response::Redirect};
use maud::Markup;

use crate::{error::AppResult, views, AppState};

pub async fn root() -> Redirect {
    Redirect::to("/catalog")
}

/// Record counts for books, copies, available copies, authors and genres
pub async fn index(State(state): State<AppState>) -> AppResult<Markup> {
    let counts = state.services.catalog.dashboard().await?;
    Ok(views::catalog::index(&counts))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header::LOCATION, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{
        api::router, error::AppError, models::BookInstanceStatus, repository::MockCatalogStore,
        testing::state,
    };

    #[tokio::test]
    async fn test_root_redirects_to_catalog() {
        let response = router(state(MockCatalogStore::new()))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/catalog");
    }

    #[tokio::test]
    async fn test_index_renders_counts() {
        let mut store = MockCatalogStore::new();
        store.expect_count_books().returning(|| Ok(3));
        store
            .expect_count_book_instances()
            .returning(|status| match status {
                Some(BookInstanceStatus::Available) => Ok(2),
                _ => Ok(5),
            });
        store.expect_count_authors().returning(|| Ok(2));
        store.expect_count_genres().returning(|| Ok(4));

        let response = router(state(store))
            .oneshot(Request::get("/catalog").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(body.to_vec()).unwrap();
        assert!(page.contains("<strong>Books:</strong> 3"));
        assert!(page.contains("<strong>Copies:</strong> 5"));
        assert!(page.contains("<strong>Copies available:</strong> 2"));
    }

    #[tokio::test]
    async fn test_index_fails_when_a_count_fails() {
        let mut store = MockCatalogStore::new();
        store
            .expect_count_books()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        store.expect_count_book_instances().returning(|_| Ok(0));
        store.expect_count_authors().returning(|| Ok(0));
        store.expect_count_genres().returning(|| Ok(0));

        let response = router(state(store))
            .oneshot(Request::get("/catalog").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
