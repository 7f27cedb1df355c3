//! HTTP integration tests against a running server

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

/// Client that reports redirects instead of following them
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

async fn get_page(client: &Client, path: &str) -> (StatusCode, String) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.text().await.expect("Failed to read response");
    (status, body)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let response = client()
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_root_redirects_to_catalog() {
    let response = client()
        .get(BASE_URL)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/catalog");
}

#[tokio::test]
#[ignore]
async fn test_catalog_home() {
    let (status, body) = get_page(&client(), "/catalog").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<strong>Books:</strong>"));
    assert!(body.contains("<strong>Copies available:</strong>"));
}

#[tokio::test]
#[ignore]
async fn test_book_list() {
    let (status, body) = get_page(&client(), "/catalog/books").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Book List"));
}

#[tokio::test]
#[ignore]
async fn test_create_form() {
    let (status, body) = get_page(&client(), "/catalog/book/create").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Create Book"));
    assert!(body.contains("name=\"summary\""));
}

#[tokio::test]
#[ignore]
async fn test_create_with_short_summary_is_rejected() {
    let response = client()
        .post(format!("{}/catalog/book/create", BASE_URL))
        .form(&[
            ("title", "Integration"),
            ("author", "00000000-0000-0000-0000-000000000000"),
            ("summary", "short"),
            ("isbn", "123"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("Failed to read response");
    assert!(body.contains("Summary must be at least 10 characters long"));
}

#[tokio::test]
#[ignore]
async fn test_unknown_book_is_not_found() {
    let (status, _) = get_page(
        &client(),
        "/catalog/book/00000000-0000-0000-0000-000000000000",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_delete_unknown_book_redirects_to_list() {
    let response = client()
        .post(format!(
            "{}/catalog/book/00000000-0000-0000-0000-000000000000/delete",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/catalog/books");
}
