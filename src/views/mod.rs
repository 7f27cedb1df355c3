//! HTML templates.
//!
//! Book text fields are stored already escaped by the form rule set and
//! are emitted with `PreEscaped`; everything else goes through maud's
//! normal escaping.

pub mod books;
pub mod catalog;

use axum::http::StatusCode;
use maud::{html, Markup, PreEscaped, Render, DOCTYPE};

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; display: flex; }
.sidebar { width: 14em; padding: 1em; }
.sidebar ul { list-style: none; padding: 0; }
.content { padding: 1em 2em; flex: 1; }
.form-group { margin-bottom: 1em; }
.form-group input[type=text], .form-group select, .form-group textarea { width: 100%; }
.errors { color: #a94442; }
.text-success { color: #3c763d; }
.text-danger { color: #a94442; }
.text-warning { color: #8a6d3b; }
"#;

/// Page shell with the catalog navigation
pub fn layout(title: impl Render, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                nav class="sidebar" {
                    ul {
                        li { a href="/catalog" { "Home" } }
                        li { a href="/catalog/books" { "All books" } }
                    }
                    hr;
                    ul {
                        li { a href="/catalog/book/create" { "Create new book" } }
                    }
                }
                main class="content" {
                    (content)
                }
            }
        }
    }
}

/// Page rendered for every error response
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let reason = status.canonical_reason().unwrap_or("Error");
    layout(
        reason,
        html! {
            h1 { (message) }
            h2 { (status.as_u16()) " " (reason) }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_page() {
        let page = error_page(StatusCode::NOT_FOUND, "Book not found").into_string();
        assert!(page.contains("<h1>Book not found</h1>"));
        assert!(page.contains("404 Not Found"));
    }

    #[test]
    fn test_navigation_links_served_pages_only() {
        let page = layout("Home", html! {}).into_string();
        for href in ["/catalog", "/catalog/books", "/catalog/book/create"] {
            assert!(page.contains(&format!("href=\"{}\"", href)));
        }
        assert!(!page.contains("/catalog/authors"));
        assert!(!page.contains("/catalog/genres"));
        assert!(!page.contains("/catalog/bookinstances"));
    }

    #[test]
    fn test_error_message_escaped() {
        let page = error_page(StatusCode::BAD_REQUEST, "<script>").into_string();
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<h1><script>"));
    }
}
