//! Catalog home page

use maud::{html, Markup};

use super::layout;
use crate::services::catalog::DashboardCounts;

pub fn index(counts: &DashboardCounts) -> Markup {
    layout(
        "Local Library Home",
        html! {
            h1 { "Local Library Home" }
            p {
                "Welcome to " em { "LocalLibrary" } ", a very basic catalog of the books we hold."
            }
            h2 { "Dynamic content" }
            p { "The library has the following record counts:" }
            ul {
                li { strong { "Books:" } " " (counts.book_count) }
                li { strong { "Copies:" } " " (counts.book_instance_count) }
                li { strong { "Copies available:" } " " (counts.book_instance_available_count) }
                li { strong { "Authors:" } " " (counts.author_count) }
                li { strong { "Genres:" } " " (counts.genre_count) }
            }
        },
    )
}
