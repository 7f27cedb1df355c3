//! Book pages: list, detail, form and delete confirmation

use maud::{html, Markup, PreEscaped};

use super::layout;
use crate::{
    models::{BookInstance, BookInstanceStatus, BookSummary},
    services::books::{BookFormView, BookWithCopies},
};

pub fn list(books: &[BookSummary]) -> Markup {
    layout(
        "Book List",
        html! {
            h1 { "Book List" }
            @if books.is_empty() {
                p { "There are no books." }
            } @else {
                ul {
                    @for book in books {
                        li {
                            a href=(book.url()) { (PreEscaped(&book.title)) }
                            " (" (book.author.name()) ")"
                        }
                    }
                }
            }
        },
    )
}

fn copy(instance: &BookInstance) -> Markup {
    html! {
        hr;
        p class=(instance.status.css_class()) { (instance.status.as_str()) }
        p { strong { "Imprint: " } (instance.imprint) }
        @if instance.status != BookInstanceStatus::Available {
            p { strong { "Due back: " } (instance.due_back_formatted()) }
        }
        p {
            strong { "Id: " }
            a href=(instance.url()) { (instance.id.to_string()) }
        }
    }
}

pub fn detail(view: &BookWithCopies) -> Markup {
    let detail = &view.book;
    let book = &detail.book;
    layout(
        PreEscaped(&book.title),
        html! {
            h1 { "Title: " (PreEscaped(&book.title)) }
            p {
                strong { "Author: " }
                a href=(detail.author.url()) { (detail.author.name()) }
            }
            p { strong { "Summary: " } (PreEscaped(&book.summary)) }
            p { strong { "ISBN: " } (PreEscaped(&book.isbn)) }
            p {
                strong { "Genre: " }
                @for (i, genre) in detail.genres.iter().enumerate() {
                    @if i > 0 { ", " }
                    a href=(genre.url()) { (genre.name) }
                }
            }
            div class="copies" {
                h4 { "Copies" }
                @for instance in &view.instances {
                    (copy(instance))
                }
                @if view.instances.is_empty() {
                    p { "There are no copies of this book in the library." }
                }
            }
            hr;
            p { a href=(format!("{}/delete", book.url())) { "Delete Book" } }
            p { a href=(format!("{}/update", book.url())) { "Update Book" } }
        },
    )
}

pub fn form(view: &BookFormView) -> Markup {
    let book = &view.book;
    layout(
        view.title,
        html! {
            h1 { (view.title) }
            form method="POST" action="" {
                div class="form-group" {
                    label for="title" { "Title:" }
                    input id="title" type="text" placeholder="Name of book" name="title"
                        required value=(PreEscaped(&book.title));
                }
                div class="form-group" {
                    label for="author" { "Author:" }
                    select id="author" name="author" required {
                        option value="" { "--Please select an author--" }
                        @for author in &view.authors {
                            option value=(author.id.to_string()) selected[book.has_author(author)] {
                                (author.name())
                            }
                        }
                    }
                }
                div class="form-group" {
                    label for="summary" { "Summary:" }
                    textarea id="summary" placeholder="Summary" name="summary" required {
                        (PreEscaped(&book.summary))
                    }
                }
                div class="form-group" {
                    label for="isbn" { "ISBN:" }
                    input id="isbn" type="text" placeholder="ISBN13" name="isbn"
                        required value=(PreEscaped(&book.isbn));
                }
                div class="form-group" {
                    label { "Genre:" }
                    div {
                        @for option in &view.genres {
                            @let id = option.genre.id.to_string();
                            span class="genre-option" {
                                input type="checkbox" name="genre" id=(id) value=(id)
                                    checked[option.checked];
                                label for=(id) { (option.genre.name) }
                            }
                        }
                    }
                }
                button type="submit" { "Submit" }
            }
            @if !view.errors.is_empty() {
                ul class="errors" {
                    @for error in &view.errors {
                        li { (error.message) }
                    }
                }
            }
        },
    )
}

pub fn delete(view: &BookWithCopies) -> Markup {
    let detail = &view.book;
    let book = &detail.book;
    layout(
        "Delete Book",
        html! {
            h1 { "Delete Book: " (PreEscaped(&book.title)) }
            p {
                strong { "Author: " }
                a href=(detail.author.url()) { (detail.author.name()) }
            }
            @if view.instances.is_empty() {
                p { "Do you really want to delete this Book?" }
                form method="POST" action="" {
                    button type="submit" { "Delete" }
                }
            } @else {
                p { strong { "Delete the following copies before attempting to delete this Book." } }
                div class="copies" {
                    h4 { "Copies" }
                    dl {
                        @for instance in &view.instances {
                            dt {
                                a href=(instance.url()) {
                                    (instance.imprint) " - " (instance.status.as_str())
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{BookDraft, FieldError, GenreOption},
        testing::{author, book_detail, genre, instance},
    };
    use uuid::Uuid;

    #[test]
    fn test_list_links_books() {
        let writer = author();
        let books = vec![BookSummary {
            id: Uuid::new_v4(),
            title: "Dune".into(),
            author: writer,
        }];
        let page = list(&books).into_string();
        assert!(page.contains(&format!("href=\"{}\"", books[0].url())));
        assert!(page.contains("(Herbert, Frank)"));
    }

    #[test]
    fn test_list_empty() {
        assert!(list(&[]).into_string().contains("There are no books."));
    }

    #[test]
    fn test_detail_shows_genres_and_copies() {
        let detail = book_detail(&author(), vec![genre("Science Fiction"), genre("Classic")]);
        let id = detail.book.id;
        let view = BookWithCopies {
            book: detail,
            instances: vec![
                instance(id, BookInstanceStatus::Available),
                instance(id, BookInstanceStatus::Loaned),
            ],
        };
        let page = detail_page(&view);
        assert!(page.contains("Science Fiction</a>, <a"));
        assert!(page.contains("<p class=\"text-success\">Available</p>"));
        assert!(page.contains("<p class=\"text-warning\">Loaned</p>"));
        assert_eq!(page.matches("Due back: ").count(), 1);
        assert!(page.contains(&format!("/catalog/book/{}/delete", id)));
    }

    fn detail_page(view: &BookWithCopies) -> String {
        detail(view).into_string()
    }

    #[test]
    fn test_form_marks_checked_genres_and_errors() {
        let writer = author();
        let fantasy = genre("Fantasy");
        let sci_fi = genre("Science Fiction");
        let view = BookFormView {
            title: "Create Book",
            book: BookDraft {
                title: "Dune &amp; more".into(),
                author: writer.id.to_string(),
                genre: vec![sci_fi.id.to_string()],
                ..BookDraft::default()
            },
            authors: vec![writer.clone()],
            genres: vec![
                GenreOption { genre: fantasy.clone(), checked: false },
                GenreOption { genre: sci_fi.clone(), checked: true },
            ],
            errors: vec![FieldError {
                field: "summary",
                message: "Summary must be at least 10 characters long".into(),
            }],
        };

        let page = form(&view).into_string();

        assert!(page.contains("value=\"Dune &amp; more\""));
        assert!(page.contains(&format!("value=\"{}\" selected", writer.id)));
        assert!(page.contains(&format!("value=\"{}\" checked", sci_fi.id)));
        assert!(!page.contains(&format!("value=\"{}\" checked", fantasy.id)));
        assert!(page.contains("<li>Summary must be at least 10 characters long</li>"));
    }

    #[test]
    fn test_delete_page_with_and_without_copies() {
        let detail = book_detail(&author(), vec![]);
        let id = detail.book.id;

        let free = delete(&BookWithCopies {
            book: detail.clone(),
            instances: vec![],
        })
        .into_string();
        assert!(free.contains("Do you really want to delete this Book?"));

        let blocked = delete(&BookWithCopies {
            book: detail,
            instances: vec![instance(id, BookInstanceStatus::Maintenance)],
        })
        .into_string();
        assert!(blocked.contains("Delete the following copies"));
        assert!(!blocked.contains("<button"));
    }
}
