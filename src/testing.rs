//! Fixtures shared by unit tests

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    models::{Author, Book, BookDetail, BookFields, BookInstance, BookInstanceStatus, Genre},
    repository::{CatalogStore, MockCatalogStore},
    services::Services,
    AppState,
};

pub fn author() -> Author {
    Author {
        id: Uuid::new_v4(),
        first_name: "Frank".to_string(),
        family_name: "Herbert".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1920, 10, 8),
        date_of_death: NaiveDate::from_ymd_opt(1986, 2, 11),
    }
}

pub fn genre(name: &str) -> Genre {
    Genre {
        id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

pub fn book_detail(author: &Author, genres: Vec<Genre>) -> BookDetail {
    BookDetail {
        book: Book {
            id: Uuid::new_v4(),
            title: "Dune".to_string(),
            author_id: author.id,
            summary: "A desert planet epic.".to_string(),
            isbn: "9780441013593".to_string(),
        },
        author: author.clone(),
        genres,
    }
}

pub fn instance(book_id: Uuid, status: BookInstanceStatus) -> BookInstance {
    BookInstance {
        id: Uuid::new_v4(),
        book_id,
        imprint: "Ace, 2005".to_string(),
        status,
        due_back: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
    }
}

/// The book a store would return after writing `fields` under `id`
pub fn stored_book(id: Uuid, fields: &BookFields) -> Book {
    Book {
        id,
        title: fields.title.clone(),
        author_id: fields.author_id,
        summary: fields.summary.clone(),
        isbn: fields.isbn.clone(),
    }
}

pub fn state(store: MockCatalogStore) -> AppState {
    let store: Arc<dyn CatalogStore> = Arc::new(store);
    AppState {
        services: Arc::new(Services::new(store)),
    }
}
