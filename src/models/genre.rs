//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    /// Genre page, maintained outside this server
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// A genre as offered on the book form. `checked` is render state only and
/// never written back to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreOption {
    pub genre: Genre,
    pub checked: bool,
}
