//! Book instance (physical copy) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Circulation status of a copy, stored as the `book_instance_status` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "book_instance_status")]
pub enum BookInstanceStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }

    /// CSS class used when displaying the status
    pub fn css_class(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "text-success",
            BookInstanceStatus::Maintenance => "text-danger",
            BookInstanceStatus::Loaned | BookInstanceStatus::Reserved => "text-warning",
        }
    }
}

/// Full book instance model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: NaiveDate,
}

impl BookInstance {
    /// Copy page, served by the copy maintenance site rather than this server
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        self.due_back.format("%b %e, %Y").to_string()
    }
}
