use chrono::{DateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::utils::date::opt_serializer;

// BookEntity is a validated book record as kept by the repositories; every
// required field is present and the id has been assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookEntity {
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub pages: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, with = "opt_serializer", skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

impl BookEntity {
    pub fn new(title: &str, author: &str, isbn: &str, pages: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            pages,
            description: None,
            publisher: None,
            published: None,
        }
    }
}
