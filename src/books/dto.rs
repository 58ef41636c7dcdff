use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;
use crate::utils::date::opt_serializer;

// BookDto is the wire form of a book. Every field is optional so that missing
// values surface as validation violations rather than parse errors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub(crate) struct BookDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, with = "opt_serializer", skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

impl BookDto {
    pub fn new(title: &str, author: &str, isbn: &str, pages: i32) -> BookDto {
        BookDto {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            isbn: Some(isbn.to_string()),
            pages: Some(pages),
            ..Default::default()
        }
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: Some(other.id.to_string()),
            title: Some(other.title.to_string()),
            author: Some(other.author.to_string()),
            isbn: Some(other.isbn.to_string()),
            pages: Some(other.pages),
            description: other.description.clone(),
            publisher: other.publisher.clone(),
            published: other.published,
        }
    }
}

// BookList wraps a sequence of books under a `<books>` root for XML output
#[derive(Debug, Serialize)]
pub(crate) struct BookList<'a> {
    #[serde(rename = "book")]
    pub books: &'a [BookDto],
}
