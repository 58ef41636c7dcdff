use axum::http::HeaderMap;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::core::library::{LibraryError, LibraryResult, Violation};
use crate::core::negotiation::is_json_content;

pub const BODY_MISSING: &str = "Request body does not exist.";
pub const ID_REQUIRED: &str = "Id cannot be null when you want to update the Book";
pub const ID_NOT_ALLOWED: &str = "Id must be empty when you want to add a new Book";
pub const JSON_REQUIRED: &str = "Request body must be application/json";

// Decodes a request body into a book, `null` and empty bodies count as missing.
pub(crate) fn parse_body(headers: &HeaderMap, body: &[u8]) -> LibraryResult<BookDto> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(LibraryError::validation(BODY_MISSING));
    }
    if !is_json_content(headers) {
        return Err(LibraryError::unsupported_media_type(JSON_REQUIRED));
    }
    match serde_json::from_slice::<Option<BookDto>>(body) {
        Ok(Some(book)) => Ok(book),
        Ok(None) => Err(LibraryError::validation(BODY_MISSING)),
        Err(err) => Err(LibraryError::validation(format!("{}", err).as_str())),
    }
}

pub(crate) fn validate_new_book(book: BookDto) -> LibraryResult<BookEntity> {
    if has_id(&book) {
        return Err(LibraryError::violations(vec![Violation::new("id", "null", ID_NOT_ALLOWED)]));
    }
    check_fields(&book)?;
    Ok(to_entity(String::new(), book))
}

pub(crate) fn validate_book_update(book: BookDto) -> LibraryResult<BookEntity> {
    if !has_id(&book) {
        return Err(LibraryError::violations(vec![Violation::new("id", "not_null", ID_REQUIRED)]));
    }
    check_fields(&book)?;
    let id = book.id.clone().unwrap_or_default();
    Ok(to_entity(id, book))
}

fn has_id(book: &BookDto) -> bool {
    book.id.as_deref().map(|id| !id.trim().is_empty()).unwrap_or(false)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|v| v.trim().is_empty()).unwrap_or(true)
}

// every failed constraint is reported, not just the first
fn check_fields(book: &BookDto) -> LibraryResult<()> {
    let mut violations = vec![];
    if is_blank(&book.title) {
        violations.push(Violation::new("title", "not_blank", "Title cannot be empty"));
    }
    if is_blank(&book.author) {
        violations.push(Violation::new("author", "not_blank", "Author cannot be empty"));
    }
    if book.isbn.is_none() {
        violations.push(Violation::new("isbn", "not_null", "ISBN cannot be null"));
    }
    match book.pages {
        None => violations.push(Violation::new("pages", "not_null", "Pages cannot be null")),
        Some(pages) if pages < 1 => violations.push(Violation::new("pages", "positive", "Pages must be a positive number")),
        Some(_) => {}
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(LibraryError::violations(violations))
    }
}

fn to_entity(id: String, book: BookDto) -> BookEntity {
    BookEntity {
        id,
        title: book.title.unwrap_or_default(),
        author: book.author.unwrap_or_default(),
        isbn: book.isbn.unwrap_or_default(),
        pages: book.pages.unwrap_or_default(),
        description: book.description,
        publisher: book.publisher,
        published: book.published,
    }
}
