use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::{HOST, LOCATION}, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use crate::books::dto::{BookDto, BookList};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::remove_books_cmd::{RemoveBooksCommand, RemoveBooksCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::catalog::validation::parse_body;
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};
use crate::core::negotiation::{split_suffix, Representation};

const BOOK_ROOT: &str = "book";
const BOOKS_ROOT: &str = "books";

fn render_book(repr: Representation, status: StatusCode, book: &BookDto) -> Result<Response, ServerError> {
    let body = repr.encode(BOOK_ROOT, book)?;
    Ok(repr.respond(status, body))
}

fn render_books(repr: Representation, books: &[BookDto]) -> Result<Response, ServerError> {
    let body = match repr {
        Representation::Json => repr.encode(BOOKS_ROOT, &books)?,
        Representation::Xml => repr.encode(BOOKS_ROOT, &BookList { books })?,
    };
    Ok(repr.respond(StatusCode::OK, body))
}

// absolute when the Host is known, otherwise relative to the request path
fn location_of(uri: &Uri, headers: &HeaderMap, id: &str) -> String {
    let path = uri.path().trim_end_matches('/');
    match headers.get(HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("{}://{}{}/{}", uri.scheme_str().unwrap_or("http"), host, path, id),
        None => format!("{}/{}", path, id),
    }
}

async fn list_books(state: &AppState, repr: Representation) -> Result<Response, ServerError> {
    let res = ListBooksCommand::new(state.service.clone()).execute(ListBooksCommandRequest::default()).await?;
    tracing::debug!(count = res.books.len(), "listed books");
    render_books(repr, &res.books)
}

pub(crate) async fn find_books(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap) -> Result<Response, ServerError> {
    list_books(&state, Representation::negotiate(uri.path(), &headers)).await
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap) -> Result<Response, ServerError> {
    let (id, suffix) = split_suffix(id.as_str());
    let repr = suffix.unwrap_or_else(|| Representation::negotiate(id, &headers));
    // `/books/.json` and `/books/.xml` name the whole collection
    if id.is_empty() {
        return list_books(&state, repr).await;
    }
    tracing::debug!(id, "finding book");
    let res = GetBookCommand::new(state.service.clone()).execute(GetBookCommandRequest::new(id.to_string())).await?;
    render_book(repr, StatusCode::OK, &res.book)
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes) -> Result<Response, ServerError> {
    let book = parse_body(&headers, &body)?;
    let res = AddBookCommand::new(state.service.clone()).execute(AddBookCommandRequest::new(book)).await?;
    let id = res.book.id.clone().unwrap_or_default();
    tracing::debug!(id = id.as_str(), "created book");

    let mut response = render_book(Representation::negotiate(uri.path(), &headers), StatusCode::CREATED, &res.book)?;
    if let Ok(location) = HeaderValue::from_str(location_of(&uri, &headers, id.as_str()).as_str()) {
        response.headers_mut().insert(LOCATION, location);
    }
    Ok(response)
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes) -> Result<Response, ServerError> {
    let book = parse_body(&headers, &body)?;
    let res = UpdateBookCommand::new(state.service.clone()).execute(UpdateBookCommandRequest::new(book)).await?;
    tracing::debug!(id = res.book.id.as_deref().unwrap_or_default(), "updated book");
    render_book(Representation::negotiate(uri.path(), &headers), StatusCode::OK, &res.book)
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Response, ServerError> {
    tracing::debug!(id = id.as_str(), "removing book");
    let _ = RemoveBookCommand::new(state.service.clone()).execute(RemoveBookCommandRequest::new(id)).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub(crate) async fn remove_books(
    State(state): State<AppState>) -> Result<Response, ServerError> {
    let res = RemoveBooksCommand::new(state.service.clone()).execute(RemoveBooksCommandRequest::default()).await?;
    tracing::debug!(removed = res.removed, "removed books");
    Ok(StatusCode::NO_CONTENT.into_response())
}
