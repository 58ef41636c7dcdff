use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::BookDto;
use crate::catalog::domain::BookService;
use crate::core::command::{Command, CommandError};

pub(crate) struct ListBooksCommand {
    book_service: Arc<dyn BookService>,
}

impl ListBooksCommand {
    pub(crate) fn new(book_service: Arc<dyn BookService>) -> Self {
        Self {
            book_service,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ListBooksCommandRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct ListBooksCommandResponse {
    pub books: Vec<BookDto>,
}

#[async_trait]
impl Command<ListBooksCommandRequest, ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, _req: ListBooksCommandRequest) -> Result<ListBooksCommandResponse, CommandError> {
        let books = self.book_service.get_books().await.map_err(CommandError::from)?;
        Ok(ListBooksCommandResponse {
            books: books.iter().map(BookDto::from).collect(),
        })
    }
}
