use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::BookDto;
use crate::catalog::domain::BookService;
use crate::catalog::validation::validate_book_update;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    book_service: Arc<dyn BookService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(book_service: Arc<dyn BookService>) -> Self {
        Self {
            book_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateBookCommandRequest {
    pub(crate) book: BookDto,
}

impl UpdateBookCommandRequest {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let book = validate_book_update(req.book)?;
        self.book_service.update_book(book).await
            .map_err(CommandError::from)
            .map(|b| UpdateBookCommandResponse::new(BookDto::from(&b)))
    }
}
