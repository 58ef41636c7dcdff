use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::catalog::domain::BookService;
use crate::core::command::{Command, CommandError};

pub(crate) struct RemoveBooksCommand {
    book_service: Arc<dyn BookService>,
}

impl RemoveBooksCommand {
    pub(crate) fn new(book_service: Arc<dyn BookService>) -> Self {
        Self {
            book_service,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct RemoveBooksCommandRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveBooksCommandResponse {
    pub removed: usize,
}

#[async_trait]
impl Command<RemoveBooksCommandRequest, RemoveBooksCommandResponse> for RemoveBooksCommand {
    async fn execute(&self, _req: RemoveBooksCommandRequest) -> Result<RemoveBooksCommandResponse, CommandError> {
        self.book_service.remove_books().await
            .map_err(CommandError::from).map(|removed| RemoveBooksCommandResponse { removed })
    }
}
