use async_trait::async_trait;
use uuid::Uuid;
use crate::books::domain::BOOK_NOT_FOUND;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::catalog::domain::BookService;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};

pub(crate) struct BookServiceImpl {
    book_repository: Box<dyn BookRepository>,
    report_missing_on_delete: bool,
}

impl BookServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
            report_missing_on_delete: config.books.report_missing_on_delete,
        }
    }
}

// repositories word their own not-found messages, clients always see the same one
fn normalize_not_found(err: LibraryError) -> LibraryError {
    match err {
        LibraryError::NotFound { .. } => LibraryError::not_found(BOOK_NOT_FOUND),
        other => other,
    }
}

#[async_trait]
impl BookService for BookServiceImpl {
    async fn get_book(&self, id: &str) -> LibraryResult<BookEntity> {
        self.book_repository.get(id).await.map_err(normalize_not_found)
    }

    async fn get_books(&self) -> LibraryResult<Vec<BookEntity>> {
        self.book_repository.find_all().await
    }

    async fn add_book(&self, book: BookEntity) -> LibraryResult<BookEntity> {
        let book = BookEntity {
            id: Uuid::new_v4().to_string(),
            ..book
        };
        let _ = self.book_repository.create(&book).await?;
        tracing::info!(id = book.id.as_str(), "added book");
        Ok(book)
    }

    async fn update_book(&self, book: BookEntity) -> LibraryResult<BookEntity> {
        let _ = self.book_repository.update(&book).await.map_err(normalize_not_found)?;
        Ok(book)
    }

    async fn remove_book(&self, id: &str) -> LibraryResult<()> {
        let removed = self.book_repository.delete(id).await?;
        if removed == 0 && self.report_missing_on_delete {
            return Err(LibraryError::not_found(BOOK_NOT_FOUND));
        }
        Ok(())
    }

    async fn remove_books(&self) -> LibraryResult<usize> {
        let removed = self.book_repository.delete_all().await?;
        tracing::info!(removed, "removed all books");
        Ok(removed)
    }
}
