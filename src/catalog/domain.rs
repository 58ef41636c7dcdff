pub mod service;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;

#[async_trait]
pub(crate) trait BookService: Sync + Send {
    async fn get_book(&self, id: &str) -> LibraryResult<BookEntity>;
    async fn get_books(&self) -> LibraryResult<Vec<BookEntity>>;
    async fn add_book(&self, book: BookEntity) -> LibraryResult<BookEntity>;
    async fn update_book(&self, book: BookEntity) -> LibraryResult<BookEntity>;
    async fn remove_book(&self, id: &str) -> LibraryResult<()>;
    async fn remove_books(&self) -> LibraryResult<usize>;
}
