use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// MemoryBookRepository keeps books in process, in insertion order
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    books: RwLock<Vec<BookEntity>>,
}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.books.write().await;
        if books.iter().any(|b| b.id == entity.id) {
            return Err(LibraryError::duplicate_key(format!("book already exists for {}", entity.id).as_str()));
        }
        books.push(entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.books.write().await;
        match books.iter_mut().find(|b| b.id == entity.id) {
            Some(existing) => {
                *existing = entity.clone();
                Ok(1)
            }
            None => Err(LibraryError::not_found(format!("book not found for {}", entity.id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        self.books.read().await
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(before - books.len())
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.books.read().await.clone())
    }

    async fn delete_all(&self) -> LibraryResult<usize> {
        let mut books = self.books.write().await;
        let removed = books.len();
        books.clear();
        Ok(removed)
    }
}

impl BookRepository for MemoryBookRepository {}
