pub mod ddb_book_repository;
pub mod memory_book_repository;

use crate::books::domain::model::BookEntity;
use crate::core::repository::Repository;

pub(crate) trait BookRepository: Repository<BookEntity> {}
