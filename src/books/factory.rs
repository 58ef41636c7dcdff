use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

const BOOKS_TABLE: &str = "books";

pub(crate) async fn create_book_repository(store: RepositoryStore) -> Box<dyn BookRepository> {
    match store {
        RepositoryStore::Memory => {
            Box::new(MemoryBookRepository::new())
        }
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBookRepository::new(client, BOOKS_TABLE))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            // an existing table fails creation, which is fine for a local store
            if let Err(err) = create_table(&client, BOOKS_TABLE, "id").await {
                tracing::debug!(error = %err, "books table not created");
            }
            Box::new(DDBBookRepository::new(client, BOOKS_TABLE))
        }
    }
}
