use async_trait::async_trait;
use serde::Deserialize;
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity, fails with DuplicateKey if the id is taken
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // updates an entity, fails with NotFound if the id is unknown
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // delete an entity, returns number of removed records
    async fn delete(&self, id: &str) -> LibraryResult<usize>;

    // all entities in storage order
    async fn find_all(&self) -> LibraryResult<Vec<Entity>>;

    // delete all entities, returns number of removed records
    async fn delete_all(&self) -> LibraryResult<usize>;
}

#[derive(Debug, PartialEq, Deserialize, Clone, Copy, Default)]
pub(crate) enum RepositoryStore {
    #[default]
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "dynamodb")]
    DynamoDB,
    #[serde(rename = "local_dynamodb")]
    LocalDynamoDB,
}
