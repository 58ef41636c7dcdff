use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{from_ddb, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, to_ddb_page};

const SCAN_PAGE_SIZE: usize = 500;

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    async fn scan(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let exclusive_start_key = to_ddb_page(page);
        self.client
            .scan()
            .table_name(table_name)
            .consistent_read(true)
            .set_exclusive_start_key(exclusive_start_key)
            .limit(cmp::min(page_size, SCAN_PAGE_SIZE) as i32)
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            let def_items = vec![];
            let items = req.items.as_ref().unwrap_or(&def_items);
            let records = items.iter().map(map_to_book).collect::<LibraryResult<Vec<BookEntity>>>()?;
            Ok(from_ddb(req.last_evaluated_key(), records))
        })
    }

    // conditional put; a failed condition is reported as `on_conflict`
    async fn put(&self, entity: &BookEntity, condition: &str, on_conflict: LibraryError) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        let item = parse_item(val)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression(condition)
            .set_item(Some(item))
            .send()
            .await.map(|_| 1).map_err(|err| {
            if is_conditional_check_failed(&err) {
                on_conflict
            } else {
                LibraryError::from(err)
            }
        })
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let conflict = LibraryError::duplicate_key(format!("book already exists for {}", entity.id).as_str());
        self.put(entity, "attribute_not_exists(id)", conflict).await
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let conflict = LibraryError::not_found(format!("book not found for {}", entity.id).as_str());
        self.put(entity, "attribute_exists(id)", conflict).await
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .get_item()
            .table_name(table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            match req.item() {
                Some(map) => map_to_book(map),
                None => Err(LibraryError::not_found(format!("book not found for {}", id).as_str())),
            }
        })
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await.map(|res| if res.attributes().is_some() { 1 } else { 0 }).map_err(LibraryError::from)
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let mut books = vec![];
        let mut next_page: Option<String> = None;
        loop {
            let res = self.scan(next_page.as_deref(), SCAN_PAGE_SIZE).await?;
            books.extend(res.records);
            next_page = res.next_page;
            if next_page.is_none() {
                break;
            }
        }
        Ok(books)
    }

    async fn delete_all(&self) -> LibraryResult<usize> {
        let mut removed = 0;
        for book in self.find_all().await? {
            removed += self.delete(book.id.as_str()).await?;
        }
        Ok(removed)
    }
}

impl BookRepository for DDBBookRepository {}

fn is_conditional_check_failed(err: &SdkError<PutItemError>) -> bool {
    matches!(err, SdkError::ServiceError(ctx) if ctx.err().is_conditional_check_failed_exception())
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> LibraryResult<BookEntity> {
    let pages = parse_number_attribute("pages", map);
    let pages = i32::try_from(pages).map_err(|_| LibraryError::serialization(
        format!("pages {} out of range for book {:?}", pages, parse_string_attribute("id", map)).as_str()))?;
    Ok(BookEntity {
        id: parse_string_attribute("id", map).unwrap_or(String::from("")),
        title: parse_string_attribute("title", map).unwrap_or(String::from("")),
        author: parse_string_attribute("author", map).unwrap_or(String::from("")),
        isbn: parse_string_attribute("isbn", map).unwrap_or(String::from("")),
        pages,
        description: parse_string_attribute("description", map),
        publisher: parse_string_attribute("publisher", map),
        published: parse_date_attribute("published", map),
    })
}
