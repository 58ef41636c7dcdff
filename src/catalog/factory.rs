use crate::books::factory;
use crate::catalog::domain::BookService;
use crate::catalog::domain::service::BookServiceImpl;
use crate::core::domain::Configuration;

pub(crate) async fn create_book_service(config: &Configuration) -> Box<dyn BookService> {
    let book_repo = factory::create_book_repository(config.store).await;
    Box::new(BookServiceImpl::new(config, book_repo))
}
