use axum::{
    body::HttpBody,
    middleware,
    routing::get,
    BoxError, Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use crate::catalog::controller::{add_book, find_book_by_id, find_books, remove_book, remove_books, update_book};
use crate::core::controller::{not_found, AppState};
use crate::core::filters::{basic_auth, powered_by_value, X_POWERED_BY};

// Layers run outside-in: trace, powered-by header, authentication, compression.
pub(crate) fn build_router<B>(state: AppState) -> Router<(), B>
    where
        B: HttpBody + Send + 'static,
        B::Data: Send,
        B::Error: Into<BoxError>,
{
    let powered_by = powered_by_value(state.config.http.powered_by.as_str());
    let compression = CompressionLayer::new().gzip(state.config.http.compression);

    Router::new()
        .route("/books",
               get(find_books).post(add_book).put(update_book).delete(remove_books))
        .route("/books.json", get(find_books))
        .route("/books.xml", get(find_books))
        .route("/books/:id",
               get(find_book_by_id).delete(remove_book))
        .fallback(not_found)
        .layer(compression)
        .layer(middleware::from_fn_with_state(state.clone(), basic_auth::<B>))
        .layer(SetResponseHeaderLayer::overriding(X_POWERED_BY, powered_by))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::header::{ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_ENCODING, CONTENT_TYPE, LOCATION, WWW_AUTHENTICATE};
    use axum::http::{Method, Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use crate::books::domain::BOOK_NOT_FOUND;
    use crate::books::domain::model::BookEntity;
    use crate::catalog::domain::BookService;
    use crate::catalog::factory;
    use crate::catalog::router::build_router;
    use crate::catalog::validation::{BODY_MISSING, ID_REQUIRED};
    use crate::core::controller::{AppState, INTERNAL_SERVER_ERROR, INVALID_REQUEST_URL};
    use crate::core::domain::Configuration;
    use crate::core::filters::{basic_header, AUTHENTICATION_FAILED, X_POWERED_BY};
    use crate::core::library::{LibraryError, LibraryResult};
    use crate::core::repository::RepositoryStore;

    // every call fails the way an unreachable table does
    struct UnavailableBookService;

    fn backend_down<T>() -> LibraryResult<T> {
        Err(LibraryError::database("connection refused to 10.0.0.1:8000", Some("DispatchFailure".to_string()), false))
    }

    #[async_trait]
    impl BookService for UnavailableBookService {
        async fn get_book(&self, _id: &str) -> LibraryResult<BookEntity> {
            backend_down()
        }

        async fn get_books(&self) -> LibraryResult<Vec<BookEntity>> {
            backend_down()
        }

        async fn add_book(&self, _book: BookEntity) -> LibraryResult<BookEntity> {
            backend_down()
        }

        async fn update_book(&self, _book: BookEntity) -> LibraryResult<BookEntity> {
            backend_down()
        }

        async fn remove_book(&self, _id: &str) -> LibraryResult<()> {
            backend_down()
        }

        async fn remove_books(&self) -> LibraryResult<usize> {
            backend_down()
        }
    }

    async fn build_app(config: Configuration) -> Router {
        let service = Arc::from(factory::create_book_service(&config).await);
        build_router(AppState::new(config, service))
    }

    fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(AUTHORIZATION, basic_header("admin", "password"));
        match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }.expect("should build request")
    }

    async fn send(app: &Router, req: Request<Body>) -> Response {
        app.clone().oneshot(req).await.expect("should handle request")
    }

    async fn body_json(res: Response) -> Value {
        let bytes = hyper::body::to_bytes(res.into_body()).await.expect("should read body");
        serde_json::from_slice(&bytes).expect("should be json")
    }

    async fn body_text(res: Response) -> String {
        let bytes = hyper::body::to_bytes(res.into_body()).await.expect("should read body");
        String::from_utf8(bytes.to_vec()).expect("should be utf8")
    }

    fn effective_java() -> Value {
        json!({
            "title": "Effective Java",
            "author": "Joshua Bloch",
            "isbn": "9780134685991",
            "pages": 412,
            "publisher": "Addison-Wesley",
            "published": "2017-12-27T00:00:00.000Z"
        })
    }

    async fn create(app: &Router, book: Value) -> Value {
        let res = send(app, request(Method::POST, "/books", Some(book))).await;
        assert_eq!(StatusCode::CREATED, res.status());
        body_json(res).await
    }

    #[tokio::test]
    async fn test_should_create_book_with_location() {
        let app = build_app(Configuration::new(RepositoryStore::Memory)).await;

        let mut req = request(Method::POST, "/books", Some(effective_java()));
        req.headers_mut().insert("host", "localhost:8080".parse().expect("host"));
        let res = send(&app, req).await;
        assert_eq!(StatusCode::CREATED, res.status());
        let location = res.headers().get(LOCATION).expect("location").to_str().expect("ascii").to_string();
        let book = body_json(res).await;
        let id = book["id"].as_str().expect("id");
        assert_eq!(format!("http://localhost:8080/books/{}", id), location);
        assert_eq!("Effective Java", book["title"]);
        assert_eq!(412, book["pages"]);
        assert_eq!("2017-12-27T00:00:00.000Z", book["published"]);
        assert!(book.get("description").is_none());
    }

    #[tokio::test]
    async fn test_should_reject_null_body() {
        let app = build_app(Configuration::new(RepositoryStore::Memory)).await;

        let res = send(&app, request(Method::POST, "/books", Some(Value::Null))).await;
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
        let err = body_json(res).await;
        assert_eq!(400, err["code"]);
        assert_eq!(BODY_MISSING, err["message"]);

        let res = send(&app, request(Method::PUT, "/books", None)).await;
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
        assert_eq!(BODY_MISSING, body_json(res).await["message"]);
    }

    #[tokio::test]
    async fn test_should_report_violations() {
        let app = build_app(Configuration::new(RepositoryStore::Memory)).await;

        let res = send(&app, request(Method::POST, "/books", Some(json!({"title": "Dune", "pages": -1})))).await;
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
        let err = body_json(res).await;
        let violations = err["violations"].as_array().expect("violations");
        assert_eq!(3, violations.len());
        assert_eq!("author", violations[0]["field"]);
        assert_eq!("positive", violations[2]["constraint"]);

        let res = send(&app, request(Method::POST, "/books", Some(json!({"id": "abc", "title": "Dune", "author": "Frank Herbert", "isbn": "1", "pages": 1})))).await;
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
    }

    #[tokio::test]
    async fn test_should_reject_unsupported_media_type() {
        let app = build_app(Configuration::new(RepositoryStore::Memory)).await;

        let req = Request::builder()
            .method(Method::POST)
            .uri("/books")
            .header(AUTHORIZATION, basic_header("admin", "password"))
            .header(CONTENT_TYPE, "application/xml")
            .body(Body::from("<book><title>Dune</title></book>"))
            .expect("should build request");
        let res = send(&app, req).await;
        assert_eq!(StatusCode::UNSUPPORTED_MEDIA_TYPE, res.status());
    }

    #[tokio::test]
    async fn test_should_reject_update_without_id() {
        let app = build_app(Configuration::new(RepositoryStore::Memory)).await;

        let res = send(&app, request(Method::PUT, "/books", Some(effective_java()))).await;
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
        assert_eq!(ID_REQUIRED, body_json(res).await["message"]);
    }

    #[tokio::test]
    async fn test_should_update_book() {
        let app = build_app(Configuration::new(RepositoryStore::Memory)).await;

        let created = create(&app, effective_java()).await;
        let id = created["id"].as_str().expect("id").to_string();
        let res = send(&app, request(Method::GET, format!("/books/{}", id).as_str(), None)).await;
        let mut book = body_json(res).await;
        book["description"] = json!("Best practices for the Java platform");

        let res = send(&app, request(Method::PUT, "/books", Some(book.clone()))).await;
        assert_eq!(StatusCode::OK, res.status());
        assert_eq!(book, body_json(res).await);

        let mut unknown = book;
        unknown["id"] = json!("unknown");
        let res = send(&app, request(Method::PUT, "/books", Some(unknown))).await;
        assert_eq!(StatusCode::NOT_FOUND, res.status());
    }

    #[tokio::test]
    async fn test_should_delete_then_not_find_book() {
        let app = build_app(Configuration::new(RepositoryStore::Memory)).await;

        let created = create(&app, effective_java()).await;
        let uri = format!("/books/{}", created["id"].as_str().expect("id"));
        let res = send(&app, request(Method::DELETE, uri.as_str(), None)).await;
        assert_eq!(StatusCode::NO_CONTENT, res.status());

        let res = send(&app, request(Method::GET, uri.as_str(), None)).await;
        assert_eq!(StatusCode::NOT_FOUND, res.status());
        assert_eq!(BOOK_NOT_FOUND, body_json(res).await["message"]);

        let res = send(&app, request(Method::DELETE, uri.as_str(), None)).await;
        assert_eq!(StatusCode::NOT_FOUND, res.status());
    }

    #[tokio::test]
    async fn test_should_accept_missing_delete_when_configured() {
        let mut config = Configuration::new(RepositoryStore::Memory);
        config.books.report_missing_on_delete = false;
        let app = build_app(config).await;

        let res = send(&app, request(Method::DELETE, "/books/unknown", None)).await;
        assert_eq!(StatusCode::NO_CONTENT, res.status());
    }

    #[tokio::test]
    async fn test_should_delete_all_books() {
        let app = build_app(Configuration::new(RepositoryStore::Memory)).await;

        let _ = create(&app, effective_java()).await;
        let _ = create(&app, effective_java()).await;
        let res = send(&app, request(Method::GET, "/books", None)).await;
        assert_eq!(2, body_json(res).await.as_array().expect("list").len());

        let res = send(&app, request(Method::DELETE, "/books", None)).await;
        assert_eq!(StatusCode::NO_CONTENT, res.status());
        let res = send(&app, request(Method::GET, "/books", None)).await;
        assert_eq!(StatusCode::OK, res.status());
        assert_eq!(json!([]), body_json(res).await);
    }

    #[tokio::test]
    async fn test_should_require_credentials() {
        let app = build_app(Configuration::new(RepositoryStore::Memory)).await;

        let missing = Request::builder().uri("/books").body(Body::empty()).expect("request");
        let wrong = Request::builder().uri("/books")
            .header(AUTHORIZATION, basic_header("admin", "guess"))
            .body(Body::empty()).expect("request");
        let bearer = Request::builder().uri("/books")
            .header(AUTHORIZATION, "Bearer token")
            .body(Body::empty()).expect("request");
        let unknown_path = Request::builder().uri("/authors").body(Body::empty()).expect("request");
        for req in [missing, wrong, bearer, unknown_path] {
            let res = send(&app, req).await;
            assert_eq!(StatusCode::UNAUTHORIZED, res.status());
            assert_eq!(res.headers().get(WWW_AUTHENTICATE).expect("challenge"), "Basic");
            assert_eq!(res.headers().get(X_POWERED_BY).expect("powered by"), "Axum Framework");
            assert_eq!(AUTHENTICATION_FAILED, body_json(res).await["message"]);
        }
    }

    #[tokio::test]
    async fn test_should_add_powered_by_header() {
        let app = build_app(Configuration::new(RepositoryStore::Memory)).await;

        let res = send(&app, request(Method::GET, "/books", None)).await;
        assert_eq!(StatusCode::OK, res.status());
        assert_eq!(res.headers().get(X_POWERED_BY).expect("powered by"), "Axum Framework");

        let res = send(&app, request(Method::GET, "/authors", None)).await;
        assert_eq!(StatusCode::NOT_FOUND, res.status());
        assert_eq!(res.headers().get(X_POWERED_BY).expect("powered by"), "Axum Framework");
        assert_eq!(INVALID_REQUEST_URL, body_json(res).await["message"]);
    }

    #[tokio::test]
    async fn test_should_negotiate_representation() {
        let app = build_app(Configuration::new(RepositoryStore::Memory)).await;

        let created = create(&app, effective_java()).await;
        let id = created["id"].as_str().expect("id");

        let res = send(&app, request(Method::GET, format!("/books/{}.json", id).as_str(), None)).await;
        assert_eq!(StatusCode::OK, res.status());
        assert_eq!(res.headers().get(CONTENT_TYPE).expect("content type"), "application/json");

        let mut req = request(Method::GET, format!("/books/{}.xml", id).as_str(), None);
        req.headers_mut().insert(ACCEPT, "application/json".parse().expect("accept"));
        let res = send(&app, req).await;
        assert_eq!(res.headers().get(CONTENT_TYPE).expect("content type"), "application/xml");
        let xml = body_text(res).await;
        assert!(xml.contains("<book>"));
        assert!(xml.contains("<title>Effective Java</title>"));

        let mut req = request(Method::GET, "/books", None);
        req.headers_mut().insert(ACCEPT, "application/json;q=0.5, application/xml".parse().expect("accept"));
        let res = send(&app, req).await;
        assert_eq!(res.headers().get(CONTENT_TYPE).expect("content type"), "application/xml");
        assert!(body_text(res).await.contains("<books><book>"));

        for uri in ["/books.xml", "/books/.xml"] {
            let res = send(&app, request(Method::GET, uri, None)).await;
            assert_eq!(StatusCode::OK, res.status());
            assert_eq!(res.headers().get(CONTENT_TYPE).expect("content type"), "application/xml");
        }
        for uri in ["/books.json", "/books/.json"] {
            let res = send(&app, request(Method::GET, uri, None)).await;
            assert_eq!(res.headers().get(CONTENT_TYPE).expect("content type"), "application/json");
            assert_eq!(1, body_json(res).await.as_array().expect("list").len());
        }
    }

    #[tokio::test]
    async fn test_should_compress_when_accepted() {
        let app = build_app(Configuration::new(RepositoryStore::Memory)).await;
        let _ = create(&app, effective_java()).await;

        let mut req = request(Method::GET, "/books", None);
        req.headers_mut().insert(ACCEPT_ENCODING, "gzip".parse().expect("encoding"));
        let res = send(&app, req).await;
        assert_eq!(res.headers().get(CONTENT_ENCODING).expect("encoding"), "gzip");

        let res = send(&app, request(Method::GET, "/books", None)).await;
        assert!(res.headers().get(CONTENT_ENCODING).is_none());
    }

    #[tokio::test]
    async fn test_should_not_compress_when_disabled() {
        let mut config = Configuration::new(RepositoryStore::Memory);
        config.http.compression = false;
        let app = build_app(config).await;
        let _ = create(&app, effective_java()).await;

        let mut req = request(Method::GET, "/books", None);
        req.headers_mut().insert(ACCEPT_ENCODING, "gzip".parse().expect("encoding"));
        let res = send(&app, req).await;
        assert!(res.headers().get(CONTENT_ENCODING).is_none());
    }

    #[tokio::test]
    async fn test_should_hide_backend_failures() {
        let app = build_router(AppState::new(Configuration::new(RepositoryStore::Memory), Arc::new(UnavailableBookService)));

        let mut with_id = effective_java();
        with_id["id"] = json!("42");
        let requests = vec![
            request(Method::GET, "/books", None),
            request(Method::GET, "/books/42.xml", None),
            request(Method::POST, "/books", Some(effective_java())),
            request(Method::PUT, "/books", Some(with_id)),
            request(Method::DELETE, "/books/42", None),
            request(Method::DELETE, "/books", None),
        ];
        for req in requests {
            let res = send(&app, req).await;
            assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());
            assert_eq!(res.headers().get(CONTENT_TYPE).expect("content type"), "application/json");
            assert_eq!(res.headers().get(X_POWERED_BY).expect("powered by"), "Axum Framework");
            let body = body_text(res).await;
            assert!(!body.contains("10.0.0.1"));
            let err: Value = serde_json::from_str(body.as_str()).expect("should be json");
            assert_eq!(500, err["code"]);
            assert_eq!(INTERNAL_SERVER_ERROR, err["message"]);
        }
    }
}
