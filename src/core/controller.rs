use std::sync::Arc;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use crate::catalog::domain::BookService;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, Violation};

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const INVALID_REQUEST_URL: &str = "Invalid request URL.";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<Configuration>,
    pub(crate) service: Arc<dyn BookService>,
}

impl AppState {
    pub fn new(config: Configuration, service: Arc<dyn BookService>) -> AppState {
        AppState {
            config: Arc::new(config),
            service,
        }
    }
}

// ErrorResponse is the JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

#[derive(Debug)]
pub(crate) struct ServerError {
    pub status: StatusCode,
    pub message: String,
    pub violations: Vec<Violation>,
}

impl ServerError {
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
            violations: vec![],
        }
    }

    // internal details are logged here and never sent to the client
    fn internal(err: &CommandError) -> Self {
        tracing::error!(error = ?err, "backend failure");
        ServerError::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
    }
}

impl From<LibraryError> for ServerError {
    fn from(err: LibraryError) -> Self {
        ServerError::from(CommandError::from(err))
    }
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Database { .. } => {
                ServerError::internal(&err)
            }
            CommandError::DuplicateKey { message } => {
                ServerError::new(StatusCode::CONFLICT, message.as_str())
            }
            CommandError::NotFound { message } => {
                ServerError::new(StatusCode::NOT_FOUND, message.as_str())
            }
            CommandError::Runtime { .. } => {
                ServerError::internal(&err)
            }
            CommandError::Serialization { .. } => {
                ServerError::internal(&err)
            }
            CommandError::UnsupportedMediaType { message } => {
                ServerError::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, message.as_str())
            }
            CommandError::Validation { message, violations } => {
                ServerError { status: StatusCode::BAD_REQUEST, message, violations }
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = ErrorResponse {
            code: status.as_u16(),
            message: self.message,
            violations: self.violations,
        };
        let mut res = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            res.headers_mut().insert(WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }
        res
    }
}

pub(crate) async fn not_found() -> ServerError {
    ServerError::new(StatusCode::NOT_FOUND, INVALID_REQUEST_URL)
}
