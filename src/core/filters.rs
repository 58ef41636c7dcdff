use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use subtle::ConstantTimeEq;
use crate::core::controller::{AppState, ServerError};
use crate::core::domain::AuthSettings;

pub const X_POWERED_BY: HeaderName = HeaderName::from_static("x-powered-by");
pub const AUTHENTICATION_FAILED: &str = "'Authorization' header is missing or wrong username/password";

const DEFAULT_POWERED_BY: &str = "Axum Framework";

// Basic authentication covering every route
pub(crate) async fn basic_auth<B>(
    State(state): State<AppState>,
    request: Request<B>,
    next: Next<B>) -> Response {
    match check_credentials(request.headers(), &state.config.auth) {
        Ok(()) => next.run(request).await,
        Err(reason) => {
            tracing::warn!(method = %request.method(), uri = %request.uri(), reason, "rejected request");
            ServerError::new(StatusCode::UNAUTHORIZED, AUTHENTICATION_FAILED).into_response()
        }
    }
}

pub(crate) fn check_credentials(headers: &HeaderMap, auth: &AuthSettings) -> Result<(), &'static str> {
    let value = headers.get(AUTHORIZATION)
        .ok_or("missing authorization header")?
        .to_str()
        .map_err(|_| "authorization header is not ascii")?;
    let (scheme, token) = value.trim().split_once(' ').ok_or("missing authorization scheme")?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err("unsupported authorization scheme");
    }
    let decoded = STANDARD.decode(token.trim()).map_err(|_| "malformed basic credentials")?;
    let decoded = String::from_utf8(decoded).map_err(|_| "malformed basic credentials")?;
    let (username, password) = decoded.split_once(':').ok_or("malformed basic credentials")?;

    let user_ok = username.as_bytes().ct_eq(auth.username.as_bytes());
    let pass_ok = password.as_bytes().ct_eq(auth.password.as_bytes());
    if bool::from(user_ok & pass_ok) {
        Ok(())
    } else {
        Err("wrong username or password")
    }
}

pub(crate) fn powered_by_value(configured: &str) -> HeaderValue {
    HeaderValue::from_str(configured).unwrap_or_else(|_| {
        tracing::warn!(configured, "invalid powered-by header value, using default");
        HeaderValue::from_static(DEFAULT_POWERED_BY)
    })
}

pub(crate) fn basic_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

#[cfg(test)]
mod tests {
    use axum::http::header::AUTHORIZATION;
    use axum::http::{HeaderMap, HeaderValue};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use crate::core::domain::AuthSettings;
    use crate::core::filters::{basic_header, check_credentials, powered_by_value};

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).expect("header"));
        headers
    }

    #[tokio::test]
    async fn test_should_accept_valid_credentials() {
        let auth = AuthSettings::default();
        let headers = headers_with(basic_header("admin", "password").as_str());
        assert!(check_credentials(&headers, &auth).is_ok());
        let headers = headers_with(format!("basic {}", STANDARD.encode("admin:password")).as_str());
        assert!(check_credentials(&headers, &auth).is_ok());
    }

    #[tokio::test]
    async fn test_should_reject_missing_header() {
        assert!(check_credentials(&HeaderMap::new(), &AuthSettings::default()).is_err());
    }

    #[tokio::test]
    async fn test_should_reject_without_basic_prefix() {
        let headers = headers_with(STANDARD.encode("admin:password").as_str());
        assert!(check_credentials(&headers, &AuthSettings::default()).is_err());
        let headers = headers_with(format!("Bearer {}", STANDARD.encode("admin:password")).as_str());
        assert!(check_credentials(&headers, &AuthSettings::default()).is_err());
    }

    #[tokio::test]
    async fn test_should_reject_wrong_credentials() {
        let auth = AuthSettings::default();
        assert!(check_credentials(&headers_with(basic_header("john", "doe").as_str()), &auth).is_err());
        assert!(check_credentials(&headers_with(basic_header("admin", "passwor").as_str()), &auth).is_err());
        assert!(check_credentials(&headers_with("Basic !!!"), &auth).is_err());
        assert!(check_credentials(&headers_with(format!("Basic {}", STANDARD.encode("adminpassword")).as_str()), &auth).is_err());
    }

    #[tokio::test]
    async fn test_should_fall_back_on_invalid_powered_by() {
        assert_eq!("Axum Framework", powered_by_value("bad\nvalue"));
        assert_eq!("Books", powered_by_value("Books"));
    }
}
