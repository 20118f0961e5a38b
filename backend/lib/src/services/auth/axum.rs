use alloy_core::primitives::Address;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use uuid::Uuid;

use crate::{error::Error, services::Services};

/// Axum extractor for routes that require a wallet session.
///
/// Reads the session token from the session cookie, falling back to an
/// `Authorization: Bearer` header, and validates it. Missing, expired
/// and invalid tokens are all rejected the same way, with a 401 and no
/// indication of which check failed.
pub struct AuthenticatedUser {
    pub address: Address,
    pub user_id: Uuid,
    pub role: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Services: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let services = Services::from_ref(state);

        let claims = session_token(&parts.headers, services.auth.cookie_name())
            .and_then(|token| services.auth.authenticate(&token))
            .ok_or_else(|| Error::Unauthorized("Not authenticated".to_string()))?;

        Ok(Self {
            address: claims.sub,
            user_id: claims.uid,
            role: claims.role,
        })
    }
}

/// Extracts the raw session token from request headers. The cookie
/// wins when both it and a bearer token are present.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        return Some(cookie.value().to_string());
    }

    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderMap, HeaderValue};

    use super::*;

    fn headers_with(name: &'static str, value: String) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(&value).unwrap());
        headers
    }

    #[test]
    fn cookie_token_is_preferred() {
        let mut headers = headers_with("cookie", "vibent_session=cookie-token".to_string());
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );

        let token = session_token(&headers, "vibent_session");
        assert_eq!(token.as_deref(), Some("cookie-token"));
    }

    #[test]
    fn bearer_token_is_a_fallback() {
        let headers = headers_with("authorization", "Bearer header-token".to_string());

        let token = session_token(&headers, "vibent_session");
        assert_eq!(token.as_deref(), Some("header-token"));
    }

    #[test]
    fn unrelated_cookies_are_ignored() {
        let headers = headers_with("cookie", "other=value; theme=dark".to_string());

        assert!(session_token(&headers, "vibent_session").is_none());
    }

    #[test]
    fn no_credentials_yields_none() {
        assert!(session_token(&HeaderMap::new(), "vibent_session").is_none());
    }
}
