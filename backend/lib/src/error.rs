use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::data::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    BadRequest(String),

    #[error("Nonce not found. Request a new nonce and try again.")]
    NonceNotFound,

    #[error("Nonce expired. Request a new nonce and try again.")]
    NonceExpired,

    #[error("{0}")]
    Unauthorized(String),

    #[error("An organization with this domain already exists")]
    DuplicateDomain(String),

    #[error("Storage error: {0}")]
    Store(StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal,

    /// Wraps another error with extra detail for the response body.
    ///
    /// Only produced when diagnostic error responses are enabled; the
    /// status code is taken from the wrapped error.
    #[error("{inner}")]
    Diagnostic { inner: Box<Error>, detail: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// JSON body of an error response.
///
/// Every error returns `{"error": ...}`; with diagnostics enabled a
/// `detail` field is added alongside it.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Standard { error: String },
    Diagnostic { error: String, detail: String },
}

impl Error {
    /// Attaches diagnostic detail to this error when `enabled` is set.
    pub fn with_detail(self, enabled: bool, detail: impl Into<String>) -> Self {
        if enabled {
            Error::Diagnostic {
                inner: Box::new(self),
                detail: detail.into(),
            }
        } else {
            self
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) | Error::NonceNotFound | Error::NonceExpired => {
                StatusCode::BAD_REQUEST
            }
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::DuplicateDomain(_) => StatusCode::CONFLICT,
            Error::Store(_) | Error::Config(_) | Error::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::Diagnostic { inner, .. } => inner.status_code(),
        }
    }

    /// The message sent to the client. Server-side failures are logged
    /// with full detail and collapsed to a generic message.
    fn client_message(&self) -> String {
        match self {
            Error::Store(err) => {
                error!(target: "api", error = %err, "Store operation failed");
                "Internal server error".to_string()
            }
            Error::Config(msg) => {
                error!(target: "api", error = %msg, "Configuration error");
                "Internal server error".to_string()
            }
            Error::Internal => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn render(self) -> (StatusCode, ErrorBody) {
        match self {
            Error::Diagnostic { inner, detail } => {
                let (status, body) = inner.render();
                let error = match body {
                    ErrorBody::Standard { error } | ErrorBody::Diagnostic { error, .. } => error,
                };
                (status, ErrorBody::Diagnostic { error, detail })
            }
            other => {
                let status = other.status_code();
                let error = other.client_message();
                (status, ErrorBody::Standard { error })
            }
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateDomain(domain) => Error::DuplicateDomain(domain),
            other => Error::Store(other),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = self.render();
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_kinds() {
        assert_eq!(
            Error::BadRequest("missing field".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::NonceNotFound.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::NonceExpired.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::Unauthorized("Invalid signature".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::DuplicateDomain("example.com".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            Error::Store(StoreError::Backend("down".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn diagnostic_wrapper_keeps_inner_status() {
        let err = Error::Unauthorized("Invalid signature".to_string())
            .with_detail(true, "recovered 0xabc, expected 0xdef");

        let (status, body) = err.render();
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "Invalid signature");
        assert_eq!(json["detail"], "recovered 0xabc, expected 0xdef");
    }

    #[test]
    fn with_detail_is_a_no_op_when_disabled() {
        let err = Error::Unauthorized("Invalid signature".to_string())
            .with_detail(false, "should not appear");

        let (_, body) = err.render();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "Invalid signature");
        assert!(json.get("detail").is_none());
    }

    #[test]
    fn server_errors_are_generic_to_clients() {
        let (status, body) = Error::Store(StoreError::Backend("pool exhausted".to_string())).render();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
    }
}
