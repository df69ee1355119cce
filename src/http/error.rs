//! REST error hierarchy.
//!
//! Every error carries a machine-readable code and an HTTP status. The
//! responder renders them as `{"code": ..., "message": ...}` bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestError {
    #[error("{0}")]
    BadDigest(String),

    #[error("{0}")]
    BadMethod(String),

    /// Server-side failure (500).
    #[error("{0}")]
    Internal(String),

    /// A request argument failed validation (409).
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    InvalidContent(String),

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    InvalidHeader(String),

    #[error("{0}")]
    InvalidVersion(String),

    #[error("{0}")]
    MissingParameter(String),

    #[error("{0}")]
    NotAuthorized(String),

    #[error("{0}")]
    PreconditionFailed(String),

    #[error("{0}")]
    RequestExpired(String),

    #[error("{0}")]
    RequestThrottled(String),

    #[error("{0}")]
    ResourceNotFound(String),

    #[error("{0}")]
    WrongAccept(String),

    /// Plain HTTP error; the code is derived from the status reason phrase.
    #[error("{message}")]
    Http { status: StatusCode, message: String },
}

impl RestError {
    /// Build a plain HTTP error for an arbitrary status.
    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        RestError::Http {
            status,
            message: message.into(),
        }
    }

    /// HTTP status the error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::BadDigest(_) => StatusCode::BAD_REQUEST,
            RestError::BadMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::InvalidArgument(_) => StatusCode::CONFLICT,
            RestError::InvalidContent(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            RestError::InvalidHeader(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidVersion(_) => StatusCode::BAD_REQUEST,
            RestError::MissingParameter(_) => StatusCode::CONFLICT,
            RestError::NotAuthorized(_) => StatusCode::FORBIDDEN,
            RestError::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
            RestError::RequestExpired(_) => StatusCode::BAD_REQUEST,
            RestError::RequestThrottled(_) => StatusCode::TOO_MANY_REQUESTS,
            RestError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            RestError::WrongAccept(_) => StatusCode::NOT_ACCEPTABLE,
            RestError::Http { status, .. } => *status,
        }
    }

    /// Machine-readable error code placed in the response body.
    pub fn code(&self) -> String {
        let code = match self {
            RestError::BadDigest(_) => "BadDigest",
            RestError::BadMethod(_) => "BadMethod",
            RestError::Internal(_) => "InternalError",
            RestError::InvalidArgument(_) => "InvalidArgument",
            RestError::InvalidContent(_) => "InvalidContent",
            RestError::InvalidCredentials(_) => "InvalidCredentials",
            RestError::InvalidHeader(_) => "InvalidHeader",
            RestError::InvalidVersion(_) => "InvalidVersion",
            RestError::MissingParameter(_) => "MissingParameter",
            RestError::NotAuthorized(_) => "NotAuthorized",
            RestError::PreconditionFailed(_) => "PreconditionFailed",
            RestError::RequestExpired(_) => "RequestExpired",
            RestError::RequestThrottled(_) => "RequestThrottled",
            RestError::ResourceNotFound(_) => "ResourceNotFound",
            RestError::WrongAccept(_) => "WrongAccept",
            RestError::Http { status, .. } => return reason_code(*status),
        };
        code.to_string()
    }

    /// Human-readable message placed in the response body.
    pub fn message(&self) -> &str {
        match self {
            RestError::BadDigest(m)
            | RestError::BadMethod(m)
            | RestError::Internal(m)
            | RestError::InvalidArgument(m)
            | RestError::InvalidContent(m)
            | RestError::InvalidCredentials(m)
            | RestError::InvalidHeader(m)
            | RestError::InvalidVersion(m)
            | RestError::MissingParameter(m)
            | RestError::NotAuthorized(m)
            | RestError::PreconditionFailed(m)
            | RestError::RequestExpired(m)
            | RestError::RequestThrottled(m)
            | RestError::ResourceNotFound(m)
            | RestError::WrongAccept(m) => m,
            RestError::Http { message, .. } => message,
        }
    }

    /// Body representation of this error.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.message().to_string(),
        }
    }
}

/// "Not Found" -> "NotFound"; unknown statuses fall back to "Http<code>".
fn reason_code(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect(),
        None => format!("Http{}", status.as_u16()),
    }
}

impl From<std::io::Error> for RestError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => RestError::ResourceNotFound(err.to_string()),
            _ => RestError::Internal(err.to_string()),
        }
    }
}

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        crate::http::responder::render_error(&self)
    }
}
