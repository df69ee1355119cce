//! Request inspection.
//!
//! # Responsibilities
//! - Capture scheme, host and path of the current request for redirects
//! - Expose the request ID set by the request-id middleware
//!
//! # Design Decisions
//! - `Host` header wins over the URI authority (HTTP/1.1 origin-form)
//! - `X-Forwarded-Proto` is only honoured when configured
//! - The path is read from `OriginalUri` so nested routers resolve against
//!   what the client actually requested

use axum::extract::{FromRef, FromRequestParts, OriginalUri};
use axum::http::{header, request::Parts, HeaderMap};

use crate::http::error::RestError;
use crate::http::responder::Responder;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Where the current request was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub scheme: String,
    /// Host as sent by the client, including the port if present.
    pub host: String,
    pub path: String,
}

impl RequestTarget {
    /// Extract the target from request parts.
    pub fn from_parts(parts: &Parts, trust_forwarded_proto: bool) -> Result<Self, RestError> {
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| &original.0)
            .unwrap_or(&parts.uri);

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| uri.authority().map(|a| a.to_string()))
            .ok_or_else(|| RestError::InvalidHeader("missing Host header".into()))?;

        let forwarded = if trust_forwarded_proto {
            parts
                .headers
                .get(X_FORWARDED_PROTO)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_ascii_lowercase())
                .filter(|v| !v.is_empty())
        } else {
            None
        };

        let scheme = uri
            .scheme_str()
            .map(str::to_string)
            .or(forwarded)
            .unwrap_or_else(|| "http".to_string());

        Ok(Self {
            scheme,
            host,
            path: uri.path().to_string(),
        })
    }

    /// `scheme://host[:port]`
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

impl<S> FromRequestParts<S> for RequestTarget
where
    S: Send + Sync,
    Responder: FromRef<S>,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let responder = Responder::from_ref(state);
        RequestTarget::from_parts(parts, responder.trust_forwarded_proto())
    }
}

/// Request ID of the current request, or "unknown" before the layer ran.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
