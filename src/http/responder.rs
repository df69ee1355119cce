//! Response helper turning error, redirect and download intents into
//! HTTP responses.
//!
//! # Responsibilities
//! - Render `RestError`s as `{code, message}` JSON with the error's status
//! - Resolve redirect URLs against the current request
//! - Stream downloads with `Content-Type`, `Content-Length` and
//!   `Content-Disposition` headers
//!
//! Handlers return the produced `Response`; returning it is what completes
//! the request.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio::io::AsyncRead;

use crate::config::{DownloadConfig, RedirectConfig};
use crate::http::download::{body_stream, DownloadArgs};
use crate::http::error::RestError;
use crate::http::redirect::{RedirectArgs, RedirectTarget};
use crate::http::request::RequestTarget;
use crate::observability::metrics;

const DEFAULT_READ_BUFFER_BYTES: usize = 64 * 1024;

/// Response helper shared by all handlers.
#[derive(Debug, Clone)]
pub struct Responder {
    default_redirect_status: StatusCode,
    trust_forwarded_proto: bool,
    read_buffer_bytes: usize,
}

impl Default for Responder {
    fn default() -> Self {
        Self {
            default_redirect_status: StatusCode::FOUND,
            trust_forwarded_proto: false,
            read_buffer_bytes: DEFAULT_READ_BUFFER_BYTES,
        }
    }
}

impl Responder {
    /// Build a responder from validated configuration.
    pub fn new(redirect: &RedirectConfig, downloads: &DownloadConfig) -> Self {
        Self {
            default_redirect_status: StatusCode::from_u16(redirect.default_status)
                .ok()
                .filter(StatusCode::is_redirection)
                .unwrap_or(StatusCode::FOUND),
            trust_forwarded_proto: redirect.trust_forwarded_proto,
            read_buffer_bytes: downloads.read_buffer_bytes.max(1),
        }
    }

    pub fn trust_forwarded_proto(&self) -> bool {
        self.trust_forwarded_proto
    }

    /// Render an error response.
    pub fn error(&self, err: &RestError) -> Response {
        render_error(err)
    }

    /// Redirect to `args.url`, resolved against the current request.
    pub fn redirect(
        &self,
        current: &RequestTarget,
        args: RedirectArgs,
    ) -> Result<Response, RestError> {
        let status = args.status.unwrap_or(self.default_redirect_status);
        if !status.is_redirection() {
            return Err(RestError::Internal(format!(
                "redirect status {} is not a 3xx code",
                status.as_u16()
            )));
        }

        let location = RedirectTarget::classify(&args.url)?.resolve(current);
        let value = HeaderValue::from_str(&location).map_err(|_| {
            RestError::Internal(format!("redirect location {location:?} is not a valid header value"))
        })?;

        tracing::debug!(
            from = %current.path,
            location = %location,
            status = status.as_u16(),
            "Redirecting"
        );
        metrics::record_response("redirect", status.as_u16());

        Ok((status, [(header::LOCATION, value)]).into_response())
    }

    /// Stream `args.stream` to the client as an attachment.
    pub fn download<R>(&self, args: DownloadArgs<R>) -> Result<Response, RestError>
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let content_type = header_value("Content-Type", &args.content_type)?;
        let disposition = header_value(
            "Content-Disposition",
            &format!("attachment; filename={}", args.filename),
        )?;

        tracing::debug!(
            filename = %args.filename,
            content_type = %args.content_type,
            content_length = args.content_length,
            "Starting download"
        );
        metrics::record_response("download", StatusCode::OK.as_u16());

        let body = Body::from_stream(body_stream(
            args.stream,
            self.read_buffer_bytes,
            args.filename,
        ));

        let mut response = Response::new(body);
        *response.status_mut() = StatusCode::OK;
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, content_type);
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(args.content_length));
        headers.insert(header::CONTENT_DISPOSITION, disposition);
        Ok(response)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, RestError> {
    HeaderValue::from_str(value)
        .map_err(|_| RestError::Internal(format!("{name} value {value:?} is not a valid header value")))
}

/// Render a `RestError` as a JSON response.
pub fn render_error(err: &RestError) -> Response {
    let status = err.status();
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), code = %err.code(), message = %err.message(), "Request failed");
    } else {
        tracing::warn!(status = status.as_u16(), code = %err.code(), message = %err.message(), "Request rejected");
    }
    metrics::record_response("error", status.as_u16());

    (status, Json(err.body())).into_response()
}
