//! Redirect URL classification and `Location` resolution.
//!
//! ```text
//! "http://example.com/x"  → Url           (sent verbatim)
//! "/foo/bar"              → AbsolutePath  (scheme://host + path)
//! "./foo/bar"             → RelativePath  (scheme://host + current path + "/foo/bar")
//! "foo/bar"               → rejected
//! ```

use axum::http::StatusCode;
use url::Url;

use crate::http::error::RestError;
use crate::http::request::RequestTarget;

/// Arguments for a redirect response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectArgs {
    pub url: String,
    /// Falls back to the responder's default (302) when absent.
    pub status: Option<StatusCode>,
}

impl RedirectArgs {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }
}

/// A classified redirect destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget<'a> {
    Url(&'a str),
    AbsolutePath(&'a str),
    /// Suffix to append to the current path, including its leading `/`.
    RelativePath(&'a str),
}

impl<'a> RedirectTarget<'a> {
    /// Classify a redirect URL.
    pub fn classify(url: &'a str) -> Result<Self, RestError> {
        if url.starts_with('/') {
            return Ok(RedirectTarget::AbsolutePath(url));
        }
        if let Some(suffix) = url.strip_prefix('.') {
            if suffix.starts_with('/') {
                return Ok(RedirectTarget::RelativePath(suffix));
            }
        }
        if Url::parse(url).is_ok() {
            return Ok(RedirectTarget::Url(url));
        }
        Err(RestError::Internal(format!(
            "redirect path {url:?} is missing a leading slash"
        )))
    }

    /// Build the final `Location` value against the current request.
    pub fn resolve(&self, current: &RequestTarget) -> String {
        match self {
            RedirectTarget::Url(url) => (*url).to_string(),
            RedirectTarget::AbsolutePath(path) => format!("{}{}", current.origin(), path),
            RedirectTarget::RelativePath(suffix) => format!(
                "{}{}{}",
                current.origin(),
                current.path.trim_end_matches('/'),
                suffix
            ),
        }
    }
}
