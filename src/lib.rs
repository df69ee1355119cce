//! HTTP response helpers on top of Axum.
//!
//! The [`Responder`] turns three intents into responses: a structured
//! `{code, message}` error body, a redirect with a resolved `Location`, and a
//! streamed file download. [`HttpServer`] wires it into a router with
//! config-driven redirect rules and a download directory.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ResponderConfig;
pub use http::{DownloadArgs, HttpServer, RedirectArgs, Responder, RestError};
pub use lifecycle::Shutdown;
