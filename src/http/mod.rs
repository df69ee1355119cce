//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → routes.rs (configured redirects, downloads, 404 fallback)
//!       or application routes merged by the caller
//!     → request.rs (scheme/host/path of the current request)
//!     → responder.rs (error | redirect | download)
//!         → redirect.rs (classify & resolve Location)
//!         → download.rs (open file, stream body)
//!     → Send to client
//! ```

pub mod download;
pub mod error;
pub mod redirect;
pub mod request;
pub mod responder;
pub mod routes;
pub mod server;

pub use download::DownloadArgs;
pub use error::{ErrorBody, RestError};
pub use redirect::{RedirectArgs, RedirectTarget};
pub use request::{RequestTarget, X_REQUEST_ID};
pub use responder::Responder;
pub use server::{AppState, HttpServer};
