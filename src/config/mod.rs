//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ResponderConfig (validated, immutable)
//!     → HttpServer builds the router and Responder from it
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    DownloadConfig, ListenerConfig, ObservabilityConfig, RedirectConfig, RedirectRule,
    ResponderConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
