//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Responder and server produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (response and download counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span
//! - Metrics are cheap (atomic increments); without an installed recorder
//!   they are no-ops

pub mod logging;
pub mod metrics;
