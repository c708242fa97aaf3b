//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! bootstrap + request handling produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//! ```
//!
//! # Design Decisions
//! - Structured fields (controller, method, path) on every event
//! - Plugin failures are logged with full error detail
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;
