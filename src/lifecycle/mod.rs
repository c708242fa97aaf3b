//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Options → discover or registry → match → compose → register
//!
//! Shutdown (shutdown.rs):
//!     trigger() → HttpServer stops accepting → in-flight requests drain
//! ```
//!
//! # Design Decisions
//! - Ordered startup: binding completes before the server is built
//! - Shutdown is a broadcast so tests and signal handlers share one path

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{bootstrap, bootstrap_from_dirs};
