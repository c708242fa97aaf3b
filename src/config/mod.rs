//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! switchboard.toml (optional) or PartialOptions from code
//!     → schema.rs (merge over defaults)
//!     → validation.rs (semantic checks)
//!     → Options (resolved, immutable)
//!     → module loader + composer at bootstrap
//! ```
//!
//! # Design Decisions
//! - Every key has a default so an empty file is a valid config
//! - Error handling mode is an explicit flag, never read from the environment
//! - Options are read once; there is no runtime re-binding

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_options, parse_options};
pub use schema::{resolve, Mode, Options, PartialOptions};
