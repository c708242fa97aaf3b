//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registry (from code) or discovery (from disk)
//!     → table.rs (RouteModule: method → [RouteEntry])
//!     → matcher.rs (pair each route module with its controller)
//!     → Vec<Binding> handed to the composer
//! ```
//!
//! # Design Decisions
//! - Routes are bound once at startup, immutable afterwards
//! - Pairing is by exact name; a route without a controller is fatal
//! - Deterministic: registration order follows module, method and entry order

pub mod matcher;
pub mod registry;
pub mod table;

pub use matcher::{bind, Binding, Named};
pub use registry::Registry;
pub use table::{parse_method, RouteEntry, RouteModule};
