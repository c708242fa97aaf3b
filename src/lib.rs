//! Convention-over-configuration route switchboard.
//!
//! Pairs route modules with controllers by name and registers the composed
//! handler chains (middleware → plugins → controller action) with an axum
//! router in a single bootstrap pass.

// Core subsystems
pub mod config;
pub mod discovery;
pub mod error;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::{Mode, Options, PartialOptions};
pub use error::{SwitchboardError, SwitchboardResult};
pub use http::{Actions, AxumHost, Controller, ControllerModule, Dispatch, HttpServer, Middleware, Next, Plugin};
pub use lifecycle::{bootstrap, bootstrap_from_dirs, Shutdown};
pub use routing::{Registry, RouteEntry, RouteModule};
