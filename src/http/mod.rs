//! Request handling subsystem.
//!
//! # Data Flow
//! ```text
//! Binding (route module + controller)
//!     → composer.rs (one Registration per route entry)
//!     → host.rs (Dispatch::register; AxumHost builds the axum Router)
//!     → server.rs (serve until shutdown)
//!
//! Per request:
//!     chain.rs runs [middleware..., endpoint]
//!     → endpoint: ServedBy bookkeeping
//!     → plugin.rs (sequential plugin chain)
//!     → controller.rs (factory builds instance, action runs)
//! ```

pub mod chain;
pub mod composer;
pub mod controller;
pub mod host;
pub mod middleware;
pub mod plugin;
pub mod server;

pub use chain::{Chain, Handler};
pub use composer::{compose, Endpoint, Registration, RouteInfo, ServedBy};
pub use controller::{ActionFuture, Actions, Controller, ControllerFactory, ControllerModule};
pub use host::{AxumHost, Dispatch};
pub use middleware::{Middleware, Next};
pub use plugin::{Plugin, PluginResult};
pub use server::HttpServer;
