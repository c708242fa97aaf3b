//! Error definitions shared by bootstrap and request handling.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Boxed error returned by plugins.
pub type PluginError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while binding routes or while serving a bound route.
#[derive(Debug, Error)]
pub enum SwitchboardError {
    /// A route module has no controller with the same name.
    #[error("No controller for your route \"{route}\" was found. Check that the route and the controller names match exactly")]
    UnmatchedRoute { route: String },

    /// Reading a module directory or file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A route table file is not valid TOML or has the wrong shape.
    #[error("Invalid route table {file}: {message}")]
    RouteTable { file: String, message: String },

    /// A route table uses a method key the host cannot register.
    #[error("Unsupported HTTP method \"{method}\" in route \"{route}\"")]
    UnsupportedMethod { route: String, method: String },

    /// A route table references middleware that was never registered.
    #[error("Unknown middleware \"{name}\" referenced by route \"{route}\"")]
    UnknownMiddleware { route: String, name: String },

    /// A route table references a plugin that was never registered.
    #[error("Unknown plugin \"{name}\" referenced by route \"{route}\"")]
    UnknownPlugin { route: String, name: String },

    /// A controller file exists on disk but no factory was registered for it.
    #[error("Controller file \"{file}\" has no registered factory named \"{name}\"")]
    UnregisteredController { file: String, name: String },

    /// The host already has a handler for this method and path.
    #[error("Route {method} {path} is already registered")]
    DuplicateRoute { method: String, path: String },

    /// The path clashes with an already registered path of the same shape.
    #[error("Route {path} conflicts with registered route {existing}")]
    ConflictingRoute { path: String, existing: String },

    /// The router cannot accept this path (bad parameter or misplaced catch-all).
    #[error("Invalid route path \"{path}\": {message}")]
    InvalidPath { path: String, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A plugin failed; the controller was not invoked.
    #[error("Plugin {index} for {controller} {path} failed: {source}")]
    Plugin {
        controller: String,
        path: String,
        index: usize,
        #[source]
        source: PluginError,
    },

    /// The controller has no action with this name.
    #[error("Controller \"{controller}\" has no action \"{action}\"")]
    MissingAction { controller: String, action: String },
}

/// Result type for switchboard operations.
pub type SwitchboardResult<T> = Result<T, SwitchboardError>;

impl IntoResponse for SwitchboardError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
