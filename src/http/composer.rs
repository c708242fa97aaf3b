//! Handler composition.
//!
//! # Responsibilities
//! - Turn every entry of a bound route module into one registration
//! - Build the endpoint: bookkeeping, plugin chain, controller action
//! - Apply the configured plugin failure behavior
//!
//! # Design Decisions
//! - Handler order is `[middleware..., endpoint]`; absent middleware adds nothing
//! - Actions are looked up when a request arrives, not at bootstrap
//! - The action's response is returned as is

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::config::Mode;
use crate::error::{SwitchboardError, SwitchboardResult};
use crate::http::chain::Handler;
use crate::http::controller::ControllerFactory;
use crate::http::middleware::Next;
use crate::http::plugin::{run_chain, Plugin, PluginFailure};
use crate::observability::metrics;
use crate::routing::matcher::Binding;

/// The route entry that served a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub method: Method,
    pub path: String,
    pub action: String,
}

/// Request extension recording which controller and route served it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedBy {
    pub controller: String,
    pub route: RouteInfo,
}

/// Final handler of a registration.
#[derive(Clone)]
pub struct Endpoint {
    controller: Arc<str>,
    route: Arc<RouteInfo>,
    factory: ControllerFactory,
    plugins: Option<Arc<[Plugin]>>,
    mode: Mode,
}

impl Endpoint {
    pub fn new(
        controller: impl Into<Arc<str>>,
        route: RouteInfo,
        factory: ControllerFactory,
        plugins: Option<Vec<Plugin>>,
        mode: Mode,
    ) -> Self {
        Self {
            controller: controller.into(),
            route: Arc::new(route),
            factory,
            plugins: plugins.map(Arc::from),
            mode,
        }
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub fn route(&self) -> &RouteInfo {
        &self.route
    }

    /// Serve one request.
    pub async fn call(&self, mut request: Request<Body>, next: Next) -> SwitchboardResult<Response> {
        request.extensions_mut().insert(ServedBy {
            controller: self.controller.to_string(),
            route: (*self.route).clone(),
        });

        let request = match &self.plugins {
            Some(plugins) => match run_chain(plugins, request).await {
                Ok(request) => request,
                Err(failure) => return self.plugin_failed(failure),
            },
            None => request,
        };

        let instance = (self.factory)(request, next);
        match instance.invoke(&self.route.action) {
            Some(action) => {
                metrics::record_dispatch(&self.controller, &self.route.action);
                Ok(action.await)
            }
            None => {
                tracing::error!(
                    controller = %self.controller,
                    action = %self.route.action,
                    path = %self.route.path,
                    "Controller has no such action"
                );
                Err(SwitchboardError::MissingAction {
                    controller: self.controller.to_string(),
                    action: self.route.action.clone(),
                })
            }
        }
    }

    fn plugin_failed(&self, failure: PluginFailure) -> SwitchboardResult<Response> {
        tracing::error!(
            controller = %self.controller,
            method = %self.route.method,
            path = %self.route.path,
            plugin = failure.index,
            error = %failure.error,
            "An error occurred within a switchboard plugin that was not handled by the plugin"
        );
        metrics::record_plugin_failure(&self.controller);

        match self.mode {
            Mode::Development => Err(SwitchboardError::Plugin {
                controller: self.controller.to_string(),
                path: self.route.path.clone(),
                index: failure.index,
                source: failure.error,
            }),
            Mode::Production => Ok((StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()),
        }
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("controller", &self.controller)
            .field("route", &self.route)
            .field("plugins", &self.plugins.as_ref().map(|p| p.len()))
            .field("mode", &self.mode)
            .finish()
    }
}

/// One call against the host's dispatch table.
#[derive(Debug, Clone)]
pub struct Registration {
    pub method: Method,
    pub path: String,
    pub handlers: Vec<Handler>,
}

/// Build the registrations for one binding.
pub fn compose(binding: &Binding, mode: Mode) -> Vec<Registration> {
    let controller: Arc<str> = Arc::from(binding.controller.name());
    let mut registrations = Vec::with_capacity(binding.route.entry_count());

    for (method, entries) in binding.route.methods() {
        for entry in entries {
            let mut handlers = Vec::with_capacity(entry.middleware.as_ref().map_or(0, Vec::len) + 1);
            if let Some(middleware) = &entry.middleware {
                handlers.extend(middleware.iter().cloned().map(Handler::Middleware));
            }

            let route = RouteInfo {
                method: method.clone(),
                path: entry.path.clone(),
                action: entry.action.clone(),
            };
            handlers.push(Handler::Endpoint(Endpoint::new(
                controller.clone(),
                route,
                binding.controller.factory().clone(),
                entry.plugins.clone(),
                mode,
            )));

            registrations.push(Registration {
                method: method.clone(),
                path: entry.path.clone(),
                handlers,
            });
        }
    }

    registrations
}
