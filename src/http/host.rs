//! The host framework's dispatch table.
//!
//! # Responsibilities
//! - Define the registration contract the composer writes against
//! - Provide an axum-backed implementation
//!
//! # Design Decisions
//! - One registration per call: method, path, ordered handlers
//! - Route paths use the `:param` / `*rest` style; the axum host translates
//!   them to `{param}` / `{*rest}`
//! - Every path is vetted against a `matchit` index before it reaches the
//!   router, so duplicates, conflicts and malformed paths come back as errors
//!   instead of panicking inside axum
//! - A batch is vetted as a whole before any of it is mounted

use std::collections::{HashMap, HashSet};
use std::fmt;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::routing::{on, MethodFilter};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::{SwitchboardError, SwitchboardResult};
use crate::http::chain::{Chain, Handler};
use crate::http::composer::Registration;
use crate::observability::metrics;

/// A framework that accepts handler registrations.
pub trait Dispatch {
    /// Register `handlers` for `method` and `path`, keeping their order.
    fn register(&mut self, method: Method, path: &str, handlers: Vec<Handler>) -> SwitchboardResult<()>;

    /// Register a batch in order. Hosts that can check the whole batch up
    /// front override this so a failure leaves them untouched.
    fn register_all(&mut self, registrations: Vec<Registration>) -> SwitchboardResult<()> {
        for registration in registrations {
            self.register(registration.method, &registration.path, registration.handlers)?;
        }
        Ok(())
    }
}

/// Paths accepted so far, kept beside the router.
#[derive(Clone, Default)]
struct RouteIndex {
    registered: HashSet<(Method, String)>,
    shapes: HashMap<String, String>,
    paths: matchit::Router<()>,
}

impl RouteIndex {
    /// Check one registration and record it. Returns the method filter and
    /// the translated axum path.
    fn admit(&mut self, method: &Method, path: &str) -> SwitchboardResult<(MethodFilter, String)> {
        if !path.starts_with('/') {
            return Err(SwitchboardError::InvalidPath {
                path: path.to_string(),
                message: "must start with '/'".to_string(),
            });
        }

        let filter = MethodFilter::try_from(method.clone()).map_err(|_| SwitchboardError::UnsupportedMethod {
            route: path.to_string(),
            method: method.to_string(),
        })?;

        let axum_path = to_axum_path(path);
        let shape = route_shape(&axum_path);
        match self.shapes.get(&shape) {
            Some(existing) if *existing != axum_path => {
                return Err(SwitchboardError::ConflictingRoute {
                    path: path.to_string(),
                    existing: existing.clone(),
                });
            }
            Some(_) => {}
            None => {
                self.paths.insert(axum_path.clone(), ()).map_err(|e| match e {
                    matchit::InsertError::Conflict { with } => SwitchboardError::ConflictingRoute {
                        path: path.to_string(),
                        existing: with,
                    },
                    other => SwitchboardError::InvalidPath {
                        path: path.to_string(),
                        message: other.to_string(),
                    },
                })?;
            }
        }

        if !self.registered.insert((method.clone(), shape.clone())) {
            return Err(SwitchboardError::DuplicateRoute {
                method: method.to_string(),
                path: path.to_string(),
            });
        }
        self.shapes.insert(shape, axum_path.clone());
        Ok((filter, axum_path))
    }
}

impl fmt::Debug for RouteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteIndex")
            .field("registered", &self.registered.len())
            .field("paths", &self.shapes.values().collect::<Vec<_>>())
            .finish()
    }
}

/// Dispatch table backed by an `axum::Router`.
#[derive(Debug, Default)]
pub struct AxumHost {
    router: Router,
    index: RouteIndex,
}

impl AxumHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registrations accepted so far.
    pub fn len(&self) -> usize {
        self.index.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.registered.is_empty()
    }

    /// Finish registration and return the router with request tracing.
    pub fn into_router(self) -> Router {
        self.router.layer(TraceLayer::new_for_http())
    }

    fn mount(&mut self, method: Method, filter: MethodFilter, axum_path: &str, handlers: Vec<Handler>) {
        let chain = Chain::new(handlers);
        tracing::debug!(method = %method, path = %axum_path, handlers = chain.len(), "Registering route");
        metrics::record_registration(method.as_str());

        let router = std::mem::take(&mut self.router);
        self.router = router.route(
            axum_path,
            on(filter, move |request: Request<Body>| {
                let chain = chain.clone();
                async move { chain.run(request).await }
            }),
        );
    }
}

impl Dispatch for AxumHost {
    fn register(&mut self, method: Method, path: &str, handlers: Vec<Handler>) -> SwitchboardResult<()> {
        let (filter, axum_path) = self.index.admit(&method, path)?;
        self.mount(method, filter, &axum_path, handlers);
        Ok(())
    }

    fn register_all(&mut self, registrations: Vec<Registration>) -> SwitchboardResult<()> {
        let mut staged = self.index.clone();
        let mut admitted = Vec::with_capacity(registrations.len());
        for registration in registrations {
            let (filter, axum_path) = staged.admit(&registration.method, &registration.path)?;
            admitted.push((registration, filter, axum_path));
        }

        self.index = staged;
        for (registration, filter, axum_path) in admitted {
            self.mount(registration.method, filter, &axum_path, registration.handlers);
        }
        Ok(())
    }
}

/// Translate `:param` and `*rest` segments to axum's brace syntax.
pub fn to_axum_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if let Some(name) = segment.strip_prefix(':') {
                format!("{{{}}}", name)
            } else if let Some(name) = segment.strip_prefix('*') {
                let name = if name.is_empty() { "wildcard" } else { name };
                format!("{{*{}}}", name)
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The path with parameter names erased; two paths with the same shape
/// conflict in the router.
fn route_shape(axum_path: &str) -> String {
    axum_path
        .split('/')
        .map(|segment| {
            if segment.starts_with("{*") {
                "{*}"
            } else if segment.starts_with('{') {
                "{}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
