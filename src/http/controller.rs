//! Controllers and their factories.
//!
//! A controller module is a name plus a factory. For every request the
//! factory builds a fresh capability object from the request and the
//! continuation; the endpoint then asks that object to run one action by
//! name.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::http::middleware::Next;

/// Future returned by a controller action.
pub type ActionFuture = BoxFuture<'static, Response>;

/// A per-request controller instance exposing named actions.
pub trait Controller: Send {
    /// Start the named action, or return `None` if there is no such action.
    fn invoke(self: Box<Self>, action: &str) -> Option<ActionFuture>;
}

/// Builds a controller instance for one request.
pub type ControllerFactory = Arc<dyn Fn(Request<Body>, Next) -> Box<dyn Controller> + Send + Sync>;

/// A named controller factory.
#[derive(Clone)]
pub struct ControllerModule {
    name: String,
    factory: ControllerFactory,
}

impl ControllerModule {
    /// Create a controller module from a factory function.
    pub fn new<F, C>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(Request<Body>, Next) -> C + Send + Sync + 'static,
        C: Controller + 'static,
    {
        Self {
            name: name.into(),
            factory: Arc::new(move |request, next| Box::new(factory(request, next)) as Box<dyn Controller>),
        }
    }

    /// Create a controller module from an already boxed factory.
    pub fn from_factory(name: impl Into<String>, factory: ControllerFactory) -> Self {
        Self {
            name: name.into(),
            factory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn factory(&self) -> &ControllerFactory {
        &self.factory
    }
}

impl fmt::Debug for ControllerModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerModule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

type ActionFn = Box<dyn FnOnce(Request<Body>, Next) -> ActionFuture + Send>;

/// A controller built from a table of action closures.
///
/// ```ignore
/// ControllerModule::new("posts", |req, next| {
///     Actions::new(req, next)
///         .action("posts", |_req, _next| async { "all posts" })
///         .action("find_post", find_post)
/// })
/// ```
pub struct Actions {
    request: Request<Body>,
    next: Next,
    table: Vec<(&'static str, ActionFn)>,
}

impl Actions {
    pub fn new(request: Request<Body>, next: Next) -> Self {
        Self {
            request,
            next,
            table: Vec::new(),
        }
    }

    /// Add an action. When two actions share a name the first one wins.
    pub fn action<F, Fut, R>(mut self, name: &'static str, f: F) -> Self
    where
        F: FnOnce(Request<Body>, Next) -> Fut + Send + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.table.push((
            name,
            Box::new(move |request, next| {
                let fut = f(request, next);
                async move { fut.await.into_response() }.boxed()
            }),
        ));
        self
    }

    /// The request this instance was built for.
    pub fn request(&self) -> &Request<Body> {
        &self.request
    }
}

impl Controller for Actions {
    fn invoke(self: Box<Self>, action: &str) -> Option<ActionFuture> {
        let Actions { request, next, table } = *self;
        table
            .into_iter()
            .find(|(name, _)| *name == action)
            .map(|(_, f)| f(request, next))
    }
}
