//! Route modules and their entries.

use std::fmt;

use axum::http::Method;

use crate::http::middleware::Middleware;
use crate::http::plugin::Plugin;

/// One route: a path, the controller action serving it, and optional
/// middleware and plugins.
///
/// `None` and `Some(vec![])` are different: a route without middleware is
/// registered as `[path, endpoint]`, never with an empty middleware slot.
#[derive(Clone)]
pub struct RouteEntry {
    pub path: String,
    pub action: String,
    pub middleware: Option<Vec<Middleware>>,
    pub plugins: Option<Vec<Plugin>>,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            action: action.into(),
            middleware: None,
            plugins: None,
        }
    }

    /// Append a middleware.
    pub fn middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.get_or_insert_with(Vec::new).push(middleware);
        self
    }

    /// Append a plugin.
    pub fn plugin(mut self, plugin: Plugin) -> Self {
        self.plugins.get_or_insert_with(Vec::new).push(plugin);
        self
    }

    pub fn with_middleware(mut self, middleware: Vec<Middleware>) -> Self {
        self.middleware = Some(middleware);
        self
    }

    pub fn with_plugins(mut self, plugins: Vec<Plugin>) -> Self {
        self.plugins = Some(plugins);
        self
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .field("action", &self.action)
            .field("middleware", &self.middleware.as_ref().map(Vec::len))
            .field("plugins", &self.plugins.as_ref().map(Vec::len))
            .finish()
    }
}

/// A named set of routes grouped by HTTP method.
///
/// Method groups keep the order in which they were first added, and entries
/// keep their order within a group.
#[derive(Debug, Clone)]
pub struct RouteModule {
    name: String,
    origin: String,
    methods: Vec<(Method, Vec<RouteEntry>)>,
}

impl RouteModule {
    /// Create an empty module. The origin defaults to the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            origin: name.clone(),
            name,
            methods: Vec::new(),
        }
    }

    /// Set the label used in error messages, usually the source file name.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Add an entry under `method`.
    pub fn on(mut self, method: Method, entry: RouteEntry) -> Self {
        match self.methods.iter_mut().find(|(m, _)| *m == method) {
            Some((_, entries)) => entries.push(entry),
            None => self.methods.push((method, vec![entry])),
        }
        self
    }

    pub fn get(self, entry: RouteEntry) -> Self {
        self.on(Method::GET, entry)
    }

    pub fn post(self, entry: RouteEntry) -> Self {
        self.on(Method::POST, entry)
    }

    pub fn put(self, entry: RouteEntry) -> Self {
        self.on(Method::PUT, entry)
    }

    pub fn patch(self, entry: RouteEntry) -> Self {
        self.on(Method::PATCH, entry)
    }

    pub fn delete(self, entry: RouteEntry) -> Self {
        self.on(Method::DELETE, entry)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn methods(&self) -> &[(Method, Vec<RouteEntry>)] {
        &self.methods
    }

    /// Total number of entries across all methods.
    pub fn entry_count(&self) -> usize {
        self.methods.iter().map(|(_, entries)| entries.len()).sum()
    }
}

/// Parse a lowercase method key as used in route tables.
pub fn parse_method(key: &str) -> Option<Method> {
    let method = match key {
        "get" => Method::GET,
        "post" => Method::POST,
        "put" => Method::PUT,
        "patch" => Method::PATCH,
        "delete" => Method::DELETE,
        "head" => Method::HEAD,
        "options" => Method::OPTIONS,
        "trace" => Method::TRACE,
        _ => return None,
    };
    Some(method)
}
