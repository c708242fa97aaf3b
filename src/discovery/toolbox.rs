//! Named middleware and plugins for route tables.

use std::collections::HashMap;

use crate::discovery::route_file::RouteSpec;
use crate::error::{SwitchboardError, SwitchboardResult};
use crate::http::middleware::Middleware;
use crate::http::plugin::Plugin;
use crate::routing::table::RouteEntry;

/// Middleware and plugins that route tables may refer to by name.
#[derive(Debug, Clone, Default)]
pub struct Toolbox {
    middleware: HashMap<String, Middleware>,
    plugins: HashMap<String, Plugin>,
}

impl Toolbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register middleware under `name`, replacing any previous entry.
    pub fn middleware(mut self, name: impl Into<String>, middleware: Middleware) -> Self {
        self.middleware.insert(name.into(), middleware);
        self
    }

    /// Register a plugin under `name`, replacing any previous entry.
    pub fn plugin(mut self, name: impl Into<String>, plugin: Plugin) -> Self {
        self.plugins.insert(name.into(), plugin);
        self
    }

    /// Turn a route spec into a route entry, looking up every name.
    pub fn resolve(&self, route: &str, spec: RouteSpec) -> SwitchboardResult<RouteEntry> {
        let mut entry = RouteEntry::new(spec.path, spec.action);

        if let Some(names) = spec.middleware {
            let middleware = names
                .into_iter()
                .map(|name| {
                    self.middleware
                        .get(&name)
                        .cloned()
                        .ok_or_else(|| SwitchboardError::UnknownMiddleware {
                            route: route.to_string(),
                            name,
                        })
                })
                .collect::<SwitchboardResult<Vec<_>>>()?;
            entry = entry.with_middleware(middleware);
        }

        if let Some(names) = spec.plugins {
            let plugins = names
                .into_iter()
                .map(|name| {
                    self.plugins
                        .get(&name)
                        .cloned()
                        .ok_or_else(|| SwitchboardError::UnknownPlugin {
                            route: route.to_string(),
                            name,
                        })
                })
                .collect::<SwitchboardResult<Vec<_>>>()?;
            entry = entry.with_plugins(plugins);
        }

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(middleware: Option<&[&str]>, plugins: Option<&[&str]>) -> RouteSpec {
        let owned = |names: &[&str]| -> Vec<String> { names.iter().map(|n| n.to_string()).collect() };
        RouteSpec {
            path: "/posts".to_string(),
            action: "posts".to_string(),
            middleware: middleware.map(owned),
            plugins: plugins.map(owned),
        }
    }

    fn toolbox() -> Toolbox {
        Toolbox::new()
            .middleware("auth", Middleware::from_fn(|req, next: crate::http::middleware::Next| next.run(req)))
            .plugin("audit", Plugin::from_fn(|req| async move { Ok(req) }))
    }

    #[test]
    fn test_resolves_names_in_order() {
        let entry = toolbox().resolve("posts.toml", spec(Some(&["auth", "auth"]), Some(&["audit"]))).unwrap();
        assert_eq!(entry.middleware.as_ref().map(Vec::len), Some(2));
        assert_eq!(entry.plugins.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_absent_lists_stay_absent() {
        let entry = toolbox().resolve("posts.toml", spec(None, None)).unwrap();
        assert!(entry.middleware.is_none());
        assert!(entry.plugins.is_none());
    }

    #[test]
    fn test_unknown_names_fail() {
        let err = toolbox().resolve("posts.toml", spec(Some(&["admin"]), None)).unwrap_err();
        assert!(matches!(err, SwitchboardError::UnknownMiddleware { ref name, .. } if name == "admin"));

        let err = toolbox().resolve("posts.toml", spec(None, Some(&["cache"]))).unwrap_err();
        assert!(matches!(err, SwitchboardError::UnknownPlugin { ref route, .. } if route == "posts.toml"));
    }
}
