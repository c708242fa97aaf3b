//! Controller factories known to the application, keyed by name.

use std::collections::HashMap;

use axum::body::Body;
use axum::http::Request;

use crate::http::controller::{Controller, ControllerFactory, ControllerModule};
use crate::http::middleware::Next;

/// Controller factories that files in the controllers directory resolve to.
#[derive(Clone, Default)]
pub struct ControllerCatalog {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`, replacing any previous entry.
    pub fn register<F, C>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(Request<Body>, Next) -> C + Send + Sync + 'static,
        C: Controller + 'static,
    {
        let module = ControllerModule::new(name, factory);
        self.factories.insert(module.name().to_string(), module.factory().clone());
        self
    }

    /// Build the controller module for `name`.
    pub fn get(&self, name: &str) -> Option<ControllerModule> {
        self.factories
            .get(name)
            .map(|factory| ControllerModule::from_factory(name, factory.clone()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ControllerCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ControllerCatalog").field("names", &names).finish()
    }
}
