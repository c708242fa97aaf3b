//! Explicit route and controller registry.
//!
//! The application hands its route modules and controller factories over
//! directly instead of having them discovered on disk. Matching still pairs
//! them by name and still fails on a route without a controller.

use crate::error::SwitchboardResult;
use crate::http::controller::ControllerModule;
use crate::routing::matcher::{bind, Binding};
use crate::routing::table::RouteModule;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    routes: Vec<RouteModule>,
    controllers: Vec<ControllerModule>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route module.
    pub fn route(mut self, module: RouteModule) -> Self {
        self.routes.push(module);
        self
    }

    /// Add a controller module.
    pub fn controller(mut self, module: ControllerModule) -> Self {
        self.controllers.push(module);
        self
    }

    /// Add a route module and its controller in one go. The controller takes
    /// the route module's name.
    pub fn pair(self, routes: RouteModule, controller: ControllerModule) -> Self {
        let controller = ControllerModule::from_factory(routes.name(), controller.factory().clone());
        self.route(routes).controller(controller)
    }

    pub fn add_route(&mut self, module: RouteModule) {
        self.routes.push(module);
    }

    pub fn add_controller(&mut self, module: ControllerModule) {
        self.controllers.push(module);
    }

    pub fn routes(&self) -> &[RouteModule] {
        &self.routes
    }

    pub fn controllers(&self) -> &[ControllerModule] {
        &self.controllers
    }

    /// Match every route module to its controller.
    pub fn bind(self) -> SwitchboardResult<Vec<Binding>> {
        bind(self.routes, self.controllers)
    }
}
