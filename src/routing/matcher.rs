//! Route-controller matching.
//!
//! # Responsibilities
//! - Pair every route module with the controller of the same name
//! - Fail on the first route without a controller
//!
//! # Design Decisions
//! - Names compare exactly (case-sensitive, no normalization)
//! - A matched controller is consumed, so two routes never share one entry
//! - Controllers without routes are ignored
//! - All routes are matched before anything is registered

use crate::error::{SwitchboardError, SwitchboardResult};
use crate::http::controller::ControllerModule;
use crate::routing::table::RouteModule;

/// Anything that can take part in name matching.
pub trait Named {
    /// Matching key.
    fn name(&self) -> &str;

    /// Label used in error messages.
    fn origin(&self) -> &str {
        self.name()
    }
}

impl Named for RouteModule {
    fn name(&self) -> &str {
        RouteModule::name(self)
    }

    fn origin(&self) -> &str {
        RouteModule::origin(self)
    }
}

impl Named for ControllerModule {
    fn name(&self) -> &str {
        ControllerModule::name(self)
    }
}

/// A route module bound to its controller.
#[derive(Debug, Clone)]
pub struct Binding {
    pub route: RouteModule,
    pub controller: ControllerModule,
}

/// Pair each route with the first remaining controller of the same name.
pub fn pair<R: Named, C: Named>(routes: Vec<R>, mut controllers: Vec<C>) -> SwitchboardResult<Vec<(R, C)>> {
    let mut pairs = Vec::with_capacity(routes.len());

    for route in routes {
        let position = controllers
            .iter()
            .position(|controller| controller.name() == route.name())
            .ok_or_else(|| SwitchboardError::UnmatchedRoute {
                route: route.origin().to_string(),
            })?;
        let controller = controllers.remove(position);
        pairs.push((route, controller));
    }

    for unused in &controllers {
        tracing::debug!(controller = %unused.name(), "Controller has no routes");
    }

    Ok(pairs)
}

/// Bind route modules to controller modules.
pub fn bind(routes: Vec<RouteModule>, controllers: Vec<ControllerModule>) -> SwitchboardResult<Vec<Binding>> {
    Ok(pair(routes, controllers)?
        .into_iter()
        .map(|(route, controller)| Binding { route, controller })
        .collect())
}
