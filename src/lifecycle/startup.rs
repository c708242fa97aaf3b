//! Startup orchestration.
//!
//! # Responsibilities
//! - Collect route and controller modules (registry or disk)
//! - Match every route module to its controller
//! - Compose handlers and register them with the host
//!
//! # Design Decisions
//! - Fail fast: any bootstrap error is fatal
//! - Matching and composition finish before the first registration, so a
//!   mismatch leaves the host untouched
//! - Registrations go to the host as one batch; the axum host vets the whole
//!   batch before mounting any of it
//! - Runs once; nothing is re-bound while serving

use crate::config::{Mode, Options};
use crate::discovery::{load_controllers, load_routes, ControllerCatalog, Toolbox};
use crate::error::SwitchboardResult;
use crate::http::composer::compose;
use crate::http::host::Dispatch;
use crate::routing::matcher::{bind, Binding};
use crate::routing::registry::Registry;

/// Bind an explicit registry onto `host`.
pub fn bootstrap<D: Dispatch + ?Sized>(host: &mut D, registry: Registry, mode: Mode) -> SwitchboardResult<()> {
    let bindings = registry.bind()?;
    register_bindings(host, &bindings, mode)
}

/// Discover route tables and controllers on disk and bind them onto `host`.
pub fn bootstrap_from_dirs<D: Dispatch + ?Sized>(
    host: &mut D,
    options: &Options,
    toolbox: &Toolbox,
    catalog: &ControllerCatalog,
) -> SwitchboardResult<()> {
    let controllers = load_controllers(&options.controllers, &options.controller_extension, catalog)?;
    let routes = load_routes(&options.routes, &options.route_extension, toolbox)?;

    tracing::info!(
        routes = %options.routes.display(),
        controllers = %options.controllers.display(),
        route_modules = routes.len(),
        controller_modules = controllers.len(),
        "Modules discovered"
    );

    let bindings = bind(routes, controllers)?;
    register_bindings(host, &bindings, options.mode)
}

fn register_bindings<D: Dispatch + ?Sized>(host: &mut D, bindings: &[Binding], mode: Mode) -> SwitchboardResult<()> {
    let mut registrations = Vec::new();
    for binding in bindings {
        tracing::info!(
            route = %binding.route.origin(),
            controller = %binding.controller.name(),
            entries = binding.route.entry_count(),
            "Bound route module"
        );
        registrations.extend(compose(binding, mode));
    }

    let count = registrations.len();
    host.register_all(registrations)?;

    tracing::info!(
        bindings = bindings.len(),
        registrations = count,
        mode = %mode,
        "Switchboard bootstrap complete"
    );
    Ok(())
}
