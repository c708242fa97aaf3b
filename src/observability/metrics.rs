//! Metrics collection.
//!
//! # Metrics
//! - `switchboard_registrations_total` (counter): handlers registered, by method
//! - `switchboard_dispatch_total` (counter): controller actions invoked, by controller and action
//! - `switchboard_plugin_failures_total` (counter): requests stopped by a plugin, by controller
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Exposition (Prometheus or otherwise) is left to the host application

pub const REGISTRATIONS_TOTAL: &str = "switchboard_registrations_total";
pub const DISPATCH_TOTAL: &str = "switchboard_dispatch_total";
pub const PLUGIN_FAILURES_TOTAL: &str = "switchboard_plugin_failures_total";

/// Count one handler registration.
pub fn record_registration(method: &str) {
    metrics::counter!(REGISTRATIONS_TOTAL, "method" => method.to_string()).increment(1);
}

/// Count one controller action invocation.
pub fn record_dispatch(controller: &str, action: &str) {
    metrics::counter!(
        DISPATCH_TOTAL,
        "controller" => controller.to_string(),
        "action" => action.to_string()
    )
    .increment(1);
}

/// Count one request stopped by a failing plugin.
pub fn record_plugin_failure(controller: &str) {
    metrics::counter!(PLUGIN_FAILURES_TOTAL, "controller" => controller.to_string()).increment(1);
}
