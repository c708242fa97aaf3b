//! Plugins: async side-effect steps that run before the controller.
//!
//! # Responsibilities
//! - Wrap user plugin functions behind one cloneable type
//! - Run a plugin list strictly in order, each step finishing before the
//!   next one is started
//! - Turn a panicking plugin into an ordinary failure
//!
//! # Design Decisions
//! - A plugin owns the request while it runs and hands it back on success,
//!   so later plugins and the controller see its changes
//! - The first failure stops the chain; nothing after it runs
//! - No timeout: a plugin that never completes stalls its request

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::error::PluginError;

/// Outcome of a single plugin step.
pub type PluginResult = Result<Request<Body>, PluginError>;

type PluginFn = dyn Fn(Request<Body>) -> BoxFuture<'static, PluginResult> + Send + Sync;

/// A single plugin step.
#[derive(Clone)]
pub struct Plugin {
    inner: Arc<PluginFn>,
}

impl Plugin {
    /// Build a plugin from an async function.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = PluginResult> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |request| f(request).boxed()),
        }
    }

    /// Run the plugin. Panics, whether raised while building the future or
    /// while polling it, come back as `Err`.
    pub async fn invoke(&self, request: Request<Body>) -> PluginResult {
        let fut = match std::panic::catch_unwind(AssertUnwindSafe(|| (self.inner)(request))) {
            Ok(fut) => fut,
            Err(payload) => return Err(panic_error(payload)),
        };

        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(panic_error(payload)),
        }
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin").finish_non_exhaustive()
    }
}

/// The first plugin failure in a chain.
#[derive(Debug)]
pub struct PluginFailure {
    /// Position of the failing plugin in the chain.
    pub index: usize,
    pub error: PluginError,
}

/// Run plugins one after another, threading the request through them.
pub async fn run_chain(plugins: &[Plugin], mut request: Request<Body>) -> Result<Request<Body>, PluginFailure> {
    for (index, plugin) in plugins.iter().enumerate() {
        request = plugin
            .invoke(request)
            .await
            .map_err(|error| PluginFailure { index, error })?;
    }
    Ok(request)
}

fn panic_error(payload: Box<dyn Any + Send>) -> PluginError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    format!("plugin panicked: {}", message).into()
}
