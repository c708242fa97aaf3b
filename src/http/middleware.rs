//! Middleware and the continuation handed to it.
//!
//! Middleware has the same shape as `axum::middleware::from_fn`: it receives
//! the request and a [`Next`], and either answers itself or calls
//! `next.run(request)` to continue down the chain.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

type NextFn = Box<dyn FnOnce(Request<Body>) -> BoxFuture<'static, Response> + Send>;
type MiddlewareFn = dyn Fn(Request<Body>, Next) -> BoxFuture<'static, Response> + Send + Sync;

/// The rest of a handler chain.
pub struct Next {
    run: NextFn,
}

impl Next {
    /// Wrap a continuation.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: FnOnce(Request<Body>) -> Fut + Send + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self {
            run: Box::new(move |request| f(request).boxed()),
        }
    }

    /// A continuation that answers `404 Not Found`, the same thing the host
    /// does when a chain runs past its last handler.
    pub fn not_found() -> Self {
        Self::new(|_| async { axum::http::StatusCode::NOT_FOUND.into_response() })
    }

    /// Continue with the next handler.
    pub async fn run(self, request: Request<Body>) -> Response {
        (self.run)(request).await
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

/// A request handler that runs before the endpoint.
#[derive(Clone)]
pub struct Middleware {
    inner: Arc<MiddlewareFn>,
}

impl Middleware {
    /// Build middleware from an async function.
    pub fn from_fn<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request<Body>, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        Self {
            inner: Arc::new(move |request, next| {
                let fut = f(request, next);
                async move { fut.await.into_response() }.boxed()
            }),
        }
    }

    /// Invoke the middleware.
    pub fn call(&self, request: Request<Body>, next: Next) -> BoxFuture<'static, Response> {
        (self.inner)(request, next)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}
