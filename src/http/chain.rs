//! Handler chains as registered with the host.
//!
//! A chain runs its handlers in registration order. Each handler gets a
//! [`Next`] that continues with the handler after it; running past the last
//! handler answers `404 Not Found`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::http::composer::Endpoint;
use crate::http::middleware::{Middleware, Next};

/// One slot in a registration's handler list.
#[derive(Debug, Clone)]
pub enum Handler {
    Middleware(Middleware),
    Endpoint(Endpoint),
}

impl Handler {
    /// Run this handler alone with the given continuation.
    pub fn call(&self, request: Request<Body>, next: Next) -> BoxFuture<'static, Response> {
        match self {
            Handler::Middleware(middleware) => middleware.call(request, next),
            Handler::Endpoint(endpoint) => {
                let endpoint = endpoint.clone();
                async move { endpoint.call(request, next).await.into_response() }.boxed()
            }
        }
    }
}

/// An ordered, cloneable handler list.
#[derive(Debug, Clone)]
pub struct Chain {
    handlers: Arc<[Handler]>,
}

impl Chain {
    pub fn new(handlers: Vec<Handler>) -> Self {
        Self {
            handlers: Arc::from(handlers),
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the chain from the first handler.
    pub fn run(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        step(self.handlers.clone(), 0, request)
    }
}

fn step(handlers: Arc<[Handler]>, index: usize, request: Request<Body>) -> BoxFuture<'static, Response> {
    let Some(handler) = handlers.get(index).cloned() else {
        return async { StatusCode::NOT_FOUND.into_response() }.boxed();
    };
    let next = Next::new(move |request| step(handlers, index + 1, request));
    handler.call(request, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn tracing_mw(log: Arc<Mutex<Vec<&'static str>>>, label: &'static str) -> Handler {
        Handler::Middleware(Middleware::from_fn(move |req, next: Next| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(label);
                next.run(req).await
            }
        }))
    }

    #[tokio::test]
    async fn test_runs_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = Chain::new(vec![tracing_mw(log.clone(), "a"), tracing_mw(log.clone(), "b")]);

        let response = chain.run(Request::new(Body::empty())).await;

        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
        // Both middleware continued, so the chain ran off its end.
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_middleware_can_stop_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let stop = Handler::Middleware(Middleware::from_fn(|_req, _next| async { StatusCode::UNAUTHORIZED }));
        let chain = Chain::new(vec![stop, tracing_mw(log.clone(), "never")]);

        let response = chain.run(Request::new(Body::empty())).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_chain_is_not_found() {
        let chain = Chain::new(Vec::new());
        assert!(chain.is_empty());
        assert_eq!(chain.run(Request::new(Body::empty())).await.status(), StatusCode::NOT_FOUND);
    }
}
