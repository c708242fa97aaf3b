//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::Path;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::{RequestExt, Router};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use switchboard::http::{Chain, Handler};
use switchboard::{
    Actions, ControllerModule, Dispatch, HttpServer, Middleware, Next, Plugin, RouteEntry, RouteModule, Shutdown,
    SwitchboardResult,
};

/// One registration captured by [`RecordingHost`].
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub handlers: Vec<Handler>,
}

/// A dispatch table that only records what it is given.
#[derive(Default)]
pub struct RecordingHost {
    pub registered: Vec<Recorded>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, path: &str) -> &Recorded {
        self.registered
            .iter()
            .find(|r| r.path == path)
            .unwrap_or_else(|| panic!("no registration for {}", path))
    }

    /// Run a recorded handler list as the host would.
    pub async fn call(&self, path: &str, request: Request<Body>) -> Response {
        Chain::new(self.find(path).handlers.clone()).run(request).await
    }
}

impl Dispatch for RecordingHost {
    fn register(&mut self, method: Method, path: &str, handlers: Vec<Handler>) -> SwitchboardResult<()> {
        self.registered.push(Recorded {
            method,
            path: path.to_string(),
            handlers,
        });
        Ok(())
    }
}

/// Counts how often controller actions ran.
#[derive(Clone, Default)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn middleware_answering(text: &'static str) -> Middleware {
    Middleware::from_fn(move |_req, _next| async move { text })
}

pub fn passing_plugin() -> Plugin {
    Plugin::from_fn(|req| async move { Ok(req) })
}

pub fn failing_plugin() -> Plugin {
    Plugin::from_fn(|_req| async { Err("plugin exploded".into()) })
}

/// The route table used across tests: two GET and two POST routes.
pub fn posts_routes(name: &str) -> RouteModule {
    RouteModule::new(name)
        .get(RouteEntry::new("/posts", "posts"))
        .get(RouteEntry::new("/posts/:id", "find_post").middleware(middleware_answering("middleware")))
        .post(RouteEntry::new("/post/success", "posts").plugin(passing_plugin()))
        .post(RouteEntry::new("/post/error", "posts").plugin(failing_plugin()))
}

/// A posts controller whose actions count their calls.
pub fn posts_controller(name: &str, calls: Calls) -> ControllerModule {
    ControllerModule::new(name, move |req, next| {
        let posts_calls = calls.clone();
        let find_calls = calls.clone();
        Actions::new(req, next)
            .action("posts", move |_req, _next| async move {
                posts_calls.hit();
                "all posts"
            })
            .action("find_post", move |mut req: Request<Body>, _next: Next| async move {
                find_calls.hit();
                match req.extract_parts::<Path<String>>().await {
                    Ok(Path(id)) => format!("post {}", id),
                    Err(_) => "post ?".to_string(),
                }
            })
            .action("pass", |req, next: Next| next.run(req))
    })
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder().method(Method::GET).uri(path).body(Body::empty()).unwrap()
}

pub fn post(path: &str) -> Request<Body> {
    Request::builder().method(Method::POST).uri(path).body(Body::empty()).unwrap()
}

/// Serve `router` on an ephemeral port.
pub async fn start_server(router: Router) -> (SocketAddr, Arc<Shutdown>, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Arc::new(Shutdown::new());
    let rx = shutdown.subscribe();

    let handle = tokio::spawn(async move {
        HttpServer::new(router).run(listener, rx).await.unwrap();
    });
    (addr, shutdown, handle)
}

/// Minimal HTTP/1.1 client returning status and body.
pub async fn raw_request(addr: SocketAddr, method: &str, path: &str) -> (StatusCode, String) {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{} {} HTTP/1.1\r\nHost: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        method, path, addr
    );
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    socket.read_to_end(&mut raw).await.unwrap();
    let text = String::from_utf8_lossy(&raw).into_owned();

    let status = text
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse::<u16>().ok())
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap();
    let body = text.split("\r\n\r\n").nth(1).unwrap_or_default().to_string();
    (status, body)
}
