//! Binding route modules to controllers and registering them with a host.

use axum::http::{Method, StatusCode};

use switchboard::http::{Handler, ServedBy};
use switchboard::{
    bootstrap, Actions, ControllerModule, Mode, Next, Registry, RouteEntry, RouteModule, SwitchboardError,
};

mod common;
use common::{body_text, get, posts_controller, posts_routes, Calls, RecordingHost};

fn posts_registry(calls: &Calls) -> Registry {
    Registry::new()
        .route(posts_routes("posts.js"))
        .controller(posts_controller("posts.js", calls.clone()))
}

#[test]
fn test_one_registration_per_route_entry() {
    let mut host = RecordingHost::new();
    let registry = posts_registry(&Calls::default())
        .route(RouteModule::new("users.js").put(RouteEntry::new("/users/:id", "update")))
        .controller(ControllerModule::new("users.js", Actions::new));

    bootstrap(&mut host, registry, Mode::Production).unwrap();

    let summary: Vec<_> = host
        .registered
        .iter()
        .map(|r| (r.method.clone(), r.path.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Method::GET, "/posts"),
            (Method::GET, "/posts/:id"),
            (Method::POST, "/post/success"),
            (Method::POST, "/post/error"),
            (Method::PUT, "/users/:id"),
        ]
    );
}

#[test]
fn test_route_without_middleware_registers_endpoint_only() {
    let mut host = RecordingHost::new();
    bootstrap(&mut host, posts_registry(&Calls::default()), Mode::Production).unwrap();

    let handlers = &host.find("/posts").handlers;
    assert_eq!(handlers.len(), 1);
    assert!(matches!(handlers[0], Handler::Endpoint(_)));
}

#[test]
fn test_middleware_comes_before_endpoint() {
    let mut host = RecordingHost::new();
    let registry = Registry::new()
        .route(
            RouteModule::new("posts.js").get(
                RouteEntry::new("/posts/:id", "find_post")
                    .middleware(common::middleware_answering("first"))
                    .middleware(common::middleware_answering("second")),
            ),
        )
        .controller(posts_controller("posts.js", Calls::default()));

    bootstrap(&mut host, registry, Mode::Production).unwrap();

    let handlers = &host.find("/posts/:id").handlers;
    assert_eq!(handlers.len(), 3);
    assert!(matches!(handlers[0], Handler::Middleware(_)));
    assert!(matches!(handlers[1], Handler::Middleware(_)));
    assert!(matches!(handlers[2], Handler::Endpoint(_)));
}

#[tokio::test]
async fn test_middleware_returns_its_own_response() {
    let calls = Calls::default();
    let mut host = RecordingHost::new();
    bootstrap(&mut host, posts_registry(&calls), Mode::Production).unwrap();

    let Handler::Middleware(middleware) = &host.find("/posts/:id").handlers[0] else {
        panic!("expected middleware first");
    };
    let response = middleware.call(get("/posts/1"), Next::not_found()).await;

    assert_eq!(body_text(response).await, "middleware");
    assert_eq!(calls.count(), 0);
}

#[tokio::test]
async fn test_endpoint_builds_controller_and_runs_action() {
    let calls = Calls::default();
    let mut host = RecordingHost::new();
    bootstrap(&mut host, posts_registry(&calls), Mode::Production).unwrap();

    let response = host.call("/posts", get("/posts")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "all posts");
    assert_eq!(calls.count(), 1);
}

#[tokio::test]
async fn test_controller_receives_request_and_next() {
    let mut host = RecordingHost::new();
    let registry = Registry::new()
        .route(
            RouteModule::new("inspect")
                .get(RouteEntry::new("/served", "served"))
                .get(RouteEntry::new("/pass", "pass")),
        )
        .controller(ControllerModule::new("inspect", |req, next| {
            Actions::new(req, next)
                .action("served", |req: axum::http::Request<axum::body::Body>, _next| async move {
                    let served = req.extensions().get::<ServedBy>().cloned().unwrap();
                    format!("{} {} {}", served.controller, served.route.method, served.route.action)
                })
                .action("pass", |req, next: Next| next.run(req))
        }));

    bootstrap(&mut host, registry, Mode::Production).unwrap();

    let response = host.call("/served", get("/served")).await;
    assert_eq!(body_text(response).await, "inspect GET served");

    // The controller's `next` continues past the endpoint; nothing is there.
    let response = host.call("/pass", get("/pass")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_action_fails_at_call_time() {
    let mut host = RecordingHost::new();
    let registry = Registry::new()
        .route(RouteModule::new("posts.js").get(RouteEntry::new("/gone", "does_not_exist")))
        .controller(posts_controller("posts.js", Calls::default()));

    // Binding succeeds; the action is only looked up per request.
    bootstrap(&mut host, registry, Mode::Production).unwrap();

    let Handler::Endpoint(endpoint) = &host.find("/gone").handlers[0] else {
        panic!("expected endpoint");
    };
    let err = endpoint.call(get("/gone"), Next::not_found()).await.unwrap_err();
    assert!(matches!(err, SwitchboardError::MissingAction { ref action, .. } if action == "does_not_exist"));

    let response = host.call("/gone", get("/gone")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_unmatched_route_aborts_without_registering() {
    let mut host = RecordingHost::new();
    let registry = posts_registry(&Calls::default())
        .route(RouteModule::new("orphan.js").get(RouteEntry::new("/orphan", "orphan")));

    let err = bootstrap(&mut host, registry, Mode::Production).unwrap_err();

    assert!(err.to_string().contains("\"orphan.js\""));
    assert!(err.to_string().contains("Check that the route and the controller names match exactly"));
    assert!(host.registered.is_empty());
}

#[test]
fn test_names_must_match_exactly() {
    let mut host = RecordingHost::new();
    let registry = Registry::new()
        .route(posts_routes("post.js"))
        .controller(posts_controller("posts.js", Calls::default()));

    let err = bootstrap(&mut host, registry, Mode::Production).unwrap_err();
    assert!(matches!(err, SwitchboardError::UnmatchedRoute { ref route } if route == "post.js"));
}

#[test]
fn test_controllers_without_routes_are_ignored() {
    let mut host = RecordingHost::new();
    let registry = posts_registry(&Calls::default()).controller(ControllerModule::new("admin.js", Actions::new));

    bootstrap(&mut host, registry, Mode::Production).unwrap();
    assert_eq!(host.registered.len(), 4);
}
