//! End-to-end discovery and binding over `tests/fixtures/app`.

#[path = "fixtures/app/config/stamp.rs"]
mod stamp;

#[path = "fixtures/app/routes/ping.rs"]
mod ping;

#[path = "fixtures/app/routes/users/index.rs"]
mod users;

use std::path::PathBuf;
use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use common::{ErrorResponse, HealthResponse};
use routeloom::{bootstrap, Loader, ModuleRegistry, Settings};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/app")
}

fn server() -> TestServer {
    let settings = Settings {
        src: fixtures(),
        spa: None,
        ..Settings::default()
    };
    let loader = Loader::new(ModuleRegistry::collect());
    let router = bootstrap::build(settings, &loader).unwrap();
    TestServer::new(router).unwrap()
}

#[tokio::test]
async fn get_invokes_handler_exactly_once() {
    let server = server();
    let before = ping::HITS.load(Ordering::SeqCst);

    let resp = server.get("/ping").await;

    resp.assert_status_ok();
    assert_eq!(resp.text(), "pong");
    assert_eq!(ping::HITS.load(Ordering::SeqCst), before + 1);
}

#[tokio::test]
async fn builtin_health_is_served_alongside_app_routes() {
    let resp = server().get("/health").await;

    resp.assert_status_ok();
    let body: HealthResponse = resp.json();
    assert_eq!(body.status, "ok");
}

#[tokio::test]
async fn index_file_is_bound_at_its_directory() {
    let server = server();

    let resp = server.get("/users").await;
    resp.assert_status_ok();
    assert_eq!(resp.json::<Value>(), json!(["ada", "grace"]));

    server.get("/users/index").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn hooks_wrap_every_verb() {
    let server = server();

    let resp = server.post("/users").json(&json!({ "name": "linus" })).await;
    resp.assert_status(StatusCode::CREATED);
    assert_eq!(resp.header("x-hooked"), "before,after");
    assert_eq!(resp.json::<Value>(), json!({ "name": "linus" }));

    let resp = server.get("/users").await;
    assert_eq!(resp.header("x-hooked"), "before,after");
}

#[tokio::test]
async fn config_layers_cover_routes_and_fallback() {
    let server = server();

    assert_eq!(server.get("/ping").await.header("x-app"), "fixtures");

    let resp = server.get("/nowhere").await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(resp.header("x-app"), "fixtures");
    let body: ErrorResponse = resp.json();
    assert_eq!(body.code, "not_found");
}

#[test]
fn collected_modules_derive_conventional_routes() {
    let loader = Loader::new(ModuleRegistry::collect());
    let modules = loader.discover(&[fixtures().join("routes")]).unwrap();

    let mut routes: Vec<_> = modules.iter().map(|m| m.route.as_str()).collect();
    routes.sort_unstable();
    assert_eq!(routes, ["/ping", "/users"]);
}
