//! `devserver`: serves the reference application in `src/` through routeloom.
//!
//! Startup sequence:
//! 1. Load overrides from `routeloom.toml` and `ROUTELOOM_*` variables.
//! 2. Initialise structured JSON logging.
//! 3. Discover `src/config` and `src/routes`, bind them and serve.

mod config;
mod error;
mod routes;
mod store;

use std::path::{Path, PathBuf};

use anyhow::Result;
use routeloom::settings::DEFAULT_SPA_INDEX;
use routeloom::{bootstrap, telemetry, Loader, ModuleRegistry, Overrides, Settings, SpaOverride, SpaSettings};

/// Optional overrides file, read from the working directory.
const OVERRIDES_FILE: &str = "routeloom.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let overrides = Overrides::load(Some(Path::new(OVERRIDES_FILE))).map_err(|e| {
        eprintln!("ERROR: devserver configuration invalid: {e}");
        e
    })?;
    let overrides = with_local_defaults(overrides);
    let log_level = Settings::merge(overrides.clone()).log_level;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&log_level)?;

    // -----------------------------------------------------------------------
    // 3. Server
    // -----------------------------------------------------------------------
    let loader = Loader::new(ModuleRegistry::collect());
    bootstrap::init(overrides, &loader).await?;
    Ok(())
}

/// Point `src` and `spa` at this crate's own tree unless overridden.
fn with_local_defaults(mut overrides: Overrides) -> Overrides {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    overrides.src.get_or_insert_with(|| manifest.join("src"));
    overrides.spa.get_or_insert_with(|| {
        SpaOverride::Settings(SpaSettings {
            path: manifest.join("public"),
            index: DEFAULT_SPA_INDEX.into(),
        })
    });
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use common::ErrorResponse;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let settings = Settings::merge(with_local_defaults(Overrides::default()));
        let loader = Loader::new(ModuleRegistry::collect());
        let router = bootstrap::build(settings, &loader).unwrap();
        TestServer::new(router).unwrap()
    }

    #[test]
    fn local_defaults_point_at_crate_tree() {
        let settings = Settings::merge(with_local_defaults(Overrides::default()));
        assert!(settings.src.ends_with("src"));
        assert!(settings.spa.unwrap().path.ends_with("public"));
    }

    #[test]
    fn explicit_overrides_are_kept() {
        let overrides = with_local_defaults(Overrides {
            src: Some(PathBuf::from("/srv/app")),
            spa: Some(SpaOverride::Enabled(false)),
            ..Overrides::default()
        });
        let settings = Settings::merge(overrides);
        assert_eq!(settings.src, PathBuf::from("/srv/app"));
        assert_eq!(settings.spa, None);
    }

    #[tokio::test]
    async fn ping_answers() {
        let resp = server().get("/ping").await;
        resp.assert_status_ok();
        assert_eq!(resp.text(), "pong");
    }

    #[tokio::test]
    async fn users_round_trip_through_the_store() {
        let server = server();

        let resp = server.post("/users").json(&json!({ "name": "ada" })).await;
        resp.assert_status(StatusCode::CREATED);
        assert_eq!(resp.header("cache-control"), "no-store");

        let users: Value = server.get("/users").await.json();
        assert_eq!(users, json!([{ "id": 1, "name": "ada" }]));
    }

    #[tokio::test]
    async fn blank_user_name_is_rejected() {
        let resp = server().post("/users").json(&json!({ "name": "  " })).await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = resp.json();
        assert_eq!(body.code, "bad_request");
    }

    #[tokio::test]
    async fn echo_is_constructed_from_a_class_export() {
        let resp = server().get("/echo").add_query_param("msg", "hi").await;
        resp.assert_status_ok();
        assert_eq!(resp.text(), "echo: hi");
    }

    #[tokio::test]
    async fn unknown_path_serves_the_spa() {
        let resp = server().get("/some/client/route").await;
        resp.assert_status_ok();
        assert!(resp.text().contains("<div id=\"app\">"));
    }
}
