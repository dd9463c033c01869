//! `GET /health`: liveness of the server itself.

use axum::Json;
use common::HealthResponse;

use crate::module::{Export, Module};

pub(crate) const SOURCE: &str = file!();

pub(crate) fn export() -> Export {
    Module::new().get(health).into()
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok(env!("CARGO_PKG_VERSION")))
}
