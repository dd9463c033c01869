//! Single-page-app fallback: static assets, then the entry document for any
//! GET no route matched.

use axum::routing::get_service;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::app::{not_found, App};

/// Install the fallback if the app's settings enable it.
///
/// Returns whether a fallback was installed. Non-GET requests that match no
/// route still get the JSON 404.
pub fn configure_spa(app: &mut App) -> bool {
    let Some(spa) = app.settings().spa.clone() else {
        info!("spa fallback disabled");
        return false;
    };

    let entry = spa.path.join(&spa.index);
    let assets = ServeDir::new(&spa.path).fallback(ServeFile::new(&entry));
    app.fallback_service(get_service(assets).fallback(not_found));

    info!(
        path = %spa.path.display(),
        index = %entry.display(),
        "spa fallback enabled"
    );
    true
}
