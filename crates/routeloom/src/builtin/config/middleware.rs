//! Default middleware: request tracing, timeout enforcement and response
//! compression, outermost first.

use std::time::Duration;

use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::app::App;
use crate::module::{Export, Module};

pub(crate) const SOURCE: &str = file!();

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn export() -> Export {
    Module::config(apply).into()
}

fn apply(app: &mut App) {
    app.layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CompressionLayer::new());
}
