use tower_http::limit::RequestBodyLimitLayer;

use routeloom::{App, Export, Module};

/// Largest request body accepted by any route.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

routeloom::register_module!(export);

fn export() -> Export {
    Module::config(|app: &mut App| {
        app.layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));
    })
    .into()
}
