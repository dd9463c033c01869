use axum::Extension;
use tracing::debug;

use routeloom::{App, Export, Module};

use crate::store::UserStore;

routeloom::register_module!(export);

fn export() -> Export {
    Module::config(|app: &mut App| {
        debug!("user store attached");
        app.layer(Extension(UserStore::default()));
    })
    .into()
}
