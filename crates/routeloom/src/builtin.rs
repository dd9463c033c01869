//! The framework's own module tree, discovered ahead of the application's.
//!
//! Files under `builtin/config/` and `builtin/routes/` are discovered like
//! any application file, so the module declarations live here, outside the
//! discovered directories. They are registered explicitly rather than through
//! `register_module!` so they survive being linked from an rlib.

use std::path::PathBuf;

use crate::module::ModuleRegistry;

mod config;
mod routes;

/// Directory holding the builtin `config/` and `routes/` trees.
pub fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src").join("builtin")
}

pub fn register(registry: &mut ModuleRegistry) {
    config::register(registry);
    routes::register(registry);
}
