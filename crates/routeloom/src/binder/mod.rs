//! Binders: apply discovered modules to an [`App`](crate::App).
//!
//! Each binder discovers over exactly two roots, the framework's builtin tree
//! first and the application's tree second. [`crate::bootstrap`] runs them in
//! the order config, routes, fallback.

pub mod config;
pub mod routes;
pub mod spa;

pub use config::apply_config;
pub use routes::apply_routes;
pub use spa::configure_spa;
