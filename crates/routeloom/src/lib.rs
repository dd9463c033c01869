//! `routeloom`: convention-based route and middleware loader for axum.
//!
//! Point it at a source tree and it turns files into a router:
//!
//! ```text
//! <src>/config/**/*.rs  → config modules, each called once with the App
//! <src>/routes/**/*.rs  → route modules, verbs bound at the file's path
//!     routes/index.rs         → /
//!     routes/users/index.rs   → /users
//!     routes/users/create.rs  → /users/create
//! ```
//!
//! The framework's own tree (`src/builtin/`) is discovered first, the
//! application tree second. Files are resolved to code through a
//! [`ModuleRegistry`]; modules announce themselves with [`register_module!`].
//!
//! Startup order is fixed: config modules, then routes, then the
//! single-page-app fallback, then the listener.

pub mod app;
pub mod binder;
pub mod bootstrap;
mod builtin;
pub mod discovery;
pub mod error;
pub mod module;
pub mod path;
pub mod settings;
pub mod telemetry;

pub use app::{App, RouteBinding, RouteTable};
pub use error::{BootstrapError, LoadError, TelemetryError};
pub use module::{Export, LoadedModule, Loader, Module, ModuleRegistry, RequestHead, Verb};
pub use settings::{Overrides, Settings, SpaOverride, SpaSettings};

#[doc(hidden)]
pub use inventory;

/// Register the module exported by the current source file.
///
/// Expands to a link-time registration keyed by `file!()`, so the module is
/// found when discovery walks over this very file. Pass a function returning
/// an [`Export`]:
///
/// ```rust,ignore
/// use routeloom::{Export, Module};
///
/// routeloom::register_module!(export);
///
/// fn export() -> Export {
///     Module::new().get(|| async { "pong" }).into()
/// }
/// ```
#[macro_export]
macro_rules! register_module {
    ($build:path) => {
        $crate::inventory::submit! {
            $crate::module::ModuleEntry::new(::core::file!(), $build)
        }
    };
}
