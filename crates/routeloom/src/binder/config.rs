//! Config binder: every config module is called once with the app.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::app::App;
use crate::error::LoadError;
use crate::module::Loader;
use crate::settings::Settings;

/// Builtin config root, then `<src>/config`.
pub fn config_roots(loader: &Loader, settings: &Settings) -> Vec<PathBuf> {
    vec![loader.builtin_root().join("config"), settings.config_dir()]
}

/// Call every discovered config module with `app`, in discovery order.
///
/// # Errors
///
/// Fails if discovery fails or a config module exports no callable. Modules
/// before the failing one have already been applied.
pub fn apply_config(app: &mut App, loader: &Loader) -> Result<usize, LoadError> {
    let roots = config_roots(loader, app.settings());
    let modules = loader.discover(&roots)?;

    for module in &modules {
        let configure = module
            .instance
            .configure()
            .cloned()
            .ok_or_else(|| LoadError::NotCallable(module.absolute_path.clone()))?;

        configure(app);
        debug!(file = %module.absolute_path.display(), "config module applied");
    }

    info!(count = modules.len(), "config modules applied");
    Ok(modules.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{Module, ModuleRegistry, Verb};
    use std::fs;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "// module").unwrap();
    }

    fn settings(src: &Path) -> Settings {
        Settings {
            src: src.to_path_buf(),
            ..Settings::default()
        }
    }

    #[test]
    fn modules_run_in_discovery_order_builtin_first() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "framework/config/logging.rs");
        touch(dir.path(), "app/config/a_cors.rs");
        touch(dir.path(), "app/config/b_store.rs");

        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        for name in ["framework/config/logging.rs", "app/config/a_cors.rs", "app/config/b_store.rs"] {
            let calls = calls.clone();
            registry.register(name, move || {
                let calls = calls.clone();
                Module::config(move |_app| calls.lock().unwrap().push(name)).into()
            });
        }

        let loader = Loader::new(registry).with_builtin_root(dir.path().join("framework"));
        let mut app = App::new(settings(&dir.path().join("app")));

        assert_eq!(apply_config(&mut app, &loader).unwrap(), 3);
        assert_eq!(
            *calls.lock().unwrap(),
            ["framework/config/logging.rs", "app/config/a_cors.rs", "app/config/b_store.rs"]
        );
    }

    #[test]
    fn config_module_can_register_routes() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "app/config/extra.rs");

        let mut registry = ModuleRegistry::new();
        registry.register("app/config/extra.rs", || {
            Module::config(|app| {
                app.route(Verb::Get, "/extra", crate::module::handler(|| async { "extra" }));
            })
            .into()
        });

        let loader = Loader::new(registry).with_builtin_root(dir.path().join("none"));
        let mut app = App::new(settings(&dir.path().join("app")));
        apply_config(&mut app, &loader).unwrap();

        assert!(app.routes().lookup(Verb::Get, "/extra").is_some());
    }

    #[test]
    fn non_callable_config_module_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "app/config/routes_by_mistake.rs");

        let mut registry = ModuleRegistry::new();
        registry.register("app/config/routes_by_mistake.rs", || {
            Module::new().get(|| async { "" }).into()
        });

        let loader = Loader::new(registry).with_builtin_root(dir.path().join("none"));
        let mut app = App::new(settings(&dir.path().join("app")));

        let err = apply_config(&mut app, &loader).unwrap_err();
        assert!(matches!(err, LoadError::NotCallable(_)));
    }

    #[test]
    fn roots_are_builtin_then_app() {
        let loader = Loader::new(ModuleRegistry::new()).with_builtin_root("/opt/routeloom");
        let roots = config_roots(&loader, &settings(Path::new("/srv/app")));
        assert_eq!(
            roots,
            [PathBuf::from("/opt/routeloom/config"), PathBuf::from("/srv/app/config")]
        );
    }
}
