//! Route binder: every verb a route module exports becomes one binding at
//! the module's derived path.

use std::convert::Infallible;
use std::path::PathBuf;

use axum::extract::Request;
use tower::util::BoxCloneService;
use tower::ServiceExt;
use tracing::{debug, info};

use crate::app::{App, RouteBinding, RouteTable};
use crate::error::LoadError;
use crate::module::{AfterHook, BeforeHook, LoadedModule, Loader, RequestHead, RouteHandler};
use crate::settings::Settings;

/// Builtin routes root, then `<src>/routes`.
pub fn route_roots(loader: &Loader, settings: &Settings) -> Vec<PathBuf> {
    vec![loader.builtin_root().join("routes"), settings.routes_dir()]
}

/// Discover route modules and mount their bindings on `app`.
///
/// Bindings are collected into one table and mounted after any routes config
/// modules added.
///
/// # Errors
///
/// Fails if discovery fails. Nothing is mounted in that case.
pub fn apply_routes(app: &mut App, loader: &Loader) -> Result<usize, LoadError> {
    let roots = route_roots(loader, app.settings());
    let modules = loader.discover(&roots)?;

    let mut table = RouteTable::new();
    for module in &modules {
        bind_module(module, &mut table);
    }

    let count = table.len();
    info!(modules = modules.len(), bindings = count, "route modules bound");
    app.mount(table);
    Ok(count)
}

/// Push one binding per exported verb of `module` onto `table`.
/// A module without verbs contributes nothing.
pub fn bind_module(module: &LoadedModule, table: &mut RouteTable) -> usize {
    let instance = &module.instance;
    let before = instance.before_hook().cloned();
    let after = instance.after_hook().cloned();

    let mut bound = 0;
    for verb in instance.verbs() {
        let Some(handler) = instance.verb(verb).cloned() else {
            continue;
        };

        debug!(
            path = %module.route,
            verb = %verb,
            file = %module.absolute_path.display(),
            "route bound"
        );
        table.push(RouteBinding {
            path: module.route.clone(),
            verb,
            handler: wrap(handler, before.clone(), after.clone()),
            source: Some(module.absolute_path.clone()),
        });
        bound += 1;
    }
    bound
}

/// Compose `before` → `handler` → `after`. Without hooks the handler is
/// returned as is.
pub fn wrap(
    handler: RouteHandler,
    before: Option<BeforeHook>,
    after: Option<AfterHook>,
) -> RouteHandler {
    if before.is_none() && after.is_none() {
        return handler;
    }

    BoxCloneService::new(tower::service_fn(move |mut req: Request| {
        let handler = handler.clone();
        let before = before.clone();
        let after = after.clone();
        async move {
            if let Some(before) = &before {
                before(&mut req);
            }
            let head = after.as_ref().map(|_| RequestHead::of(&req));

            let mut res = handler.oneshot(req).await?;

            if let (Some(after), Some(head)) = (&after, &head) {
                after(head, &mut res);
            }
            Ok::<_, Infallible>(res)
        }
    }))
}
