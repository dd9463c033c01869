//! Ordered application builder over an axum [`Router`].
//!
//! axum applies a layer only to routes added before it and wraps outward, so
//! the builder records everything and compiles once in [`App::into_router`]:
//! routes first, then the fallback, then every layer in reverse so the first
//! registered layer ends up outermost.
//!
//! A request whose path matches but whose verb does not goes to the fallback,
//! not to a 405.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{MethodRouter, Route};
use axum::{Json, Router};
use common::ErrorResponse;
use tower::util::BoxCloneService;
use tower::{Layer, Service, ServiceExt};
use tracing::debug;

use crate::error::LoadError;
use crate::module::{handler, RouteHandler, Verb};
use crate::path::normalize_route;
use crate::settings::Settings;

type ApplyLayer = Box<dyn FnOnce(Router) -> Router + Send>;

/// Fallback used when nothing else answers a request.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Route table
// ---------------------------------------------------------------------------

/// One (path, verb) → handler registration.
#[derive(Clone)]
pub struct RouteBinding {
    pub path: String,
    pub verb: Verb,
    pub handler: RouteHandler,
    /// File the binding was derived from, if it came from discovery.
    pub source: Option<PathBuf>,
}

impl fmt::Debug for RouteBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteBinding")
            .field("path", &self.path)
            .field("verb", &self.verb)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Bindings in registration order. For a repeated (path, verb) the first
/// registration is the one that serves.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    bindings: Vec<RouteBinding>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, binding: RouteBinding) {
        self.bindings.push(binding);
    }

    pub fn bindings(&self) -> &[RouteBinding] {
        &self.bindings
    }

    /// The binding that serves `verb` at `path`.
    pub fn lookup(&self, verb: Verb, path: &str) -> Option<&RouteBinding> {
        let path = normalize_route(path);
        self.bindings
            .iter()
            .find(|b| b.verb == verb && b.path == path)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn extend(&mut self, other: RouteTable) {
        self.bindings.extend(other.bindings);
    }

    /// Group by path in first-seen order, keeping the first handler per verb.
    /// Verbs a path does not bind are answered by `fallback`.
    ///
    /// Paths are checked against each other before any reaches axum, which
    /// panics on conflicting parameter segments (`/users/:id` and
    /// `/users/:name`).
    fn compile(self, fallback: &RouteHandler) -> Result<Vec<(String, MethodRouter)>, LoadError> {
        let mut grouped: Vec<(String, Vec<(Verb, RouteHandler)>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for RouteBinding { path, verb, handler, source } in self.bindings {
            let slot = match index.get(&path) {
                Some(&i) => i,
                None => {
                    index.insert(path.clone(), grouped.len());
                    grouped.push((path.clone(), Vec::new()));
                    grouped.len() - 1
                }
            };

            let verbs = &mut grouped[slot].1;
            if verbs.iter().any(|(v, _)| *v == verb) {
                debug!(
                    path = %path,
                    verb = %verb,
                    source = ?source,
                    "binding shadowed by earlier registration"
                );
                continue;
            }
            verbs.push((verb, handler));
        }

        let mut paths = matchit::Router::new();
        for (path, _) in &grouped {
            paths
                .insert(path.as_str(), ())
                .map_err(|source| LoadError::RouteConflict {
                    path: path.clone(),
                    source,
                })?;
        }

        Ok(grouped
            .into_iter()
            .map(|(path, verbs)| {
                let router = verbs
                    .into_iter()
                    .fold(MethodRouter::new(), |router, (verb, handler)| {
                        router.on_service(verb.method_filter(), handler)
                    })
                    .fallback_service(fallback.clone());
                (path, router)
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The application handed to config modules and binders.
pub struct App {
    settings: Settings,
    layers: Vec<ApplyLayer>,
    routes: RouteTable,
    fallback: Option<RouteHandler>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            layers: Vec::new(),
            routes: RouteTable::new(),
            fallback: None,
        }
    }

    /// Merged settings the application was started with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Add middleware. Layers run in registration order for every route and
    /// the fallback, whenever those are added.
    pub fn layer<L>(&mut self, layer: L) -> &mut Self
    where
        L: Layer<Route> + Clone + Send + 'static,
        L::Service: Service<Request> + Clone + Send + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        self.layers.push(Box::new(move |router: Router| router.layer(layer)));
        self
    }

    /// Bind `handler` for `verb` at `path`.
    pub fn route(&mut self, verb: Verb, path: &str, handler: RouteHandler) -> &mut Self {
        self.routes.push(RouteBinding {
            path: normalize_route(path),
            verb,
            handler,
            source: None,
        });
        self
    }

    /// Append every binding of `table`, after those already registered.
    pub fn mount(&mut self, table: RouteTable) -> &mut Self {
        self.routes.extend(table);
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Serve `svc` for every request no route matches.
    pub fn fallback_service<S>(&mut self, svc: S) -> &mut Self
    where
        S: Service<Request, Error = Infallible> + Clone + Send + 'static,
        S::Response: IntoResponse + 'static,
        S::Future: Send + 'static,
    {
        let svc = svc.map_response(|res: S::Response| res.into_response());
        self.fallback = Some(BoxCloneService::new(svc));
        self
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Compile into a router ready to serve.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::RouteConflict`] if two bound paths cannot coexist
    /// in the router.
    pub fn into_router(self) -> Result<Router, LoadError> {
        let fallback = self.fallback.unwrap_or_else(|| handler(not_found));

        let mut router = Router::new();
        for (path, method_router) in self.routes.compile(&fallback)? {
            router = router.route(&path, method_router);
        }
        router = router.fallback_service(fallback);

        for apply in self.layers.into_iter().rev() {
            router = apply(router);
        }
        Ok(router)
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("settings", &self.settings)
            .field("layers", &self.layers.len())
            .field("routes", &self.routes)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
