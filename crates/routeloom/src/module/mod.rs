//! Loadable units of behaviour and their normalization.
//!
//! # Module shapes
//!
//! A source file exports one [`Export`]. Whatever shape its author picked,
//! loading ends with a single [`Module`]:
//!
//! ```text
//! Export::Object(module)        → module
//! Export::Default(inner)        → unwrap, then normalize inner
//! Export::Class(constructor)    → constructor() with no arguments
//! ```
//!
//! # Module members
//! - up to four verb handlers (`get`, `post`, `put`, `delete`)
//! - an optional `before` hook, run ahead of every verb handler
//! - an optional `after` hook, run once every verb handler has answered
//! - an optional `configure` callable, used by config modules

pub mod loader;
pub mod registry;

pub use loader::{LoadedModule, Loader};
pub use registry::{ModuleEntry, ModuleRegistry};

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use axum::extract::Request;
use axum::handler::Handler;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;
use axum::routing::MethodFilter;
use tower::util::BoxCloneService;

use crate::app::App;
use crate::error::BoxError;

/// A type-erased request handler, cheap to clone into a router.
pub type RouteHandler = BoxCloneService<Request, Response, Infallible>;

/// Hook run before a verb handler. Sees, and may amend, the request.
pub type BeforeHook = Arc<dyn Fn(&mut Request) + Send + Sync>;

/// Hook run after a verb handler. Sees the request head and may amend the response.
pub type AfterHook = Arc<dyn Fn(&RequestHead, &mut Response) + Send + Sync>;

/// Callable exported by a config module.
pub type Configure = Arc<dyn Fn(&mut App) + Send + Sync>;

/// Zero-argument constructor of a [`Export::Class`] export.
pub type Constructor = Arc<dyn Fn() -> Result<Module, BoxError> + Send + Sync>;

/// Erase an axum handler into a [`RouteHandler`].
pub fn handler<H, T>(h: H) -> RouteHandler
where
    H: Handler<T, ()>,
    T: 'static,
{
    BoxCloneService::new(h.with_state(()))
}

// ---------------------------------------------------------------------------
// Verbs
// ---------------------------------------------------------------------------

/// HTTP verbs a route module may export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// Every recognised verb, in binding order.
    pub const ALL: [Verb; 4] = [Verb::Get, Verb::Post, Verb::Put, Verb::Delete];

    /// Lowercase member name, as a module author would spell it.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Put => "put",
            Verb::Delete => "delete",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        }
    }

    pub fn method_filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Put => MethodFilter::PUT,
            Verb::Delete => MethodFilter::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Request head
// ---------------------------------------------------------------------------

/// The parts of a request still visible once its body has been consumed.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl RequestHead {
    pub fn of(req: &Request) -> Self {
        Self {
            method: req.method().clone(),
            uri: req.uri().clone(),
            headers: req.headers().clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Module
// ---------------------------------------------------------------------------

/// A normalized module: an object with optional named members.
#[derive(Clone, Default)]
pub struct Module {
    verbs: BTreeMap<Verb, RouteHandler>,
    before: Option<BeforeHook>,
    after: Option<AfterHook>,
    configure: Option<Configure>,
}

impl Module {
    /// An empty module. Binds nothing until members are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// A config module: `f` is called once with the [`App`] at startup.
    pub fn config<F>(f: F) -> Self
    where
        F: Fn(&mut App) + Send + Sync + 'static,
    {
        Self {
            configure: Some(Arc::new(f)),
            ..Self::default()
        }
    }

    /// Set the handler for `verb`, replacing any earlier one.
    pub fn on(mut self, verb: Verb, handler: RouteHandler) -> Self {
        self.verbs.insert(verb, handler);
        self
    }

    pub fn get<H, T>(self, h: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.on(Verb::Get, handler(h))
    }

    pub fn post<H, T>(self, h: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.on(Verb::Post, handler(h))
    }

    pub fn put<H, T>(self, h: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.on(Verb::Put, handler(h))
    }

    pub fn delete<H, T>(self, h: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.on(Verb::Delete, handler(h))
    }

    /// Run `f` ahead of every verb handler of this module.
    pub fn before<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Request) + Send + Sync + 'static,
    {
        self.before = Some(Arc::new(f));
        self
    }

    /// Run `f` after every verb handler of this module has answered.
    pub fn after<F>(mut self, f: F) -> Self
    where
        F: Fn(&RequestHead, &mut Response) + Send + Sync + 'static,
    {
        self.after = Some(Arc::new(f));
        self
    }

    /// The handler exported for `verb`, if any.
    pub fn verb(&self, verb: Verb) -> Option<&RouteHandler> {
        self.verbs.get(&verb)
    }

    /// Exported verbs in binding order.
    pub fn verbs(&self) -> impl Iterator<Item = Verb> + '_ {
        self.verbs.keys().copied()
    }

    pub fn before_hook(&self) -> Option<&BeforeHook> {
        self.before.as_ref()
    }

    pub fn after_hook(&self) -> Option<&AfterHook> {
        self.after.as_ref()
    }

    /// The callable of a config module.
    pub fn configure(&self) -> Option<&Configure> {
        self.configure.as_ref()
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("verbs", &self.verbs.keys().collect::<Vec<_>>())
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("configure", &self.configure.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// What a source file exports, before normalization.
#[derive(Clone)]
pub enum Export {
    /// A plain object.
    Object(Module),
    /// A wrapper around the real export.
    Default(Box<Export>),
    /// A type constructed with no arguments at load time.
    Class(Constructor),
}

impl Export {
    /// Wrap `inner` the way a default export would.
    pub fn wrap(inner: Export) -> Self {
        Export::Default(Box::new(inner))
    }

    /// A constructable export whose constructor cannot fail.
    pub fn class<F>(f: F) -> Self
    where
        F: Fn() -> Module + Send + Sync + 'static,
    {
        Export::Class(Arc::new(move || Ok(f())))
    }

    /// A constructable export whose constructor may fail.
    pub fn try_class<F, E>(f: F) -> Self
    where
        F: Fn() -> Result<Module, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Export::Class(Arc::new(move || f().map_err(Into::into)))
    }

    /// Reduce any export shape to a [`Module`].
    ///
    /// Wrappers are peeled first, then a constructable export is instantiated.
    ///
    /// # Errors
    ///
    /// Returns the constructor's error unchanged.
    pub fn normalize(self) -> Result<Module, BoxError> {
        let mut export = self;
        loop {
            match export {
                Export::Default(inner) => export = *inner,
                Export::Object(module) => return Ok(module),
                Export::Class(construct) => return construct(),
            }
        }
    }
}

impl From<Module> for Export {
    fn from(module: Module) -> Self {
        Export::Object(module)
    }
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Export::Object(module) => f.debug_tuple("Object").field(module).finish(),
            Export::Default(inner) => f.debug_tuple("Default").field(inner).finish(),
            Export::Class(_) => f.write_str("Class(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ping() -> Module {
        Module::new().get(|| async { "pong" })
    }

    #[test]
    fn plain_object_is_used_as_is() {
        let module = Export::from(ping()).normalize().unwrap();
        assert_eq!(module.verbs().collect::<Vec<_>>(), [Verb::Get]);
    }

    #[test]
    fn default_wrapper_is_unwrapped() {
        let module = Export::wrap(ping().into()).normalize().unwrap();
        assert!(module.verb(Verb::Get).is_some());
    }

    #[test]
    fn nested_wrappers_are_unwrapped() {
        let export = Export::wrap(Export::wrap(Export::class(ping)));
        let module = export.normalize().unwrap();
        assert!(module.verb(Verb::Get).is_some());
    }

    #[test]
    fn class_is_constructed_once_per_normalize() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = built.clone();
        let export = Export::class(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ping()
        });

        export.normalize().unwrap();
        assert_eq!(built.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failing_constructor_surfaces_error() {
        let export = Export::try_class(|| Err::<Module, _>("no database url"));
        let err = export.normalize().unwrap_err();
        assert_eq!(err.to_string(), "no database url");
    }

    #[test]
    fn verbs_are_listed_in_binding_order() {
        let module = Module::new()
            .delete(|| async { "" })
            .get(|| async { "" })
            .put(|| async { "" })
            .post(|| async { "" });
        assert_eq!(module.verbs().collect::<Vec<_>>(), Verb::ALL);
    }

    #[test]
    fn config_module_exposes_only_a_callable() {
        let module = Module::config(|_app| {});
        assert!(module.configure().is_some());
        assert_eq!(module.verbs().count(), 0);
        assert!(module.before_hook().is_none());
    }

    #[test]
    fn debug_lists_members() {
        let module = ping().before(|_req| {});
        let dbg = format!("{module:?}");
        assert!(dbg.contains("Get"));
        assert!(dbg.contains("before: true"));
    }

    #[test]
    fn verb_names_match_member_names() {
        let names: Vec<_> = Verb::ALL.iter().map(|v| v.to_string()).collect();
        assert_eq!(names, ["get", "post", "put", "delete"]);
        assert_eq!(Verb::Delete.method(), Method::DELETE);
    }
}
