//! Startup errors. Every variant here is fatal: nothing binds a listener
//! until discovery and binding have succeeded.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by fallible module constructors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from discovering, loading and binding modules.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A search root could not be walked.
    #[error("failed to enumerate {}: {source}", .root.display())]
    Enumerate {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A discovered file could not be resolved to an absolute path.
    #[error("failed to resolve {}: {source}", .path.display())]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No registered module matches the discovered file.
    #[error("no module registered for {}", .0.display())]
    Unregistered(PathBuf),

    /// A constructable export failed while being instantiated.
    #[error("module {} failed to construct: {source}", .path.display())]
    Construct {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// Two derived route paths cannot be served side by side, e.g. the same
    /// segment captured under different parameter names.
    #[error("route {path} conflicts with an earlier route: {source}")]
    RouteConflict {
        path: String,
        #[source]
        source: matchit::InsertError,
    },

    /// A config module does not expose a callable.
    #[error("config module {} does not export a callable", .0.display())]
    NotCallable(PathBuf),
}

/// Errors from [`crate::bootstrap::init`].
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The `PORT` environment variable is set but is not a port number.
    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),

    /// Binding the listener or serving failed.
    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The global tracing subscriber could not be installed.
#[derive(Debug, Error)]
#[error("failed to initialise tracing subscriber: {0}")]
pub struct TelemetryError(#[from] tracing_subscriber::util::TryInitError);
