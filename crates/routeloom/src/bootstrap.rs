//! Startup: settings → app → config → routes → fallback → listener.
//!
//! The order is fixed. Config modules register middleware the routes rely
//! on, and the fallback must come after every explicit route.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::app::App;
use crate::binder::{apply_config, apply_routes, configure_spa};
use crate::error::{BootstrapError, LoadError};
use crate::module::Loader;
use crate::settings::{resolve_port, Overrides, Settings, PORT_ENV};

/// Run every binder against a fresh [`App`] and compile it.
///
/// # Errors
///
/// Any discovery or binding failure. No router is produced in that case.
pub fn build(settings: Settings, loader: &Loader) -> Result<Router, LoadError> {
    let mut app = App::new(settings);

    apply_config(&mut app, loader)?;
    apply_routes(&mut app, loader)?;
    configure_spa(&mut app);

    app.into_router()
}

/// Merge `overrides`, build the router and serve it until shutdown.
///
/// The listen port is `PORT` from the environment when set and non-empty,
/// else the merged setting.
///
/// # Errors
///
/// Returns an error if building fails, `PORT` is malformed, or the listener
/// cannot be bound.
pub async fn init(overrides: Overrides, loader: &Loader) -> Result<(), BootstrapError> {
    let settings = Settings::merge(overrides);
    let env_port = std::env::var(PORT_ENV).ok();
    let port = resolve_port(settings.port, env_port.as_deref())?;

    let router = build(settings, loader)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    serve(listener, router).await
}

/// Serve `router` on `listener` with graceful shutdown.
///
/// # Errors
///
/// Returns an error if the server fails while running.
pub async fn serve(listener: TcpListener, router: Router) -> Result<(), BootstrapError> {
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    info!("shutdown signal received");
}
