//! Server bootstrap: bind, serve, shut down.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::app::create_app;
use crate::config::ServerConfig;
use crate::error::AppError;

/// Bind the listen socket.
///
/// # Errors
///
/// Returns `AppError::Bind` if the address is unavailable. The caller is
/// expected to abort startup; binding is never retried.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, AppError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| AppError::Bind { addr, source })
}

/// Serve `router` on `listener` until `shutdown` resolves, then drain
/// in-flight requests.
///
/// # Errors
///
/// Returns `AppError::Server` on I/O failure.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Build the application and serve it until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the application cannot be built, the address cannot
/// be bound, or serving fails.
pub async fn run(config: &ServerConfig) -> Result<(), AppError> {
    run_until(config, shutdown_signal()).await
}

/// Build the application and serve it until `shutdown` resolves.
///
/// The application is built before the socket is bound, so every
/// configuration error surfaces before the server can accept a connection.
///
/// # Errors
///
/// Returns an error if the application cannot be built, the address cannot
/// be bound, or serving fails.
pub async fn run_until<F>(config: &ServerConfig, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_app()?;
    let listener = bind(config.socket_addr()).await?;
    serve(listener, app.into_router(), shutdown).await
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
