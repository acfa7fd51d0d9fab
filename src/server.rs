//! HTTP server initialization and runtime setup.
//!
//! Wires the database context, services and router, and runs the Axum server
//! until a shutdown signal arrives.

use crate::application::services::AuthService;
use crate::config::Config;
use crate::infrastructure::database::DatabaseContext;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Database connection manager (connects lazily on first use)
/// - Link, schema and auth services
/// - Axum HTTP server with graceful shutdown
///
/// The database is not contacted at startup, so one that is down is not
/// fatal: the index page reports it and every request retries the connection.
///
/// # Errors
///
/// Returns an error if:
/// - The database URL or schema names are invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    // No I/O yet: the first request that needs the database connects.
    let database = DatabaseContext::from_config(&config)?;

    let auth_service = AuthService::new(config.http_user.clone(), &config.http_password)
        .context("Failed to generate credential hashing key")?;

    let state = AppState::new(
        database.link_repository.clone(),
        database.schema_repository.clone(),
        auth_service,
    );

    let app = app_router(state, &config.static_dir);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.connection.disconnect().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
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

    tracing::info!("Shutdown signal received");
}
