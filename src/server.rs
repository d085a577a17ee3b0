//! HTTP server initialization and runtime setup.
//!
//! Handles the database connection, migrations, service wiring, and Axum
//! server lifecycle.

use crate::api::middleware::auth::Credentials;
use crate::application::services::UrlService;
use crate::config::Config;
use crate::infrastructure::persistence::{SqliteUrlRepository, connect, migrate};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::alias_generator::RandomAliasGenerator;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Apply migrations
/// - URL service with the configured allocation policy
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect(&config.storage).await?;
    tracing::info!(path = %config.storage.path, "Storage initialized");

    migrate(&pool)
        .await
        .context("Failed to run database migrations")?;

    let repository = Arc::new(SqliteUrlRepository::with_timeout(
        Arc::new(pool),
        config.storage.op_timeout(),
    ));
    let url_service = Arc::new(UrlService::new(
        repository,
        Arc::new(RandomAliasGenerator),
        config.allocation_policy(),
    ));

    let state = AppState::new(
        url_service,
        Credentials::new(&config.auth_user, &config.auth_password),
    );

    let app = app_router(state, config.request_timeout());

    let listener = tokio::net::TcpListener::bind(config.listen_addr.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Terminate signal received, starting graceful shutdown");
}
