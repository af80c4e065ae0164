//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, schema initialization and the Axum server
//! lifecycle.

use crate::application::services::LinkService;
use crate::config::{Config, StoreBackend};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::{AppState, DynLinkService};

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Schema initialization attempts made at startup before serving anyway.
const STARTUP_SCHEMA_ATTEMPTS: usize = 5;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The configured link store (PostgreSQL pool or in-memory)
/// - The store schema, retried with backoff
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// A schema that still cannot be created after the startup retries does not
/// stop the server: the registry retries on the next request.
///
/// # Errors
///
/// Returns an error if:
/// - The database URL is malformed
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config)?;

    let link_service = Arc::new(
        LinkService::new(repository)
            .with_store_timeout(config.store_timeout())
            .with_list_max_limit(config.list_max_limit),
    );

    init_schema(&link_service).await;

    let state = AppState::new(link_service, config.base_url.clone());
    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn build_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    match &config.store {
        StoreBackend::Postgres { database_url } => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                .connect_lazy(database_url)?;
            tracing::info!("PostgreSQL pool configured");
            Ok(Arc::new(PgLinkRepository::new(Arc::new(pool))))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; links are lost on restart");
            Ok(Arc::new(MemoryLinkRepository::new()))
        }
    }
}

async fn init_schema(link_service: &DynLinkService) {
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(STARTUP_SCHEMA_ATTEMPTS - 1);

    if let Err(e) = Retry::start(strategy, || link_service.ensure_schema()).await {
        tracing::warn!(
            "Schema not ready after {} attempts, continuing: {}",
            STARTUP_SCHEMA_ATTEMPTS,
            e
        );
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
