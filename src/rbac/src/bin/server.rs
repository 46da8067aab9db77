//! # Catalog RBAC Server
//!
//! HTTP front end for the catalog-backed role manager. Serves inheritance
//! checks from a catalog snapshot loaded at startup.
//!
//! ## Endpoints
//!
//! - `POST /v1/has-link` - Group inheritance check
//! - `GET /health` - Health check
//!
//! ## Configuration
//!
//! Environment variables:
//! - `PORT` - HTTP server port (default: 8080)
//! - `CATALOG_SNAPSHOT` - Catalog snapshot JSON path (required)
//! - `RBAC_MAX_BATCH_SIZE` - Refs per `parentOf` query (default: 100)
//! - `RBAC_TRACE_TRAVERSAL` - Per-round traversal tracing (default: false)
//! - `RUST_LOG` - Log level (default: info)

use anyhow::Context;
use axum::serve;
use catalog_rbac::http::{create_router, AppState};
use catalog_rbac::{
    CatalogRoleManager, HierarchyResolver, InMemoryDirectory, ServerConfig, TracingSink,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received SIGTERM signal");
        }
    }

    info!("Starting graceful shutdown");
}

/// Main server entrypoint
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Catalog RBAC Server v{}", catalog_rbac::VERSION);

    let config = ServerConfig::from_env().context("invalid server configuration")?;

    info!("Configuration:");
    info!("  Port: {}", config.port);
    info!("  Catalog Snapshot: {}", config.catalog_snapshot.display());
    info!("  Max Batch Size: {}", config.resolver.max_batch_size);
    info!("  Trace Traversal: {}", config.resolver.trace_traversal);

    let directory = InMemoryDirectory::from_path(&config.catalog_snapshot)
        .await
        .context("failed to load catalog snapshot")?;
    info!("Loaded {} groups from catalog snapshot", directory.len());

    let resolver = HierarchyResolver::with_config(
        Arc::new(directory),
        Arc::new(TracingSink),
        config.resolver.clone(),
    )?;
    let state = AppState::new(Arc::new(CatalogRoleManager::new(resolver)));

    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shut down gracefully");
    Ok(())
}
