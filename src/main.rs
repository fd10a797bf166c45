//! Recipes API - A CRUD server for recipes with tag search

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recipes_api::api::create_router_with_timeout;
use recipes_api::seed::load_seed_file;
use recipes_api::store::{MemoryStore, RecipeStore, SqliteStore};
use recipes_api::{AppState, Config, StoreBackend};

/// Main entry point for the recipes server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the configured store
/// 4. Bulk-load the seed file, if one is configured
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipes_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recipes API server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, port={}, seed_file={:?}, request_timeout={}s",
        config.store_backend, config.server_port, config.seed_file, config.request_timeout
    );

    let store = open_store(&config)?;

    if let Some(seed_file) = &config.seed_file {
        let path = seed_file.clone();
        let seed_store = store.clone();
        tokio::task::spawn_blocking(move || load_seed_file(&path, seed_store.as_ref()))
            .await
            .context("seed task panicked")?
            .with_context(|| format!("loading seed file {}", seed_file.display()))?;
    }

    let state = AppState::new(store);
    let app = create_router_with_timeout(state, Duration::from_secs(config.request_timeout));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Opens the store selected by `config.store_backend`.
fn open_store(config: &Config) -> anyhow::Result<Arc<dyn RecipeStore>> {
    let store: Arc<dyn RecipeStore> = match config.store_backend {
        StoreBackend::Memory => {
            info!("Using in-memory recipe store");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Sqlite => {
            let busy_timeout = Duration::from_millis(config.database_busy_timeout_ms);
            let store = SqliteStore::open(&config.database_path, busy_timeout)
                .with_context(|| {
                    format!("opening database {}", config.database_path.display())
                })?;
            info!("Database connection established: {}", config.database_path.display());
            Arc::new(store)
        }
    };
    Ok(store)
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
