use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::Router;
use configs::{AppConfig, StorageConfig};
use service::storage::JsonFileStore;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Prepare the data file and wrap it in handler state.
pub async fn build_state(storage: &StorageConfig) -> Result<AppState, StartupError> {
    common::env::ensure_data_dir(&storage.data_file).await?;

    let store = JsonFileStore::new(&storage.data_file);
    if storage.create_if_missing {
        store.create_if_missing().await?;
    }
    info!(file = %store.path().display(), "using data file");
    Ok(AppState::new(Arc::new(store)))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let ip: IpAddr = cfg
        .server
        .host
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad host {:?}: {e}", cfg.server.host)))?;
    Ok(SocketAddr::new(ip, cfg.server.port))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, shutting down"),
        Err(e) => {
            warn!(event = "signal_unavailable", error = %e, "cannot listen for Ctrl+C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}

/// Build the app from an explicit config and serve until Ctrl+C.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg.storage).await?;
    let app: Router = routes::build_router(state, routes::build_cors());

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server running on port {}", cfg.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
